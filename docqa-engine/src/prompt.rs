//! Prompt construction for answer generation.

/// The sentence the model is instructed to emit when the retrieved
/// context does not contain the answer.
pub const FALLBACK_ANSWER: &str =
    "I couldn't find enough information to answer that question.";

/// Build the generation prompt: the retrieved chunk as context, the
/// user's question, and the instruction to answer only from the context.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Please provide a clear and concise answer to the question based on the given context.\n\
         If the context doesn't contain enough information, respond with \"{FALLBACK_ANSWER}\"\n\
         \n\
         Context: {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer:"
    )
}
