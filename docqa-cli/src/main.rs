//! Interactive shell: load a PDF, ask questions about it.
//!
//! The shell owns the only piece of session state — "is a document
//! currently loaded and indexed" — and delegates everything else to
//! [`docqa_engine::QaSession`]. Loading a new document discards the
//! previous index; nothing is persisted between runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docqa_engine::{IndexedDocument, QaError, QaSession, SessionOptions};
use docqa_model::{GenerationOptions, OpenAiGenerator};
use docqa_rag::OpenAiEmbedder;

#[derive(Parser)]
#[command(name = "docqa", version, about = "Ask questions about a PDF document")]
struct Args {
    /// PDF file to load at startup
    pdf: Option<PathBuf>,

    /// Maximum number of text chunks to index (recognized range 100-2000;
    /// more chunks improve coverage but slow indexing)
    #[arg(long, default_value_t = 500)]
    max_chunks: usize,

    /// Base URL of the OpenAI-compatible embeddings endpoint
    #[arg(long, env = "DOCQA_EMBED_URL", default_value = "http://localhost:11434/v1")]
    embed_url: String,

    /// Embedding model name
    #[arg(long, default_value = "all-minilm")]
    embed_model: String,

    /// Dimensionality of the embedding model's vectors
    #[arg(long, default_value_t = 384)]
    embed_dimensions: usize,

    /// Base URL of the OpenAI-compatible completions endpoint
    #[arg(long, env = "DOCQA_GEN_URL", default_value = "http://localhost:11434/v1")]
    gen_url: String,

    /// Generation model name
    #[arg(long, default_value = "flan-t5-base")]
    gen_model: String,

    /// Upper bound on generated answer tokens
    #[arg(long, default_value_t = 256)]
    max_output_tokens: u32,

    /// API key for the inference endpoints, if they require one
    #[arg(long, env = "DOCQA_API_KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut embedder =
        OpenAiEmbedder::new(&args.embed_url).with_model(&args.embed_model, args.embed_dimensions);
    if let Some(key) = &args.api_key {
        embedder = embedder.with_api_key(key);
    }

    let generation =
        GenerationOptions::builder().max_output_tokens(args.max_output_tokens).build()?;
    let mut generator = OpenAiGenerator::new(&args.gen_url, generation).with_model(&args.gen_model);
    if let Some(key) = &args.api_key {
        generator = generator.with_api_key(key);
    }

    let session = QaSession::new(
        Arc::new(embedder),
        Arc::new(generator),
        SessionOptions::default().with_max_chunks(args.max_chunks),
    );
    debug!(embed_model = %args.embed_model, gen_model = %args.gen_model, "session ready");

    let mut document: Option<IndexedDocument> = None;
    if let Some(path) = &args.pdf {
        document = load_document(&session, path).await;
    } else {
        println!("No document loaded yet. Use :open <path> to load a PDF.");
    }

    println!("Type a question and press Enter. :open <path> loads another PDF; exit quits.");
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("docqa> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    break;
                }
                if let Some(path) = line.strip_prefix(":open") {
                    let path = path.trim();
                    if path.is_empty() {
                        println!("Usage: :open <path-to-pdf>");
                    } else {
                        document = load_document(&session, Path::new(path)).await;
                    }
                    continue;
                }

                match &document {
                    None => println!("No document loaded. Use :open <path> first."),
                    Some(doc) => answer_question(&session, doc, line).await,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Ingest a PDF and report the outcome. Returns the indexed document on
/// success, `None` (with a message already printed) on failure.
async fn load_document(session: &QaSession, path: &Path) -> Option<IndexedDocument> {
    println!("Processing {} ...", path.display());
    match session.ingest(path).await {
        Ok(doc) => {
            println!();
            println!("--- extracted text preview ---");
            println!("{}", doc.preview);
            println!("------------------------------");
            if doc.truncated {
                println!(
                    "Note: using only the first {} chunks for faster processing.",
                    doc.chunk_count
                );
            }
            println!("Indexed {} chunks. Document ready for questions.", doc.chunk_count);
            Some(doc)
        }
        Err(QaError::EmptyContent) => {
            println!("No valid text found in this PDF. Please try another document.");
            None
        }
        Err(e) => {
            println!("Could not load the document: {e}");
            None
        }
    }
}

/// Run one question through retrieval and generation and print the result.
async fn answer_question(session: &QaSession, document: &IndexedDocument, question: &str) {
    println!("Analyzing the document and generating an answer ...");
    match session.ask(document, question).await {
        Ok(answer) => {
            println!();
            println!("{}", answer.text.trim());
            println!();
        }
        Err(e) => {
            println!("Could not answer that question: {e}");
            println!("You can try asking again.");
        }
    }
}
