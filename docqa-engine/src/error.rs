//! The session-level error taxonomy.
//!
//! Every failure is terminal to its stage and carries a human-readable
//! message for the shell to display; nothing is silently recovered or
//! retried.

use thiserror::Error;

use docqa_extract::ExtractError;
use docqa_model::ModelError;
use docqa_rag::RagError;

/// Errors surfaced to the shell by a [`QaSession`](crate::QaSession).
#[derive(Debug, Error)]
pub enum QaError {
    /// The file could not be read or parsed as a PDF. Blocking; no
    /// partial processing continues.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Extraction succeeded but produced zero usable chunks (for example
    /// a scanned-image-only PDF). No index is built and no question can
    /// be answered.
    #[error("no usable text found in the document")]
    EmptyContent,

    /// A chunking, embedding, or index failure — including the defensive
    /// zero-chunk precondition on index construction.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// Retrieval produced no candidate chunk for a question.
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// The generative model invocation failed. Not retried; the user may
    /// resubmit the question.
    #[error(transparent)]
    Generation(#[from] ModelError),
}

/// A convenience result type for session operations.
pub type Result<T> = std::result::Result<T, QaError>;
