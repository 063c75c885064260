//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in chunking, embedding, or index operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An invalid configuration or a violated precondition, such as
    /// building an index over zero chunks.
    #[error("configuration error: {0}")]
    Config(String),

    /// An error from the embedding backend.
    #[error("embedding error ({backend}): {message}")]
    Embedding {
        /// The embedding backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An inconsistency detected while building or querying the index.
    #[error("index error: {0}")]
    Index(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
