//! Error types for the `docqa-model` crate.

use thiserror::Error;

/// Errors that can occur while invoking a generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model invocation failed: transport failure, server-side error,
    /// or an undecodable response. Not retried automatically.
    #[error("generation error ({backend}): {message}")]
    Generation {
        /// The model or backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An invalid generation configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
