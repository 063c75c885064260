//! PDF text extraction.
//!
//! Wraps the `pdf-extract` crate behind a small, error-typed API. The
//! extractor produces the concatenation of all extractable page text in
//! page order as one `String`; pages without extractable text (scanned
//! images, vector-only pages) contribute nothing and do not abort the
//! operation.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

/// Number of preview characters shown to the user after extraction.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Errors that can occur while extracting text from a PDF.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// The path that failed to open.
        path: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The bytes could not be parsed as a PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] pdf_extract::OutputError),
}

/// A convenience result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extract all text from the PDF at `path`, in page order.
///
/// Returns an empty string (not an error) for a structurally valid PDF
/// with no extractable text.
///
/// # Errors
///
/// Returns [`ExtractError::Read`] if the file cannot be read and
/// [`ExtractError::Parse`] if it is not a parseable PDF.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read PDF file");
    extract_text_from_bytes(&bytes)
}

/// Extract all text from an in-memory PDF, in page order.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] if the bytes are not a parseable PDF.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    info!(chars = text.chars().count(), "extracted PDF text");
    Ok(text)
}

/// Return the first `max_chars` characters of `text`, cut on a char
/// boundary.
///
/// Used for the extracted-text preview shown to the user before any
/// question is asked.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}
