//! # docqa-engine
//!
//! Session orchestration for the docqa document question-answering tool.
//!
//! A [`QaSession`] owns the session-scoped model handles (one embedder,
//! one generator, created once and reused for every question) and exposes
//! the two operations the surrounding shell needs:
//!
//! - [`QaSession::ingest`] — extract text from a PDF, chunk it, and build
//!   the in-memory chunk index, producing an [`IndexedDocument`];
//! - [`QaSession::ask`] — retrieve the most relevant chunk for a question
//!   and generate an answer from it.
//!
//! The library holds no document state itself: the shell owns the
//! [`IndexedDocument`] and drops it when a new document is loaded or the
//! session ends.

pub mod error;
pub mod prompt;
pub mod session;

pub use error::{QaError, Result};
pub use prompt::{FALLBACK_ANSWER, build_prompt};
pub use session::{
    Answer, DEFAULT_CHUNK_LIMIT, IndexedDocument, MAX_CHUNK_LIMIT, MIN_CHUNK_LIMIT, QaSession,
    SessionOptions,
};
