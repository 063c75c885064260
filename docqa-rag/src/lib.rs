//! # docqa-rag
//!
//! Retrieval primitives for the docqa document question-answering tool:
//! boundary-aware text chunking, an [`Embedder`] abstraction over
//! pretrained embedding models, and [`ChunkIndex`], a write-once in-memory
//! similarity index.
//!
//! The crate is deliberately session-scoped: a [`ChunkIndex`] is built once
//! from the chunks of a single document and queried until the document is
//! replaced. There are no update or delete operations.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use docqa_rag::{ChunkingConfig, TextChunker, ChunkIndex, OpenAiEmbedder};
//!
//! let config = ChunkingConfig::builder().chunk_size(800).chunk_overlap(50).build()?;
//! let chunks = TextChunker::new(&config).chunk(&document_text);
//!
//! let embedder = OpenAiEmbedder::new("http://localhost:11434/v1");
//! let index = ChunkIndex::build(&chunks, &embedder).await?;
//!
//! let query = embedder.embed("what is this about?").await?;
//! let hits = index.search(&query, 1);
//! ```

pub mod chunking;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;

pub use chunking::{Chunk, TextChunker};
pub use config::{ChunkingConfig, ChunkingConfigBuilder};
pub use embedding::Embedder;
pub use error::{RagError, Result};
pub use index::{ChunkIndex, SearchHit};
pub use openai::OpenAiEmbedder;
