//! Chunking configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters controlling how document text is split into chunks.
///
/// Sizes are measured in Unicode scalar values (chars), not bytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum chunk length in chars. Every chunk except possibly the
    /// last is at most this long.
    pub chunk_size: usize,
    /// Number of chars shared between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 800, chunk_overlap: 50 }
    }
}

impl ChunkingConfig {
    /// Create a new builder for constructing a [`ChunkingConfig`].
    pub fn builder() -> ChunkingConfigBuilder {
        ChunkingConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`ChunkingConfig`].
#[derive(Debug, Clone, Default)]
pub struct ChunkingConfigBuilder {
    config: ChunkingConfig,
}

impl ChunkingConfigBuilder {
    /// Set the maximum chunk length in chars.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in chars.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Build the [`ChunkingConfig`], validating that the parameters are
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or if
    /// `chunk_overlap >= chunk_size` (the chunk window could never
    /// advance).
    pub fn build(self) -> Result<ChunkingConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        Ok(self.config)
    }
}
