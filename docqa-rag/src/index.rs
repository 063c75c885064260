//! The write-once in-memory chunk index.
//!
//! [`ChunkIndex`] pairs each chunk's embedding with its text and answers
//! "which stored chunks are most similar to this query vector" by cosine
//! similarity. It is built once per document and never mutated; loading a
//! new document means building a new index.

use tracing::info;

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::{RagError, Result};

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Document-order position of the chunk the hit came from.
    pub chunk_index: usize,
    /// The chunk text.
    pub text: String,
    /// Cosine similarity to the query vector (higher is more similar).
    pub score: f32,
}

#[derive(Debug)]
struct IndexEntry {
    text: String,
    embedding: Vec<f32>,
}

/// An immutable similarity index over the chunks of one document.
#[derive(Debug)]
pub struct ChunkIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl ChunkIndex {
    /// Embed `chunks` and build an index over the (vector, text) pairs.
    ///
    /// The entries keep document order, which is what makes equal-score
    /// results come back in a reproducible order from
    /// [`search`](ChunkIndex::search).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunks` is empty — this is a
    /// precondition check and happens before any embedding work. Returns
    /// [`RagError::Index`] if the embedder yields a vector count that does
    /// not match the chunk count.
    pub async fn build(chunks: &[Chunk], embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RagError::Config(
                "cannot build an index over zero chunks".to_string(),
            ));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Index(format!(
                "embedder produced {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { text: chunk.text.clone(), embedding })
            .collect::<Vec<_>>();

        info!(chunk_count = entries.len(), dimensions = embedder.dimensions(), "built chunk index");

        Ok(Self { dimensions: embedder.dimensions(), entries })
    }

    /// Number of indexed chunks. Always at least one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty. Never true for a built index; present
    /// for API completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality of the stored embedding vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the `k` chunks most similar to `query`, ordered from most to
    /// least similar. Equal scores keep document order (the sort is
    /// stable), so identical queries always return identical results.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .enumerate()
            .map(|(chunk_index, entry)| SearchHit {
                chunk_index,
                text: entry.text.clone(),
                score: cosine_similarity(&entry.embedding, query),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

/// Cosine similarity of two vectors; 0.0 when either has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
