//! The [`Embedder`] trait for turning text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A fixed pretrained model that maps text to an embedding vector.
///
/// The same embedder instance must be used for both chunk ingestion and
/// query embedding — vectors from different models are not comparable.
/// The default [`embed_batch`](Embedder::embed_batch) calls
/// [`embed`](Embedder::embed) sequentially; backends with native batching
/// should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of [`dimensions`](Embedder::dimensions) floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// The dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}
