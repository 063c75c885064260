//! The question-answering session: ingest a document, answer questions.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use docqa_model::TextGenerator;
use docqa_rag::{ChunkIndex, ChunkingConfig, Embedder, TextChunker};

use crate::error::{QaError, Result};
use crate::prompt::build_prompt;

/// Lower bound of the recognized `max_chunks` range.
pub const MIN_CHUNK_LIMIT: usize = 100;
/// Upper bound of the recognized `max_chunks` range.
pub const MAX_CHUNK_LIMIT: usize = 2000;
/// Default `max_chunks` when the user does not configure one.
pub const DEFAULT_CHUNK_LIMIT: usize = 500;

/// Session-level options: the single user-adjustable knob (`max_chunks`)
/// plus the chunking parameters and preview length.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    max_chunks: usize,
    chunking: ChunkingConfig,
    preview_chars: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_chunks: DEFAULT_CHUNK_LIMIT,
            chunking: ChunkingConfig::default(),
            preview_chars: docqa_extract::DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl SessionOptions {
    /// Set the maximum number of chunks passed to indexing. Values
    /// outside [`MIN_CHUNK_LIMIT`]..=[`MAX_CHUNK_LIMIT`] are clamped.
    ///
    /// Fewer chunks trade retrieval coverage for indexing latency.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        let clamped = max_chunks.clamp(MIN_CHUNK_LIMIT, MAX_CHUNK_LIMIT);
        if clamped != max_chunks {
            warn!(requested = max_chunks, used = clamped, "max_chunks outside recognized range");
        }
        self.max_chunks = clamped;
        self
    }

    /// Set the chunking parameters.
    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// The effective maximum chunk count.
    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }
}

/// A document that has been extracted, chunked, and indexed, ready for
/// questions. Owned by the shell; dropped when replaced.
#[derive(Debug)]
pub struct IndexedDocument {
    /// Session-scoped identity of this document load.
    pub id: Uuid,
    /// The first few hundred chars of extracted text, for user inspection.
    pub preview: String,
    /// Number of chunks in the index (after any truncation).
    pub chunk_count: usize,
    /// Whether the chunk sequence was truncated to `max_chunks`.
    pub truncated: bool,
    index: ChunkIndex,
}

impl IndexedDocument {
    /// The underlying chunk index.
    pub fn index(&self) -> &ChunkIndex {
        &self.index
    }
}

/// A generated answer together with the context it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The model output, verbatim.
    pub text: String,
    /// The retrieved chunk the model was shown as context.
    pub context: String,
    /// Similarity score of the retrieved chunk.
    pub score: f32,
}

/// A question-answering session over one document at a time.
///
/// Holds the embedding and generation handles for the lifetime of the
/// session — models are instantiated once, not per question.
pub struct QaSession {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn TextGenerator>,
    options: SessionOptions,
    chunker: TextChunker,
}

impl QaSession {
    /// Create a session from its model handles and options.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn TextGenerator>,
        options: SessionOptions,
    ) -> Self {
        let chunker = TextChunker::new(&options.chunking);
        Self { embedder, generator, options, chunker }
    }

    /// Extract, chunk, and index the PDF at `path`.
    ///
    /// # Errors
    ///
    /// [`QaError::Extraction`] if the file is not a readable PDF;
    /// [`QaError::EmptyContent`] if extraction yields zero usable chunks
    /// (checked before any truncation or embedding work);
    /// [`QaError::Rag`] if embedding or index construction fails.
    pub async fn ingest(&self, path: &Path) -> Result<IndexedDocument> {
        let text = docqa_extract::extract_text(path)?;
        self.ingest_text(&text).await
    }

    /// Chunk and index already-extracted document text.
    pub async fn ingest_text(&self, text: &str) -> Result<IndexedDocument> {
        let preview = docqa_extract::preview(text, self.options.preview_chars).to_string();

        let mut chunks = self.chunker.chunk(text);
        // Emptiness is decided here, before truncation or any embedding
        // work touches the chunk set.
        if chunks.is_empty() {
            warn!("document produced no usable chunks");
            return Err(QaError::EmptyContent);
        }

        let original_count = chunks.len();
        let truncated = original_count > self.options.max_chunks;
        if truncated {
            warn!(
                original_count,
                max_chunks = self.options.max_chunks,
                "truncating chunk sequence before indexing"
            );
            chunks.truncate(self.options.max_chunks);
        }

        let index = ChunkIndex::build(&chunks, self.embedder.as_ref()).await?;
        let id = Uuid::new_v4();
        info!(document_id = %id, chunk_count = chunks.len(), truncated, "document indexed");

        Ok(IndexedDocument { id, preview, chunk_count: chunks.len(), truncated, index })
    }

    /// Answer `question` from `document`: embed the question, retrieve the
    /// single most similar chunk, and generate from it.
    ///
    /// Nothing is cached — asking the same question again re-runs the full
    /// retrieval and generation path.
    ///
    /// # Errors
    ///
    /// [`QaError::Rag`] if question embedding fails;
    /// [`QaError::Generation`] if the model invocation fails (no retry).
    pub async fn ask(&self, document: &IndexedDocument, question: &str) -> Result<Answer> {
        info!(document_id = %document.id, question, "answering question");

        let query = self.embedder.embed(question).await?;
        let hit = document
            .index
            .search(&query, 1)
            .into_iter()
            .next()
            .ok_or_else(|| QaError::Retrieval("index returned no candidate chunk".to_string()))?;
        debug!(
            chunk_index = hit.chunk_index,
            score = hit.score,
            context_chars = hit.text.chars().count(),
            "retrieved context"
        );

        let prompt = build_prompt(&hit.text, question);
        info!(model = self.generator.name(), "generating answer");
        let text = self.generator.generate(&prompt).await?;

        Ok(Answer { text, context: hit.text, score: hit.score })
    }
}
