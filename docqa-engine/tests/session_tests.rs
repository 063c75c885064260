//! End-to-end session tests with deterministic in-process models.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa_engine::{FALLBACK_ANSWER, QaError, QaSession, SessionOptions};
use docqa_model::MockGenerator;
use docqa_rag::{ChunkingConfig, Embedder, RagError};

/// Projects text onto a small fixed vocabulary: dimension `i` counts the
/// occurrences of `VOCAB[i]`. Transparent and fully deterministic, so
/// retrieval outcomes can be asserted exactly.
struct KeywordEmbedder {
    calls: AtomicUsize,
}

const VOCAB: [&str; 8] =
    ["main", "idea", "resource", "efficiency", "rust", "language", "water", "boils"];

impl KeywordEmbedder {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        let words: Vec<&str> =
            lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
        Ok(VOCAB
            .iter()
            .map(|term| words.iter().filter(|w| *w == term).count() as f32)
            .collect())
    }

    fn dimensions(&self) -> usize {
        VOCAB.len()
    }
}

fn session_with(
    embedder: Arc<KeywordEmbedder>,
    generator: Arc<MockGenerator>,
    options: SessionOptions,
) -> QaSession {
    QaSession::new(embedder, generator, options)
}

#[tokio::test]
async fn empty_text_fails_before_any_embedding_work() {
    let embedder = Arc::new(KeywordEmbedder::new());
    let session = session_with(
        embedder.clone(),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default(),
    );

    let err = session.ingest_text("").await.unwrap_err();
    assert!(matches!(err, QaError::EmptyContent));
    assert_eq!(embedder.call_count(), 0);
}

#[tokio::test]
async fn oversized_documents_are_truncated_to_the_configured_maximum() {
    // 30_000 chars at chunk size 10 with no overlap: 3000 chunks.
    let text = "x".repeat(30_000);
    let chunking = ChunkingConfig::builder().chunk_size(10).chunk_overlap(0).build().unwrap();
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default().with_chunking(chunking).with_max_chunks(500),
    );

    let document = session.ingest_text(&text).await.unwrap();
    assert_eq!(document.chunk_count, 500);
    assert!(document.truncated);
    assert_eq!(document.index().len(), 500);
}

#[tokio::test]
async fn small_documents_are_not_truncated() {
    let text = "water boils. ".repeat(20);
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default(),
    );

    let document = session.ingest_text(&text).await.unwrap();
    assert!(!document.truncated);
    assert_eq!(document.chunk_count, document.index().len());
}

#[tokio::test]
async fn preview_shows_the_head_of_the_extracted_text() {
    let text = format!("{}{}", "a".repeat(600), " tail");
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default(),
    );

    let document = session.ingest_text(&text).await.unwrap();
    assert_eq!(document.preview.chars().count(), 500);
    assert!(document.preview.starts_with("aaa"));
}

#[tokio::test]
async fn the_most_relevant_chunk_is_retrieved_and_answered_from() {
    let text = "Rust is a language for systems work.\n\n\
                The main idea is resource efficiency.\n\n\
                Water boils at one hundred degrees.";
    let generator = Arc::new(MockGenerator::new("Resource efficiency drives the design."));
    // Chunk size 40 puts each paragraph in its own chunk, so retrieval
    // has to pick the right one.
    let chunking = ChunkingConfig::builder().chunk_size(40).chunk_overlap(0).build().unwrap();
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        generator.clone(),
        SessionOptions::default().with_chunking(chunking),
    );

    let document = session.ingest_text(text).await.unwrap();
    assert_eq!(document.chunk_count, 3);
    let answer = session.ask(&document, "What is the main idea?").await.unwrap();

    assert!(answer.context.contains("The main idea is resource efficiency."));
    assert!(!answer.text.is_empty());
    assert_ne!(answer.text, FALLBACK_ANSWER);

    // The generator saw a prompt carrying the retrieved context and the
    // original question.
    let prompts = generator.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("The main idea is resource efficiency."));
    assert!(prompts[0].contains("Question: What is the main idea?"));
    assert!(prompts[0].contains(FALLBACK_ANSWER));
}

#[tokio::test]
async fn identical_questions_rerun_retrieval_and_generation() {
    let text = "The main idea is resource efficiency.";
    let generator = Arc::new(MockGenerator::new("Efficiency."));
    let embedder = Arc::new(KeywordEmbedder::new());
    let session = session_with(embedder.clone(), generator.clone(), SessionOptions::default());

    let document = session.ingest_text(text).await.unwrap();
    let ingest_calls = embedder.call_count();

    session.ask(&document, "What is the main idea?").await.unwrap();
    session.ask(&document, "What is the main idea?").await.unwrap();

    // Two questions: two fresh query embeddings, two generations.
    assert_eq!(embedder.call_count(), ingest_calls + 2);
    assert_eq!(generator.prompts().await.len(), 2);
}

#[tokio::test]
async fn generation_failure_is_surfaced_not_retried() {
    let text = "The main idea is resource efficiency.";
    let generator = Arc::new(MockGenerator::failing("model exhausted"));
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        generator.clone(),
        SessionOptions::default(),
    );

    let document = session.ingest_text(text).await.unwrap();
    let err = session.ask(&document, "What is the main idea?").await.unwrap_err();

    assert!(matches!(err, QaError::Generation(_)));
    assert_eq!(generator.prompts().await.len(), 1);
}

#[tokio::test]
async fn missing_file_is_an_extraction_error() {
    let session = session_with(
        Arc::new(KeywordEmbedder::new()),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default(),
    );

    let err = session.ingest(std::path::Path::new("/no/such/file.pdf")).await.unwrap_err();
    assert!(matches!(err, QaError::Extraction(_)));
}

#[tokio::test]
async fn embedding_failures_propagate_as_rag_errors() {
    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> docqa_rag::Result<Vec<f32>> {
            Err(RagError::Embedding {
                backend: "broken".to_string(),
                message: "connection refused".to_string(),
            })
        }
        fn dimensions(&self) -> usize {
            4
        }
    }

    let session = QaSession::new(
        Arc::new(BrokenEmbedder),
        Arc::new(MockGenerator::new("unused")),
        SessionOptions::default(),
    );

    let err = session.ingest_text("some document text").await.unwrap_err();
    assert!(matches!(err, QaError::Rag(RagError::Embedding { .. })));
}
