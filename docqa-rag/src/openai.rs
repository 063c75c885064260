//! Embedding client for OpenAI-compatible `/embeddings` endpoints.
//!
//! Local inference servers (Ollama, vLLM, LocalAI,
//! text-embeddings-inference) all expose this API shape, so one client
//! covers the locally-hosted sentence-embedding models this tool is meant
//! to run against.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::Embedder;
use crate::error::{RagError, Result};

/// Base URL of Ollama's OpenAI-compatible API on its default port.
pub const DEFAULT_EMBEDDINGS_BASE_URL: &str = "http://localhost:11434/v1";

/// Default embedding model: MiniLM sentence embeddings as served by Ollama.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Dimensionality of `all-minilm` embeddings.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// An [`Embedder`] backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::OpenAiEmbedder;
///
/// let embedder = OpenAiEmbedder::new("http://localhost:11434/v1")
///     .with_model("all-minilm", 384);
/// let vector = embedder.embed("hello world").await?;
/// ```
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    api_key: Option<String>,
}

impl OpenAiEmbedder {
    /// Create a client against the given base URL (e.g.
    /// `http://localhost:11434/v1`). Uses the default model
    /// (`all-minilm`, 384 dimensions) and no API key.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            api_key: None,
        }
    }

    /// Set the model name and its embedding dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    /// Set a bearer token for servers that require one.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// Pull a human-readable message out of an OpenAI-style error body,
/// falling back to the raw body text.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorInner,
    }
    #[derive(Deserialize)]
    struct ErrorInner {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or_else(|| RagError::Embedding {
            backend: self.model.clone(),
            message: "server returned no embedding".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, batch_size = texts.len(), "requesting embeddings");

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&EmbeddingsRequest { model: &self.model, input: texts });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(model = %self.model, error = %e, "embedding request failed");
            RagError::Embedding {
                backend: self.model.clone(),
                message: format!("request failed: {e}"),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(model = %self.model, %status, "embedding server returned an error");
            return Err(RagError::Embedding {
                backend: self.model.clone(),
                message: format!("server returned {status}: {}", error_detail(&body)),
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            RagError::Embedding {
                backend: self.model.clone(),
                message: format!("failed to decode response: {e}"),
            }
        })?;

        if parsed.data.len() != texts.len() {
            return Err(RagError::Embedding {
                backend: self.model.clone(),
                message: format!(
                    "server returned {} embeddings for {} inputs",
                    parsed.data.len(),
                    texts.len()
                ),
            });
        }

        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
