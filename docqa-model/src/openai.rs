//! Generation client for OpenAI-compatible `/completions` endpoints.
//!
//! The completions shape (one prompt in, one text out) matches the
//! text-to-text generation this tool performs, and is served by the same
//! local inference servers as the embedding endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::generator::{GenerationOptions, TextGenerator};

/// Base URL of Ollama's OpenAI-compatible API on its default port.
pub const DEFAULT_GENERATION_BASE_URL: &str = "http://localhost:11434/v1";

/// Default generation model name.
pub const DEFAULT_GENERATION_MODEL: &str = "flan-t5-base";

/// A [`TextGenerator`] backed by an OpenAI-compatible `/completions`
/// endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_model::{GenerationOptions, OpenAiGenerator};
///
/// let generator = OpenAiGenerator::new("http://localhost:11434/v1", GenerationOptions::default())
///     .with_model("flan-t5-base");
/// ```
pub struct OpenAiGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    options: GenerationOptions,
    api_key: Option<String>,
}

impl OpenAiGenerator {
    /// Create a client against the given base URL with the given options.
    /// Uses the default model and no API key.
    pub fn new(base_url: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_GENERATION_MODEL.to_string(),
            options,
            api_key: None,
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a bearer token for servers that require one.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url)
    }

    fn generation_error(&self, message: String) -> ModelError {
        ModelError::Generation { backend: self.model.clone(), message }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            max_tokens = self.options.max_output_tokens,
            "requesting completion"
        );

        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.options.max_output_tokens,
            temperature: self.options.temperature,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(model = %self.model, error = %e, "completion request failed");
            self.generation_error(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(model = %self.model, %status, "generation server returned an error");
            return Err(self.generation_error(format!("server returned {status}: {body}")));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| self.generation_error(format!("failed to decode response: {e}")))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| self.generation_error("server returned no choices".to_string()))?;

        debug!(model = %self.model, answer_chars = text.chars().count(), "completion received");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_model() {
        let generator =
            OpenAiGenerator::new(DEFAULT_GENERATION_BASE_URL, GenerationOptions::default());
        assert_eq!(generator.name(), "flan-t5-base");
        assert_eq!(generator.endpoint(), "http://localhost:11434/v1/completions");
    }

    #[test]
    fn with_model_changes_the_reported_name() {
        let generator = OpenAiGenerator::new("http://localhost:8080/v1/", GenerationOptions::default())
            .with_model("qwen2.5");
        assert_eq!(generator.name(), "qwen2.5");
        assert_eq!(generator.endpoint(), "http://localhost:8080/v1/completions");
    }

    #[test]
    fn request_serializes_without_null_temperature() {
        let body = CompletionRequest {
            model: "m",
            prompt: "p",
            max_tokens: 256,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("temperature").is_none());
        assert_eq!(json["max_tokens"], 256);
    }
}
