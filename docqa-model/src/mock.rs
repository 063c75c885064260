//! A deterministic in-process generator for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ModelError, Result};
use crate::generator::TextGenerator;

/// A [`TextGenerator`] that returns a canned reply and records every
/// prompt it receives.
///
/// # Example
///
/// ```rust,ignore
/// let generator = MockGenerator::new("The answer is 42.");
/// let reply = generator.generate("what is the answer?").await?;
/// assert_eq!(reply, "The answer is 42.");
/// assert_eq!(generator.prompts().await.len(), 1);
/// ```
pub struct MockGenerator {
    reply: String,
    fail_with: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Create a mock that always answers with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), fail_with: None, prompts: Mutex::new(Vec::new()) }
    }

    /// Create a mock whose every invocation fails with `message`, for
    /// exercising generation-failure paths.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: String::new(),
            fail_with: Some(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// The prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        match &self.fail_with {
            Some(message) => Err(ModelError::Generation {
                backend: "mock".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.reply.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
