//! The [`TextGenerator`] trait and generation options.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A pretrained generative language model invoked with a single prompt.
///
/// One invocation produces one complete text; there is no streaming and no
/// conversation state. A failure is terminal for that invocation — callers
/// decide whether to resubmit.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`, bounded by the generator's configured
    /// output budget. Returns the model output verbatim.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// The model name, for logging and user-facing messages.
    fn name(&self) -> &str;
}

/// Sampling and budget options applied to every generation call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationOptions {
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature; `None` uses the server default.
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { max_output_tokens: 256, temperature: None }
    }
}

impl GenerationOptions {
    /// Create a new builder for constructing [`GenerationOptions`].
    pub fn builder() -> GenerationOptionsBuilder {
        GenerationOptionsBuilder::default()
    }
}

/// Builder for constructing validated [`GenerationOptions`].
#[derive(Debug, Clone, Default)]
pub struct GenerationOptionsBuilder {
    options: GenerationOptions,
}

impl GenerationOptionsBuilder {
    /// Set the upper bound on generated tokens.
    pub fn max_output_tokens(mut self, max: u32) -> Self {
        self.options.max_output_tokens = max;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    /// Build the [`GenerationOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if `max_output_tokens` is zero.
    pub fn build(self) -> Result<GenerationOptions> {
        if self.options.max_output_tokens == 0 {
            return Err(ModelError::Config(
                "max_output_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(self.options)
    }
}
