//! # docqa-model
//!
//! Generative-model clients for docqa. The crate defines the
//! [`TextGenerator`] trait — prompt in, generated text out — together
//! with [`OpenAiGenerator`], a client for OpenAI-compatible `/completions`
//! endpoints (Ollama, vLLM, LocalAI and similar local servers), and
//! [`MockGenerator`] for tests.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use docqa_model::{GenerationOptions, OpenAiGenerator, TextGenerator};
//!
//! let options = GenerationOptions::builder().max_output_tokens(256).build()?;
//! let generator = OpenAiGenerator::new("http://localhost:11434/v1", options);
//! let answer = generator.generate("Answer briefly: why is the sky blue?").await?;
//! ```

pub mod error;
pub mod generator;
pub mod mock;
pub mod openai;

pub use error::{ModelError, Result};
pub use generator::{GenerationOptions, GenerationOptionsBuilder, TextGenerator};
pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;
