//! Generative-model provider abstraction.
//!
//! The quiz service only needs one capability from a provider: turn a prompt
//! and a response schema into JSON text. Keeping it behind a trait lets the
//! router run against a stub in tests.

pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Provider returned no text")]
    EmptyResponse,
}

/// A text provider that can produce schema-constrained JSON.
#[async_trait]
pub trait QuizProvider: Send + Sync {
    /// Generates a response for `prompt`, asking the model to conform to `schema`.
    /// Returns the raw JSON text; the caller is responsible for parsing it.
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, ProviderError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
