//! Generative-language provider abstraction
//!
//! The analyze pipeline talks to the outside world only through
//! [`SummaryProvider`], which returns the provider's raw JSON body untouched.
//! Locating the text inside that body is the job of
//! [`crate::analyze::extract_response_text`].

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failures calling the provider.
///
/// The `Display` text is what clients see in the `error` field; the
/// underlying message goes to `details`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider answered with a non-2xx status
    #[error("Gemini API returned {status}")]
    Status { status: u16, body: String },

    /// Network error, timeout, or a body that is not JSON
    #[error("Gemini call failed")]
    Transport(String),
}

impl ProviderError {
    /// Detail text returned alongside the error summary
    pub fn details(&self) -> &str {
        match self {
            ProviderError::Status { body, .. } => body,
            ProviderError::Transport(message) => message,
        }
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::Status { .. } => "status",
            ProviderError::Transport(_) => "transport",
        }
    }
}

/// Trait for summary providers
///
/// Implementations send a fully built prompt and hand back whatever JSON the
/// provider returned. No retries: one call, one outcome.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Send `prompt` and return the provider's parsed JSON body
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
