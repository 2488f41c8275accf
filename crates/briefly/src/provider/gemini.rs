//! Gemini `generateContent` client
//!
//! Posts the prompt to the configured endpoint with the API key in the
//! `key` query parameter and returns the JSON body as an untyped value.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{BrieflyError, Result};
use crate::provider::{ProviderError, SummaryProvider};

/// HTTP client for a single static Gemini endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl GeminiClient {
    /// Build a client from provider settings.
    ///
    /// Fails when the URL or key is blank; callers should check
    /// [`ProviderConfig::is_configured`] first.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(BrieflyError::Config(
                "Gemini client needs both api_url and api_key".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // A 3xx is reported as a non-success status, never followed
            .redirect(Policy::none())
            .build()
            .map_err(|e| BrieflyError::Config(format!("Failed to build Gemini HTTP client: {e}")))?;

        let api_url = config.api_url.trim().to_string();
        info!(
            "Gemini client initialized for {} (timeout {}s)",
            api_url, config.timeout_secs
        );

        Ok(Self {
            http,
            api_url,
            api_key: config.api_key.trim().to_string(),
        })
    }

    fn request_url(&self) -> String {
        format!("{}?key={}", self.api_url, self.api_key)
    }
}

#[async_trait]
impl SummaryProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<Value, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("Calling Gemini at: {}", self.api_url);

        let response = self
            .http
            .post(self.request_url())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transport(format!("Request timed out: {e}"))
                } else if e.is_connect() {
                    ProviderError::Transport(format!("Failed to connect to provider: {e}"))
                } else {
                    ProviderError::Transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to parse provider response: {e}")))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
