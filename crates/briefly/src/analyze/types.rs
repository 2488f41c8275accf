//! Request and response shapes for `/analyze`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::provider::ProviderError;

/// Body of a `POST /analyze` request
///
/// `text` wins over `messages` when both are present and non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Chat transcript entries, any JSON shape
    #[serde(default)]
    pub messages: Option<Vec<Value>>,
    /// Free text to summarize
    #[serde(default)]
    pub text: Option<String>,
    /// Accepted for compatibility; does not influence the output
    #[serde(default = "default_max_tokens", deserialize_with = "lax_int")]
    pub max_tokens: Option<i64>,
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self {
            messages: None,
            text: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl AnalyzeRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn from_messages(messages: Vec<Value>) -> Self {
        Self {
            messages: Some(messages),
            ..Self::default()
        }
    }
}

fn default_max_tokens() -> Option<i64> {
    Some(400)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Integers, integral floats (`400.0`) and numeric strings (`"400"`)
fn lax_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let Some(value) = Option::<IntLike>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match value {
        IntLike::Int(n) => Ok(Some(n)),
        IntLike::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        IntLike::Float(f) => Err(D::Error::custom(format!(
            "max_tokens must be an integer, got {f}"
        ))),
        IntLike::Text(s) => s.trim().parse().map(Some).map_err(|_| {
            D::Error::custom(format!("max_tokens must be an integer, got \"{s}\""))
        }),
    }
}

/// Title plus bullet points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub bullets: Vec<String>,
}

/// The four response shapes of `/analyze`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResult {
    /// The model emitted its own `{title, bullets}` object; passed through verbatim
    Structured { summary: Map<String, Value> },
    /// Summary built locally from the model's prose, with the provider body attached
    Derived { summary: Summary, raw_response: Value },
    /// No provider configured; summary built from the input alone
    Fallback { summary: Summary, fallback: bool },
    /// Provider call failed
    Failed { error: String, details: String },
}

impl AnalyzeResult {
    pub fn fallback(summary: Summary) -> Self {
        AnalyzeResult::Fallback {
            summary,
            fallback: true,
        }
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeResult::Structured { .. } => "structured",
            AnalyzeResult::Derived { .. } => "derived",
            AnalyzeResult::Fallback { .. } => "fallback",
            AnalyzeResult::Failed { .. } => "failed",
        }
    }
}

impl From<ProviderError> for AnalyzeResult {
    fn from(err: ProviderError) -> Self {
        AnalyzeResult::Failed {
            error: err.to_string(),
            details: err.details().to_string(),
        }
    }
}

/// Errors that abort a request before any summary is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Neither `text` nor `messages` carried anything
    #[error("No text or messages provided")]
    InvalidInput,
}
