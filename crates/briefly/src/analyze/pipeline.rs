use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::provider::{GeminiClient, SummaryProvider};
use crate::summarizer::{
    MAX_BULLETS, NAIVE_MAX_SENTENCES, extract_title, generate_bullets, naive_summarize,
};

use super::extract::extract_response_text;
use super::json_block::{parse_json_block, structured_summary};
use super::normalize::normalize_input;
use super::prompts::build_summary_prompt;
use super::types::{AnalyzeError, AnalyzeRequest, AnalyzeResult, Summary};

const PROVIDER_DEFAULT_TITLE: &str = "Summary";
const LOCAL_DEFAULT_TITLE: &str = "Summary (local)";

/// Runs one `/analyze` request from input to result.
///
/// Holds no per-request state; clones share the same provider.
#[derive(Clone, Default)]
pub struct Analyzer {
    provider: Option<Arc<dyn SummaryProvider>>,
}

impl Analyzer {
    /// Analyzer that always uses the local summarizer
    pub fn local() -> Self {
        Self { provider: None }
    }

    /// Analyzer that delegates to `provider`
    pub fn with_provider(provider: Arc<dyn SummaryProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Build a Gemini-backed analyzer when the provider is configured,
    /// a local one otherwise.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        if config.is_configured() {
            Ok(Self::with_provider(Arc::new(GeminiClient::new(config)?)))
        } else {
            info!("No provider configured, using local summarizer");
            Ok(Self::local())
        }
    }

    /// Name of the active provider, if any
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Analyze a request.
    ///
    /// Only [`AnalyzeError::InvalidInput`] is an error; provider failures
    /// come back as [`AnalyzeResult::Failed`]. A failing provider never
    /// triggers the local fallback.
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> std::result::Result<AnalyzeResult, AnalyzeError> {
        let text = normalize_input(request)?;

        let Some(provider) = &self.provider else {
            debug!("Summarizing {} chars locally", text.chars().count());
            return Ok(summarize_locally(&text));
        };

        debug!(
            "Summarizing {} chars with provider {}",
            text.chars().count(),
            provider.name()
        );

        let prompt = build_summary_prompt(&text);
        match provider.generate(&prompt).await {
            Ok(body) => Ok(summarize_provider_output(body)),
            Err(e) => {
                warn!(
                    "Provider {} call failed ({}): {}: {}",
                    provider.name(),
                    e.category(),
                    e,
                    e.details()
                );
                Ok(AnalyzeResult::from(e))
            }
        }
    }
}

/// Turn a successful provider body into a result.
///
/// A complete `{title, bullets}` object in the model text is returned as-is;
/// otherwise the text is summarized locally and the body attached.
pub fn summarize_provider_output(body: Value) -> AnalyzeResult {
    let summary_text = extract_response_text(&body);

    if let Some(summary) = parse_json_block(&summary_text).and_then(structured_summary) {
        return AnalyzeResult::Structured { summary };
    }

    debug!("Provider output has no summary object, structuring locally");
    let bullets = generate_bullets(&summary_text, MAX_BULLETS);
    let title = extract_title(&summary_text)
        .filter(|t| !t.is_empty())
        .or_else(|| bullets.first().cloned())
        .unwrap_or_else(|| PROVIDER_DEFAULT_TITLE.to_string());

    AnalyzeResult::Derived {
        summary: Summary { title, bullets },
        raw_response: body,
    }
}

/// Summarize `text` without a provider.
pub fn summarize_locally(text: &str) -> AnalyzeResult {
    let naive = naive_summarize(text, NAIVE_MAX_SENTENCES);
    let bullets = generate_bullets(&naive, MAX_BULLETS);
    let title = extract_title(&naive)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| LOCAL_DEFAULT_TITLE.to_string());

    AnalyzeResult::fallback(Summary { title, bullets })
}
