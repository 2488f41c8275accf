//! Test utilities for briefly
//!
//! A canned [`SummaryProvider`] so pipeline and router tests can run without
//! a network.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::provider::{ProviderError, SummaryProvider};

/// Provider that returns the same outcome on every call and records prompts.
#[derive(Debug)]
pub struct MockProvider {
    outcome: Result<Value, ProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    /// Always answer with `body`
    pub fn returning(body: Value) -> Self {
        Self::with_outcome(Ok(body))
    }

    /// Always fail with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Answer with a Gemini-shaped body whose single part is `text`
    pub fn gemini_text(text: &str) -> Self {
        Self::returning(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]}
            }]
        }))
    }

    fn with_outcome(outcome: Result<Value, ProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent `generate` call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SummaryProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
