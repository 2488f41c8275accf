//! HTTP handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::analyze::{AnalyzeRequest, AnalyzeResult};

use super::error::ApiError;
use super::server::AppState;

/// Health check endpoint - returns JSON status
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /analyze`
///
/// Returns 200 for every handled outcome, including provider failures.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id);

    let Json(request) = payload.map_err(|rejection| {
        let _guard = span.enter();
        warn!("Rejected analyze body: {}", rejection.body_text());
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let result = state
        .analyzer
        .analyze(&request)
        .instrument(span.clone())
        .await
        .inspect_err(|e| {
            let _guard = span.enter();
            warn!("Rejected analyze request: {e}");
        })?;

    span.in_scope(|| info!("Analyze finished: {}", result.kind()));
    Ok(Json(result))
}
