//! Client-facing request errors
//!
//! Only input problems become HTTP errors. Provider failures are already
//! folded into a 200 response by the pipeline and never reach this type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::analyze::AnalyzeError;

/// Errors returned to the client as `{"detail": ...}`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request parsed but carried nothing to summarize
    #[error("{0}")]
    Analyze(#[from] AnalyzeError),

    /// Request body was not valid JSON for an analyze request
    #[error("{0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Analyze(AnalyzeError::InvalidInput) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
