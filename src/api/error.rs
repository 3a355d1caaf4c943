//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::{CoreError, FAILURE_MESSAGE};
use crate::form::{FieldError, FormError};

/// Structured error response body for JSON clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The claim failed form checks; nothing was sent to the service.
    #[error("Invalid claim: {0}")]
    InvalidClaim(FormError),
    /// Any reasoning-service failure. The cause is logged, never returned.
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::InvalidClaim(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_CLAIM",
                err.to_string(),
                err.0,
            ),
            ApiError::AnalysisFailed(detail) => {
                tracing::warn!(%detail, "Analysis failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_FAILED",
                    FAILURE_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, Vec::new())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                fields,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Analysis(e) => ApiError::AnalysisFailed(format!("{}: {e}", e.kind())),
            CoreError::Worker(detail) => ApiError::AnalysisFailed(detail),
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::InvalidClaim(err)
    }
}
