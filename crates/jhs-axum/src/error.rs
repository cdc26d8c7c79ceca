//! # Rejection Responses
//!
//! Maps validation failures to structured HTTP responses. Every rejection
//! uses the same JSON body:
//!
//! ```json
//! {"error": {"code": "VALIDATION_ERROR", "message": "...", "details": [...]}}
//! ```
//!
//! `details` is present only for schema mismatches, where it lists every
//! violation. Build-time and configuration errors never reach clients in
//! detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jhs_core::{JhsError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Violations, present only for schema mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Why the middleware refused a request.
#[derive(Error, Debug)]
pub enum Rejection {
    /// The body is malformed or does not match the route's schema (400).
    #[error(transparent)]
    Validation(ValidationError),

    /// Non-JSON request under strict media-type checking (415).
    #[error("request media type '{found}' is not 'application/json'")]
    UnsupportedMediaType { found: String },

    /// The body is larger than the configured limit (413).
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The body stream failed before it could be buffered (400).
    #[error("cannot read request body: {0}")]
    UnreadableBody(String),

    /// Misconfigured validator (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Rejection {
    /// Return the HTTP status code and machine-readable error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::UnsupportedMediaType { .. } => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
            }
            Self::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::UnreadableBody(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(err @ ValidationError::SchemaMismatch { .. }) => {
                serde_json::to_value(err.violations()).ok()
            }
            _ => None,
        }
    }
}

impl From<JhsError> for Rejection {
    fn from(err: JhsError) -> Self {
        match err {
            JhsError::Validation(inner) => Self::Validation(inner),
            JhsError::MediaType { found } => Self::UnsupportedMediaType { found },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "request validation is misconfigured");
                "An internal error occurred".to_string()
            }
            Self::Validation(ValidationError::SchemaMismatch { key, .. }) => {
                format!("request does not match the schema of {key}")
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}
