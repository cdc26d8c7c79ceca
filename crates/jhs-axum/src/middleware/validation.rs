//! # Hyper-Schema Validation Middleware
//!
//! Validates each request against its declared route before it reaches a
//! handler. The validator's [`Dispatch`] plan decides how much of the
//! request is read:
//!
//! - `Skip`: the request passes through untouched.
//! - `Query`: validated from the head alone; the body stream is not polled.
//! - `Entity`: if a route is declared, the body is buffered up to the
//!   configured limit, validated, and handed on as the same bytes. Bodies
//!   of undeclared routes are streamed through unread.

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use http_body_util::LengthLimitError;
use jhs_validator::{BufferedRequest, ConfigError, Dispatch, RequestValidator};

use crate::error::Rejection;

/// Body limit applied when none is configured: 2 MiB.
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Settings for the Axum layer itself.
///
/// `max_body_bytes` only bounds bodies the layer buffers: JSON entity
/// requests to a declared route. Requests to undeclared routes and non-JSON
/// requests pass through unbuffered, so any limit on them is the
/// application's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerConfig {
    /// Largest request body buffered for validation.
    pub max_body_bytes: usize,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl LayerConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `JHS_MAX_BODY_BYTES` (default: 2097152)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the variable is not a byte
    /// count.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("JHS_MAX_BODY_BYTES") {
            Ok(raw) => Self::parse_max_body_bytes(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_max_body_bytes(raw: &str) -> Result<Self, ConfigError> {
        let max_body_bytes = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            var: "JHS_MAX_BODY_BYTES".to_string(),
            reason: format!("'{raw}' is not a byte count: {e}"),
        })?;
        Ok(Self { max_body_bytes })
    }
}

/// Shared state of [`validation_middleware`].
#[derive(Debug, Clone)]
pub struct HyperSchemaLayer {
    validator: RequestValidator,
    config: LayerConfig,
}

impl HyperSchemaLayer {
    pub fn new(validator: RequestValidator, config: LayerConfig) -> Self {
        Self { validator, config }
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    pub fn config(&self) -> LayerConfig {
        self.config
    }

    /// Wrap every route of `router` with validation.
    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(from_fn_with_state(self, validation_middleware))
    }
}

/// Middleware that rejects requests whose query or body does not match the
/// declared route schema.
pub async fn validation_middleware(
    State(layer): State<HyperSchemaLayer>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let enc_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(jhs_core::media::essence);

    let plan = match layer.validator.plan(parts.method.as_str(), enc_type.as_deref()) {
        Ok(plan) => plan,
        Err(err) => return reject(&parts, Rejection::from(err)),
    };

    match plan {
        Dispatch::Skip => next.run(Request::from_parts(parts, body)).await,
        Dispatch::Query => {
            let view = BufferedRequest::from_parts(parts, Bytes::new());
            if let Err(err) = layer.validator.validate(&view) {
                let (parts, _) = view.into_inner().into_parts();
                return reject(&parts, Rejection::from(err));
            }
            let (parts, _) = view.into_inner().into_parts();
            next.run(Request::from_parts(parts, body)).await
        }
        Dispatch::Entity => {
            if !layer
                .validator
                .has_route(parts.method.as_str(), parts.uri.path(), enc_type.as_deref())
            {
                return next.run(Request::from_parts(parts, body)).await;
            }
            let limit = layer.config.max_body_bytes;
            if declared_length(&parts).is_some_and(|len| len > limit as u64) {
                return reject(&parts, Rejection::PayloadTooLarge { limit });
            }
            let bytes = match axum::body::to_bytes(body, limit).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    let inner = err.into_inner();
                    let rejection = if inner.is::<LengthLimitError>() {
                        Rejection::PayloadTooLarge { limit }
                    } else {
                        Rejection::UnreadableBody(inner.to_string())
                    };
                    return reject(&parts, rejection);
                }
            };

            let view = BufferedRequest::from_parts(parts, bytes);
            if let Err(err) = layer.validator.validate(&view) {
                let (parts, _) = view.into_inner().into_parts();
                return reject(&parts, Rejection::from(err));
            }
            next.run(view.into_inner().map(Body::from)).await
        }
    }
}

fn declared_length(parts: &Parts) -> Option<u64> {
    parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn reject(parts: &Parts, rejection: Rejection) -> Response {
    let (status, code) = rejection.status_and_code();
    tracing::warn!(
        method = %parts.method,
        path = parts.uri.path(),
        status = status.as_u16(),
        code,
        error = %rejection,
        "request rejected by hyper-schema validation"
    );
    rejection.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(LayerConfig::default().max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_max_body_bytes() {
        assert_eq!(
            LayerConfig::parse_max_body_bytes(" 1024 ").unwrap().max_body_bytes,
            1024
        );
        let err = LayerConfig::parse_max_body_bytes("2MiB").unwrap_err();
        assert!(err.to_string().contains("JHS_MAX_BODY_BYTES"));
    }

    #[test]
    fn test_from_env_without_var_is_default() {
        assert_eq!(LayerConfig::from_env().unwrap(), LayerConfig::default());
    }
}
