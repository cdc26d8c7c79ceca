//! # jhs-axum: Hyper-Schema Validation for Axum
//!
//! Puts a [`RequestValidator`](jhs_validator::RequestValidator) in front of
//! an Axum router.
//!
//! ## Architecture
//!
//! - [`HyperSchemaLayer`] carries the validator and the body limit, and is
//!   the state of [`validation_middleware`].
//! - The middleware plans before it reads: non-JSON requests pass straight
//!   through, query-validated requests keep their body stream untouched,
//!   and only entity requests to a declared route are buffered (up to
//!   [`LayerConfig::max_body_bytes`]).
//! - Valid requests continue with the same body bytes. Rejections use the
//!   [`ErrorBody`] JSON shape.
//!
//! ## Usage
//!
//! ```ignore
//! let validator = RequestValidator::from_path("api.hyper-schema.json", ValidatorConfig::from_env()?)?;
//! let app = HyperSchemaLayer::new(validator, LayerConfig::from_env()?).apply(router);
//! ```

pub mod error;
pub mod middleware;

pub use error::{ErrorBody, ErrorDetail, Rejection};
pub use middleware::{validation_middleware, HyperSchemaLayer, LayerConfig};
