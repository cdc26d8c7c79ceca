//! # jhs-validator: Hyper-Schema Request Validation
//!
//! Validates inbound HTTP requests against the routes of a
//! [`RouteTable`](jhs_schema::RouteTable).
//!
//! ## Request Normalization (`view`, `adapters`)
//!
//! [`RequestView`] is the only thing the validator knows about a request:
//! method, path, encoding type, a replayable body, and a query multimap.
//! Each host framework gets a thin adapter:
//!
//! - [`BufferedRequest`]: an `http::Request<Bytes>` whose body is already
//!   buffered. Used by hyper/tower/axum hosts.
//! - [`OwnedRequest`]: loose parts (method, URI, headers, body text) for
//!   hosts that have read the body themselves.
//!
//! ## Dispatch Policy (`validator`)
//!
//! - Non-JSON requests are skipped, or rejected when
//!   [`ValidatorConfig::strict_media_type`] is set.
//! - `POST`/`PUT`/`PATCH` validate the JSON body; empty bodies pass.
//! - Every other method validates its query parameters as a flat JSON
//!   object of strings.
//! - Requests without a declared route pass.
//!
//! ## Crate Policy
//!
//! - Validation is synchronous and never consumes a request body.
//! - Request-time failures are returned as
//!   [`JhsError::MediaType`](jhs_core::JhsError::MediaType) or
//!   [`JhsError::Validation`](jhs_core::JhsError::Validation); hosts map
//!   them to client responses.

pub mod adapters;
pub mod config;
pub mod validator;
pub mod view;

pub use adapters::{BufferedRequest, OwnedRequest};
pub use config::{ConfigError, DuplicateQueryParams, ValidatorConfig};
pub use validator::{Dispatch, RequestValidator};
pub use view::{QueryParams, RequestView};
