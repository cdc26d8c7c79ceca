//! # Request Validator
//!
//! Applies the dispatch policy to a [`RequestView`] and validates the
//! selected instance against the matching route.
//!
//! ## Dispatch
//!
//! | Encoding type          | Method              | Instance                   |
//! |------------------------|---------------------|----------------------------|
//! | not `application/json` | any                 | none (skip, or reject if strict) |
//! | `application/json`     | `POST`/`PUT`/`PATCH`| body parsed as JSON        |
//! | `application/json`     | anything else       | query parameters as object |
//!
//! Requests whose `(method, href, encType)` has no route always pass.

use std::path::Path;
use std::sync::Arc;

use jhs_core::{is_entity_method, is_json, EndpointKey, JhsError, ValidationError};
use jhs_schema::{RouteTable, SchemaTableBuilder};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::view::RequestView;

/// What the validator will inspect for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing: the request is not JSON.
    Skip,
    /// The request body.
    Entity,
    /// The query parameters.
    Query,
}

impl Dispatch {
    /// Returns true if the body must be buffered before validating.
    pub fn needs_body(self) -> bool {
        matches!(self, Self::Entity)
    }
}

/// Validates requests against a shared [`RouteTable`].
///
/// Cloning is cheap; clones share the table and configuration.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    routes: Arc<RouteTable>,
    config: Arc<ValidatorConfig>,
}

impl RequestValidator {
    /// Wrap a built route table. `default_enc_type` is reduced to its
    /// lowercase essence, so `"Application/JSON; charset=utf-8"` behaves as
    /// `"application/json"`.
    ///
    /// # Errors
    ///
    /// Returns [`JhsError::Configuration`] if `default_enc_type` is blank.
    pub fn new(routes: Arc<RouteTable>, config: ValidatorConfig) -> Result<Self, JhsError> {
        let config = config
            .normalized()
            .map_err(|e| JhsError::Configuration(e.to_string()))?;
        Ok(Self {
            routes,
            config: Arc::new(config),
        })
    }

    /// Build the route table from an in-memory hyper-schema document.
    ///
    /// # Errors
    ///
    /// Returns any build-time error from
    /// [`SchemaTableBuilder::build`](jhs_schema::SchemaTableBuilder::build).
    pub fn from_document(document: Value, config: ValidatorConfig) -> Result<Self, JhsError> {
        let routes = SchemaTableBuilder::new(document).build()?;
        Self::new(Arc::new(routes), config)
    }

    /// Build the route table from a JSON or YAML document on disk.
    ///
    /// # Errors
    ///
    /// Returns a load error or any build-time error.
    pub fn from_path(path: impl AsRef<Path>, config: ValidatorConfig) -> Result<Self, JhsError> {
        let routes = SchemaTableBuilder::from_path(path)?.build()?;
        Self::new(Arc::new(routes), config)
    }

    /// The shared route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The normalized configuration in effect.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true if a route is declared for the request head.
    ///
    /// Lets a host skip buffering bodies nothing will validate.
    pub fn has_route(&self, method: &str, href: &str, enc_type: Option<&str>) -> bool {
        self.routes
            .match_route(method, href, self.resolve_enc_type(enc_type))
            .is_some()
    }

    /// The encoding type a request is matched under: its own, or the
    /// configured default when it declares none.
    pub fn resolve_enc_type<'a>(&'a self, enc_type: Option<&'a str>) -> &'a str {
        enc_type.unwrap_or(&self.config.default_enc_type)
    }

    /// Decide what to inspect for a request, before reading its body.
    ///
    /// # Errors
    ///
    /// Returns [`JhsError::MediaType`] for a non-JSON request when
    /// `strict_media_type` is set.
    pub fn plan(&self, method: &str, enc_type: Option<&str>) -> Result<Dispatch, JhsError> {
        let enc_type = self.resolve_enc_type(enc_type);
        if !is_json(enc_type) {
            if self.config.strict_media_type {
                return Err(JhsError::MediaType {
                    found: enc_type.to_string(),
                });
            }
            return Ok(Dispatch::Skip);
        }
        if is_entity_method(method) {
            Ok(Dispatch::Entity)
        } else {
            Ok(Dispatch::Query)
        }
    }

    /// Validate a request against its route.
    ///
    /// The view is only read; calling this twice on the same view gives the
    /// same result.
    ///
    /// # Errors
    ///
    /// - [`JhsError::MediaType`] for a non-JSON request in strict mode.
    /// - [`ValidationError::MalformedBody`] if the body is not UTF-8 JSON.
    /// - [`ValidationError::SchemaMismatch`] if the route's schema rejects
    ///   the instance.
    /// - [`JhsError::Configuration`] if the view reports an empty method or
    ///   path.
    pub fn validate<V: RequestView + ?Sized>(&self, request: &V) -> Result<(), JhsError> {
        let method = request.method();
        let href = request.href();
        let enc_type = self.resolve_enc_type(request.enc_type());

        let instance = match self.plan(method, Some(enc_type))? {
            Dispatch::Skip => {
                tracing::debug!(method, href, enc_type, "non-JSON request, skipping validation");
                return Ok(());
            }
            Dispatch::Entity => {
                let body = request.body_text()?;
                if body.is_empty() {
                    tracing::debug!(method, href, "empty request body, skipping validation");
                    return Ok(());
                }
                serde_json::from_str::<Value>(body).map_err(|e| ValidationError::MalformedBody {
                    reason: format!("invalid JSON: {e}"),
                })?
            }
            Dispatch::Query => request
                .query_params()
                .to_json(self.config.duplicate_query_params),
        };

        let key = EndpointKey::of(method, href, enc_type)?;
        self.routes.validate_key(&key, &instance)
    }
}
