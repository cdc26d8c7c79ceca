//! # Route Table
//!
//! Immutable mapping from [`EndpointKey`] to [`SchemaHandle`]. A table is
//! produced by [`SchemaTableBuilder`](crate::SchemaTableBuilder) and exposes
//! lookups only. Insertion is crate-private and refuses to overwrite an
//! existing key.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use jhs_core::{EndpointKey, JhsError, ValidationError, DEFAULT_ENC_TYPE};
use serde_json::Value;

use crate::handle::SchemaHandle;

/// Routes declared by a hyper-schema document.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<EndpointKey, SchemaHandle>,
}

impl RouteTable {
    /// Insert a route, rejecting a second definition for the same key.
    pub(crate) fn insert(&mut self, key: EndpointKey, schema: SchemaHandle) -> Result<(), JhsError> {
        match self.routes.entry(key) {
            Entry::Occupied(existing) => Err(JhsError::DuplicateRoute {
                key: existing.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(schema);
                Ok(())
            }
        }
    }

    /// Look up the schema registered for `key`.
    pub fn lookup(&self, key: &EndpointKey) -> Option<&SchemaHandle> {
        self.routes.get(key)
    }

    /// Look up the schema for a `(method, href, encType)` triple.
    ///
    /// Returns `None` when no route matches, including for triples with an
    /// empty component (which can never form a key).
    pub fn match_route(&self, method: &str, href: &str, enc_type: &str) -> Option<&SchemaHandle> {
        let key = EndpointKey::of(method, href, enc_type).ok()?;
        self.routes.get(&key)
    }

    /// Same as [`match_route`](Self::match_route) with `encType`
    /// `application/json`.
    pub fn match_default(&self, method: &str, href: &str) -> Option<&SchemaHandle> {
        self.match_route(method, href, DEFAULT_ENC_TYPE)
    }

    /// Validate `instance` against the route for `key`.
    ///
    /// Unmatched routes are not errors: the instance passes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SchemaMismatch`] if the route's schema
    /// rejects the instance.
    pub fn validate_key(&self, key: &EndpointKey, instance: &Value) -> Result<(), JhsError> {
        let Some(schema) = self.routes.get(key) else {
            tracing::debug!(route = %key, "no route declared, skipping validation");
            return Ok(());
        };
        schema.validate(instance).map_err(|violations| {
            JhsError::from(ValidationError::SchemaMismatch {
                key: key.clone(),
                violations,
            })
        })
    }

    /// Shorthand for building a key and calling
    /// [`validate_key`](Self::validate_key).
    ///
    /// # Errors
    ///
    /// Returns [`JhsError::Configuration`] if a component is empty, or a
    /// validation error if the matched schema rejects the instance.
    pub fn validate(
        &self,
        method: &str,
        href: &str,
        enc_type: &str,
        instance: &Value,
    ) -> Result<(), JhsError> {
        let key = EndpointKey::of(method, href, enc_type)?;
        self.validate_key(&key, instance)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table matches nothing.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All route keys, sorted by method, href, then encType.
    pub fn keys(&self) -> Vec<&EndpointKey> {
        let mut keys: Vec<&EndpointKey> = self.routes.keys().collect();
        keys.sort();
        keys
    }
}
