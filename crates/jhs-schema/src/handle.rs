//! # Compiled Schema Handles
//!
//! Wraps the `jsonschema` crate behind two small types:
//!
//! - [`SchemaCompiler`] holds compile-time options (forced draft, locally
//!   registered external schemas) and turns schema documents into handles.
//! - [`SchemaHandle`] is the opaque compiled schema a route owns. Its only
//!   capability is validating a JSON value.
//!
//! ## Schema Resolution
//!
//! Remote `$ref` URIs are never fetched over the network. A local retriever
//! resolves them against schemas registered with
//! [`SchemaCompiler::register`], matching either the full URI or, as a
//! fallback, the last path segment. Anything else fails compilation.

use std::collections::HashMap;
use std::fmt;

use jhs_core::{ValidationViolations, Violation};
use jsonschema::{Draft, Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;

/// Local retriever that resolves `$ref` URIs to registered schemas.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Registered under a bare filename, e.g. "user.schema.json".
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("unresolvable $ref '{uri_str}': no schema registered under this URI").into())
    }
}

/// Compiles schema documents into [`SchemaHandle`]s.
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    draft: Option<Draft>,
    schemas_by_uri: HashMap<String, Value>,
}

impl SchemaCompiler {
    /// A compiler that detects the draft from `$schema` and resolves no
    /// external references.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a JSON Schema draft instead of detecting it.
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// The forced draft, if any.
    pub fn draft(&self) -> Option<Draft> {
        self.draft
    }

    /// Register a schema that `$ref` URIs may point at.
    ///
    /// The schema is indexed under `uri` and, if present, under its own
    /// `$id` (or draft-04 `id`).
    pub fn register(&mut self, uri: impl Into<String>, schema: Value) {
        for id_key in ["$id", "id"] {
            if let Some(id) = schema.get(id_key).and_then(Value::as_str) {
                self.schemas_by_uri.insert(id.to_string(), schema.clone());
            }
        }
        self.schemas_by_uri.insert(uri.into(), schema);
    }

    /// Number of registered external schemas (counting each URI alias).
    pub fn registered_count(&self) -> usize {
        self.schemas_by_uri.len()
    }

    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        if let Some(draft) = self.draft {
            opts.with_draft(draft);
        }
        let retriever = LocalSchemaRetriever {
            schemas_by_uri: self.schemas_by_uri.clone(),
        };
        opts.with_retriever(retriever);
        opts
    }

    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns the engine's message if the schema is invalid or references
    /// an unregistered URI.
    pub fn compile(&self, schema: &Value) -> Result<SchemaHandle, String> {
        let validator = self.build_options().build(schema).map_err(|e| e.to_string())?;
        Ok(SchemaHandle { validator })
    }
}

/// A compiled, reusable JSON Schema.
///
/// `SchemaHandle` is `Send + Sync`; a route table shares its handles across
/// request handlers without locking.
pub struct SchemaHandle {
    validator: Validator,
}

impl SchemaHandle {
    /// Validate `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns the full, non-empty list of violations on mismatch.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationViolations> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations::new(violations))
        }
    }

    /// Returns true if `instance` conforms to the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaHandle").finish_non_exhaustive()
    }
}
