//! # Route Table Builder
//!
//! Parses a hyper-schema document into a [`RouteTable`].
//!
//! Expected shape:
//!
//! ```json
//! { "links": [
//!     { "href": "/users", "rel": "create", "method": "POST",
//!       "schema": { "type": "object" }, "encType": "application/json" }
//! ] }
//! ```
//!
//! `href` and `rel` are required on every link (`rel` is checked for
//! presence only). A link becomes a route only when it carries both
//! `method` and `schema`. Every structural error names the JSON Pointer of
//! the offending location, e.g. `/links/2/rel`.

use std::path::Path;

use jhs_core::{DocumentError, EndpointKey, JhsError, DEFAULT_ENC_TYPE};
use jsonschema::Draft;
use serde_json::{Map, Value};

use crate::document;
use crate::handle::SchemaCompiler;
use crate::table::RouteTable;

/// Root members shared with every link schema.
const SHARED_DEFINITION_KEYS: [&str; 2] = ["definitions", "$defs"];

/// Builds a [`RouteTable`] from a hyper-schema document.
#[derive(Debug, Clone)]
pub struct SchemaTableBuilder {
    document: Value,
    compiler: SchemaCompiler,
    share_definitions: bool,
}

impl SchemaTableBuilder {
    /// Start from an in-memory document.
    pub fn new(document: Value) -> Self {
        Self {
            document,
            compiler: SchemaCompiler::new(),
            share_definitions: true,
        }
    }

    /// Start from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Load`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, JhsError> {
        Ok(Self::new(document::load_document(path.as_ref())?))
    }

    /// Start from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Load`] if the text is not JSON.
    pub fn from_json_str(text: &str) -> Result<Self, JhsError> {
        Ok(Self::new(document::parse_json("<inline>", text)?))
    }

    /// Compile every link schema with the given draft instead of detecting
    /// it from `$schema`.
    pub fn draft(mut self, draft: Draft) -> Self {
        self.compiler = self.compiler.with_draft(draft);
        self
    }

    /// Whether root `definitions`/`$defs` are copied into link schemas so
    /// that `#/definitions/...` pointers resolve. Enabled by default.
    pub fn share_definitions(mut self, share: bool) -> Self {
        self.share_definitions = share;
        self
    }

    /// Register a schema that link schemas may reference by URI.
    pub fn external_schema(mut self, uri: impl Into<String>, schema: Value) -> Self {
        self.compiler.register(uri, schema);
        self
    }

    /// The document being built from.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Build the route table.
    ///
    /// # Errors
    ///
    /// - [`JhsError::Document`] if the document is structurally malformed or
    ///   a link schema does not compile.
    /// - [`JhsError::DuplicateRoute`] if two links share a key.
    pub fn build(self) -> Result<RouteTable, JhsError> {
        let Self {
            document,
            mut compiler,
            share_definitions,
        } = self;
        let root = document.as_object().ok_or_else(|| DocumentError::WrongType {
            pointer: "(root)".to_string(),
            expected: "an object",
        })?;
        let links = require_key(root, "links", "/links")?
            .as_array()
            .ok_or_else(|| DocumentError::WrongType {
                pointer: "/links".to_string(),
                expected: "an array",
            })?;

        if compiler.draft().is_none() {
            if let Some(draft) = root.get("$schema").and_then(Value::as_str).and_then(draft_from_uri) {
                tracing::debug!(?draft, "using draft declared by the document");
                compiler = compiler.with_draft(draft);
            }
        }

        let shared = if share_definitions {
            shared_definitions(root)
        } else {
            Vec::new()
        };

        let mut table = RouteTable::default();
        for (i, link) in links.iter().enumerate() {
            let pointer = format!("/links/{i}");
            let link = link.as_object().ok_or_else(|| DocumentError::WrongType {
                pointer: pointer.clone(),
                expected: "an object",
            })?;

            // Required by the JSON Hyper-Schema specification.
            let href = require_str(link, "href", &pointer)?;
            require_str(link, "rel", &pointer)?;

            let (Some(method), Some(schema)) = (link.get("method"), link.get("schema")) else {
                tracing::debug!(link = %pointer, href, "link has no method or schema, skipping");
                continue;
            };
            let method = method.as_str().ok_or_else(|| DocumentError::WrongType {
                pointer: format!("{pointer}/method"),
                expected: "a string",
            })?;
            let schema = schema.as_object().ok_or_else(|| DocumentError::WrongType {
                pointer: format!("{pointer}/schema"),
                expected: "an object",
            })?;
            // A non-string encType is ignored in favour of the default.
            let enc_type = link
                .get("encType")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_ENC_TYPE);

            let key = EndpointKey::of(method, href, enc_type).map_err(|_| {
                DocumentError::WrongType {
                    pointer: pointer.clone(),
                    expected: "a link with non-empty href, method, and encType",
                }
            })?;

            let schema = with_shared_definitions(schema, &shared);
            let handle = compiler.compile(&schema).map_err(|reason| {
                DocumentError::InvalidSchema {
                    pointer: format!("{pointer}/schema"),
                    reason,
                }
            })?;

            tracing::debug!(route = %key, "registered route");
            table.insert(key, handle)?;
        }

        tracing::info!(routes = table.len(), links = links.len(), "built hyper-schema route table");
        Ok(table)
    }
}

/// Draft named by a `$schema` URI, including the hyper-schema variants
/// (`http://json-schema.org/draft-04/hyper-schema#`).
fn draft_from_uri(uri: &str) -> Option<Draft> {
    if uri.contains("draft-04") {
        Some(Draft::Draft4)
    } else if uri.contains("draft-06") {
        Some(Draft::Draft6)
    } else if uri.contains("draft-07") {
        Some(Draft::Draft7)
    } else if uri.contains("2019-09") {
        Some(Draft::Draft201909)
    } else if uri.contains("2020-12") {
        Some(Draft::Draft202012)
    } else {
        None
    }
}

fn require_key<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    pointer: &str,
) -> Result<&'a Value, DocumentError> {
    object.get(key).ok_or_else(|| DocumentError::MissingKey {
        pointer: pointer.to_string(),
    })
}

fn require_str<'a>(
    link: &'a Map<String, Value>,
    key: &str,
    link_pointer: &str,
) -> Result<&'a str, DocumentError> {
    let pointer = format!("{link_pointer}/{key}");
    require_key(link, key, &pointer)?
        .as_str()
        .ok_or(DocumentError::WrongType {
            pointer,
            expected: "a string",
        })
}

/// Root-level definition maps that link schemas may point into.
fn shared_definitions(root: &Map<String, Value>) -> Vec<(&'static str, Value)> {
    SHARED_DEFINITION_KEYS
        .iter()
        .filter_map(|name| {
            root.get(*name)
                .filter(|defs| defs.is_object())
                .map(|defs| (*name, defs.clone()))
        })
        .collect()
}

/// Copy shared definitions into `schema` unless it declares its own.
fn with_shared_definitions(schema: &Map<String, Value>, shared: &[(&'static str, Value)]) -> Value {
    let mut schema = schema.clone();
    for (name, defs) in shared {
        if !schema.contains_key(*name) {
            schema.insert((*name).to_string(), defs.clone());
        }
    }
    Value::Object(schema)
}
