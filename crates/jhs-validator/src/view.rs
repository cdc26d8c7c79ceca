//! # Request View
//!
//! The framework-agnostic shape of an inbound request, and the query
//! multimap every adapter exposes.

use std::collections::HashMap;

use jhs_core::ValidationError;
use serde_json::{Map, Value};

use crate::config::DuplicateQueryParams;

/// A normalized, read-only view of an inbound request.
///
/// Implementations must keep every accessor idempotent: reading the body
/// or query never consumes anything, and repeated calls return the same
/// data.
pub trait RequestView {
    /// The HTTP method, as sent (e.g. `"POST"`).
    fn method(&self) -> &str;

    /// The request path, without the query string.
    fn href(&self) -> &str;

    /// Lowercase `type/subtype` of the `Content-Type` header, without
    /// parameters. `None` if the header is absent or unreadable.
    fn enc_type(&self) -> Option<&str>;

    /// The buffered body as UTF-8 text. Empty if the request has no body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedBody`] if the body is not valid
    /// UTF-8. A `charset` parameter on the request does not change decoding.
    fn body_text(&self) -> Result<&str, ValidationError>;

    /// Decoded query parameters. Computed at most once per view.
    fn query_params(&self) -> &QueryParams;
}

/// Decode a buffered body as UTF-8.
pub(crate) fn decode_body(body: &[u8]) -> Result<&str, ValidationError> {
    std::str::from_utf8(body).map_err(|e| ValidationError::MalformedBody {
        reason: format!("body is not valid UTF-8: {e}"),
    })
}

/// Query parameters in first-appearance order, with every value of a
/// repeated key kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// A key without `=` decodes to an empty value.
    pub fn parse(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Append a value for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// Every value for `key`, in order of appearance.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// The first value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the query carried no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Fold into the flat JSON object a query schema validates.
    ///
    /// Values are always strings; no numeric or boolean coercion happens.
    pub fn to_json(&self, policy: DuplicateQueryParams) -> Value {
        let mut object = Map::new();
        for (key, values) in &self.entries {
            let value = match (policy, values.as_slice()) {
                (DuplicateQueryParams::Array, [single]) => Value::String(single.clone()),
                (DuplicateQueryParams::Array, many) => {
                    Value::Array(many.iter().cloned().map(Value::String).collect())
                }
                (DuplicateQueryParams::First, values) => {
                    Value::String(values.first().cloned().unwrap_or_default())
                }
                (DuplicateQueryParams::Last, values) => {
                    Value::String(values.last().cloned().unwrap_or_default())
                }
            };
            object.insert(key.clone(), value);
        }
        Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (k, v) in iter {
            params.append(k, v);
        }
        params
    }
}
