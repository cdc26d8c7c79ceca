//! Adapter for hosts that hand over a request as loose parts after reading
//! the body themselves.

use std::sync::OnceLock;

use http::{HeaderMap, Uri};
use jhs_core::ValidationError;

use super::header_enc_type;
use crate::view::{QueryParams, RequestView};

/// A request assembled from method, URI, headers and body text.
#[derive(Debug)]
pub struct OwnedRequest {
    method: String,
    uri: Uri,
    headers: HeaderMap,
    body: String,
    enc_type: Option<String>,
    query: OnceLock<QueryParams>,
}

impl OwnedRequest {
    pub fn new(method: impl Into<String>, uri: Uri, headers: HeaderMap, body: impl Into<String>) -> Self {
        let enc_type = header_enc_type(&headers);
        Self {
            method: method.into(),
            uri,
            headers,
            body: body.into(),
            enc_type,
            query: OnceLock::new(),
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Take the body back.
    pub fn into_body(self) -> String {
        self.body
    }
}

impl RequestView for OwnedRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn href(&self) -> &str {
        self.uri.path()
    }

    fn enc_type(&self) -> Option<&str> {
        self.enc_type.as_deref()
    }

    fn body_text(&self) -> Result<&str, ValidationError> {
        Ok(&self.body)
    }

    fn query_params(&self) -> &QueryParams {
        self.query
            .get_or_init(|| QueryParams::parse(self.uri.query().unwrap_or("")))
    }
}
