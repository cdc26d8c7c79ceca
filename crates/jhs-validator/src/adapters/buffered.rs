//! Adapter for `http::Request<Bytes>`, the request type shared by hyper,
//! tower and axum once a body has been collected.

use std::sync::OnceLock;

use bytes::Bytes;
use http::request::Parts;
use http::Request;
use jhs_core::ValidationError;

use super::header_enc_type;
use crate::view::{decode_body, QueryParams, RequestView};

/// A fully buffered `http` request.
///
/// The body is held as [`Bytes`] and never consumed; [`into_inner`]
/// hands the request back with the same bytes for downstream handlers.
///
/// [`into_inner`]: BufferedRequest::into_inner
#[derive(Debug)]
pub struct BufferedRequest {
    request: Request<Bytes>,
    enc_type: Option<String>,
    query: OnceLock<QueryParams>,
}

impl BufferedRequest {
    pub fn new(request: Request<Bytes>) -> Self {
        let enc_type = header_enc_type(request.headers());
        Self {
            request,
            enc_type,
            query: OnceLock::new(),
        }
    }

    /// Reassemble a request from its head and a collected body.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self::new(Request::from_parts(parts, body))
    }

    /// The wrapped request.
    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    /// The buffered body bytes.
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Unwrap the request, body intact.
    pub fn into_inner(self) -> Request<Bytes> {
        self.request
    }
}

impl RequestView for BufferedRequest {
    fn method(&self) -> &str {
        self.request.method().as_str()
    }

    fn href(&self) -> &str {
        self.request.uri().path()
    }

    fn enc_type(&self) -> Option<&str> {
        self.enc_type.as_deref()
    }

    fn body_text(&self) -> Result<&str, ValidationError> {
        decode_body(self.request.body())
    }

    fn query_params(&self) -> &QueryParams {
        self.query
            .get_or_init(|| QueryParams::parse(self.request.uri().query().unwrap_or("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    fn request(method: &str, uri: &str, content_type: Option<&str>, body: &'static str) -> BufferedRequest {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        BufferedRequest::new(builder.body(Bytes::from_static(body.as_bytes())).unwrap())
    }

    #[test]
    fn test_href_excludes_query() {
        let req = request("GET", "/users?page=2&sort=name", None, "");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.href(), "/users");
        assert_eq!(req.query_params().first("page"), Some("2"));
    }

    #[test]
    fn test_enc_type_drops_parameters() {
        let req = request("POST", "/users", Some("Application/JSON; charset=UTF-8"), "{}");
        assert_eq!(req.enc_type(), Some("application/json"));
        assert_eq!(req.body_text().unwrap(), "{}");
    }

    #[test]
    fn test_missing_content_type() {
        let req = request("POST", "/users", None, "{}");
        assert_eq!(req.enc_type(), None);
    }

    #[test]
    fn test_body_is_replayable() {
        let req = request("POST", "/users", Some("application/json"), "{\"a\":1}");
        assert_eq!(req.body_text().unwrap(), "{\"a\":1}");
        assert_eq!(req.body_text().unwrap(), "{\"a\":1}");
        let inner = req.into_inner();
        assert_eq!(inner.body().as_ref(), b"{\"a\":1}");
    }

    #[test]
    fn test_declared_charset_does_not_change_decoding() {
        let req = request("POST", "/users", Some("application/json; charset=ISO-8859-1"), "{\"a\":\"x\"}");
        assert_eq!(req.enc_type(), Some("application/json"));
        assert_eq!(req.body_text().unwrap(), "{\"a\":\"x\"}");
    }

    #[test]
    fn test_invalid_utf8_body_is_malformed() {
        let req = BufferedRequest::new(
            Request::builder()
                .method("POST")
                .uri("/users")
                .body(Bytes::from_static(&[b'{', 0xff, b'}']))
                .unwrap(),
        );
        assert!(matches!(
            req.body_text(),
            Err(ValidationError::MalformedBody { .. })
        ));
    }

    #[test]
    fn test_query_cache_is_computed_once() {
        let req = request("GET", "/users?page=1", None, "");
        let first = req.query_params() as *const QueryParams;
        let second = req.query_params() as *const QueryParams;
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_parts() {
        let (parts, _) = Request::builder()
            .method("PUT")
            .uri("/users/me")
            .body(())
            .unwrap()
            .into_parts();
        let req = BufferedRequest::from_parts(parts, Bytes::from_static(b"{}"));
        assert_eq!(req.method(), "PUT");
        assert_eq!(req.body().as_ref(), b"{}");
    }
}
