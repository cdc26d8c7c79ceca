//! # Host Adapters
//!
//! One [`RequestView`](crate::RequestView) implementation per host request
//! shape. Every adapter strips `Content-Type` parameters, excludes the query
//! string from `href`, owns a buffered body, and computes its query multimap
//! at most once.

mod buffered;
mod owned;

pub use buffered::BufferedRequest;
pub use owned::OwnedRequest;

use http::header::CONTENT_TYPE;
use http::HeaderMap;

/// Essence of the request's `Content-Type`, if present.
fn header_enc_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(jhs_core::media::essence)
}
