//! # Media Types and Methods
//!
//! Helpers shared by every request adapter: reducing a `Content-Type`
//! header to its `type/subtype` essence, and classifying HTTP methods that
//! carry a request entity.

/// Media type applied when a link definition omits `encType`.
pub const DEFAULT_ENC_TYPE: &str = "application/json";

/// Methods whose request body is validated. All other methods are validated
/// through their query parameters.
pub const ENTITY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

/// Returns true if `method` conventionally carries a request entity.
///
/// The comparison is exact: `"post"` is not entity-bearing.
pub fn is_entity_method(method: &str) -> bool {
    ENTITY_METHODS.contains(&method)
}

/// Returns true if `enc_type` is exactly `application/json`.
pub fn is_json(enc_type: &str) -> bool {
    enc_type == DEFAULT_ENC_TYPE
}

/// Reduce a `Content-Type` value to its lowercase `type/subtype`.
///
/// Parameters such as `charset` are discarded. Returns `None` for a blank
/// header value.
///
/// ```
/// assert_eq!(
///     jhs_core::media::essence("Application/JSON; charset=UTF-8").as_deref(),
///     Some("application/json"),
/// );
/// ```
pub fn essence(content_type: &str) -> Option<String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}
