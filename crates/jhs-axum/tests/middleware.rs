//! # Integration Tests for jhs-axum
//!
//! Drives a small router through the validation layer with
//! `tower::ServiceExt::oneshot`: accepted requests reach the handler with
//! their body intact, rejected ones get the structured error body.

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::Router;
use http_body_util::BodyExt;
use jhs_axum::{ErrorBody, HyperSchemaLayer, LayerConfig};
use jhs_validator::{RequestValidator, ValidatorConfig};
use serde_json::json;
use tower::ServiceExt;

fn validator(config: ValidatorConfig) -> RequestValidator {
    let document = json!({
        "links": [
            {
                "rel": "create",
                "method": "POST",
                "href": "/hello",
                "schema": {
                    "type": "object",
                    "required": ["a"],
                    "properties": {"a": {"type": "string"}}
                }
            },
            {
                "rel": "instances",
                "method": "GET",
                "href": "/hello",
                "schema": {
                    "type": "object",
                    "properties": {"lang": {"enum": ["en", "ja"]}}
                }
            }
        ]
    });
    RequestValidator::from_document(document, config).unwrap()
}

/// Router whose handlers echo what they received.
fn test_app(config: ValidatorConfig, layer_config: LayerConfig) -> Router {
    let router = Router::new()
        .route(
            "/hello",
            post(|body: Bytes| async move { body }).get(|| async { "hello" }),
        )
        .route("/raw", post(|body: Bytes| async move { body }));
    HyperSchemaLayer::new(validator(config), layer_config).apply(router)
}

fn default_app() -> Router {
    test_app(ValidatorConfig::default(), LayerConfig::default())
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::http::Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn error_body(response: axum::http::Response<Body>) -> ErrorBody {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// -- Entity validation --------------------------------------------------------

#[tokio::test]
async fn test_valid_body_reaches_handler_unchanged() {
    let payload = r#"{ "a" : "x",  "extra": [1, 2] }"#;
    let response = default_app().oneshot(post_json("/hello", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, Bytes::from_static(payload.as_bytes()));
}

#[tokio::test]
async fn test_schema_mismatch_is_400_with_violations() {
    let response = default_app()
        .oneshot(post_json("/hello", r#"{"a":1}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.expect("violations should be listed");
    assert_eq!(details[0]["instance_path"], "/a");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let response = default_app()
        .oneshot(post_json("/hello", r#"{"a":"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_none());
}

#[tokio::test]
async fn test_empty_body_is_not_validated() {
    let response = default_app().oneshot(post_json("/hello", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_undeclared_route_passes() {
    let response = default_app()
        .oneshot(post_json("/raw", r#"{"anything": true}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, Bytes::from_static(br#"{"anything": true}"#));
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let app = test_app(ValidatorConfig::default(), LayerConfig { max_body_bytes: 8 });
    let response = app
        .oneshot(post_json("/hello", r#"{"a":"far too long"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_body(response).await.error.code, "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_undeclared_route_is_not_buffered_or_limited() {
    let app = test_app(ValidatorConfig::default(), LayerConfig { max_body_bytes: 8 });
    let payload = r#"{"a":"far too long for the limit"}"#;
    let response = app.oneshot(post_json("/raw", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, Bytes::from_static(payload.as_bytes()));
}

#[tokio::test]
async fn test_latin1_charset_ascii_body_is_accepted() {
    for uri in ["/hello", "/raw"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json; charset=ISO-8859-1")
            .body(Body::from(r#"{"a":"x"}"#))
            .unwrap();
        let response = default_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_bytes(response).await, Bytes::from_static(br#"{"a":"x"}"#));
    }
}

// -- Query validation ---------------------------------------------------------

#[tokio::test]
async fn test_query_validation() {
    let ok = Request::builder().uri("/hello?lang=ja").body(Body::empty()).unwrap();
    let response = default_app().oneshot(ok).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, Bytes::from_static(b"hello"));

    let bad = Request::builder().uri("/hello?lang=fr").body(Body::empty()).unwrap();
    let response = default_app().oneshot(bad).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Media types --------------------------------------------------------------

fn post_text(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/hello")
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_non_json_passes_when_lenient() {
    let response = default_app().oneshot(post_text("not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, Bytes::from_static(b"not json"));
}

#[tokio::test]
async fn test_non_json_is_415_when_strict() {
    let app = test_app(ValidatorConfig::strict(), LayerConfig::default());
    let response = app.oneshot(post_text("not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "UNSUPPORTED_MEDIA_TYPE");
    assert!(body.error.message.contains("text/plain"));
}
