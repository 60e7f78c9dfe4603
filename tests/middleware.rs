//! The axum layer writing registry headers onto responses.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Router,
};
use headerset::middleware::{apply_headers, shared, SharedRegistry};
use headerset::{HeaderRegistry, RegistryConfig, Seed};
use tower::ServiceExt;

async fn handler() -> impl IntoResponse {
    ([("x-powered-by", "axum"), ("content-type", "text/plain")], "ok")
}

fn app(registry: SharedRegistry) -> Router {
    Router::new()
        .route("/", get(handler))
        .layer(from_fn_with_state(registry, apply_headers))
}

fn request() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_safe_headers_written() {
    let registry = HeaderRegistry::new(Seed::Safe, RegistryConfig::default()).unwrap();
    let response = app(shared(registry)).oneshot(request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["content-security-policy"], "default-src 'self'");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(headers["content-type"], "text/plain");
}

#[tokio::test]
async fn test_removal_strips_handler_header() {
    let mut registry = HeaderRegistry::new(Seed::default(), RegistryConfig::default()).unwrap();
    registry.get("hidePoweredBy").remove();

    let response = app(shared(registry)).oneshot(request()).await.unwrap();
    assert!(response.headers().get("x-powered-by").is_none());
}

#[tokio::test]
async fn test_registry_overrides_handler_header() {
    let mut registry = HeaderRegistry::new(Seed::default(), RegistryConfig::default()).unwrap();
    registry
        .get_with("Content-Type", ["text/html", "charset=utf-8"])
        .unwrap();

    let response = app(shared(registry)).oneshot(request()).await.unwrap();
    assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
    assert_eq!(response.headers().get_all("content-type").iter().count(), 1);
}

#[tokio::test]
async fn test_per_request_changes_reset() {
    let config = RegistryConfig {
        reset_after_apply: true,
        ..Default::default()
    };
    let registry = shared(HeaderRegistry::new(Seed::Safe, config).unwrap());
    let app = app(registry.clone());

    registry.lock().unwrap().get("frameguard").set("DENY");
    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.headers()["x-frame-options"], "DENY");

    let second = app.oneshot(request()).await.unwrap();
    assert_eq!(second.headers()["x-frame-options"], "SAMEORIGIN");
}

#[tokio::test]
async fn test_invalid_value_is_skipped() {
    let mut registry = HeaderRegistry::new(Seed::default(), RegistryConfig::default()).unwrap();
    registry.get("X-Broken").set("line\nbreak");
    registry.get("X-Fine").set("yes");

    let response = app(shared(registry)).oneshot(request()).await.unwrap();
    assert!(response.headers().get("x-broken").is_none());
    assert_eq!(response.headers()["x-fine"], "yes");
}
