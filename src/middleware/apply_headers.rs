//! Header registry middleware.
//! Writes the registry onto every response leaving the router.
//!
//! The registry is applied after the handler has produced its response,
//! so registry headers replace same-named handler headers and removals
//! strip them. Handlers cannot override the registry through this layer.

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::registry::HeaderRegistry;

/// A registry shared by every request passing through the layer.
pub type SharedRegistry = Arc<Mutex<HeaderRegistry>>;

pub fn shared(registry: HeaderRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}

/// Run the handler, then apply the registry to the response headers.
///
/// Install with `axum::middleware::from_fn_with_state(shared, apply_headers)`.
/// Enable reset-after-apply on the registry so per-request mutations do
/// not leak into later responses.
pub async fn apply_headers(
    State(registry): State<SharedRegistry>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    registry
        .lock()
        .expect("header registry mutex poisoned")
        .apply_to(response.headers_mut());
    response
}
