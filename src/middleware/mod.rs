//! axum integration.
//!
//! # Data Flow
//! ```text
//! request
//!     → Router handlers
//!     → apply_headers (registry.apply_to(response headers))
//!     → response to client
//! ```

pub mod apply_headers;

pub use apply_headers::{apply_headers, shared, SharedRegistry};
