//! Response header registry library.
//!
//! Builds a named set of HTTP response headers, each behaving as one of
//! four value shapes (scalar, timestamp, delimited list, directive set),
//! and writes them onto a response sink.
//!
//! ```
//! use headerset::{HeaderRegistry, RegistryConfig, Seed};
//! use indexmap::IndexMap;
//!
//! let mut registry = HeaderRegistry::new(Seed::Safe, RegistryConfig::default()).unwrap();
//! registry.get("Content-Security-Policy").add_directive("img-src", ["'self'", "data:"]);
//!
//! let mut sink: IndexMap<String, String> = IndexMap::new();
//! registry.apply_to(&mut sink);
//! assert_eq!(sink["X-Frame-Options"], "SAMEORIGIN");
//! assert_eq!(sink["Content-Security-Policy"], "default-src 'self'; img-src 'self' data:");
//! ```

pub mod config;
pub mod error;
pub mod header;
pub mod middleware;
pub mod observability;
pub mod registry;
pub mod sink;

pub use config::{Defaults, RegistryConfig};
pub use error::{HeaderError, Result};
pub use header::{Header, HeaderData, HeaderKind, HeaderValue, TypeHint};
pub use registry::{HeaderRegistry, NicknameScope, NicknameTree, Seed};
pub use sink::ResponseSink;
