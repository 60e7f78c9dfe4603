//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry / sinks produce:
//!     → tracing events (header created, rejected, applied, reset)
//!     → metrics.rs (counters for written, removed and rejected headers)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG)
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers and recorders is
//!   left to the binary or the embedding server

pub mod logging;
pub mod metrics;
