//! Registry configuration: user tables, seed files and built-in defaults.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read file, toml → RegistryConfig / Seed)
//!     → validation.rs (semantic checks against the built-in tables)
//!     → RegistryConfig (validated, immutable per registry)
//!     → merged over Defaults when a HeaderRegistry is built
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a registry is built from it
//! - Every field is optional; an empty file is a valid config
//! - serde rejects malformed files; validation.rs reports every semantic
//!   problem at once
//! - Built-in tables are passed explicitly, never mutated

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::Defaults;
pub use loader::{load_config, load_seed, parse_config, ConfigError};
pub use schema::RegistryConfig;
pub use validation::{validate_config, ValidationError};
