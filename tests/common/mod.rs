//! Shared utilities for integration tests.

#![allow(dead_code)]

use headerset::{HeaderRegistry, RegistryConfig, Seed};
use indexmap::IndexMap;

/// Build a registry over the built-in tables, panicking on conflicts.
pub fn registry(seed: impl Into<Seed>) -> HeaderRegistry {
    HeaderRegistry::new(seed, RegistryConfig::default()).expect("registry should build")
}

/// An in-memory response holding some pre-existing headers.
pub fn mock_response(existing: &[(&str, &str)]) -> IndexMap<String, String> {
    existing
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Render written headers as a JSON object string, in write order.
pub fn to_json(response: &IndexMap<String, String>) -> String {
    serde_json::to_string(response).expect("headers serialize")
}
