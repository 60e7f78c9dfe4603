//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every nickname points somewhere
//! - Check safe values against the variant their header resolves to
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Unknown type hint tokens are lenient at runtime, so they only warn here

use thiserror::Error;

use crate::config::defaults::Defaults;
use crate::config::schema::RegistryConfig;
use crate::header::{HeaderKind, TypeHint};
use crate::registry::nickname::{NicknameEntry, NicknameTree, PATH_SEPARATOR};

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{table}: header name must not be empty")]
    EmptyHeaderName { table: &'static str },

    #[error("nickname {path} has an empty target")]
    EmptyNicknameTarget { path: String },

    #[error("nickname group {path} is empty")]
    EmptyNicknameGroup { path: String },

    #[error("safe value for {header} is type {data} but the header expects {hint}")]
    SafeValueConflict {
        header: String,
        hint: HeaderKind,
        data: HeaderKind,
    },
}

/// Validate against the built-in tables.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    validate_with_defaults(config, &Defaults::builtin())
}

/// Validate against explicit built-in tables.
pub fn validate_with_defaults(
    config: &RegistryConfig,
    defaults: &Defaults,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let tables: [(&'static str, Vec<&String>); 3] = [
        ("header_classes", config.header_classes.keys().collect()),
        ("safe", config.safe.keys().collect()),
        ("delimiters", config.delimiters.keys().collect()),
    ];
    for (table, names) in tables {
        if names.iter().any(|name| name.trim().is_empty()) {
            errors.push(ValidationError::EmptyHeaderName { table });
        }
    }

    for (name, token) in &config.header_classes {
        if TypeHint::parse(token).is_none() {
            tracing::warn!(header = %name, token = %token, "Unknown header type hint, header will be untyped");
        }
    }

    check_nicknames(&config.nicknames, "", &mut errors);

    let nicknames = defaults.nicknames.merged(&config.nicknames);
    for (name, value) in &config.safe {
        let name = nicknames
            .canonical(name)
            .or_else(|| nicknames.resolve_path(name))
            .unwrap_or(name.as_str());
        let hint = match config.header_classes.get(name) {
            Some(token) => TypeHint::parse(token),
            None => defaults.header_classes.get(name).copied(),
        };
        if let (Some(hint), Some(data)) = (hint.map(TypeHint::kind), value.kind()) {
            if hint != data {
                errors.push(ValidationError::SafeValueConflict {
                    header: name.to_string(),
                    hint,
                    data,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_nicknames(tree: &NicknameTree, prefix: &str, errors: &mut Vec<ValidationError>) {
    for (nickname, entry) in tree.iter() {
        let path = if prefix.is_empty() {
            nickname.to_string()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{nickname}")
        };
        match entry {
            NicknameEntry::Canonical(target) if target.trim().is_empty() => {
                errors.push(ValidationError::EmptyNicknameTarget { path });
            }
            NicknameEntry::Canonical(_) => {}
            NicknameEntry::Group(group) if group.is_empty() => {
                errors.push(ValidationError::EmptyNicknameGroup { path });
            }
            NicknameEntry::Group(group) => check_nicknames(group, &path, errors),
        }
    }
}
