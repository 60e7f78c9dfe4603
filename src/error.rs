//! Error definitions for header creation.

use thiserror::Error;

use crate::header::HeaderKind;

/// Errors raised while creating headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The configured type hint and the supplied data disagree on the variant.
    #[error("header {header} expects type {hint} but data is type {data}")]
    TypeConflict {
        header: String,
        hint: HeaderKind,
        data: HeaderKind,
    },
}

/// Result type for header operations.
pub type Result<T> = std::result::Result<T, HeaderError>;
