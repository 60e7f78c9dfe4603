//! Variant classes, type hints and the type resolver.

use std::fmt;
use std::str::FromStr;

use crate::error::{HeaderError, Result};
use crate::header::HeaderData;

/// Delimiter used by comma-joined lists.
pub const COMMA: &str = ", ";
/// Delimiter used by semicolon-joined lists.
pub const SEMICOLON: &str = "; ";

/// The closed set of header value variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Scalar,
    Timestamp,
    DelimitedList,
    DirectiveSet,
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderKind::Scalar => "Scalar",
            HeaderKind::Timestamp => "Timestamp",
            HeaderKind::DelimitedList => "DelimitedList",
            HeaderKind::DirectiveSet => "DirectiveSet",
        };
        f.write_str(name)
    }
}

/// A type hint token as it appears in the header class tables.
///
/// Tokens are matched case-insensitively:
/// `Date`, `List,`, `List;`, `Policies` and `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHint {
    Date,
    CommaList,
    SemicolonList,
    Policies,
    Value,
}

/// Returned when a hint token is not one of the recognized forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHint(pub String);

impl fmt::Display for UnknownHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown header type hint: {}", self.0)
    }
}

impl std::error::Error for UnknownHint {}

impl FromStr for TypeHint {
    type Err = UnknownHint;

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().as_str() {
            "DATE" => Ok(TypeHint::Date),
            "LIST," => Ok(TypeHint::CommaList),
            "LIST;" => Ok(TypeHint::SemicolonList),
            "POLICIES" => Ok(TypeHint::Policies),
            "VALUE" => Ok(TypeHint::Value),
            _ => Err(UnknownHint(token.to_string())),
        }
    }
}

impl TypeHint {
    /// Lenient parse: unrecognized tokens mean "no hint".
    pub fn parse(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    pub fn kind(self) -> HeaderKind {
        match self {
            TypeHint::Date => HeaderKind::Timestamp,
            TypeHint::CommaList | TypeHint::SemicolonList => HeaderKind::DelimitedList,
            TypeHint::Policies => HeaderKind::DirectiveSet,
            TypeHint::Value => HeaderKind::Scalar,
        }
    }

    /// Join delimiter implied by list hints.
    pub fn delimiter(self) -> Option<&'static str> {
        match self {
            TypeHint::CommaList => Some(COMMA),
            TypeHint::SemicolonList => Some(SEMICOLON),
            _ => None,
        }
    }
}

/// Pick the variant for a new header.
///
/// The hint and the data shape are resolved independently; if both
/// resolve and disagree the creation is rejected. Otherwise the hint
/// wins, then the data shape, then `Scalar`.
pub fn resolve_kind(header: &str, hint: Option<TypeHint>, data: &HeaderData) -> Result<HeaderKind> {
    let hint_kind = hint.map(TypeHint::kind);
    let data_kind = data.kind();

    match (hint_kind, data_kind) {
        (Some(hint), Some(data)) if hint != data => Err(HeaderError::TypeConflict {
            header: header.to_string(),
            hint,
            data,
        }),
        (Some(kind), _) | (None, Some(kind)) => Ok(kind),
        (None, None) => Ok(HeaderKind::Scalar),
    }
}
