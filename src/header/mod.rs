//! Header value subsystem.
//!
//! # Data Flow
//! ```text
//! HeaderData (raw input)
//!     → kind.rs (type hint + data shape → HeaderKind, or conflict)
//!     → HeaderValue (scalar / timestamp / list / directives)
//!     → Header (name, value, remove flag, safe default)
//!     → serialize() → sink
//! ```
//!
//! # Design Decisions
//! - Closed set of variants, dispatched by match
//! - The variant is fixed at creation; later calls coerce data into it
//! - `remove` is sticky and never touches stored data
//! - An empty serialization suppresses the header on write

pub mod data;
pub mod directives;
pub mod kind;
pub mod list;
pub mod scalar;
pub mod timestamp;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sink::ResponseSink;

pub use data::HeaderData;
pub use directives::DirectiveSet;
pub use kind::{resolve_kind, HeaderKind, TypeHint};
pub use list::DelimitedList;
pub use scalar::Scalar;
pub use timestamp::Timestamp;

/// Per-header delimiter overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Delimiters {
    /// Join delimiter for list headers. Wins over the hint's delimiter.
    pub list: Option<String>,
    /// Separator inside a directive.
    pub intra: Option<String>,
    /// Separator between directives.
    pub inter: Option<String>,
}

/// The live value of a header, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Scalar(Scalar),
    Timestamp(Timestamp),
    DelimitedList(DelimitedList),
    DirectiveSet(DirectiveSet),
}

impl HeaderValue {
    /// Instantiate the variant for `kind` from initial data.
    pub fn build(
        kind: HeaderKind,
        data: HeaderData,
        hint: Option<TypeHint>,
        delimiters: Option<&Delimiters>,
    ) -> Self {
        match kind {
            HeaderKind::Scalar => HeaderValue::Scalar(Scalar::new(data)),
            HeaderKind::Timestamp => HeaderValue::Timestamp(Timestamp::new(data)),
            HeaderKind::DelimitedList => {
                let delimiter = delimiters
                    .and_then(|d| d.list.as_deref())
                    .or_else(|| hint.and_then(TypeHint::delimiter));
                HeaderValue::DelimitedList(DelimitedList::new(data, delimiter))
            }
            HeaderKind::DirectiveSet => HeaderValue::DirectiveSet(DirectiveSet::new(
                data,
                delimiters.and_then(|d| d.intra.as_deref()),
                delimiters.and_then(|d| d.inter.as_deref()),
            )),
        }
    }

    pub fn kind(&self) -> HeaderKind {
        match self {
            HeaderValue::Scalar(_) => HeaderKind::Scalar,
            HeaderValue::Timestamp(_) => HeaderKind::Timestamp,
            HeaderValue::DelimitedList(_) => HeaderKind::DelimitedList,
            HeaderValue::DirectiveSet(_) => HeaderKind::DirectiveSet,
        }
    }

    pub fn add(&mut self, data: HeaderData) {
        match self {
            HeaderValue::Scalar(v) => v.add(data),
            HeaderValue::Timestamp(v) => v.add(data),
            HeaderValue::DelimitedList(v) => v.add(data),
            HeaderValue::DirectiveSet(v) => v.add(data),
        }
    }

    pub fn set(&mut self, data: HeaderData) {
        match self {
            HeaderValue::Scalar(v) => v.set(data),
            HeaderValue::Timestamp(v) => v.set(data),
            HeaderValue::DelimitedList(v) => v.set(data),
            HeaderValue::DirectiveSet(v) => v.set(data),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            HeaderValue::Scalar(v) => v.serialize(),
            HeaderValue::Timestamp(v) => v.serialize(),
            HeaderValue::DelimitedList(v) => v.serialize(),
            HeaderValue::DirectiveSet(v) => v.serialize(),
        }
    }
}

/// What writing a header did to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Set,
    Removed,
    /// Empty serialization, nothing written.
    Skipped,
}

/// A live header: canonical name, value and write state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: HeaderValue,
    removed: bool,
    safe: Option<HeaderData>,
}

impl Header {
    /// Resolve the variant and build the header.
    ///
    /// Fails when `hint` and the shape of `data` disagree.
    pub fn create(
        name: impl Into<String>,
        hint: Option<TypeHint>,
        data: HeaderData,
        delimiters: Option<&Delimiters>,
        safe: Option<HeaderData>,
    ) -> Result<Self> {
        let name = name.into();
        let kind = resolve_kind(&name, hint, &data)?;
        Ok(Self {
            value: HeaderValue::build(kind, data, hint, delimiters),
            name,
            removed: false,
            safe,
        })
    }

    /// Build an empty header. The hint alone picks the variant.
    pub fn empty(
        name: impl Into<String>,
        hint: Option<TypeHint>,
        delimiters: Option<&Delimiters>,
        safe: Option<HeaderData>,
    ) -> Self {
        let kind = hint.map(TypeHint::kind).unwrap_or(HeaderKind::Scalar);
        Self {
            name: name.into(),
            value: HeaderValue::build(kind, HeaderData::Absent, hint, delimiters),
            removed: false,
            safe,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> HeaderKind {
        self.value.kind()
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut HeaderValue {
        &mut self.value
    }

    pub fn add(&mut self, data: impl Into<HeaderData>) -> &mut Self {
        self.value.add(data.into());
        self
    }

    /// Add a named directive with tokens.
    ///
    /// On a list this appends the name followed by the tokens; on a
    /// scalar or timestamp only the name is used.
    pub fn add_directive<I, T>(&mut self, name: &str, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        match &mut self.value {
            HeaderValue::DirectiveSet(v) => v.add_directive(name, tokens),
            HeaderValue::DelimitedList(v) => {
                v.extend([name.to_string()]);
                v.extend(tokens);
            }
            HeaderValue::Scalar(v) => v.add(name.into()),
            HeaderValue::Timestamp(v) => v.add(name.into()),
        }
        self
    }

    pub fn set(&mut self, data: impl Into<HeaderData>) -> &mut Self {
        self.value.set(data.into());
        self
    }

    /// Reset to the empty form.
    pub fn clear(&mut self) -> &mut Self {
        self.set(HeaderData::Absent)
    }

    /// Remove one directive. Other variants clear entirely.
    pub fn clear_directive(&mut self, name: &str) -> &mut Self {
        match &mut self.value {
            HeaderValue::DirectiveSet(v) => v.clear_directive(name),
            other => other.set(HeaderData::Absent),
        }
        self
    }

    /// Mark the header for removal from the response.
    pub fn remove(&mut self) -> &mut Self {
        self.removed = true;
        self
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Replace the value with the configured safe default, if any.
    pub fn apply_safe(&mut self) -> &mut Self {
        if let Some(safe) = self.safe.clone() {
            self.value.set(safe);
        }
        self
    }

    pub fn safe_value(&self) -> Option<&HeaderData> {
        self.safe.as_ref()
    }

    pub fn serialize(&self) -> String {
        self.value.serialize()
    }

    /// Write or remove this header on the sink.
    pub fn apply_to<S: ResponseSink + ?Sized>(&self, sink: &mut S) -> Applied {
        if self.removed {
            sink.remove_header(&self.name);
            return Applied::Removed;
        }

        let value = self.serialize();
        if value.is_empty() {
            Applied::Skipped
        } else {
            sink.set_header(&self.name, &value);
            Applied::Set
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn header(name: &str, hint: Option<TypeHint>, data: HeaderData) -> Header {
        Header::create(name, hint, data, None, None).unwrap()
    }

    #[test]
    fn test_hint_fixes_list_delimiter() {
        let mut h = header("Content-Disposition", Some(TypeHint::SemicolonList), HeaderData::Absent);
        h.clear().add_directive("attachment", ["filename=\"cool.html\""]);
        assert_eq!(h.serialize(), "attachment; filename=\"cool.html\"");
    }

    #[test]
    fn test_configured_delimiter_wins() {
        let delimiters = Delimiters {
            list: Some(",".into()),
            ..Default::default()
        };
        let h = Header::create(
            "Vary",
            Some(TypeHint::CommaList),
            vec!["a", "b"].into(),
            Some(&delimiters),
            None,
        )
        .unwrap();
        assert_eq!(h.serialize(), "a,b");
    }

    #[test]
    fn test_remove_is_sticky() {
        let mut h = header("X-Powered-By", None, "PHP".into());
        h.remove().remove();
        h.set("still-removed").add("!");
        assert!(h.is_removed());
        assert_eq!(h.serialize(), "still-removed!");

        let mut sink: IndexMap<String, String> = IndexMap::new();
        sink.insert("X-Powered-By".into(), "PHP".into());
        assert_eq!(h.apply_to(&mut sink), Applied::Removed);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_is_skipped() {
        let mut h = header("Content-Encoding", Some(TypeHint::CommaList), vec!["a", "b"].into());
        h.clear();
        let mut sink: IndexMap<String, String> = IndexMap::new();
        assert_eq!(h.apply_to(&mut sink), Applied::Skipped);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_apply_safe() {
        let mut h = Header::create(
            "X-XSS-Protection",
            Some(TypeHint::SemicolonList),
            HeaderData::Absent,
            None,
            Some(vec!["1", "mode=block"].into()),
        )
        .unwrap();
        h.add("extra").apply_safe();
        assert_eq!(h.serialize(), "1; mode=block");

        let mut plain = header("X-Custom", None, "value".into());
        plain.apply_safe();
        assert_eq!(plain.serialize(), "value");
    }

    #[test]
    fn test_clear_directive_on_other_kinds_clears_all() {
        let mut h = header("listHeader", None, vec![1, 2, 3].into());
        h.clear_directive("anything");
        assert_eq!(h.serialize(), "");
    }

    #[test]
    fn test_variant_never_changes() {
        let mut h = header("Feature-Policy", Some(TypeHint::Policies), HeaderData::Absent);
        h.set("geolocation");
        assert_eq!(h.kind(), HeaderKind::DirectiveSet);
        assert_eq!(h.serialize(), "geolocation");
    }
}
