//! Raw header input values.
//!
//! `HeaderData` is what callers and configuration files hand to the
//! registry before a variant has been chosen. Its shape drives type
//! inference; its string coercions let any shape be fed into any
//! already-fixed variant without validation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::header::{directives, timestamp};
use crate::header::HeaderKind;

/// Raw value supplied for a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderData {
    /// No value at all.
    #[default]
    Absent,
    /// A single string.
    Text(String),
    /// Milliseconds since the unix epoch. `0` means "now".
    Millis(i64),
    /// A concrete instant.
    Instant(SystemTime),
    /// Ordered, already stringified items.
    List(Vec<String>),
    /// Directive name to tokens, in insertion order.
    Directives(IndexMap<String, Vec<String>>),
}

impl HeaderData {
    /// Build a directive mapping from `(name, tokens)` pairs.
    pub fn directives<I, K, V, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: ToString,
    {
        let mut map = IndexMap::new();
        for (name, tokens) in entries {
            map.entry(name.into())
                .or_insert_with(Vec::new)
                .extend(tokens.into_iter().map(|t| t.to_string()));
        }
        HeaderData::Directives(map)
    }

    /// Infer the variant this data belongs to, if any.
    pub fn kind(&self) -> Option<HeaderKind> {
        match self {
            HeaderData::Absent => None,
            HeaderData::Millis(_) | HeaderData::Instant(_) => Some(HeaderKind::Timestamp),
            HeaderData::List(_) => Some(HeaderKind::DelimitedList),
            HeaderData::Text(_) => Some(HeaderKind::Scalar),
            HeaderData::Directives(_) => Some(HeaderKind::DirectiveSet),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, HeaderData::Absent)
    }

    /// Coerce to a single string.
    pub fn to_text(&self) -> String {
        match self {
            HeaderData::Absent => String::new(),
            HeaderData::Text(s) => s.clone(),
            HeaderData::Millis(ms) => ms.to_string(),
            HeaderData::Instant(t) => timestamp::format_http_date(*t),
            HeaderData::List(items) => items.join(","),
            HeaderData::Directives(map) => {
                directives::render(map, directives::DEFAULT_INTRA, directives::DEFAULT_INTER)
            }
        }
    }

    /// Coerce to list items, flattening one level.
    pub fn into_items(self) -> Vec<String> {
        match self {
            HeaderData::Absent => Vec::new(),
            HeaderData::List(items) => items,
            HeaderData::Text(s) => vec![s],
            other => vec![other.to_text()],
        }
    }
}

/// Convert epoch milliseconds into an instant within the HTTP date range.
///
/// Negative values clamp to the epoch and values past year 9999 clamp to
/// its last second.
pub(crate) fn millis_to_time(ms: i64) -> SystemTime {
    let ms = ms.clamp(0, timestamp::MAX_HTTP_DATE_SECS as i64 * 1000);
    UNIX_EPOCH + Duration::from_millis(ms as u64)
}

impl From<&str> for HeaderData {
    fn from(s: &str) -> Self {
        HeaderData::Text(s.to_string())
    }
}

impl From<String> for HeaderData {
    fn from(s: String) -> Self {
        HeaderData::Text(s)
    }
}

impl From<&String> for HeaderData {
    fn from(s: &String) -> Self {
        HeaderData::Text(s.clone())
    }
}

impl From<i64> for HeaderData {
    fn from(ms: i64) -> Self {
        HeaderData::Millis(ms)
    }
}

impl From<SystemTime> for HeaderData {
    fn from(t: SystemTime) -> Self {
        HeaderData::Instant(t)
    }
}

impl<T: ToString> From<Vec<T>> for HeaderData {
    fn from(items: Vec<T>) -> Self {
        HeaderData::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for HeaderData {
    fn from(items: [T; N]) -> Self {
        HeaderData::List(items.iter().map(ToString::to_string).collect())
    }
}

impl From<IndexMap<String, Vec<String>>> for HeaderData {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        HeaderData::Directives(map)
    }
}

impl<T: Into<HeaderData>> From<Option<T>> for HeaderData {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Scalar as it appears in a config file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl RawItem {
    fn into_string(self) -> String {
        match self {
            RawItem::Text(s) => s,
            RawItem::Int(n) => n.to_string(),
            RawItem::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokens {
    One(RawItem),
    Many(Vec<RawItem>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Text(String),
    Millis(i64),
    List(Vec<RawItem>),
    Directives(IndexMap<String, RawTokens>),
    Absent,
}

impl<'de> Deserialize<'de> for HeaderData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = match RawData::deserialize(deserializer)? {
            RawData::Text(s) => HeaderData::Text(s),
            RawData::Millis(ms) => HeaderData::Millis(ms),
            RawData::List(items) => {
                HeaderData::List(items.into_iter().map(RawItem::into_string).collect())
            }
            RawData::Directives(map) => HeaderData::Directives(
                map.into_iter()
                    .map(|(name, tokens)| {
                        let tokens = match tokens {
                            RawTokens::One(item) => {
                                // `name = ""` is how a bare directive is written
                                let token = item.into_string();
                                if token.is_empty() {
                                    Vec::new()
                                } else {
                                    vec![token]
                                }
                            }
                            RawTokens::Many(items) => {
                                items.into_iter().map(RawItem::into_string).collect()
                            }
                        };
                        (name, tokens)
                    })
                    .collect(),
            ),
            RawData::Absent => HeaderData::Absent,
        };
        Ok(data)
    }
}

impl Serialize for HeaderData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HeaderData::Absent => serializer.serialize_none(),
            HeaderData::Text(s) => serializer.serialize_str(s),
            HeaderData::Millis(ms) => serializer.serialize_i64(*ms),
            HeaderData::Instant(t) => serializer.serialize_str(&timestamp::format_http_date(*t)),
            HeaderData::List(items) => items.serialize(serializer),
            HeaderData::Directives(map) => map.serialize(serializer),
        }
    }
}
