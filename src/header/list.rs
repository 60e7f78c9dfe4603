//! Delimiter-joined list header value.

use crate::header::kind::COMMA;
use crate::header::HeaderData;

/// A header consisting of multiple values, e.g. `Access-Control-Allow-Methods`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedList {
    items: Vec<String>,
    delimiter: String,
}

impl Default for DelimitedList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            delimiter: COMMA.to_string(),
        }
    }
}

impl DelimitedList {
    pub fn new(data: HeaderData, delimiter: Option<&str>) -> Self {
        Self {
            items: data.into_items(),
            delimiter: delimiter.unwrap_or(COMMA).to_string(),
        }
    }

    /// Append items. A nested list is flattened one level.
    pub fn add(&mut self, data: HeaderData) {
        self.items.extend(data.into_items());
    }

    /// Append a run of items in order.
    pub fn extend<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
    }

    pub fn set(&mut self, data: HeaderData) {
        self.items = data.into_items();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn serialize(&self) -> String {
        self.items.join(&self.delimiter)
    }
}
