//! Single string header value.

use crate::header::HeaderData;

/// A header carrying one string, e.g. `X-Frame-Options`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar {
    value: String,
}

impl Scalar {
    pub fn new(data: HeaderData) -> Self {
        Self {
            value: data.to_text(),
        }
    }

    /// Append to the end of the current value.
    pub fn add(&mut self, data: HeaderData) {
        if !data.is_absent() {
            self.value.push_str(&data.to_text());
        }
    }

    pub fn set(&mut self, data: HeaderData) {
        self.value = data.to_text();
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn serialize(&self) -> String {
        self.value.clone()
    }
}
