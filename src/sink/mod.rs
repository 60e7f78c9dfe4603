//! Response sinks.
//!
//! # Responsibilities
//! - Define the contract the registry writes headers through
//! - Adapt `http` header maps and responses to that contract
//! - Provide an ordered in-memory sink for rendering and tests
//!
//! # Design Decisions
//! - Sinks are infallible; names or values the transport rejects are
//!   logged and skipped rather than failing the whole write

use http::header::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;

/// Transport-side object that accepts header writes.
pub trait ResponseSink {
    /// Set a header, replacing any existing value.
    fn set_header(&mut self, name: &str, value: &str);

    /// Delete a header.
    fn remove_header(&mut self, name: &str);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn set_header(&mut self, name: &str, value: &str) {
        (**self).set_header(name, value);
    }

    fn remove_header(&mut self, name: &str) {
        (**self).remove_header(name);
    }
}

impl ResponseSink for IndexMap<String, String> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }

    fn remove_header(&mut self, name: &str) {
        self.shift_remove(name);
    }
}

impl ResponseSink for HeaderMap {
    fn set_header(&mut self, name: &str, value: &str) {
        let header_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(header = name, error = %e, "Skipping header with invalid name");
                return;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(v) => {
                self.insert(header_name, v);
            }
            Err(e) => {
                tracing::warn!(header = name, error = %e, "Skipping header with invalid value");
            }
        }
    }

    fn remove_header(&mut self, name: &str) {
        if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) {
            self.remove(header_name);
        }
    }
}

impl<B> ResponseSink for http::Response<B> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.headers_mut().set_header(name, value);
    }

    fn remove_header(&mut self, name: &str) {
        self.headers_mut().remove_header(name);
    }
}
