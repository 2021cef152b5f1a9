//! Read-only request views handed to a strategy.

use std::collections::HashMap;

use serde_json::Value;

/// The parts of an inbound request a credential strategy reads.
///
/// Bodies are parsed upstream; the strategy never touches raw bytes.
pub trait CredentialRequest: Send + Sync {
    /// Returns the value of header `name`, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Returns the parsed body, if the request carried one.
    fn body(&self) -> Option<&Value>;
}

/// An owned request built from a plain header map and an optional body.
#[derive(Debug, Clone, Default)]
pub struct JsonRequest {
    headers: HashMap<String, String>,
    body: Option<Value>,
}

impl JsonRequest {
    /// Creates a request with no headers and no body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header. Names are stored lowercased.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the parsed body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl CredentialRequest for JsonRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl CredentialRequest for http::Request<Option<Value>> {
    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }

    fn body(&self) -> Option<&Value> {
        http::Request::body(self).as_ref()
    }
}

impl CredentialRequest for http::Request<Value> {
    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }

    fn body(&self) -> Option<&Value> {
        Some(http::Request::body(self))
    }
}

// HeaderMap lookups are already case-insensitive; non-UTF-8 values count as absent.
fn header_str<'a>(headers: &'a http::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
