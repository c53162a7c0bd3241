//! HTTP response handed back by a transport.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use super::error::{Error, Result};

/// HTTP response as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,
    body: Vec<u8>,
    /// Lowercase header name to indices in `headers`.
    header_index: HashMap<String, Vec<usize>>,
}

impl Response {
    /// Create a new response.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        let mut header_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, (k, _)) in headers.iter().enumerate() {
            header_index.entry(k.to_ascii_lowercase()).or_default().push(i);
        }
        Self {
            status,
            headers,
            body,
            header_index,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, if it is valid UTF-8.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Headers as `(name, value)` pairs.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_all(name).into_iter().next()
    }

    /// All values of a header (case-insensitive).
    #[must_use]
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        let indices = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.header_index.get(&name.to_ascii_lowercase())
        } else {
            self.header_index.get(name)
        };
        indices
            .map(|idx| {
                idx.iter()
                    .filter_map(|&i| self.headers.get(i).map(|(_, v)| v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
