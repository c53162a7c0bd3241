//! Caller-supplied adjustments applied to a finished request.

use serde_json::Value;

use super::request::{Body, Method, RequestDescriptor};

/// Last-word overrides for a built request.
///
/// Applied after query tunneling, so they win over anything the client
/// computed. Headers replace same-named headers (case-insensitive) and keep
/// the rest.
///
/// ```
/// use restli_sdk::http_client::{Method, RequestDescriptor, RequestOverrides};
///
/// let overrides = RequestOverrides::new()
///     .header("X-Request-Id", "abc")
///     .header("Connection", "close");
///
/// let request = overrides.apply(
///     RequestDescriptor::new(Method::Get, "https://api.linkedin.com/v2/me")
///         .header("Connection", "Keep-Alive"),
/// );
/// assert_eq!(request.header_value("connection"), Some("close"));
/// assert_eq!(request.header_value("x-request-id"), Some("abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct RequestOverrides {
    method: Option<Method>,
    url: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<Body>,
}

impl RequestOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the wire verb.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Force the URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set or replace a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body with JSON.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Replace the body with text.
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Returns `true` if applying these overrides changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.url.is_none() && self.headers.is_empty() && self.body.is_none()
    }

    /// Apply to a request.
    pub fn apply(&self, mut request: RequestDescriptor) -> RequestDescriptor {
        if let Some(method) = self.method {
            request.set_method(method);
        }
        if let Some(url) = &self.url {
            request.set_url(url.clone());
        }
        for (name, value) in &self.headers {
            request = request.set_header(name, value.clone());
        }
        if let Some(body) = &self.body {
            request.set_body(body.clone());
        }
        request
    }
}
