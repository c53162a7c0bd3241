//! Request descriptor handed to the transport.

use serde_json::Value;

use super::error::{Error, Result};
use super::response::Response;
use super::Transport;

/// HTTP verb on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Uppercase method name, as sent on the wire and in the
    /// method-override header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Body {
    /// JSON document, serialized by the transport (or via
    /// [`RequestDescriptor::body_string`]).
    Json(Value),
    /// Pre-rendered text: a form-encoded query string or a multipart
    /// payload.
    Text(String),
}

impl Body {
    /// Render the payload as it goes on the wire.
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Everything a transport needs to send one request.
///
/// ```
/// use restli_sdk::http_client::{Method, RequestDescriptor, Response};
///
/// let request = RequestDescriptor::new(Method::Get, "https://api.linkedin.com/v2/me")
///     .header("Authorization", "Bearer token");
///
/// let response = request
///     .send_with(|req| {
///         assert_eq!(req.header_value("authorization"), Some("Bearer token"));
///         Ok(Response::new(200, vec![], b"{}".to_vec()))
///     })
///     .unwrap();
/// assert!(response.is_success());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use = "request must be sent with a transport"]
#[non_exhaustive]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Body>,
}

impl RequestDescriptor {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append several headers in order.
    pub fn headers_from(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Replace every header with this name (case-insensitive) by a single
    /// new value.
    pub fn set_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Set a text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    pub(crate) fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn set_body(&mut self, body: Body) {
        self.body = Some(body);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Wire verb.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Absolute URL, including the query string when not tunneled.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in the order they were added.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Payload, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Payload rendered for the wire.
    #[must_use]
    pub fn body_string(&self) -> Option<String> {
        self.body.as_ref().map(Body::to_wire_string)
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Check that the URL is absolute http(s) with a host and that no header
    /// value could split the header block.
    pub fn validate(&self) -> Result<()> {
        let rest = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .ok_or_else(|| {
                Error::invalid_url(format!("URL must start with http:// or https://: {}", self.url))
            })?;
        let authority = rest.split(['/', '?']).next().unwrap_or_default();
        if authority.is_empty() {
            return Err(Error::invalid_url(format!("missing host: {}", self.url)));
        }
        if let Some((name, _)) = self
            .headers
            .iter()
            .find(|(_, v)| v.contains(['\r', '\n']))
        {
            return Err(Error::InvalidHeader { name: name.clone() });
        }
        Ok(())
    }

    /// Validate, then hand the request to `sender`.
    pub fn send_with<F>(self, sender: F) -> Result<Response>
    where
        F: FnOnce(&Self) -> Result<Response>,
    {
        self.validate()?;
        sender(&self)
    }

    /// Validate, then send through a [`Transport`].
    pub fn send<T: Transport + ?Sized>(&self, transport: &T) -> Result<Response> {
        self.validate()?;
        transport.send(self)
    }
}
