//! Transport-agnostic request and response types.
//!
//! This crate never opens a socket. Request builders produce a
//! [`RequestDescriptor`] (verb, URL, headers, body) and a caller-supplied
//! [`Transport`] turns it into a [`Response`]. Any closure of the right shape
//! is a transport:
//!
//! ```
//! use restli_sdk::http_client::{self, Method, RequestDescriptor, Response};
//!
//! let transport = |req: &RequestDescriptor| -> http_client::Result<Response> {
//!     // Hand `req` to ureq, reqwest, wasi:http, a test double...
//!     Ok(Response::new(200, vec![], format!("{{\"url\":\"{}\"}}", req.url()).into_bytes()))
//! };
//!
//! let response = RequestDescriptor::new(Method::Get, "https://api.linkedin.com/v2/me")
//!     .send(&transport)
//!     .unwrap();
//! assert_eq!(response.status(), 200);
//! ```

mod error;
mod overrides;
mod request;
mod response;


pub use error::{Error, Result};
pub use overrides::RequestOverrides;
pub use request::{Body, Method, RequestDescriptor};
pub use response::Response;

/// Sends a request and reports what came back.
///
/// Implementations return the response for every status code; the client
/// decides which statuses are errors. Network-level failures should be
/// reported as [`Error::Transport`].
pub trait Transport {
    /// Send one request.
    fn send(&self, request: &RequestDescriptor) -> Result<Response>;
}

impl<F> Transport for F
where
    F: Fn(&RequestDescriptor) -> Result<Response>,
{
    fn send(&self, request: &RequestDescriptor) -> Result<Response> {
        self(request)
    }
}
