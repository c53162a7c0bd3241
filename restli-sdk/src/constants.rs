//! Centralized constants for the restli-sdk crate.
//!
//! Protocol tokens, header names, MIME types and limits are defined here so the
//! codec, the tunneling transform and the client agree on a single source of truth.
//!
//! # Environment Variables
//!
//! One defensive limit can be tuned via the environment:
//!
//! | Variable                       | Default | Description                                  |
//! |--------------------------------|---------|----------------------------------------------|
//! | `RESTLI_MAX_BOUNDARY_ATTEMPTS` | 1000    | Retries allowed when picking a multipart boundary |
//!
//! ## Example
//!
//! ```bash
//! RESTLI_MAX_BOUNDARY_ATTEMPTS=50
//! ```

use std::sync::OnceLock;

// ============================================================================
// TIME CONSTANTS
// ============================================================================

/// Seconds in a day (24 * 60 * 60).
pub const SECONDS_PER_DAY: u64 = 86400;

/// Seconds in an hour (60 * 60).
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Seconds in a minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

// ============================================================================
// REST.LI ENCODING TOKENS
// ============================================================================

/// Opening token of an encoded list.
pub const LIST_PREFIX: &str = "List(";

/// Closing token of an encoded list.
pub const LIST_SUFFIX: &str = ")";

/// Opening token of an encoded object.
pub const OBJ_PREFIX: &str = "(";

/// Closing token of an encoded object.
pub const OBJ_SUFFIX: &str = ")";

/// Explicit empty-string marker.
pub const EMPTY_STRING_TOKEN: &str = "''";

/// Characters with structural meaning in the Rest.li encoding.
pub const RESERVED_CHARS: [char; 5] = [',', '(', ')', '\'', ':'];

/// Query parameter passed through unencoded by read-style requests
/// (legacy field projection syntax).
pub const FIELDS_PARAM: &str = "fields";

// ============================================================================
// QUERY TUNNELING
// ============================================================================

/// Longest encoded query string sent on the URL. Anything longer is tunneled.
pub const MAX_QUERY_STRING_LENGTH: usize = 4000;

/// Default bound on multipart boundary regeneration.
const DEFAULT_MAX_BOUNDARY_ATTEMPTS: usize = 1000;

/// Cached boundary attempt bound from environment.
static MAX_BOUNDARY_ATTEMPTS_CACHE: OnceLock<usize> = OnceLock::new();

/// Returns the number of boundary strings the tunneling transform may try
/// before giving up.
///
/// Reads from `RESTLI_MAX_BOUNDARY_ATTEMPTS` on first call and falls back to
/// 1000 if not set, invalid, or zero. The value is cached for the lifetime of
/// the process.
#[inline]
pub fn get_max_boundary_attempts() -> usize {
    *MAX_BOUNDARY_ATTEMPTS_CACHE.get_or_init(|| {
        std::env::var("RESTLI_MAX_BOUNDARY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_MAX_BOUNDARY_ATTEMPTS)
    })
}

/// Length of a generated multipart boundary.
pub const BOUNDARY_LEN: usize = 16;

/// Alphabet used for boundary strings (base 36).
pub const BOUNDARY_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ============================================================================
// API ENDPOINTS
// ============================================================================

/// Base URL for non-versioned API calls.
pub const NON_VERSIONED_BASE_URL: &str = "https://api.linkedin.com/v2";

/// Base URL for versioned API calls (requires a version header).
pub const VERSIONED_BASE_URL: &str = "https://api.linkedin.com/rest";

/// Rest.li protocol version sent with every request.
pub const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("restli-sdk/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HEADER NAMES
// ============================================================================

/// Content-Type header name (title-case for setting headers).
pub const HEADER_CONTENT_TYPE_TITLE: &str = "Content-Type";

/// Connection header name.
pub const HEADER_CONNECTION: &str = "Connection";

/// Rest.li protocol version header.
pub const HEADER_RESTLI_PROTOCOL_VERSION: &str = "X-RestLi-Protocol-Version";

/// Rest.li method header (lowercase method name).
pub const HEADER_RESTLI_METHOD: &str = "X-RestLi-Method";

/// Response header carrying the reduced-encoded id of a created entity.
pub const HEADER_CREATED_ENTITY_ID: &str = "x-restli-id";

/// Method override header used by tunneled requests.
pub const HEADER_HTTP_METHOD_OVERRIDE: &str = "X-HTTP-Method-Override";

/// API version header.
pub const HEADER_LINKEDIN_VERSION: &str = "LinkedIn-Version";

/// Authorization header name.
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// User agent header name.
pub const HEADER_USER_AGENT: &str = "user-agent";

// ============================================================================
// COMMON MIME TYPES
// ============================================================================

/// JSON MIME type.
pub const MIME_JSON: &str = "application/json";

/// Form URL-encoded MIME type.
pub const MIME_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Builds the multipart content type for a tunneled request with a body.
///
/// ```
/// use restli_sdk::constants::multipart_mixed;
///
/// assert_eq!(multipart_mixed("xyz"), "multipart/mixed; boundary=xyz");
/// ```
#[must_use]
pub fn multipart_mixed(boundary: &str) -> String {
    format!("multipart/mixed; boundary={boundary}")
}

// ============================================================================
// HTTP STATUS TITLES
// ============================================================================

/// Returns the standard title for an HTTP status code.
///
/// Used when logging responses.
///
/// # Examples
///
/// ```
/// use restli_sdk::constants::status_title;
///
/// assert_eq!(status_title(200), "OK");
/// assert_eq!(status_title(429), "Too Many Requests");
/// assert_eq!(status_title(999), "Error"); // Unknown codes
/// ```
#[inline]
pub const fn status_title(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_attempts_default_is_positive() {
        assert!(get_max_boundary_attempts() > 0);
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(USER_AGENT.starts_with("restli-sdk/"));
        assert!(USER_AGENT.len() > "restli-sdk/".len());
    }

    #[test]
    fn test_reserved_chars_are_ascii() {
        assert!(RESERVED_CHARS.iter().all(char::is_ascii));
    }
}
