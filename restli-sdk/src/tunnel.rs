//! Query tunneling.
//!
//! Servers reject URLs past a few kilobytes. When the encoded query string is
//! longer than [`MAX_QUERY_STRING_LENGTH`], the request is rewritten as a POST
//! to the bare resource URL with the original verb in
//! `X-HTTP-Method-Override`:
//!
//! - without a body, the query string becomes a form-encoded body
//! - with a body, the query string and the JSON body travel as the two parts
//!   of a `multipart/mixed` payload
//!
//! The `X-RestLi-Method` header is left alone, so the server still sees the
//! intended operation.

use serde_json::Value;

use crate::constants::{
    HEADER_CONTENT_TYPE_TITLE, MAX_QUERY_STRING_LENGTH, MIME_FORM_URLENCODED, MIME_JSON,
    get_max_boundary_attempts, multipart_mixed,
};
use crate::http_client::{Error, Method, RequestDescriptor, RequestOverrides, Result};
use crate::restli::{RestliMethod, restli_request_headers};

/// Returns `true` if `encoded_query` is too long to send on the URL.
///
/// ```
/// use restli_sdk::tunnel::is_query_tunneling_required;
///
/// assert!(!is_query_tunneling_required(&"a".repeat(4000)));
/// assert!(is_query_tunneling_required(&"a".repeat(4001)));
/// ```
#[must_use]
pub const fn is_query_tunneling_required(encoded_query: &str) -> bool {
    encoded_query.len() > MAX_QUERY_STRING_LENGTH
}

/// Inputs shared by both tunneling transforms.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct TunnelParams<'a> {
    encoded_query: &'a str,
    url_path: &'a str,
    restli_method: RestliMethod,
    access_token: &'a str,
    version: Option<&'a str>,
}

impl<'a> TunnelParams<'a> {
    /// `url_path` is the absolute URL without a query string.
    #[must_use]
    pub const fn new(
        encoded_query: &'a str,
        url_path: &'a str,
        restli_method: RestliMethod,
        access_token: &'a str,
    ) -> Self {
        Self {
            encoded_query,
            url_path,
            restli_method,
            access_token,
            version: None,
        }
    }

    /// API version, sent as `LinkedIn-Version`.
    #[must_use]
    pub const fn version(mut self, version: Option<&'a str>) -> Self {
        self.version = version;
        self
    }

    fn url_with_query(&self) -> String {
        if self.encoded_query.is_empty() {
            self.url_path.to_string()
        } else {
            format!("{}?{}", self.url_path, self.encoded_query)
        }
    }

    fn headers(&self, method_override: Option<Method>, content_type: Option<&str>) -> Vec<(String, String)> {
        restli_request_headers(
            self.restli_method,
            self.access_token,
            self.version,
            method_override,
            content_type,
        )
    }
}

/// Build a request that has no body of its own (get, finder, delete, ...).
///
/// ```
/// use restli_sdk::http_client::{Method, RequestOverrides};
/// use restli_sdk::restli::RestliMethod;
/// use restli_sdk::tunnel::{TunnelParams, maybe_apply_query_tunneling_without_body};
///
/// let query = format!("q=search&ids={}", "x".repeat(4000));
/// let params = TunnelParams::new(&query, "https://api.linkedin.com/v2/things", RestliMethod::Finder, "tok");
/// let request = maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());
///
/// assert_eq!(request.method(), Method::Post);
/// assert_eq!(request.url(), "https://api.linkedin.com/v2/things");
/// assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("GET"));
/// assert_eq!(request.header_value("X-RestLi-Method"), Some("finder"));
/// assert_eq!(request.body_string(), Some(query));
/// ```
pub fn maybe_apply_query_tunneling_without_body(
    params: &TunnelParams<'_>,
    overrides: &RequestOverrides,
) -> RequestDescriptor {
    let original = params.restli_method.http_method();
    let request = if is_query_tunneling_required(params.encoded_query) {
        RequestDescriptor::new(Method::Post, params.url_path)
            .headers_from(params.headers(Some(original), Some(MIME_FORM_URLENCODED)))
            .text(params.encoded_query)
    } else {
        RequestDescriptor::new(original, params.url_with_query())
            .headers_from(params.headers(None, None))
    };
    overrides.apply(request)
}

/// Build a request that carries a JSON body (create, update, partial
/// update and their batch forms).
pub fn maybe_apply_query_tunneling_with_body(
    params: &TunnelParams<'_>,
    body: &Value,
    overrides: &RequestOverrides,
) -> Result<RequestDescriptor> {
    let original = params.restli_method.http_method();
    let request = if is_query_tunneling_required(params.encoded_query) {
        let json = serde_json::to_string(body)?;
        let mut payload = String::with_capacity(params.encoded_query.len() + json.len());
        payload.push_str(params.encoded_query);
        payload.push_str(&json);
        let boundary = generate_boundary(&payload)?;

        RequestDescriptor::new(Method::Post, params.url_path)
            .headers_from(params.headers(Some(original), Some(&multipart_mixed(&boundary))))
            .text(multipart_body(&boundary, params.encoded_query, &json))
    } else {
        RequestDescriptor::new(original, params.url_with_query())
            .headers_from(params.headers(None, None))
            .json(body.clone())
    };
    Ok(overrides.apply(request))
}

/// Two-part `multipart/mixed` payload: the form-encoded query, then the
/// JSON body.
#[must_use]
pub fn multipart_body(boundary: &str, encoded_query: &str, json: &str) -> String {
    format!(
        "--{boundary}\r\n\
         {HEADER_CONTENT_TYPE_TITLE}: {MIME_FORM_URLENCODED}\r\n\r\n\
         {encoded_query}\r\n\
         --{boundary}\r\n\
         {HEADER_CONTENT_TYPE_TITLE}: {MIME_JSON}\r\n\r\n\
         {json}\r\n\
         --{boundary}--"
    )
}

/// Random boundary that does not occur anywhere in `payload`.
///
/// Gives up with [`Error::BoundaryExhausted`] after
/// `RESTLI_MAX_BOUNDARY_ATTEMPTS` tries (default 1000).
pub fn generate_boundary(payload: &str) -> Result<String> {
    generate_boundary_with(payload, get_max_boundary_attempts(), || {
        crate::random::boundary().map_err(|e| Error::Random(e.to_string()))
    })
}

/// [`generate_boundary`] with an explicit attempt bound and candidate source.
pub fn generate_boundary_with<F>(payload: &str, max_attempts: usize, mut next: F) -> Result<String>
where
    F: FnMut() -> Result<String>,
{
    for attempt in 1..=max_attempts {
        let candidate = next()?;
        if !candidate.is_empty() && !payload.contains(&candidate) {
            if attempt > 1 {
                crate::log!(warn, "multipart boundary collided with payload", attempts: attempt);
            }
            return Ok(candidate);
        }
    }
    Err(Error::BoundaryExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_QUERY_STRING_LENGTH;
    use crate::http_client::Body;
    use serde_json::json;

    const URL: &str = "https://api.linkedin.com/rest/testResource";

    fn long_query() -> String {
        format!("longParam={}", "a".repeat(MAX_QUERY_STRING_LENGTH))
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_query_tunneling_required(""));
        assert!(!is_query_tunneling_required(&"q".repeat(MAX_QUERY_STRING_LENGTH)));
        assert!(is_query_tunneling_required(&"q".repeat(MAX_QUERY_STRING_LENGTH + 1)));
    }

    #[test]
    fn test_without_body_short_query() {
        let params = TunnelParams::new("ids=List(1,2)", URL, RestliMethod::BatchGet, "tok")
            .version(Some("202210"));
        let request = maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), format!("{URL}?ids=List(1,2)"));
        assert!(request.body().is_none());
        assert_eq!(request.header_value("Content-Type"), Some(MIME_JSON));
        assert_eq!(request.header_value("LinkedIn-Version"), Some("202210"));
        assert!(request.header_value("X-HTTP-Method-Override").is_none());
    }

    #[test]
    fn test_without_body_empty_query_has_no_question_mark() {
        let params = TunnelParams::new("", URL, RestliMethod::GetAll, "tok");
        let request = maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());
        assert_eq!(request.url(), URL);
    }

    #[test]
    fn test_without_body_tunneled_get() {
        let query = long_query();
        let params = TunnelParams::new(&query, URL, RestliMethod::Get, "tok");
        let request = maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), URL);
        assert_eq!(request.body(), Some(&Body::Text(query)));
        assert_eq!(request.header_value("Content-Type"), Some(MIME_FORM_URLENCODED));
        assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("GET"));
        assert_eq!(request.header_value("X-RestLi-Method"), Some("get"));
    }

    #[test]
    fn test_without_body_tunneled_delete_keeps_verb() {
        let query = long_query();
        let params = TunnelParams::new(&query, URL, RestliMethod::BatchDelete, "tok");
        let request = maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("DELETE"));
        assert_eq!(request.header_value("X-RestLi-Method"), Some("batch_delete"));
    }

    #[test]
    fn test_with_body_short_query() {
        let body = json!({"name": "x"});
        let params = TunnelParams::new("", URL, RestliMethod::Update, "tok");
        let request =
            maybe_apply_query_tunneling_with_body(&params, &body, &RequestOverrides::new()).unwrap();
        assert_eq!(request.method(), Method::Put);
        assert_eq!(request.url(), URL);
        assert_eq!(request.body(), Some(&Body::Json(body)));
    }

    #[test]
    fn test_with_body_tunneled_multipart() {
        let query = long_query();
        let body = json!({"patch": {"$set": {"name": "x"}}});
        let params = TunnelParams::new(&query, URL, RestliMethod::PartialUpdate, "tok");
        let request =
            maybe_apply_query_tunneling_with_body(&params, &body, &RequestOverrides::new()).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), URL);
        assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("POST"));

        let content_type = request.header_value("Content-Type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/mixed; boundary=")
            .unwrap();
        assert_eq!(
            request.body_string().unwrap(),
            multipart_body(boundary, &query, &body.to_string())
        );
        assert!(!query.contains(boundary));
    }

    #[test]
    fn test_with_body_tunneled_update_override_is_put() {
        let query = long_query();
        let params = TunnelParams::new(&query, URL, RestliMethod::BatchUpdate, "tok");
        let request =
            maybe_apply_query_tunneling_with_body(&params, &json!({}), &RequestOverrides::new())
                .unwrap();
        assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("PUT"));
    }

    #[test]
    fn test_overrides_applied_last() {
        let query = long_query();
        let params = TunnelParams::new(&query, URL, RestliMethod::Create, "tok");
        let overrides = RequestOverrides::new().header("X-HTTP-Method-Override", "PATCH");
        let request = maybe_apply_query_tunneling_with_body(&params, &json!({}), &overrides).unwrap();
        assert_eq!(request.header_value("X-HTTP-Method-Override"), Some("PATCH"));
    }

    #[test]
    fn test_multipart_layout() {
        insta::assert_snapshot!(
            multipart_body("xyz", "a=1", r#"{"k":"v"}"#).replace("\r\n", "\\r\\n\n"),
            @r#"
        --xyz\r\n
        Content-Type: application/x-www-form-urlencoded\r\n
        \r\n
        a=1\r\n
        --xyz\r\n
        Content-Type: application/json\r\n
        \r\n
        {"k":"v"}\r\n
        --xyz--
        "#
        );
    }

    #[test]
    fn test_boundary_retries_on_collision() {
        let mut candidates = vec!["fresh", "used", "used"];
        let boundary =
            generate_boundary_with("payload with used inside", 10, || {
                Ok(candidates.pop().unwrap().to_string())
            })
            .unwrap();
        assert_eq!(boundary, "fresh");
    }

    #[test]
    fn test_boundary_exhausted() {
        let err = generate_boundary_with("aaaa", 5, || Ok("a".to_string())).unwrap_err();
        assert_eq!(err, Error::BoundaryExhausted { attempts: 5 });
    }

    #[test]
    fn test_boundary_source_error_propagates() {
        let err =
            generate_boundary_with("x", 5, || Err(Error::Random("no entropy".into()))).unwrap_err();
        assert_eq!(err, Error::Random("no entropy".to_string()));
    }

    #[test]
    fn test_generated_boundary_absent_from_payload() {
        let payload = "0123456789abcdefghijklmnopqrstuvwxyz".repeat(100);
        let boundary = generate_boundary(&payload).unwrap();
        assert!(!payload.contains(&boundary));
    }
}
