//! Rest.li protocol helpers: method table, URLs, headers, created ids, URNs.

use indexmap::IndexMap;

use crate::codec::{self, DecodedValue};
use crate::constants::{
    HEADER_AUTHORIZATION, HEADER_CONNECTION, HEADER_CONTENT_TYPE_TITLE, HEADER_CREATED_ENTITY_ID,
    HEADER_HTTP_METHOD_OVERRIDE, HEADER_LINKEDIN_VERSION, HEADER_RESTLI_METHOD,
    HEADER_RESTLI_PROTOCOL_VERSION, HEADER_USER_AGENT, MIME_JSON, NON_VERSIONED_BASE_URL,
    RESTLI_PROTOCOL_VERSION, USER_AGENT, VERSIONED_BASE_URL,
};
use crate::http_client::{Error, Method, Response, Result};
use crate::value::RestliValue;

// ============================================================================
// REST.LI METHODS
// ============================================================================

/// Rest.li resource method. Identifies the operation independently of the
/// HTTP verb it travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RestliMethod {
    /// Fetch one entity.
    Get,
    /// Fetch several entities by id.
    BatchGet,
    /// Fetch a whole collection.
    GetAll,
    /// Query a collection by named criteria.
    Finder,
    /// Run several finder queries at once.
    BatchFinder,
    /// Create one entity.
    Create,
    /// Create several entities.
    BatchCreate,
    /// Replace one entity.
    Update,
    /// Replace several entities.
    BatchUpdate,
    /// Patch one entity.
    PartialUpdate,
    /// Patch several entities.
    BatchPartialUpdate,
    /// Delete one entity.
    Delete,
    /// Delete several entities.
    BatchDelete,
    /// Invoke a named action.
    Action,
}

impl RestliMethod {
    /// Every method, in table order.
    pub const ALL: [Self; 14] = [
        Self::Get,
        Self::BatchGet,
        Self::GetAll,
        Self::Finder,
        Self::BatchFinder,
        Self::Create,
        Self::BatchCreate,
        Self::Update,
        Self::BatchUpdate,
        Self::PartialUpdate,
        Self::BatchPartialUpdate,
        Self::Delete,
        Self::BatchDelete,
        Self::Action,
    ];

    /// Upper snake case name, e.g. `BATCH_GET`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::BatchGet => "BATCH_GET",
            Self::GetAll => "GET_ALL",
            Self::Finder => "FINDER",
            Self::BatchFinder => "BATCH_FINDER",
            Self::Create => "CREATE",
            Self::BatchCreate => "BATCH_CREATE",
            Self::Update => "UPDATE",
            Self::BatchUpdate => "BATCH_UPDATE",
            Self::PartialUpdate => "PARTIAL_UPDATE",
            Self::BatchPartialUpdate => "BATCH_PARTIAL_UPDATE",
            Self::Delete => "DELETE",
            Self::BatchDelete => "BATCH_DELETE",
            Self::Action => "ACTION",
        }
    }

    /// Value of the `X-RestLi-Method` header (lowercase).
    #[must_use]
    pub const fn header_value(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::BatchGet => "batch_get",
            Self::GetAll => "get_all",
            Self::Finder => "finder",
            Self::BatchFinder => "batch_finder",
            Self::Create => "create",
            Self::BatchCreate => "batch_create",
            Self::Update => "update",
            Self::BatchUpdate => "batch_update",
            Self::PartialUpdate => "partial_update",
            Self::BatchPartialUpdate => "batch_partial_update",
            Self::Delete => "delete",
            Self::BatchDelete => "batch_delete",
            Self::Action => "action",
        }
    }

    /// HTTP verb used when the request is not tunneled.
    #[must_use]
    pub const fn http_method(&self) -> Method {
        match self {
            Self::Get | Self::BatchGet | Self::GetAll | Self::Finder | Self::BatchFinder => {
                Method::Get
            },
            Self::Update | Self::BatchUpdate => Method::Put,
            Self::Create
            | Self::BatchCreate
            | Self::PartialUpdate
            | Self::BatchPartialUpdate
            | Self::Action => Method::Post,
            Self::Delete | Self::BatchDelete => Method::Delete,
        }
    }
}

impl std::fmt::Display for RestliMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// URLS
// ============================================================================

/// Base URL for a request: the versioned API when a version is given.
#[must_use]
pub const fn rest_api_base_url(version: Option<&str>) -> &'static str {
    if version.is_some() {
        VERSIONED_BASE_URL
    } else {
        NON_VERSIONED_BASE_URL
    }
}

/// Build the absolute URL for a resource path against the default API host.
///
/// Each `{name}` placeholder is replaced by the full-mode encoding of
/// `path_keys[name]`, so complex keys become `(k:v,...)`.
///
/// ```
/// use indexmap::IndexMap;
/// use restli_sdk::{RestliValue, restli};
///
/// let mut keys = IndexMap::new();
/// keys.insert("actionUrn".to_string(), RestliValue::from("urn:li:share:123"));
/// keys.insert("commentId".to_string(), RestliValue::from("foobar123"));
///
/// let url = restli::build_restli_url(
///     "/socialActions/{actionUrn}/comments/{commentId}",
///     &keys,
///     Some("202209"),
/// )
/// .unwrap();
/// assert_eq!(
///     url,
///     "https://api.linkedin.com/rest/socialActions/urn%3Ali%3Ashare%3A123/comments/foobar123"
/// );
/// ```
pub fn build_restli_url(
    resource_path: &str,
    path_keys: &IndexMap<String, RestliValue>,
    version: Option<&str>,
) -> Result<String> {
    build_restli_url_with_base(rest_api_base_url(version), resource_path, path_keys)
}

/// Like [`build_restli_url`] with an explicit base URL.
pub fn build_restli_url_with_base(
    base_url: &str,
    resource_path: &str,
    path_keys: &IndexMap<String, RestliValue>,
) -> Result<String> {
    let mut url = String::with_capacity(base_url.len() + resource_path.len() + 16);
    url.push_str(base_url);

    let mut rest = resource_path;
    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            Error::path_key_mismatch(resource_path, "unterminated '{' placeholder")
        })?;
        let name = &after[..close];
        let value = path_keys.get(name).ok_or_else(|| {
            Error::path_key_mismatch(resource_path, format!("no path key for {{{name}}}"))
        })?;
        url.push_str(&codec::encode(value));
        rest = &after[close + 1..];
    }
    url.push_str(rest);

    let unused: Vec<&str> = path_keys
        .keys()
        .filter(|k| !resource_path.contains(&format!("{{{k}}}")))
        .map(String::as_str)
        .collect();
    if !unused.is_empty() {
        return Err(Error::path_key_mismatch(
            resource_path,
            format!("no placeholder for path keys: {}", unused.join(", ")),
        ));
    }
    Ok(url)
}

// ============================================================================
// HEADERS
// ============================================================================

/// Standard Rest.li request headers, in wire order.
///
/// `content_type` defaults to JSON. The override verb, when given, is sent
/// in `X-HTTP-Method-Override`.
///
/// ```
/// use restli_sdk::restli::{RestliMethod, restli_request_headers};
///
/// let headers = restli_request_headers(RestliMethod::BatchCreate, "ABC123", None, None, None);
/// assert_eq!(headers[2], ("X-RestLi-Method".to_string(), "batch_create".to_string()));
/// assert_eq!(headers[3], ("Authorization".to_string(), "Bearer ABC123".to_string()));
/// ```
#[must_use]
pub fn restli_request_headers(
    restli_method: RestliMethod,
    access_token: &str,
    version: Option<&str>,
    method_override: Option<Method>,
    content_type: Option<&str>,
) -> Vec<(String, String)> {
    let mut headers = vec![
        (HEADER_CONNECTION.to_string(), "Keep-Alive".to_string()),
        (
            HEADER_RESTLI_PROTOCOL_VERSION.to_string(),
            RESTLI_PROTOCOL_VERSION.to_string(),
        ),
        (
            HEADER_RESTLI_METHOD.to_string(),
            restli_method.header_value().to_string(),
        ),
        (
            HEADER_AUTHORIZATION.to_string(),
            format!("Bearer {access_token}"),
        ),
        (
            HEADER_CONTENT_TYPE_TITLE.to_string(),
            content_type.unwrap_or(MIME_JSON).to_string(),
        ),
        (HEADER_USER_AGENT.to_string(), USER_AGENT.to_string()),
    ];
    if let Some(version) = version {
        headers.push((HEADER_LINKEDIN_VERSION.to_string(), version.to_string()));
    }
    if let Some(method) = method_override {
        headers.push((
            HEADER_HTTP_METHOD_OVERRIDE.to_string(),
            method.as_str().to_string(),
        ));
    }
    headers
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Id of the entity a create request made, read from `x-restli-id`.
///
/// With `decode` the reduced-encoded header is decoded (so compound keys come
/// back as objects); otherwise the raw header text is returned as a string.
/// `None` when the header is absent.
///
/// ```
/// use restli_sdk::http_client::Response;
/// use restli_sdk::restli::created_entity_id;
///
/// let response = Response::new(
///     201,
///     vec![("x-restli-id".to_string(), "urn%3Ali%3Atest%3Afoo bar".to_string())],
///     vec![],
/// );
/// let id = created_entity_id(&response, true).unwrap().unwrap();
/// assert_eq!(id.as_str(), Some("urn:li:test:foo bar"));
/// ```
pub fn created_entity_id(response: &Response, decode: bool) -> Result<Option<DecodedValue>> {
    let Some(raw) = response.header(HEADER_CREATED_ENTITY_ID) else {
        return Ok(None);
    };
    if decode {
        Ok(Some(codec::reduced_decode(raw)?))
    } else {
        Ok(Some(DecodedValue::String(raw.to_string())))
    }
}

// ============================================================================
// URNS
// ============================================================================

/// Format `urn:<namespace>:<entity_type>:<id>`. The namespace defaults to `li`.
///
/// ```
/// use restli_sdk::restli::create_urn_from_attrs;
///
/// assert_eq!(
///     create_urn_from_attrs("developerApplication", 123, None),
///     "urn:li:developerApplication:123"
/// );
/// ```
#[must_use]
pub fn create_urn_from_attrs(
    entity_type: &str,
    id: impl std::fmt::Display,
    namespace: Option<&str>,
) -> String {
    format!("urn:{}:{entity_type}:{id}", namespace.unwrap_or("li"))
}
