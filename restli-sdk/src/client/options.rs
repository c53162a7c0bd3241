//! Per-request inputs shared by every operation.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::http_client::RequestOverrides;
use crate::value::RestliValue;

/// Resource, credentials and parameters for one request.
///
/// Path keys and query parameters are given as unencoded values; the client
/// applies the Rest.li encoding.
///
/// ```
/// use restli_sdk::client::RequestOptions;
/// use restli_sdk::RestliValue;
///
/// let options = RequestOptions::new("/adAccounts/{id}", "ABC123")
///     .path_key("id", 123)
///     .query_param("fields", "id,name")
///     .version("202401");
///
/// assert_eq!(options.resource_path(), "/adAccounts/{id}");
/// assert_eq!(options.path_keys()["id"], RestliValue::from(123));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct RequestOptions {
    pub(crate) resource_path: String,
    pub(crate) access_token: String,
    pub(crate) path_keys: IndexMap<String, RestliValue>,
    pub(crate) query_params: IndexMap<String, RestliValue>,
    pub(crate) version: Option<String>,
    pub(crate) overrides: RequestOverrides,
}

impl RequestOptions {
    /// `resource_path` starts with `/` and may hold `{name}` placeholders.
    #[must_use]
    pub fn new(resource_path: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            access_token: access_token.into(),
            path_keys: IndexMap::new(),
            query_params: IndexMap::new(),
            version: None,
            overrides: RequestOverrides::new(),
        }
    }

    /// Value for a `{name}` placeholder. Complex keys are objects.
    #[must_use]
    pub fn path_key(mut self, name: impl Into<String>, value: impl Into<RestliValue>) -> Self {
        self.path_keys.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter. Order is kept.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<RestliValue>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Add every entry of a JSON object as a query parameter.
    #[must_use]
    pub fn query_params(mut self, params: Map<String, Value>) -> Self {
        self.query_params
            .extend(params.into_iter().map(|(k, v)| (k, RestliValue::from(v))));
        self
    }

    /// API version (`YYYYMM` or `YYYYMM.RR`). Selects the versioned base URL.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adjustments applied to the finished request.
    ///
    /// These win over everything the client computed, including the query
    /// tunneling rewrite.
    #[must_use]
    pub fn overrides(mut self, overrides: RequestOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resource path as given.
    #[must_use]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Bearer token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Placeholder values.
    #[must_use]
    pub const fn path_keys(&self) -> &IndexMap<String, RestliValue> {
        &self.path_keys
    }

    /// `leading` parameters followed by the caller's parameters. A caller
    /// parameter with the same name replaces the value but keeps the slot.
    pub(crate) fn params_with(&self, leading: Vec<(&str, RestliValue)>) -> RestliValue {
        let mut map = IndexMap::with_capacity(leading.len() + self.query_params.len());
        for (name, value) in leading {
            map.insert(name.to_string(), value);
        }
        for (name, value) in &self.query_params {
            map.insert(name.clone(), value.clone());
        }
        RestliValue::Object(map)
    }
}

/// How a partial update describes its changes.
///
/// Either an explicit `$set` object or an original/modified pair to diff.
/// When both are given the explicit object wins.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct PatchInput {
    pub(crate) patch_set: Option<Map<String, Value>>,
    pub(crate) original: Option<Value>,
    pub(crate) modified: Option<Value>,
}

impl PatchInput {
    /// No input yet. Sending it fails with `MissingPatchInput`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `{"patch": {"$set": fields}}` as is.
    #[must_use]
    pub fn patch_set(mut self, fields: Map<String, Value>) -> Self {
        self.patch_set = Some(fields);
        self
    }

    /// Diff two snapshots of the entity.
    #[must_use]
    pub fn entities(mut self, original: Value, modified: Value) -> Self {
        self.original = Some(original);
        self.modified = Some(modified);
        self
    }
}

/// [`PatchInput`] for several entities, index-aligned with the ids.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct BatchPatchInput {
    pub(crate) patch_sets: Option<Vec<Map<String, Value>>>,
    pub(crate) originals: Option<Vec<Value>>,
    pub(crate) modifieds: Option<Vec<Value>>,
}

impl BatchPatchInput {
    /// No input yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One `$set` object per id.
    #[must_use]
    pub fn patch_sets(mut self, sets: Vec<Map<String, Value>>) -> Self {
        self.patch_sets = Some(sets);
        self
    }

    /// One original and one modified snapshot per id.
    #[must_use]
    pub fn entities(mut self, originals: Vec<Value>, modifieds: Vec<Value>) -> Self {
        self.originals = Some(originals);
        self.modifieds = Some(modifieds);
        self
    }
}
