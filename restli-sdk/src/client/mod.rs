//! Rest.li client: one request builder per resource method.
//!
//! Every operation comes in two forms. `build_*` returns the finished
//! [`RequestDescriptor`] without sending anything, which is what tests and
//! custom transports want. The plain form builds, sends through a
//! [`Transport`], and turns non-2xx responses into [`Error::Status`].
//!
//! ```
//! use restli_sdk::client::{ClientConfig, RequestOptions, RestliClient};
//! use restli_sdk::http_client::{self, Method, RequestDescriptor, Response};
//! use restli_sdk::RestliValue;
//!
//! let client = RestliClient::new(ClientConfig::new());
//! let options = RequestOptions::new("/adAccounts", "ABC123")
//!     .query_param("fields", "id,name")
//!     .version("202401");
//!
//! let request = client
//!     .build_batch_get(&options, &[RestliValue::from(1), RestliValue::from(2)])
//!     .unwrap();
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(
//!     request.url(),
//!     "https://api.linkedin.com/rest/adAccounts?ids=List(1,2)&fields=id,name"
//! );
//!
//! let transport = |_: &RequestDescriptor| -> http_client::Result<Response> {
//!     Ok(Response::new(200, vec![], br#"{"results":{}}"#.to_vec()))
//! };
//! let response = client.batch_get(&transport, &options, &[RestliValue::from(1)]).unwrap();
//! assert_eq!(response.status(), 200);
//! ```
//!
//! Reads, deletes and body-bearing writes switch to query tunneling on their
//! own when the encoded query string gets too long; see [`crate::tunnel`].

mod config;
mod options;


pub use config::ClientConfig;
pub use options::{BatchPatchInput, PatchInput, RequestOptions};

use serde_json::{Map, Value};

use crate::codec::{self, DecodedValue};
use crate::http_client::{Error, Method, RequestDescriptor, Response, Result, Transport};
use crate::patch::PatchDocument;
use crate::restli::{self, RestliMethod};
use crate::tunnel::{
    TunnelParams, maybe_apply_query_tunneling_with_body, maybe_apply_query_tunneling_without_body,
};
use crate::value::RestliValue;

/// Response to a create request, with the id the server assigned.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct CreateResponse {
    /// The raw response.
    pub response: Response,
    /// Decoded `x-restli-id`, when the server sent one.
    pub created_entity_id: Option<DecodedValue>,
}

/// Builds and sends Rest.li requests.
#[derive(Debug, Clone, Default)]
pub struct RestliClient {
    config: ClientConfig,
}

/// Query parameter assembly style.
#[derive(Clone, Copy)]
enum Query {
    /// `fields` passes through unencoded at the end.
    Read,
    /// Every parameter is encoded.
    Write,
}

impl RestliClient {
    /// Client with the given configuration.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Turn failure logging on or off, and optionally log successes too.
    pub const fn set_debug_params(&mut self, enabled: bool, log_success_responses: bool) {
        self.config.set_debug(enabled, log_success_responses);
    }

    // ========================================================================
    // REQUEST BUILDERS
    // ========================================================================

    /// GET one entity. Ids usually go in the path as `{id}` keys.
    pub fn build_get(&self, options: &RequestOptions) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Read, &options.params_with(Vec::new()))?;
        self.bodyless(options, RestliMethod::Get, &query)
    }

    /// BATCH_GET: `ids=List(...)` ahead of the caller's parameters.
    pub fn build_batch_get(
        &self,
        options: &RequestOptions,
        ids: &[RestliValue],
    ) -> Result<RequestDescriptor> {
        let params = options.params_with(vec![("ids", RestliValue::List(ids.to_vec()))]);
        let query = encode_query(Query::Read, &params)?;
        self.bodyless(options, RestliMethod::BatchGet, &query)
    }

    /// GET_ALL on a collection.
    pub fn build_get_all(&self, options: &RequestOptions) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Read, &options.params_with(Vec::new()))?;
        self.bodyless(options, RestliMethod::GetAll, &query)
    }

    /// FINDER: `q=<finder_name>` ahead of the caller's parameters.
    pub fn build_finder(
        &self,
        options: &RequestOptions,
        finder_name: &str,
    ) -> Result<RequestDescriptor> {
        let params = options.params_with(vec![("q", RestliValue::from(finder_name))]);
        let query = encode_query(Query::Read, &params)?;
        self.bodyless(options, RestliMethod::Finder, &query)
    }

    /// BATCH_FINDER: `bq=<finder_name>`, then the criteria list under
    /// `criteria_name`, then the caller's parameters.
    pub fn build_batch_finder(
        &self,
        options: &RequestOptions,
        finder_name: &str,
        criteria_name: &str,
        criteria: &[RestliValue],
    ) -> Result<RequestDescriptor> {
        let params = options.params_with(vec![
            ("bq", RestliValue::from(finder_name)),
            (criteria_name, RestliValue::List(criteria.to_vec())),
        ]);
        let query = encode_query(Query::Read, &params)?;
        self.bodyless(options, RestliMethod::BatchFinder, &query)
    }

    /// CREATE one entity.
    pub fn build_create(
        &self,
        options: &RequestOptions,
        entity: &Value,
    ) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Write, &options.params_with(Vec::new()))?;
        self.with_body(options, RestliMethod::Create, &query, entity)
    }

    /// BATCH_CREATE: body `{"elements": [...]}`.
    pub fn build_batch_create(
        &self,
        options: &RequestOptions,
        entities: &[Value],
    ) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Write, &options.params_with(Vec::new()))?;
        let body = serde_json::json!({ "elements": entities });
        self.with_body(options, RestliMethod::BatchCreate, &query, &body)
    }

    /// UPDATE: replace one entity.
    pub fn build_update(
        &self,
        options: &RequestOptions,
        entity: &Value,
    ) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Write, &options.params_with(Vec::new()))?;
        self.with_body(options, RestliMethod::Update, &query, entity)
    }

    /// BATCH_UPDATE: body `{"entities": {<encoded id>: entity, ...}}`.
    ///
    /// Ids that encode to the same text share one key and the later entity wins.
    pub fn build_batch_update(
        &self,
        options: &RequestOptions,
        ids: &[RestliValue],
        entities: &[Value],
    ) -> Result<RequestDescriptor> {
        if ids.len() != entities.len() {
            return Err(Error::LengthMismatch {
                fields: "ids, entities",
            });
        }
        let params = options.params_with(vec![("ids", RestliValue::List(ids.to_vec()))]);
        let query = encode_query(Query::Write, &params)?;
        let keyed = keyed_by_id(ids, entities.iter().cloned());
        let body = serde_json::json!({ "entities": keyed });
        self.with_body(options, RestliMethod::BatchUpdate, &query, &body)
    }

    /// PARTIAL_UPDATE with a patch document.
    pub fn build_partial_update(
        &self,
        options: &RequestOptions,
        input: &PatchInput,
    ) -> Result<RequestDescriptor> {
        let document = match (&input.patch_set, &input.original, &input.modified) {
            (Some(set), _, _) => {
                if set.is_empty() {
                    return Err(Error::EmptyPatch);
                }
                PatchDocument::from_set(set.clone())
            }
            (None, Some(original), Some(modified)) => {
                let document = PatchDocument::diff(original, modified);
                if document.is_empty() {
                    return Err(Error::EmptyPatch);
                }
                document
            }
            _ => return Err(Error::MissingPatchInput),
        };
        let query = encode_query(Query::Write, &options.params_with(Vec::new()))?;
        self.with_body(
            options,
            RestliMethod::PartialUpdate,
            &query,
            &document.to_json(),
        )
    }

    /// BATCH_PARTIAL_UPDATE: body `{"entities": {<encoded id>: patch, ...}}`.
    ///
    /// Every id needs a non-empty patch, otherwise [`Error::EmptyPatch`].
    /// Ids that encode to the same text share one key and the later patch wins.
    pub fn build_batch_partial_update(
        &self,
        options: &RequestOptions,
        ids: &[RestliValue],
        input: &BatchPatchInput,
    ) -> Result<RequestDescriptor> {
        let patches: Vec<Value> = match (&input.patch_sets, &input.originals, &input.modifieds) {
            (Some(sets), _, _) => {
                if ids.len() != sets.len() {
                    return Err(Error::LengthMismatch {
                        fields: "ids, patch_sets",
                    });
                }
                if sets.iter().any(Map::is_empty) {
                    return Err(Error::EmptyPatch);
                }
                sets.iter()
                    .map(|set| PatchDocument::from_set(set.clone()).to_json())
                    .collect()
            }
            (None, Some(originals), Some(modifieds)) => {
                if ids.len() != originals.len() || originals.len() != modifieds.len() {
                    return Err(Error::LengthMismatch {
                        fields: "ids, originals, modifieds",
                    });
                }
                let documents: Vec<PatchDocument> = originals
                    .iter()
                    .zip(modifieds)
                    .map(|(original, modified)| PatchDocument::diff(original, modified))
                    .collect();
                if documents.iter().any(PatchDocument::is_empty) {
                    return Err(Error::EmptyPatch);
                }
                documents.iter().map(PatchDocument::to_json).collect()
            }
            _ => return Err(Error::MissingPatchInput),
        };
        let params = options.params_with(vec![("ids", RestliValue::List(ids.to_vec()))]);
        let query = encode_query(Query::Write, &params)?;
        let body = serde_json::json!({ "entities": keyed_by_id(ids, patches) });
        self.with_body(options, RestliMethod::BatchPartialUpdate, &query, &body)
    }

    /// DELETE one entity.
    pub fn build_delete(&self, options: &RequestOptions) -> Result<RequestDescriptor> {
        let query = encode_query(Query::Write, &options.params_with(Vec::new()))?;
        self.bodyless(options, RestliMethod::Delete, &query)
    }

    /// BATCH_DELETE: `ids=List(...)` ahead of the caller's parameters.
    pub fn build_batch_delete(
        &self,
        options: &RequestOptions,
        ids: &[RestliValue],
    ) -> Result<RequestDescriptor> {
        let params = options.params_with(vec![("ids", RestliValue::List(ids.to_vec()))]);
        let query = encode_query(Query::Write, &params)?;
        self.bodyless(options, RestliMethod::BatchDelete, &query)
    }

    /// ACTION: POST `?action=<name>`, never tunneled.
    pub fn build_action(
        &self,
        options: &RequestOptions,
        action_name: &str,
        data: Option<&Value>,
    ) -> Result<RequestDescriptor> {
        let params = options.params_with(vec![("action", RestliValue::from(action_name))]);
        let query = encode_query(Query::Write, &params)?;
        let url = format!("{}?{query}", self.url(options)?);
        let mut request = RequestDescriptor::new(Method::Post, url).headers_from(
            restli::restli_request_headers(
                RestliMethod::Action,
                &options.access_token,
                options.version.as_deref(),
                None,
                None,
            ),
        );
        if let Some(data) = data {
            request = request.json(data.clone());
        }
        Ok(options.overrides.apply(request))
    }

    // ========================================================================
    // SENDING
    // ========================================================================

    /// Send a GET.
    pub fn get<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
    ) -> Result<Response> {
        self.execute(transport, RestliMethod::Get, self.build_get(options)?)
    }

    /// Send a BATCH_GET.
    pub fn batch_get<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        ids: &[RestliValue],
    ) -> Result<Response> {
        let request = self.build_batch_get(options, ids)?;
        self.execute(transport, RestliMethod::BatchGet, request)
    }

    /// Send a GET_ALL.
    pub fn get_all<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
    ) -> Result<Response> {
        self.execute(transport, RestliMethod::GetAll, self.build_get_all(options)?)
    }

    /// Send a FINDER.
    pub fn finder<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        finder_name: &str,
    ) -> Result<Response> {
        let request = self.build_finder(options, finder_name)?;
        self.execute(transport, RestliMethod::Finder, request)
    }

    /// Send a BATCH_FINDER.
    pub fn batch_finder<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        finder_name: &str,
        criteria_name: &str,
        criteria: &[RestliValue],
    ) -> Result<Response> {
        let request = self.build_batch_finder(options, finder_name, criteria_name, criteria)?;
        self.execute(transport, RestliMethod::BatchFinder, request)
    }

    /// Send a CREATE and decode the id the server assigned.
    pub fn create<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        entity: &Value,
    ) -> Result<CreateResponse> {
        let request = self.build_create(options, entity)?;
        let response = self.execute(transport, RestliMethod::Create, request)?;
        let created_entity_id = restli::created_entity_id(&response, true)?;
        Ok(CreateResponse {
            response,
            created_entity_id,
        })
    }

    /// Send a BATCH_CREATE.
    pub fn batch_create<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        entities: &[Value],
    ) -> Result<Response> {
        let request = self.build_batch_create(options, entities)?;
        self.execute(transport, RestliMethod::BatchCreate, request)
    }

    /// Send an UPDATE.
    pub fn update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        entity: &Value,
    ) -> Result<Response> {
        let request = self.build_update(options, entity)?;
        self.execute(transport, RestliMethod::Update, request)
    }

    /// Send a BATCH_UPDATE.
    pub fn batch_update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        ids: &[RestliValue],
        entities: &[Value],
    ) -> Result<Response> {
        let request = self.build_batch_update(options, ids, entities)?;
        self.execute(transport, RestliMethod::BatchUpdate, request)
    }

    /// Send a PARTIAL_UPDATE.
    pub fn partial_update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        input: &PatchInput,
    ) -> Result<Response> {
        let request = self.build_partial_update(options, input)?;
        self.execute(transport, RestliMethod::PartialUpdate, request)
    }

    /// Send a BATCH_PARTIAL_UPDATE.
    pub fn batch_partial_update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        ids: &[RestliValue],
        input: &BatchPatchInput,
    ) -> Result<Response> {
        let request = self.build_batch_partial_update(options, ids, input)?;
        self.execute(transport, RestliMethod::BatchPartialUpdate, request)
    }

    /// Send a DELETE.
    pub fn delete<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
    ) -> Result<Response> {
        self.execute(transport, RestliMethod::Delete, self.build_delete(options)?)
    }

    /// Send a BATCH_DELETE.
    pub fn batch_delete<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        ids: &[RestliValue],
    ) -> Result<Response> {
        let request = self.build_batch_delete(options, ids)?;
        self.execute(transport, RestliMethod::BatchDelete, request)
    }

    /// Send an ACTION.
    pub fn action<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: &RequestOptions,
        action_name: &str,
        data: Option<&Value>,
    ) -> Result<Response> {
        let request = self.build_action(options, action_name, data)?;
        self.execute(transport, RestliMethod::Action, request)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn url(&self, options: &RequestOptions) -> Result<String> {
        let version = options.version.as_deref();
        restli::build_restli_url_with_base(
            self.config.base_url_for(version),
            &options.resource_path,
            &options.path_keys,
        )
    }

    fn bodyless(
        &self,
        options: &RequestOptions,
        restli_method: RestliMethod,
        query: &str,
    ) -> Result<RequestDescriptor> {
        let url = self.url(options)?;
        let params = TunnelParams::new(query, &url, restli_method, &options.access_token)
            .version(options.version.as_deref());
        Ok(maybe_apply_query_tunneling_without_body(
            &params,
            &options.overrides,
        ))
    }

    fn with_body(
        &self,
        options: &RequestOptions,
        restli_method: RestliMethod,
        query: &str,
        body: &Value,
    ) -> Result<RequestDescriptor> {
        let url = self.url(options)?;
        let params = TunnelParams::new(query, &url, restli_method, &options.access_token)
            .version(options.version.as_deref());
        maybe_apply_query_tunneling_with_body(&params, body, &options.overrides)
    }

    fn execute<T: Transport + ?Sized>(
        &self,
        transport: &T,
        restli_method: RestliMethod,
        request: RequestDescriptor,
    ) -> Result<Response> {
        match request.send(transport) {
            Ok(response) if response.is_success() => {
                if self.config.logs_success_responses() {
                    crate::log!(info, "restli success response",
                        restli_method: restli_method.header_value(),
                        method: request.method(),
                        url: request.url(),
                        status: response.status(),
                        body: response.text().unwrap_or_default()
                    );
                }
                Ok(response)
            }
            Ok(response) => {
                if self.config.is_debug() {
                    crate::log!(error, "restli error response",
                        restli_method: restli_method.header_value(),
                        method: request.method(),
                        url: request.url(),
                        status: response.status(),
                        body: response.text().unwrap_or_default()
                    );
                }
                Err(Error::status(response))
            }
            Err(err) => {
                if self.config.is_debug() {
                    crate::log!(error, "restli request failed",
                        restli_method: restli_method.header_value(),
                        method: request.method(),
                        url: request.url(),
                        error: err
                    );
                }
                Err(err)
            }
        }
    }
}

fn encode_query(style: Query, params: &RestliValue) -> Result<String> {
    let encoded = match style {
        Query::Read => codec::encode_query_params_for_get_requests(params)?,
        Query::Write => codec::param_encode(params)?,
    };
    Ok(encoded)
}

/// JSON object keyed by the full-mode encoding of each id. A repeated id
/// keeps its first position and takes the last value.
fn keyed_by_id(ids: &[RestliValue], values: impl IntoIterator<Item = Value>) -> Map<String, Value> {
    ids.iter()
        .map(codec::encode)
        .zip(values)
        .collect()
}
