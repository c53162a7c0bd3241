// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Rest.li, LinkedIn etc. in prose
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::return_self_not_must_use)] // Builder pattern returns Self by design
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::match_same_arms)] // Method tables read better flat
#![allow(clippy::format_push_string)] // String building style
// Internal implementation where bounds/values are known at compile time or checked
#![allow(clippy::indexing_slicing)] // Byte offsets come from find()
#![allow(clippy::double_must_use)] // Builder methods can have their own docs
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! restli-sdk - Rest.li 2.0 protocol client toolkit
//!
//! # Overview
//!
//! Everything needed to talk to a Rest.li service (such as the LinkedIn
//! marketing APIs) except the socket:
//!
//! - [`codec`]: the bracketed `List(...)` / `(k:v)` text encoding, both ways
//! - [`patch`]: partial-update documents computed by diffing two entities
//! - [`tunnel`]: moving oversized query strings into the request body
//! - [`restli`]: URLs, headers, created-entity ids, URNs
//! - [`client`]: one request builder per Rest.li method
//!
//! Requests come out as [`http_client::RequestDescriptor`] values. Sending is
//! up to a [`http_client::Transport`], which is any
//! `Fn(&RequestDescriptor) -> Result<Response>`.
//!
//! # Quick Start
//!
//! ```
//! use restli_sdk::prelude::*;
//! use serde_json::json;
//!
//! let client = RestliClient::new(ClientConfig::new());
//! let options = RequestOptions::new("/adAccounts/{id}", "ACCESS_TOKEN")
//!     .path_key("id", 123)
//!     .version("202401");
//!
//! let transport = |req: &RequestDescriptor| -> http_client::Result<Response> {
//!     assert_eq!(req.url(), "https://api.linkedin.com/rest/adAccounts/123");
//!     Ok(Response::new(200, vec![], br#"{"name":"Test"}"#.to_vec()))
//! };
//!
//! let response = client.get(&transport, &options).unwrap();
//! let account: serde_json::Value = response.json().unwrap();
//! assert_eq!(account, json!({"name": "Test"}));
//! ```
//!
//! # Encoding
//!
//! ```
//! use restli_sdk::{RestliValue, codec};
//! use serde_json::json;
//!
//! let key = RestliValue::from(json!({
//!     "member": "urn:li:person:123",
//!     "account": "urn:li:account:234"
//! }));
//! assert_eq!(
//!     codec::encode(&key),
//!     "(member:urn%3Ali%3Aperson%3A123,account:urn%3Ali%3Aaccount%3A234)"
//! );
//! ```
//!
//! # Logging
//!
//! With debug enabled on the client, request outcomes are written to stderr
//! as single-line JSON via [`log!`].

pub mod client;
pub mod codec;
pub mod constants;
pub mod http_client;
pub mod log;
pub mod patch;
pub mod random;
pub mod restli;
pub mod tunnel;
pub mod value;

pub use codec::{DecodeError, DecodedValue, EncodeError, Mode};
pub use value::{Primitive, RestliValue};

/// Prelude module for convenient imports.
///
/// ```
/// use restli_sdk::prelude::*;
/// ```
///
/// This imports:
/// - [`RestliClient`], [`ClientConfig`], [`RequestOptions`] and the patch inputs
/// - [`RestliValue`] and [`DecodedValue`]
/// - [`http_client`] request, response and transport types
/// - [`RestliMethod`]
/// - the [`codec`] and [`log`] modules, and [`log!`]
pub mod prelude {
    pub use crate::client::{
        BatchPatchInput, ClientConfig, CreateResponse, PatchInput, RequestOptions, RestliClient,
    };
    pub use crate::codec::{self, DecodedValue};
    pub use crate::http_client::{
        self, Method, RequestDescriptor, RequestOverrides, Response, Transport,
    };
    pub use crate::log;
    pub use crate::patch::PatchDocument;
    pub use crate::restli::RestliMethod;
    pub use crate::value::RestliValue;
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

#[cfg(test)]
mod api_contracts {
    use static_assertions::assert_impl_all;

    // ========================================================================
    // Value types
    // ========================================================================

    // Values cross threads freely (no Rc inside)
    assert_impl_all!(crate::RestliValue: Clone, std::fmt::Debug, PartialEq, Send, Sync);
    assert_impl_all!(crate::DecodedValue: Clone, std::fmt::Debug, PartialEq, Eq, Send, Sync);
    assert_impl_all!(crate::Mode: Copy, Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash, Default);

    // ========================================================================
    // Error types
    // ========================================================================

    assert_impl_all!(crate::EncodeError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error);
    assert_impl_all!(crate::DecodeError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error);
    assert_impl_all!(
        crate::http_client::Error: Clone,
        std::fmt::Debug,
        PartialEq,
        Eq,
        std::error::Error,
        Send,
        Sync
    );

    // ========================================================================
    // Request types
    // ========================================================================

    assert_impl_all!(crate::http_client::Method: Copy, Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash);
    assert_impl_all!(crate::http_client::RequestDescriptor: Clone, std::fmt::Debug, PartialEq, Send, Sync);
    assert_impl_all!(crate::http_client::Response: Clone, std::fmt::Debug, PartialEq, Eq);
    assert_impl_all!(crate::restli::RestliMethod: Copy, Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash);

    // ========================================================================
    // Client types
    // ========================================================================

    assert_impl_all!(crate::client::RestliClient: Clone, std::fmt::Debug, Default, Send, Sync);
    assert_impl_all!(crate::client::RequestOptions: Clone, std::fmt::Debug);
    assert_impl_all!(crate::patch::PatchDocument: Clone, std::fmt::Debug, serde::Serialize);
}
