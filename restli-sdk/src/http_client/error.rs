//! Request error type.

use super::response::Response;
use crate::codec::{DecodeError, EncodeError};

/// Errors from building or sending a Rest.li request.
///
/// Malformed-input variants are raised before anything is sent and are
/// never worth retrying. [`Status`](Self::Status) and
/// [`Transport`](Self::Transport) carry what the transport reported,
/// unchanged.
///
/// ```
/// use restli_sdk::http_client::{Error, Response};
///
/// let err = Error::status(Response::new(404, vec![], b"{}".to_vec()));
/// assert_eq!(err.status_code(), Some(404));
/// assert!(!err.is_malformed_input());
///
/// assert!(Error::EmptyPatch.is_malformed_input());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Query parameters could not be encoded.
    Encode(EncodeError),

    /// Rest.li text in a response could not be decoded.
    Decode(DecodeError),

    /// A partial update was given neither a patch object nor an
    /// original/modified pair.
    MissingPatchInput,

    /// A partial update would change nothing.
    EmptyPatch,

    /// Parallel batch inputs have different lengths.
    LengthMismatch {
        /// Names of the inputs that disagree, e.g. `"ids, entities"`.
        fields: &'static str,
    },

    /// Path placeholders and supplied path keys do not line up.
    PathKeyMismatch {
        /// The resource path template.
        path: String,
        /// What did not match.
        detail: String,
    },

    /// No multipart boundary absent from the payload was found.
    BoundaryExhausted {
        /// Number of boundaries tried.
        attempts: usize,
    },

    /// The OS random source failed.
    Random(String),

    /// The request URL is not an absolute http(s) URL.
    InvalidUrl(String),

    /// A header value contains CR or LF.
    InvalidHeader {
        /// Name of the offending header.
        name: String,
    },

    /// A body could not be serialized or a response body parsed.
    Serialization(String),

    /// The server answered with a non-2xx status.
    Status(Box<Response>),

    /// The transport failed before a response was received.
    Transport(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::MissingPatchInput => write!(
                f,
                "partial update requires a patch object or both original and modified entities"
            ),
            Self::EmptyPatch => write!(f, "there must be at least one field to update"),
            Self::LengthMismatch { fields } => {
                write!(f, "batch inputs must have the same length: {fields}")
            },
            Self::PathKeyMismatch { path, detail } => {
                write!(f, "path keys do not match {path}: {detail}")
            },
            Self::BoundaryExhausted { attempts } => {
                write!(f, "no unique multipart boundary after {attempts} attempts")
            },
            Self::Random(msg) => write!(f, "random source failed: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
            Self::InvalidHeader { name } => {
                write!(f, "header {name} must not contain CR or LF")
            },
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Self::Status(response) => write!(
                f,
                "HTTP {} {}",
                response.status(),
                crate::constants::status_title(response.status())
            ),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl Error {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a status error from a non-2xx response.
    #[must_use]
    pub fn status(response: Response) -> Self {
        Self::Status(Box::new(response))
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a path key mismatch error.
    #[must_use]
    pub fn path_key_mismatch(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::PathKeyMismatch {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an invalid URL error.
    #[must_use]
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// Returns `true` if the request was rejected before being sent because
    /// the caller's input was malformed.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Encode(_)
                | Self::MissingPatchInput
                | Self::EmptyPatch
                | Self::LengthMismatch { .. }
                | Self::PathKeyMismatch { .. }
                | Self::InvalidUrl(_)
                | Self::InvalidHeader { .. }
        )
    }

    /// The response carried by a [`Status`](Self::Status) error.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    /// The HTTP status of a [`Status`](Self::Status) error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(Response::status)
    }
}

/// Result type for request operations.
pub type Result<T> = std::result::Result<T, Error>;
