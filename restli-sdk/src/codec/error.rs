//! Codec error types.

use std::fmt;

/// Error returned by the query-parameter encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Query parameters must be an object of name/value pairs.
    NotAnObject {
        /// Shape that was supplied instead.
        found: &'static str,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { found } => {
                write!(f, "query parameters must be an object, got {found}")
            },
        }
    }
}

impl std::error::Error for EncodeError {}

/// Error returned when Rest.li encoded text cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// An opening bracket has no matching close, or the text does not end
    /// with the suffix its prefix requires.
    UnbalancedBrackets {
        /// The offending (sub)string.
        input: String,
    },
    /// An object entry is missing its `:` key/value separator.
    MissingKeySeparator {
        /// The object body being parsed.
        input: String,
    },
    /// Percent-decoding produced bytes that are not valid UTF-8.
    InvalidUtf8 {
        /// The token that failed to decode.
        input: String,
    },
}

impl DecodeError {
    /// Creates an unbalanced-bracket error.
    #[must_use]
    pub fn unbalanced(input: impl Into<String>) -> Self {
        Self::UnbalancedBrackets {
            input: input.into(),
        }
    }

    /// Creates a missing-separator error.
    #[must_use]
    pub fn missing_separator(input: impl Into<String>) -> Self {
        Self::MissingKeySeparator {
            input: input.into(),
        }
    }

    /// Creates an invalid-UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(input: impl Into<String>) -> Self {
        Self::InvalidUtf8 {
            input: input.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedBrackets { input } => {
                write!(f, "input has unbalanced prefix and suffix: {input}")
            },
            Self::MissingKeySeparator { input } => {
                write!(f, "object entry has no ':' separator: {input}")
            },
            Self::InvalidUtf8 { input } => {
                write!(f, "percent-decoded value is not valid UTF-8: {input}")
            },
        }
    }
}

impl std::error::Error for DecodeError {}
