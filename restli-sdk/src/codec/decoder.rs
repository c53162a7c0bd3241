//! Structural decoder: Rest.li text to `DecodedValue`.
//!
//! Decoding is not type-preserving. The text carries no type tags, so every
//! leaf comes back as a string and the caller interprets it.

use indexmap::IndexMap;

use super::{DecodeError, Mode, unescape};
use crate::constants::{EMPTY_STRING_TOKEN, LIST_PREFIX, LIST_SUFFIX, OBJ_PREFIX, OBJ_SUFFIX};

/// Result of decoding Rest.li text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_enums)] // one variant per wire shape
pub enum DecodedValue {
    /// Every leaf decodes to a string, including `null`, `true` and numbers.
    String(String),
    /// Decoded `List(...)`.
    List(Vec<DecodedValue>),
    /// Decoded `(k:v,...)`. Keys keep their wire order.
    Object(IndexMap<String, DecodedValue>),
}

impl DecodedValue {
    /// Borrow the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list items.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the object entries.
    #[must_use]
    pub const fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an object entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Convert to JSON with string leaves.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DecodedValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for DecodedValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Decode text produced by [`encode`](super::encode).
///
/// ```
/// use restli_sdk::codec::{self, DecodedValue};
///
/// let decoded = codec::decode("List((a:1),b%20c,'')").unwrap();
/// let items = decoded.as_list().unwrap();
/// assert_eq!(items[0].get("a").and_then(DecodedValue::as_str), Some("1"));
/// assert_eq!(items[1].as_str(), Some("b c"));
/// assert_eq!(items[2].as_str(), Some(""));
/// ```
pub fn decode(text: &str) -> Result<DecodedValue, DecodeError> {
    decode_with(text, Mode::Full)
}

/// Decode text produced by [`reduced_encode`](super::reduced_encode).
pub fn reduced_decode(text: &str) -> Result<DecodedValue, DecodeError> {
    decode_with(text, Mode::Reduced)
}

/// Decode with an explicit mode.
pub fn decode_with(text: &str, mode: Mode) -> Result<DecodedValue, DecodeError> {
    if text.is_empty() || text == EMPTY_STRING_TOKEN {
        return Ok(DecodedValue::String(String::new()));
    }
    if let Some(rest) = text.strip_prefix(LIST_PREFIX) {
        let body = rest
            .strip_suffix(LIST_SUFFIX)
            .ok_or_else(|| DecodeError::unbalanced(text))?;
        return decode_list(body, mode);
    }
    if let Some(rest) = text.strip_prefix(OBJ_PREFIX) {
        let body = rest
            .strip_suffix(OBJ_SUFFIX)
            .ok_or_else(|| DecodeError::unbalanced(text))?;
        return decode_object(body, mode);
    }
    Ok(DecodedValue::String(unescape(text, mode)?.into_owned()))
}

/// Decode a query string into its parameters.
///
/// Empty segments and segments with an empty name (`=x`) are skipped. A
/// missing or empty value decodes to the empty string.
///
/// ```
/// use restli_sdk::codec::{self, DecodedValue};
///
/// let params = codec::param_decode("q=search&ids=List(1,2)&&flag").unwrap();
/// assert_eq!(params["q"], DecodedValue::from("search"));
/// assert_eq!(params["ids"].as_list().map(<[_]>::len), Some(2));
/// assert_eq!(params["flag"], DecodedValue::from(""));
/// ```
pub fn param_decode(query: &str) -> Result<IndexMap<String, DecodedValue>, DecodeError> {
    let mut out = IndexMap::new();
    for segment in query.split('&') {
        if segment.is_empty() || segment.starts_with('=') {
            continue;
        }
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        let key = unescape(key, Mode::Full)?.into_owned();
        out.insert(key, decode(value)?);
    }
    Ok(out)
}

fn starts_nested(s: &str) -> bool {
    s.starts_with(LIST_PREFIX) || s.starts_with(OBJ_PREFIX)
}

/// Byte index of the `)` that closes the first `(` at or after `start`.
fn find_closing_bracket(s: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate().skip(start) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}

/// Parse one element starting at `idx`. Returns the value and the index just
/// past the element's trailing comma.
fn decode_element(s: &str, idx: usize, mode: Mode) -> Result<(DecodedValue, usize), DecodeError> {
    let rest = &s[idx..];
    if starts_nested(rest) {
        let close = find_closing_bracket(s, idx).ok_or_else(|| DecodeError::unbalanced(rest))?;
        let value = decode_with(&s[idx..=close], mode)?;
        // Skip the closing bracket and the separator after it.
        let after = close + 1;
        let next = s[after..]
            .chars()
            .next()
            .map_or(after, |c| after + c.len_utf8());
        return Ok((value, next));
    }
    let end = rest.find(',').map_or(s.len(), |i| idx + i);
    let value = DecodedValue::String(unescape(&s[idx..end], mode)?.into_owned());
    Ok((value, end + 1))
}

fn decode_list(s: &str, mode: Mode) -> Result<DecodedValue, DecodeError> {
    let mut items = Vec::new();
    let mut idx = 0;
    while idx < s.len() {
        let (value, next) = decode_element(s, idx, mode)?;
        items.push(value);
        idx = next;
    }
    Ok(DecodedValue::List(items))
}

fn decode_object(s: &str, mode: Mode) -> Result<DecodedValue, DecodeError> {
    let mut map = IndexMap::new();
    let mut idx = 0;
    while idx < s.len() {
        let colon = s[idx..]
            .find(':')
            .map(|i| idx + i)
            .ok_or_else(|| DecodeError::missing_separator(s))?;
        let key = unescape(&s[idx..colon], mode)?.into_owned();
        let (value, next) = decode_element(s, colon + 1, mode)?;
        map.insert(key, value);
        idx = next;
    }
    Ok(DecodedValue::Object(map))
}
