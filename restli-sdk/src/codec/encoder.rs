//! Structural encoder: `RestliValue` to Rest.li text.

use super::{EncodeError, Mode, escape};
use crate::constants::{FIELDS_PARAM, LIST_PREFIX, LIST_SUFFIX, OBJ_PREFIX, OBJ_SUFFIX};
use crate::value::{Primitive, RestliValue};

/// Encode a value for use in a URL (full escaping).
///
/// ```
/// use restli_sdk::{RestliValue, codec};
/// use serde_json::json;
///
/// let key = RestliValue::from(json!({"member": "urn:li:person:1", "tags": ["a", ""]}));
/// assert_eq!(
///     codec::encode(&key),
///     "(member:urn%3Ali%3Aperson%3A1,tags:List(a,''))"
/// );
/// ```
#[must_use]
pub fn encode(value: &RestliValue) -> String {
    encode_with(value, Mode::Full)
}

/// Encode a value for use in a header or body (reduced escaping).
///
/// ```
/// use restli_sdk::{RestliValue, codec};
///
/// let id = RestliValue::from("urn:li:share:1");
/// assert_eq!(codec::reduced_encode(&id), "urn%3Ali%3Ashare%3A1");
/// ```
#[must_use]
pub fn reduced_encode(value: &RestliValue) -> String {
    encode_with(value, Mode::Reduced)
}

/// Encode a value with an explicit mode.
#[must_use]
pub fn encode_with(value: &RestliValue, mode: Mode) -> String {
    let mut out = String::new();
    write_value(&mut out, value, mode);
    out
}

fn write_value(out: &mut String, value: &RestliValue, mode: Mode) {
    match value {
        RestliValue::Primitive(p) => write_primitive(out, p, mode),
        RestliValue::List(items) => {
            out.push_str(LIST_PREFIX);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, mode);
            }
            out.push_str(LIST_SUFFIX);
        },
        RestliValue::Object(map) => {
            out.push_str(OBJ_PREFIX);
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&escape(key, mode));
                out.push(':');
                write_value(out, item, mode);
            }
            out.push_str(OBJ_SUFFIX);
        },
    }
}

fn write_primitive(out: &mut String, p: &Primitive, mode: Mode) {
    match p {
        Primitive::String(s) => out.push_str(&escape(s, mode)),
        // null, booleans and numbers are plain digits, letters, `-` and `.`,
        // so escaping leaves them unchanged.
        other => out.push_str(&escape(&other.text(), mode)),
    }
}

/// Encode query parameters as `name=value&name=value`.
///
/// Names and values are both fully escaped. `null` encodes to the empty
/// string; any other non-object is rejected.
///
/// ```
/// use restli_sdk::{RestliValue, codec};
/// use serde_json::json;
///
/// let params = RestliValue::from(json!({"q": "search", "ids": [1, 2]}));
/// assert_eq!(codec::param_encode(&params).unwrap(), "q=search&ids=List(1,2)");
/// ```
pub fn param_encode(params: &RestliValue) -> Result<String, EncodeError> {
    let Some(map) = params_map(params)? else {
        return Ok(String::new());
    };
    let mut out = String::new();
    for (key, value) in map {
        push_pair(&mut out, key, &encode(value));
    }
    Ok(out)
}

/// Like [`param_encode`], but a `fields` parameter is moved to the end and
/// passed through unencoded.
///
/// A string value is used verbatim. A list of primitives is joined with
/// commas, without `List(...)` bracketing.
///
/// ```
/// use restli_sdk::{RestliValue, codec};
/// use serde_json::json;
///
/// let params = RestliValue::from(json!({"fields": "id,firstName", "start": 0}));
/// assert_eq!(
///     codec::encode_query_params_for_get_requests(&params).unwrap(),
///     "start=0&fields=id,firstName"
/// );
/// ```
pub fn encode_query_params_for_get_requests(params: &RestliValue) -> Result<String, EncodeError> {
    let Some(map) = params_map(params)? else {
        return Ok(String::new());
    };
    let mut out = String::new();
    for (key, value) in map.iter().filter(|(k, _)| k.as_str() != FIELDS_PARAM) {
        push_pair(&mut out, key, &encode(value));
    }
    if let Some(fields) = map.get(FIELDS_PARAM) {
        push_pair(&mut out, FIELDS_PARAM, &raw_fields(fields));
    }
    Ok(out)
}

fn params_map(
    params: &RestliValue,
) -> Result<Option<&indexmap::IndexMap<String, RestliValue>>, EncodeError> {
    match params {
        RestliValue::Object(map) => Ok(Some(map)),
        RestliValue::Primitive(Primitive::Null) => Ok(None),
        other => Err(EncodeError::NotAnObject {
            found: other.kind(),
        }),
    }
}

fn push_pair(out: &mut String, key: &str, encoded_value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&escape(key, Mode::Full));
    out.push('=');
    out.push_str(encoded_value);
}

fn raw_fields(value: &RestliValue) -> String {
    match value {
        RestliValue::Primitive(p) => p.text().into_owned(),
        RestliValue::List(items) if items.iter().all(|v| matches!(v, RestliValue::Primitive(_))) => {
            items
                .iter()
                .filter_map(|v| match v {
                    RestliValue::Primitive(p) => Some(p.text().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(",")
        },
        other => encode(other),
    }
}
