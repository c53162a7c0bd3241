//! Leaf escaping for the two encoding modes.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::{DecodeError, Mode};
use crate::constants::{EMPTY_STRING_TOKEN, RESERVED_CHARS};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ *`.
///
/// This is the URI-component set with `'`, `(` and `)` added back, since
/// those carry structure in the Rest.li grammar.
const FULL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*');

/// Escape one leaf string.
///
/// The empty string becomes the explicit `''` marker in both modes.
///
/// ```
/// use restli_sdk::codec::{Mode, escape};
///
/// assert_eq!(escape("a b:c", Mode::Full), "a%20b%3Ac");
/// assert_eq!(escape("a b:c", Mode::Reduced), "a b%3Ac");
/// assert_eq!(escape("", Mode::Reduced), "''");
/// ```
pub fn escape(value: &str, mode: Mode) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed(EMPTY_STRING_TOKEN);
    }
    match mode {
        Mode::Full => utf8_percent_encode(value, FULL_ENCODE_SET).into(),
        Mode::Reduced => escape_reserved(value),
    }
}

fn escape_reserved(value: &str) -> Cow<'_, str> {
    if !value.contains(RESERVED_CHARS) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            ',' => out.push_str("%2C"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\'' => out.push_str("%27"),
            ':' => out.push_str("%3A"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape`] for one leaf token.
///
/// `''` and the empty token both yield the empty string. In full mode,
/// `%` not followed by two hex digits is kept literally.
pub fn unescape(token: &str, mode: Mode) -> Result<Cow<'_, str>, DecodeError> {
    if token.is_empty() || token == EMPTY_STRING_TOKEN {
        return Ok(Cow::Borrowed(""));
    }
    match mode {
        Mode::Full => percent_decode_str(token)
            .decode_utf8()
            .map_err(|_| DecodeError::invalid_utf8(token)),
        Mode::Reduced => Ok(unescape_reserved(token)),
    }
}

fn unescape_reserved(token: &str) -> Cow<'_, str> {
    if !token.contains('%') {
        return Cow::Borrowed(token);
    }
    let mut out = String::with_capacity(token.len());
    let mut rest = token;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = match tail.get(..3) {
            Some("%2C") => Some(','),
            Some("%28") => Some('('),
            Some("%29") => Some(')'),
            Some("%27") => Some('\''),
            Some("%3A") => Some(':'),
            _ => None,
        };
        if let Some(c) = decoded {
            out.push(c);
            rest = &tail[3..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
