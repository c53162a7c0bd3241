//! The `RestliValue` tree the encoder works over.
//!
//! Caller input (usually a `serde_json::Value` or anything `Serialize`) is
//! converted once at the API boundary into a closed three-shape tree:
//! primitives, ordered lists, and keyed objects. The encoder then matches on
//! this type instead of probing runtime types.
//!
//! # Examples
//!
//! ```
//! use restli_sdk::RestliValue;
//! use serde_json::json;
//!
//! let key = RestliValue::from(json!({
//!     "member": "urn:li:person:123",
//!     "account": "urn:li:account:234"
//! }));
//! assert!(key.is_object());
//!
//! let ids: RestliValue = vec![123, 456, 789].into();
//! assert!(ids.is_list());
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::exhaustive_enums)] // mirrors the JSON scalar set
pub enum Primitive {
    /// JSON `null`, encoded as the bare token `null`.
    Null,
    /// Boolean, encoded as bare `true` / `false`.
    Bool(bool),
    /// Number, encoded in its shortest decimal form.
    Number(Number),
    /// String, escaped according to the encoding mode.
    String(String),
}

impl Primitive {
    /// Textual form before escaping.
    pub(crate) fn text(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Number(n) => Cow::Owned(format_number(n)),
            Self::String(s) => Cow::Borrowed(s),
        }
    }
}

/// Render a number the way a JSON producer would print it, without a
/// trailing `.0` for integral floats.
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

/// A value that can be written in the Rest.li bracketed encoding.
///
/// Object keys keep insertion order, so encoding the same input always
/// produces the same text.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::exhaustive_enums)] // the wire grammar has exactly three shapes
pub enum RestliValue {
    /// Scalar leaf.
    Primitive(Primitive),
    /// Ordered sequence, encoded as `List(...)`.
    List(Vec<RestliValue>),
    /// Keyed mapping, encoded as `(k:v,...)`.
    Object(IndexMap<String, RestliValue>),
}

impl RestliValue {
    /// The `null` value.
    #[must_use]
    pub const fn null() -> Self {
        Self::Primitive(Primitive::Null)
    }

    /// An empty object, handy as a starting point for query parameters.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(IndexMap::new())
    }

    /// Convert any serializable value.
    ///
    /// Goes through `serde_json::Value`, so `Option::None` fields marked
    /// `skip_serializing_if` are dropped and non-finite floats become `null`,
    /// exactly as a JSON round trip would.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::from)
    }

    /// Returns `true` for `List`.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` for `Object`.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns `true` for `Primitive(Null)`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Null))
    }

    /// Borrow the string payload, if this is a string primitive.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Borrow the entries of an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(Primitive::Null) => "null",
            Self::Primitive(Primitive::Bool(_)) => "boolean",
            Self::Primitive(Primitive::Number(_)) => "number",
            Self::Primitive(Primitive::String(_)) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Convert back to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Primitive(Primitive::Null) => Value::Null,
            Self::Primitive(Primitive::Bool(b)) => Value::Bool(*b),
            Self::Primitive(Primitive::Number(n)) => Value::Number(n.clone()),
            Self::Primitive(Primitive::String(s)) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for RestliValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Primitive(Primitive::Bool(b)),
            Value::Number(n) => Self::Primitive(Primitive::Number(n)),
            Value::String(s) => Self::Primitive(Primitive::String(s)),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for RestliValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<&str> for RestliValue {
    fn from(s: &str) -> Self {
        Self::Primitive(Primitive::String(s.to_string()))
    }
}

impl From<String> for RestliValue {
    fn from(s: String) -> Self {
        Self::Primitive(Primitive::String(s))
    }
}

impl From<bool> for RestliValue {
    fn from(b: bool) -> Self {
        Self::Primitive(Primitive::Bool(b))
    }
}

impl From<f64> for RestliValue {
    /// Non-finite floats have no JSON form and become `null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or_else(Self::null, |n| Self::Primitive(Primitive::Number(n)))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RestliValue {
                fn from(n: $t) -> Self {
                    Self::Primitive(Primitive::Number(Number::from(n)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl<T: Into<Self>> From<Vec<T>> for RestliValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for RestliValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for RestliValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
