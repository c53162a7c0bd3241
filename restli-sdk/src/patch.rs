//! Partial-update patch documents.
//!
//! A patch describes how to turn one entity snapshot into another:
//!
//! ```json
//! {"patch": {"$set": {"name": "new"}, "$delete": ["description"], "address": {"$set": {"city": "Oslo"}}}}
//! ```
//!
//! Rules applied by [`diff`]:
//!
//! - a field that is non-empty in `original` but empty or absent in
//!   `modified` is deleted
//! - a field that is non-empty in both and differs is set, except that two
//!   objects produce a nested patch under the field name
//! - arrays are compared element by element and replaced whole on any
//!   difference
//! - a field that is empty or absent in `original` but non-empty in
//!   `modified` is set
//!
//! "Empty" is `null` or `""`. `0`, `false`, `[]` and `{}` are values.
//!
//! ```
//! use restli_sdk::patch;
//! use serde_json::json;
//!
//! let doc = patch::diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 3}));
//! assert_eq!(doc.to_json(), json!({"patch": {"$set": {"c": 3}, "$delete": ["b"]}}));
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

const SET: &str = "$set";
const DELETE: &str = "$delete";
const PATCH: &str = "patch";

/// Changes to one object level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchDiff {
    set: Map<String, Value>,
    delete: Vec<String>,
    nested: IndexMap<String, PatchDiff>,
}

impl PatchDiff {
    /// Fields to overwrite, in discovery order.
    #[must_use]
    pub const fn set(&self) -> &Map<String, Value> {
        &self.set
    }

    /// Fields to remove, in discovery order.
    #[must_use]
    pub fn delete(&self) -> &[String] {
        &self.delete
    }

    /// Patches for nested objects, keyed by field name.
    #[must_use]
    pub const fn nested(&self) -> &IndexMap<String, Self> {
        &self.nested
    }

    /// Returns `true` if nothing changes at this level or below.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.delete.is_empty() && self.nested.is_empty()
    }

    /// JSON form: `{"$set": {...}, "$delete": [...], "<field>": {...}}`.
    /// Empty operations are omitted.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        if !self.set.is_empty() {
            out.insert(SET.to_string(), Value::Object(self.set.clone()));
        }
        if !self.delete.is_empty() {
            out.insert(
                DELETE.to_string(),
                Value::Array(self.delete.iter().cloned().map(Value::String).collect()),
            );
        }
        for (key, sub) in &self.nested {
            out.insert(key.clone(), sub.to_json());
        }
        Value::Object(out)
    }
}

impl Serialize for PatchDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(!self.set.is_empty())
            + usize::from(!self.delete.is_empty())
            + self.nested.len();
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.set.is_empty() {
            map.serialize_entry(SET, &self.set)?;
        }
        if !self.delete.is_empty() {
            map.serialize_entry(DELETE, &self.delete)?;
        }
        for (key, sub) in &self.nested {
            map.serialize_entry(key, sub)?;
        }
        map.end()
    }
}

/// A complete `{"patch": ...}` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchDocument {
    patch: PatchDiff,
}

impl PatchDocument {
    /// Diff two entity snapshots. See [`diff`].
    #[must_use]
    pub fn diff(original: &Value, modified: &Value) -> Self {
        diff(original, modified)
    }

    /// A document that only sets fields.
    #[must_use]
    pub fn from_set(set: Map<String, Value>) -> Self {
        Self {
            patch: PatchDiff {
                set,
                ..PatchDiff::default()
            },
        }
    }

    /// The top-level diff.
    #[must_use]
    pub const fn patch(&self) -> &PatchDiff {
        &self.patch
    }

    /// Returns `true` if the document changes nothing. Sending an empty
    /// patch is a caller error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patch.is_empty()
    }

    /// JSON form, `{"patch": {...}}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert(PATCH.to_string(), self.patch.to_json());
        Value::Object(out)
    }
}

impl Serialize for PatchDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(PATCH, &self.patch)?;
        map.end()
    }
}

/// Compute the patch that turns `original` into `modified`.
///
/// Both sides are expected to be JSON objects. Anything else yields an
/// empty document.
#[must_use]
pub fn diff(original: &Value, modified: &Value) -> PatchDocument {
    let patch = match (original, modified) {
        (Value::Object(o), Value::Object(m)) => diff_objects(o, m),
        _ => PatchDiff::default(),
    };
    PatchDocument { patch }
}

fn is_value_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn diff_objects(original: &Map<String, Value>, modified: &Map<String, Value>) -> PatchDiff {
    let mut out = PatchDiff::default();

    for (key, o) in original {
        if is_value_empty(o) {
            continue;
        }
        match modified.get(key) {
            Some(m) if !is_value_empty(m) => compare_field(&mut out, key, o, m),
            _ => out.delete.push(key.clone()),
        }
    }

    for (key, m) in modified {
        if !is_value_empty(m) && original.get(key).is_none_or(is_value_empty) {
            out.set.insert(key.clone(), m.clone());
        }
    }

    out
}

fn compare_field(out: &mut PatchDiff, key: &str, o: &Value, m: &Value) {
    match (o, m) {
        (Value::Object(oo), Value::Object(mm)) => {
            let sub = diff_objects(oo, mm);
            if !sub.is_empty() {
                out.nested.insert(key.to_string(), sub);
            }
        },
        (Value::Array(oa), Value::Array(ma)) => {
            if is_array_modified(oa, ma) {
                out.set.insert(key.to_string(), m.clone());
            }
        },
        _ => {
            if !values_equal(o, m) {
                out.set.insert(key.to_string(), m.clone());
            }
        },
    }
}

fn is_array_modified(original: &[Value], modified: &[Value]) -> bool {
    if original.len() != modified.len() {
        return true;
    }
    original.iter().zip(modified).any(|(o, m)| match (o, m) {
        (Value::Object(oo), Value::Object(mm)) => !diff_objects(oo, mm).is_empty(),
        (Value::Array(oa), Value::Array(ma)) => is_array_modified(oa, ma),
        _ => !values_equal(o, m),
    })
}

/// Equality with numbers compared by value, so `1` and `1.0` match.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(fx), Some(fy)) if fx == fy)
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch_of(original: Value, modified: Value) -> Value {
        diff(&original, &modified).to_json()["patch"].clone()
    }

    #[test]
    fn test_identical_is_empty() {
        let entity = json!({"a": 1, "b": {"c": [1, 2]}, "d": "x"});
        let doc = diff(&entity, &entity);
        assert!(doc.is_empty());
        assert_eq!(doc.to_json(), json!({"patch": {}}));
    }

    #[test]
    fn test_added_field_is_set() {
        assert_eq!(
            patch_of(json!({"a": 1}), json!({"a": 1, "b": 2})),
            json!({"$set": {"b": 2}})
        );
    }

    #[test]
    fn test_removed_field_is_deleted() {
        assert_eq!(
            patch_of(json!({"a": 1, "b": 2}), json!({"a": 1})),
            json!({"$delete": ["b"]})
        );
    }

    #[test]
    fn test_array_replaced_whole() {
        assert_eq!(
            patch_of(json!({"a": [1, 2]}), json!({"a": [1, 3]})),
            json!({"$set": {"a": [1, 3]}})
        );
        assert_eq!(
            patch_of(json!({"a": [1, 2]}), json!({"a": [1, 2, 3]})),
            json!({"$set": {"a": [1, 2, 3]}})
        );
    }

    #[test]
    fn test_equal_arrays_of_objects() {
        let entity = json!({"a": [{"x": 1}, {"y": [true]}]});
        assert!(diff(&entity, &entity).is_empty());
        assert_eq!(
            patch_of(entity, json!({"a": [{"x": 1}, {"y": [false]}]})),
            json!({"$set": {"a": [{"x": 1}, {"y": [false]}]}})
        );
    }

    #[test]
    fn test_nested_object_patch() {
        assert_eq!(
            patch_of(
                json!({"name": "n", "address": {"city": "a", "zip": "1"}}),
                json!({"name": "n", "address": {"city": "b"}})
            ),
            json!({"address": {"$set": {"city": "b"}, "$delete": ["zip"]}})
        );
    }

    #[test]
    fn test_unchanged_nested_object_omitted() {
        assert_eq!(
            patch_of(
                json!({"a": {"b": 1}, "c": 1}),
                json!({"a": {"b": 1}, "c": 2})
            ),
            json!({"$set": {"c": 2}})
        );
    }

    #[test]
    fn test_empty_values() {
        // null and "" are absent; 0, false, [] and {} are values.
        assert_eq!(
            patch_of(
                json!({"a": "x", "b": "y", "c": null, "d": ""}),
                json!({"a": null, "b": "", "c": 0, "d": false})
            ),
            json!({"$set": {"c": 0, "d": false}, "$delete": ["a", "b"]})
        );
        assert!(diff(&json!({"a": null}), &json!({"a": ""})).is_empty());
        assert_eq!(
            patch_of(json!({"a": 1}), json!({"a": []})),
            json!({"$set": {"a": []}})
        );
    }

    #[test]
    fn test_type_change_is_set() {
        assert_eq!(
            patch_of(json!({"a": {"b": 1}}), json!({"a": [1]})),
            json!({"$set": {"a": [1]}})
        );
        assert_eq!(
            patch_of(json!({"a": 1}), json!({"a": "1"})),
            json!({"$set": {"a": "1"}})
        );
        assert_eq!(
            patch_of(json!({"a": [1, "x"]}), json!({"a": ["1", "x"]})),
            json!({"$set": {"a": ["1", "x"]}})
        );
    }

    #[test]
    fn test_integer_and_float_compare_by_value() {
        assert!(diff(&json!({"a": 1}), &json!({"a": 1.0})).is_empty());
        assert!(!diff(&json!({"a": 1}), &json!({"a": 1.5})).is_empty());
    }

    #[test]
    fn test_non_objects_yield_empty() {
        assert!(diff(&json!([1]), &json!([2])).is_empty());
        assert!(diff(&json!(null), &json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_from_set() {
        let mut set = Map::new();
        set.insert("name".to_string(), json!("new"));
        let doc = PatchDocument::from_set(set);
        assert!(!doc.is_empty());
        assert_eq!(doc.to_json(), json!({"patch": {"$set": {"name": "new"}}}));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let doc = diff(
            &json!({"a": 1, "b": 2, "n": {"x": 1}}),
            &json!({"a": 2, "n": {"x": 2}}),
        );
        assert_eq!(serde_json::to_value(&doc).unwrap(), doc.to_json());
        insta::assert_snapshot!(
            serde_json::to_string(&doc).unwrap(),
            @r#"{"patch":{"$set":{"a":2},"$delete":["b"],"n":{"$set":{"x":2}}}}"#
        );
    }

    #[test]
    fn test_accessors() {
        let doc = diff(&json!({"a": 1, "n": {"x": 1}}), &json!({"n": {"x": 2}}));
        assert_eq!(doc.patch().delete(), ["a"]);
        assert!(doc.patch().set().is_empty());
        assert_eq!(doc.patch().nested()["n"].set()["x"], json!(2));
    }
}
