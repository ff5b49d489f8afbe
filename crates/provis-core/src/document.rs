//! Nested configuration documents
//!
//! A [`Document`] is a string-keyed mapping whose values are strings,
//! numbers, booleans, lists, nulls or nested mappings. It is the shape of
//! the canonical configuration, of each server entry and of every node
//! configuration handed to provisioning. Key order follows declaration
//! order, which the server registry relies on for "first match" lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A nested configuration mapping with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from an arbitrary value, which must be a mapping.
    ///
    /// `null` is accepted as the empty document, matching how an empty
    /// source file parses.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::WrongShape {
                key: "<root>".to_string(),
                expected: "mapping",
                found: value_kind(&other),
            }),
        }
    }

    /// Raw value at `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value at `key`; `None` when absent or null.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_shape(key, "string", other)),
        }
    }

    /// Boolean value at `key`; `None` when absent or null.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_shape(key, "boolean", other)),
        }
    }

    /// List value at `key`; `None` when absent or null.
    pub fn get_list(&self, key: &str) -> Result<Option<&Vec<Value>>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(wrong_shape(key, "list", other)),
        }
    }

    /// List of strings at `key`; absent or null yields an empty list.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        let Some(items) = self.get_list(key)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(wrong_shape(key, "list of strings", other)),
            })
            .collect()
    }

    /// Nested mapping at `key`; `None` when absent or null.
    pub fn get_mapping(&self, key: &str) -> Result<Option<&Map<String, Value>>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(wrong_shape(key, "mapping", other)),
        }
    }

    /// Independent copy of the nested mapping at `key`
    pub fn get_document(&self, key: &str) -> Result<Option<Document>> {
        Ok(self.get_mapping(key)?.cloned().map(Document))
    }

    /// Insert `value` at `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Deep-merge `other` onto this document; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Document) {
        merge_maps(&mut self.0, &other.0);
    }

    /// Copy every top-level key of `other` onto this document without
    /// recursing into nested mappings.
    pub fn merge_shallow(&mut self, other: &Document) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Deep merge two values
///
/// If both values are mappings, merge them recursively with `other` taking
/// precedence. Otherwise `other` replaces `base` outright, so lists are
/// replaced rather than concatenated.
pub fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => merge_maps(base_map, other_map),
        (base, other) => {
            *base = other.clone();
        }
    }
}

fn merge_maps(base: &mut Map<String, Value>, other: &Map<String, Value>) {
    for (key, other_val) in other {
        if let Some(base_val) = base.get_mut(key) {
            deep_merge_value(base_val, other_val);
        } else {
            base.insert(key.clone(), other_val.clone());
        }
    }
}

/// Short name of a value's shape for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn wrong_shape(key: &str, expected: &'static str, found: &Value) -> Error {
    Error::WrongShape {
        key: key.to_string(),
        expected,
        found: value_kind(found),
    }
}
