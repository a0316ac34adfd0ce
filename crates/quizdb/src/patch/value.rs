//! Classified values of a partial update document.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A raw field value, classified by shape when the request body is decoded.
///
/// Converters match on the variant instead of inspecting JSON themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    /// The key was present with an explicit `null`.
    Null,
    String(String),
    /// An array whose elements are all strings. May be empty.
    StringArray(Vec<String>),
    /// An array holding at least one element that is not a string.
    MixedArray,
    /// Any other JSON value; carries the JSON kind (`"number"`, `"bool"`, `"object"`).
    Other(&'static str),
}

impl PatchValue {
    /// Short name of the value's shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::StringArray(_) | Self::MixedArray => "array",
            Self::Other(kind) => kind,
        }
    }
}

impl From<Value> for PatchValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::String(s),
            Value::Array(items) => {
                let mut strings = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => strings.push(s),
                        _ => return Self::MixedArray,
                    }
                }
                Self::StringArray(strings)
            }
            Value::Bool(_) => Self::Other("bool"),
            Value::Number(_) => Self::Other("number"),
            Value::Object(_) => Self::Other("object"),
        }
    }
}

/// A client-submitted partial update: field name to classified value.
///
/// Deserializes from a JSON object; any other top-level JSON value is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PatchDocument {
    fields: HashMap<String, PatchValue>,
}

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from a JSON request body.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn from_json_str(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Insert a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<PatchValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style [`PatchDocument::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&PatchValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for PatchDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl From<&str> for PatchValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for PatchValue {
    fn from(items: Vec<String>) -> Self {
        Self::StringArray(items)
    }
}

impl From<Vec<&str>> for PatchValue {
    fn from(items: Vec<&str>) -> Self {
        Self::StringArray(items.into_iter().map(str::to_string).collect())
    }
}
