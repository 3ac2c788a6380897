//! The untyped key-value container extras travel in

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value stored under a key in a [`Bundle`].
///
/// The variants mirror the accessor families a bundle supports: one per
/// primitive, text, the two transportable capabilities, and values that went
/// through the opaque transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExtraValue {
    Boolean(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    CharSequence(String),
    /// Value carried through the serializable capability
    Serializable(serde_json::Value),
    /// Value carried through the transportable-by-reference capability
    Parcelable(serde_json::Value),
    /// Value wrapped by the opaque transport
    Wrapped(serde_json::Value),
}

impl ExtraValue {
    /// Accessor family name, as used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ExtraValue::Boolean(_) => "boolean",
            ExtraValue::Byte(_) => "byte",
            ExtraValue::Char(_) => "char",
            ExtraValue::Short(_) => "short",
            ExtraValue::Int(_) => "int",
            ExtraValue::Long(_) => "long",
            ExtraValue::Float(_) => "float",
            ExtraValue::Double(_) => "double",
            ExtraValue::String(_) => "string",
            ExtraValue::CharSequence(_) => "char_sequence",
            ExtraValue::Serializable(_) => "serializable",
            ExtraValue::Parcelable(_) => "parcelable",
            ExtraValue::Wrapped(_) => "wrapped",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ExtraValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtraValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Text content for both string and char-sequence values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtraValue::String(s) | ExtraValue::CharSequence(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        ExtraValue::Boolean(value)
    }
}

impl From<i8> for ExtraValue {
    fn from(value: i8) -> Self {
        ExtraValue::Byte(value)
    }
}

impl From<char> for ExtraValue {
    fn from(value: char) -> Self {
        ExtraValue::Char(value)
    }
}

impl From<i16> for ExtraValue {
    fn from(value: i16) -> Self {
        ExtraValue::Short(value)
    }
}

impl From<i32> for ExtraValue {
    fn from(value: i32) -> Self {
        ExtraValue::Int(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        ExtraValue::Long(value)
    }
}

impl From<f32> for ExtraValue {
    fn from(value: f32) -> Self {
        ExtraValue::Float(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        ExtraValue::Double(value)
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::String(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::String(value.to_string())
    }
}

/// Key-value container of extras.
///
/// Keys are kept sorted, so two bundles holding the same entries compare
/// equal and serialize identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, ExtraValue>,
}

impl Bundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous value under the key
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Option<ExtraValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a value; `None` plays the role of a null lookup result
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.entries.remove(key)
    }

    /// Copy every entry of `other` into this bundle, overwriting shared keys
    pub fn put_all(&mut self, other: &Bundle) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize to bytes (the JSON wire format)
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}
