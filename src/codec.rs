//! Reading and writing wire values.
//!
//! `serde::Deserialize` is the reader side and `serde::Serialize` the writer
//! side; every value and message type implements both. The helpers here work
//! on already-parsed `serde_json::Value` documents, which is what the registry
//! hands to each decoder.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The kind of a JSON node, as seen by a reader.
///
/// Used when reporting a node that has the wrong kind, such as a numeric
/// `jsonrpc` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl NodeKind {
    /// Classify a node.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => NodeKind::Integer,
            Value::Number(_) => NodeKind::Float,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Integer => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        })
    }
}

/// Write a value into a JSON document.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Read a value out of a JSON document.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Read a keyed member of an object.
///
/// A missing key is read as `null`, so `Option` members decode to `None`
/// while required members fail.
pub fn decode_member<T: DeserializeOwned>(document: &Value, key: &str) -> Result<T> {
    let member = document.get(key).cloned().unwrap_or(Value::Null);
    decode(member)
}

/// Borrow a string member, if present and a string.
pub fn str_member<'a>(document: &'a Value, key: &str) -> Option<&'a str> {
    document.get(key).and_then(Value::as_str)
}
