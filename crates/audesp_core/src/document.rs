//! Document tree representation.
//!
//! A filing is an arbitrary JSON-compatible tree. Only key names carry
//! semantic hints; the shape is whatever the caller provides. `DocValue` is a
//! closed set of shapes so that the normalizer and the validator can be total
//! functions over it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping node of the document tree.
pub type DocMap = BTreeMap<String, DocValue>;

/// A value in a filing document tree.
///
/// Integers and floats are kept apart so that a JSON round-trip returns the
/// exact same tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocValue {
    /// Null/absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Ordered sequence
    Array(Vec<DocValue>),
    /// Nested mapping
    Object(DocMap),
}

impl DocValue {
    /// Creates an empty object node.
    pub fn empty_object() -> Self {
        DocValue::Object(DocMap::new())
    }

    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    /// Returns true for values a form would consider unfilled: null or an
    /// empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            DocValue::Null => true,
            DocValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns true for null, `false`, zero, NaN and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            DocValue::Null => true,
            DocValue::Bool(b) => !b,
            DocValue::Int(i) => *i == 0,
            DocValue::Float(f) => *f == 0.0 || f.is_nan(),
            DocValue::String(s) => s.is_empty(),
            DocValue::Array(_) | DocValue::Object(_) => false,
        }
    }

    /// Returns true if this value is a number (integer or float).
    pub fn is_number(&self) -> bool {
        matches!(self, DocValue::Int(_) | DocValue::Float(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DocValue::Null => "null",
            DocValue::Bool(_) => "boolean",
            DocValue::Int(_) => "integer",
            DocValue::Float(_) => "number",
            DocValue::String(_) => "string",
            DocValue::Array(_) => "array",
            DocValue::Object(_) => "object",
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    ///
    /// Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocValue::Int(i) => Some(*i),
            DocValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocValue::Float(f) => Some(*f),
            DocValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a mapping.
    pub fn as_object(&self) -> Option<&DocMap> {
        match self {
            DocValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to get this value as a sequence.
    pub fn as_array(&self) -> Option<&[DocValue]> {
        match self {
            DocValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a direct child of an object node.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up a value by dotted path (`descritor.ano`).
    ///
    /// Sequence elements are addressed with numeric segments
    /// (`contratos.0.numero`).
    pub fn get_path(&self, path: &str) -> Option<&DocValue> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| match node {
                DocValue::Object(map) => map.get(segment),
                DocValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// Renders a scalar the way a form field would display it.
    ///
    /// Strings are returned without quotes; containers fall back to JSON.
    pub fn to_plain_string(&self) -> String {
        match self {
            DocValue::Null => String::new(),
            DocValue::Bool(b) => b.to_string(),
            DocValue::Int(i) => i.to_string(),
            DocValue::Float(f) => f.to_string(),
            DocValue::String(s) => s.clone(),
            DocValue::Array(_) | DocValue::Object(_) => self.to_string(),
        }
    }
}

impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Appends an object key to a diagnostic path.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Appends a sequence index to a diagnostic path.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        DocValue::Int(i)
    }
}

impl From<f64> for DocValue {
    fn from(f: f64) -> Self {
        DocValue::Float(f)
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Bool(b)
    }
}

impl From<Vec<DocValue>> for DocValue {
    fn from(items: Vec<DocValue>) -> Self {
        DocValue::Array(items)
    }
}

impl From<DocMap> for DocValue {
    fn from(map: DocMap) -> Self {
        DocValue::Object(map)
    }
}

impl From<serde_json::Value> for DocValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => DocValue::Null,
            Value::Bool(b) => DocValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DocValue::Int(i),
                None => DocValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => DocValue::String(s),
            Value::Array(items) => DocValue::Array(items.into_iter().map(DocValue::from).collect()),
            Value::Object(map) => DocValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, DocValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<DocValue> for serde_json::Value {
    fn from(value: DocValue) -> Self {
        use serde_json::Value;
        match value {
            DocValue::Null => Value::Null,
            DocValue::Bool(b) => Value::Bool(b),
            DocValue::Int(i) => Value::from(i),
            DocValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DocValue::String(s) => Value::String(s),
            DocValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            DocValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
