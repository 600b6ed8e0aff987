//! Records as they are exchanged with a store driver.

use crate::{Error, Result};

use indexmap::IndexMap;

/// A single attribute value.
///
/// Records carry nested maps (`request_sub_type`, `material_type`) and
/// lists of opaque maps (`transactions`), so values are JSON-shaped.
pub use serde_json::Value;

/// The primary key of a record: a single hash-key attribute and its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// Name of the primary-key attribute, e.g. `loan_id`.
    pub attribute: String,

    /// Value of the primary-key attribute.
    pub value: String,
}

impl Key {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{{{}: {}}}", self.attribute, self.value)
    }
}

/// One item in the key-value store, as an ordered attribute map.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object. Returns `None` for any other JSON value.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Inserts an attribute, returning the previous value if one was set.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(attribute.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the attribute as a string, if it is set to one.
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }

    /// Returns a numeric attribute as an integer.
    ///
    /// Numbers stored as floats are truncated. Anything that is not a number
    /// is reported as `None`.
    pub fn get_i64(&self, attribute: &str) -> Option<i64> {
        match self.get(attribute)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    /// Returns a list-of-strings attribute. A missing or null attribute is an
    /// empty list; any other shape is an error.
    pub fn get_str_list(&self, attribute: &str) -> Result<Vec<String>> {
        match self.get(attribute) {
            None | Some(Value::Null) => Ok(vec![]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(Error::invalid_record(attribute, "list of strings")),
                })
                .collect(),
            Some(_) => Err(Error::invalid_record(attribute, "list of strings")),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.into_iter()
    }
}

impl core::ops::Index<&str> for Record {
    type Output = Value;

    fn index(&self, attribute: &str) -> &Value {
        self.get(attribute).unwrap_or(&Value::Null)
    }
}
