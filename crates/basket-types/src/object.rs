use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a configuration object: its type name plus its unique key
/// within that type.
///
/// Keys are human-meaningful identifiers (a host name, a template name),
/// not surrogate IDs. A `(type, key)` pair uniquely identifies an object
/// within any store or snapshot scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_type: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(object_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object_type, self.key)
    }
}

/// A semi-structured configuration record.
///
/// A `ConfigObject` is an ordered mapping of field name to value, where a
/// value may be a scalar, string, null, array, or nested object. Field
/// order is preserved as authored; it is part of the canonical form, so
/// two objects with the same fields in a different order serialize to
/// different canonical text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigObject {
    fields: Map<String, Value>,
}

impl ConfigObject {
    /// Create an object with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object from an existing field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Set a field, appending it in authored order (or replacing in place
    /// if the name already exists).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Read a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove a field by name, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// Iterate fields in authored order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Field names in authored order.
    pub fn field_names(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying field map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl FromIterator<(String, Value)> for ConfigObject {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<Map<String, Value>> for ConfigObject {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
