use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::object::{ConfigObject, ObjectRef};

/// Grouped collection of configuration objects: type → key → object.
///
/// The outer and inner maps are `BTreeMap`s, so type and key order is
/// normalized lexicographically regardless of insertion order. This is
/// what makes the canonical serialization (and therefore the content
/// checksum) independent of how the graph was assembled. Field order
/// *within* each object is authored order and is preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectGraph {
    groups: BTreeMap<String, BTreeMap<String, ConfigObject>>,
}

impl ObjectGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under `(object_type, key)`, returning any object
    /// previously stored there.
    pub fn insert(
        &mut self,
        object_type: impl Into<String>,
        key: impl Into<String>,
        object: ConfigObject,
    ) -> Option<ConfigObject> {
        self.groups
            .entry(object_type.into())
            .or_default()
            .insert(key.into(), object)
    }

    /// Look up an object by type and key.
    pub fn get(&self, object_type: &str, key: &str) -> Option<&ConfigObject> {
        self.groups.get(object_type)?.get(key)
    }

    /// Look up an object by reference.
    pub fn get_ref(&self, reference: &ObjectRef) -> Option<&ConfigObject> {
        self.get(&reference.object_type, &reference.key)
    }

    /// Returns `true` if an object exists at `(object_type, key)`.
    pub fn contains(&self, object_type: &str, key: &str) -> bool {
        self.get(object_type, key).is_some()
    }

    /// Remove an object, returning it if present. Empty type groups are
    /// dropped so the graph never serializes hollow entries.
    pub fn remove(&mut self, object_type: &str, key: &str) -> Option<ConfigObject> {
        let group = self.groups.get_mut(object_type)?;
        let removed = group.remove(key);
        if group.is_empty() {
            self.groups.remove(object_type);
        }
        removed
    }

    /// Total number of objects across all types.
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// Returns `true` if the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct object types.
    pub fn type_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of objects of one type.
    pub fn count_for_type(&self, object_type: &str) -> usize {
        self.groups.get(object_type).map_or(0, |g| g.len())
    }

    /// Type names in lexicographic order.
    pub fn types(&self) -> impl Iterator<Item = &String> {
        self.groups.keys()
    }

    /// Iterate `(type, key → object)` groups in lexicographic type order.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, ConfigObject>)> {
        self.groups.iter()
    }

    /// Iterate every object in stable `(type, key)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String, &ConfigObject)> {
        self.groups
            .iter()
            .flat_map(|(t, group)| group.iter().map(move |(k, obj)| (t, k, obj)))
    }

    /// Every `(type, key)` identity in stable order.
    pub fn refs(&self) -> Vec<ObjectRef> {
        self.iter()
            .map(|(t, k, _)| ObjectRef::new(t.clone(), k.clone()))
            .collect()
    }
}

impl FromIterator<(String, String, ConfigObject)> for ObjectGraph {
    fn from_iter<I: IntoIterator<Item = (String, String, ConfigObject)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (object_type, key, object) in iter {
            graph.insert(object_type, key, object);
        }
        graph
    }
}
