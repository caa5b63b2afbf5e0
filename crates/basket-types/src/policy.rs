use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the diff and restore engines treat one object type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePolicy {
    /// Whether objects of this type are individually compared during a diff.
    pub comparable: bool,
    /// Whether objects of this type may be replayed into a live store.
    pub restorable: bool,
}

impl Default for TypePolicy {
    fn default() -> Self {
        Self {
            comparable: true,
            restorable: true,
        }
    }
}

/// Per-type policy table consulted by the diff and restore engines.
///
/// Types without an explicit entry are fully comparable and restorable.
/// Auxiliary/derived types that cannot stand on their own (the classic
/// example is a data-field definition that only exists as part of its
/// owning template) are registered with [`skip`](Self::skip): they are
/// counted during a diff but never individually compared or restored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    overrides: BTreeMap<String, TypePolicy>,
}

impl PolicyTable {
    /// Table with no overrides: every type comparable and restorable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explicit policy for `object_type`.
    pub fn set(&mut self, object_type: impl Into<String>, policy: TypePolicy) {
        self.overrides.insert(object_type.into(), policy);
    }

    /// Builder-style: exclude `object_type` from comparison and restore.
    pub fn skip(mut self, object_type: impl Into<String>) -> Self {
        self.set(
            object_type,
            TypePolicy {
                comparable: false,
                restorable: false,
            },
        );
        self
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, object_type: impl Into<String>, policy: TypePolicy) -> Self {
        self.set(object_type, policy);
        self
    }

    /// Effective policy for `object_type`.
    pub fn policy(&self, object_type: &str) -> TypePolicy {
        self.overrides
            .get(object_type)
            .copied()
            .unwrap_or_default()
    }

    /// Whether objects of `object_type` are individually diffed.
    pub fn is_comparable(&self, object_type: &str) -> bool {
        self.policy(object_type).comparable
    }

    /// Whether objects of `object_type` may be restored.
    pub fn is_restorable(&self, object_type: &str) -> bool {
        self.policy(object_type).restorable
    }
}
