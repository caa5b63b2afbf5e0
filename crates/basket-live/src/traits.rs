//! The [`LiveObjectStore`] trait defining the live configuration boundary.

use basket_types::{ConfigObject, ObjectRef};

use crate::error::LiveResult;

/// The external configuration backend holding the current, mutable objects.
///
/// Objects are identified by `(type, key)`, never by surrogate IDs.
/// Implementations must be thread-safe (`Send + Sync`) with a
/// concurrency-safe read path; `apply` must be atomic at least per object.
pub trait LiveObjectStore: Send + Sync {
    /// Look up the raw object at `(object_type, key)`.
    ///
    /// Returns `Ok(None)` if no such object exists. Returns `Err` on
    /// operational failure; callers treat that as isolated to this object.
    fn lookup(&self, object_type: &str, key: &str) -> LiveResult<Option<ConfigObject>>;

    /// The store's canonical-form view of the object at `(object_type, key)`.
    ///
    /// May differ structurally from [`lookup`](Self::lookup) when the store
    /// adds derived/computed fields. Comparisons against snapshot content
    /// are always defined over this form, never over raw store records.
    fn export(&self, object_type: &str, key: &str) -> LiveResult<Option<ConfigObject>>;

    /// Upsert the object at `(object_type, key)`.
    ///
    /// Must be idempotent: applying the same object twice yields the same
    /// live state as applying it once.
    fn apply(&self, object_type: &str, key: &str, object: &ConfigObject) -> LiveResult<()>;

    /// Optional dependency-ordering hint for a batch of objects.
    ///
    /// Stores that enforce referential constraints can reorder the batch so
    /// referenced objects are applied first. `None` means no preference;
    /// the restore engine then uses the snapshot's stable type/key order.
    fn dependency_order(&self, refs: &[ObjectRef]) -> Option<Vec<ObjectRef>> {
        let _ = refs;
        None
    }
}
