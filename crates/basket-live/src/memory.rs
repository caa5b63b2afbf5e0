//! In-memory live store for tests and embedding.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::debug;

use basket_types::{ConfigObject, ObjectRef};

use crate::error::{LiveError, LiveResult};
use crate::traits::LiveObjectStore;

type ExportTransform = Box<dyn Fn(&ConfigObject) -> ConfigObject + Send + Sync>;

/// In-memory [`LiveObjectStore`] implementation.
///
/// Beyond plain storage it supports the collaborator behaviors the engines
/// must cope with:
/// - per-type export transforms (a store whose canonical export adds
///   derived fields),
/// - fault injection on the read path (`lookup`/`export`) and the write
///   path (`apply`), for failure-isolation tests,
/// - per-type dependency ranks feeding the `dependency_order` hint.
pub struct InMemoryLiveStore {
    objects: RwLock<BTreeMap<ObjectRef, ConfigObject>>,
    transforms: RwLock<HashMap<String, ExportTransform>>,
    read_faults: RwLock<HashMap<ObjectRef, LiveError>>,
    write_faults: RwLock<HashMap<ObjectRef, LiveError>>,
    ranks: RwLock<HashMap<String, u32>>,
}

impl InMemoryLiveStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            transforms: RwLock::new(HashMap::new()),
            read_faults: RwLock::new(HashMap::new()),
            write_faults: RwLock::new(HashMap::new()),
            ranks: RwLock::new(HashMap::new()),
        }
    }

    /// Seed an object directly, bypassing fault injection.
    pub fn put(&self, object_type: &str, key: &str, object: ConfigObject) {
        let mut objects = self.objects.write().expect("lock poisoned");
        objects.insert(ObjectRef::new(object_type, key), object);
    }

    /// Remove an object directly. Returns `true` if it existed.
    pub fn evict(&self, object_type: &str, key: &str) -> bool {
        let mut objects = self.objects.write().expect("lock poisoned");
        objects.remove(&ObjectRef::new(object_type, key)).is_some()
    }

    /// Raw stored object, without the export transform.
    pub fn raw(&self, object_type: &str, key: &str) -> Option<ConfigObject> {
        let objects = self.objects.read().expect("lock poisoned");
        objects.get(&ObjectRef::new(object_type, key)).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Register a canonical-form transform for one object type.
    ///
    /// `export` runs the stored object through the transform, modeling a
    /// backend whose canonical view carries derived fields.
    pub fn set_export_transform<F>(&self, object_type: &str, transform: F)
    where
        F: Fn(&ConfigObject) -> ConfigObject + Send + Sync + 'static,
    {
        let mut transforms = self.transforms.write().expect("lock poisoned");
        transforms.insert(object_type.to_string(), Box::new(transform));
    }

    /// Make `lookup`/`export` fail for one object.
    pub fn fail_reads(&self, object_type: &str, key: &str, error: LiveError) {
        let mut faults = self.read_faults.write().expect("lock poisoned");
        faults.insert(ObjectRef::new(object_type, key), error);
    }

    /// Make `apply` fail for one object.
    pub fn fail_writes(&self, object_type: &str, key: &str, error: LiveError) {
        let mut faults = self.write_faults.write().expect("lock poisoned");
        faults.insert(ObjectRef::new(object_type, key), error);
    }

    /// Clear any injected faults for one object.
    pub fn clear_faults(&self, object_type: &str, key: &str) {
        let reference = ObjectRef::new(object_type, key);
        self.read_faults
            .write()
            .expect("lock poisoned")
            .remove(&reference);
        self.write_faults
            .write()
            .expect("lock poisoned")
            .remove(&reference);
    }

    /// Set the dependency rank for one type; lower ranks apply first.
    ///
    /// Once any rank is set, [`dependency_order`](LiveObjectStore::dependency_order)
    /// returns a hint sorted by `(rank, type, key)`.
    pub fn set_dependency_rank(&self, object_type: &str, rank: u32) {
        let mut ranks = self.ranks.write().expect("lock poisoned");
        ranks.insert(object_type.to_string(), rank);
    }

    fn read_fault(&self, reference: &ObjectRef) -> Option<LiveError> {
        let faults = self.read_faults.read().expect("lock poisoned");
        faults.get(reference).cloned()
    }
}

impl Default for InMemoryLiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveObjectStore for InMemoryLiveStore {
    fn lookup(&self, object_type: &str, key: &str) -> LiveResult<Option<ConfigObject>> {
        let reference = ObjectRef::new(object_type, key);
        if let Some(error) = self.read_fault(&reference) {
            return Err(error);
        }
        let objects = self.objects.read().expect("lock poisoned");
        Ok(objects.get(&reference).cloned())
    }

    fn export(&self, object_type: &str, key: &str) -> LiveResult<Option<ConfigObject>> {
        let reference = ObjectRef::new(object_type, key);
        if let Some(error) = self.read_fault(&reference) {
            return Err(error);
        }
        let objects = self.objects.read().expect("lock poisoned");
        let Some(object) = objects.get(&reference) else {
            return Ok(None);
        };
        let transforms = self.transforms.read().expect("lock poisoned");
        let exported = match transforms.get(object_type) {
            Some(transform) => transform(object),
            None => object.clone(),
        };
        Ok(Some(exported))
    }

    fn apply(&self, object_type: &str, key: &str, object: &ConfigObject) -> LiveResult<()> {
        let reference = ObjectRef::new(object_type, key);
        {
            let faults = self.write_faults.read().expect("lock poisoned");
            if let Some(error) = faults.get(&reference) {
                return Err(error.clone());
            }
        }
        let mut objects = self.objects.write().expect("lock poisoned");
        debug!(object = %reference, "applied object");
        objects.insert(reference, object.clone());
        Ok(())
    }

    fn dependency_order(&self, refs: &[ObjectRef]) -> Option<Vec<ObjectRef>> {
        let ranks = self.ranks.read().expect("lock poisoned");
        if ranks.is_empty() {
            return None;
        }
        let mut ordered: Vec<ObjectRef> = refs.to_vec();
        ordered.sort_by(|a, b| {
            let rank_a = ranks.get(&a.object_type).copied().unwrap_or(0);
            let rank_b = ranks.get(&b.object_type).copied().unwrap_or(0);
            rank_a.cmp(&rank_b).then_with(|| a.cmp(b))
        });
        Some(ordered)
    }
}

impl std::fmt::Debug for InMemoryLiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLiveStore")
            .field("objects", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host(address: &str) -> ConfigObject {
        ConfigObject::new().with("address", address)
    }

    // -----------------------------------------------------------------------
    // Lookup / export
    // -----------------------------------------------------------------------

    #[test]
    fn lookup_present_and_absent() {
        let store = InMemoryLiveStore::new();
        store.put("Host", "srv1", host("10.0.0.1"));

        assert_eq!(
            store.lookup("Host", "srv1").unwrap(),
            Some(host("10.0.0.1"))
        );
        assert_eq!(store.lookup("Host", "srv2").unwrap(), None);
    }

    #[test]
    fn export_without_transform_matches_lookup() {
        let store = InMemoryLiveStore::new();
        store.put("Host", "srv1", host("10.0.0.1"));
        assert_eq!(
            store.export("Host", "srv1").unwrap(),
            store.lookup("Host", "srv1").unwrap()
        );
    }

    #[test]
    fn export_applies_per_type_transform() {
        let store = InMemoryLiveStore::new();
        store.put("Host", "srv1", host("10.0.0.1"));
        store.set_export_transform("Host", |obj| obj.clone().with("object_type", "object"));

        let exported = store.export("Host", "srv1").unwrap().unwrap();
        assert_eq!(exported.get("object_type"), Some(&json!("object")));
        // The raw record is untouched.
        assert_eq!(store.raw("Host", "srv1").unwrap(), host("10.0.0.1"));
    }

    #[test]
    fn transform_is_scoped_to_its_type() {
        let store = InMemoryLiveStore::new();
        store.put("Host", "srv1", host("10.0.0.1"));
        store.put("Zone", "master", ConfigObject::new());
        store.set_export_transform("Zone", |obj| obj.clone().with("is_global", false));

        assert_eq!(
            store.export("Host", "srv1").unwrap(),
            Some(host("10.0.0.1"))
        );
    }

    // -----------------------------------------------------------------------
    // Apply
    // -----------------------------------------------------------------------

    #[test]
    fn apply_is_an_upsert() {
        let store = InMemoryLiveStore::new();
        store.apply("Host", "srv1", &host("10.0.0.1")).unwrap();
        store.apply("Host", "srv1", &host("10.0.0.9")).unwrap();
        assert_eq!(store.raw("Host", "srv1").unwrap(), host("10.0.0.9"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn apply_is_idempotent() {
        let store = InMemoryLiveStore::new();
        let obj = host("10.0.0.1");
        store.apply("Host", "srv1", &obj).unwrap();
        store.apply("Host", "srv1", &obj).unwrap();
        assert_eq!(store.raw("Host", "srv1").unwrap(), obj);
        assert_eq!(store.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Fault injection
    // -----------------------------------------------------------------------

    #[test]
    fn read_faults_hit_lookup_and_export_only() {
        let store = InMemoryLiveStore::new();
        store.put("Host", "srv1", host("10.0.0.1"));
        store.fail_reads("Host", "srv1", LiveError::Backend("db gone".into()));

        assert_eq!(
            store.lookup("Host", "srv1").unwrap_err(),
            LiveError::Backend("db gone".into())
        );
        assert!(store.export("Host", "srv1").is_err());
        // Writes are unaffected.
        assert!(store.apply("Host", "srv1", &host("10.0.0.2")).is_ok());
    }

    #[test]
    fn write_faults_hit_apply_only() {
        let store = InMemoryLiveStore::new();
        store.fail_writes("Host", "srv1", LiveError::Constraint("missing zone".into()));

        assert_eq!(
            store.apply("Host", "srv1", &host("10.0.0.1")).unwrap_err(),
            LiveError::Constraint("missing zone".into())
        );
        assert!(store.lookup("Host", "srv1").is_ok());
    }

    #[test]
    fn clear_faults_restores_normal_operation() {
        let store = InMemoryLiveStore::new();
        store.fail_reads("Host", "srv1", LiveError::Backend("x".into()));
        store.clear_faults("Host", "srv1");
        assert!(store.lookup("Host", "srv1").is_ok());
    }

    // -----------------------------------------------------------------------
    // Dependency ordering
    // -----------------------------------------------------------------------

    #[test]
    fn no_ranks_means_no_hint() {
        let store = InMemoryLiveStore::new();
        assert!(store
            .dependency_order(&[ObjectRef::new("Host", "srv1")])
            .is_none());
    }

    #[test]
    fn ranks_sort_types_before_keys() {
        let store = InMemoryLiveStore::new();
        store.set_dependency_rank("Zone", 0);
        store.set_dependency_rank("Host", 1);

        let refs = vec![
            ObjectRef::new("Host", "srv1"),
            ObjectRef::new("Zone", "master"),
            ObjectRef::new("Host", "srv2"),
        ];
        let ordered = store.dependency_order(&refs).unwrap();
        assert_eq!(
            ordered,
            vec![
                ObjectRef::new("Zone", "master"),
                ObjectRef::new("Host", "srv1"),
                ObjectRef::new("Host", "srv2"),
            ]
        );
    }
}
