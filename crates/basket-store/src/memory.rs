//! In-memory snapshot store for tests and embedding.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;
use uuid::Uuid;

use basket_types::TimestampMs;

use crate::basket::{validate_basket_name, Basket};
use crate::error::{StoreError, StoreResult};
use crate::snapshot::{Snapshot, SnapshotMeta};
use crate::traits::SnapshotStore;

/// In-memory [`SnapshotStore`] implementation.
///
/// All data lives behind a single `RwLock`, so the uniqueness checks on
/// basket names and `(basket_uuid, ts_create)` run atomically with the
/// insert. Data is lost when the store is dropped.
pub struct InMemorySnapshotStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    // Keyed by name; BTreeMap keeps listings in name order for free.
    baskets: BTreeMap<String, Basket>,
    snapshots: BTreeMap<(Uuid, TimestampMs), Snapshot>,
}

impl InMemorySnapshotStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// Number of baskets currently registered.
    pub fn basket_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").baskets.len()
    }

    /// Number of snapshots currently stored, across all baskets.
    pub fn snapshot_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").snapshots.len()
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn create_basket(&self, name: &str) -> StoreResult<Basket> {
        validate_basket_name(name)?;
        let mut state = self.inner.write().expect("lock poisoned");
        if state.baskets.contains_key(name) {
            return Err(StoreError::BasketExists(name.to_string()));
        }
        let basket = Basket::new(name)?;
        state.baskets.insert(name.to_string(), basket.clone());
        debug!(basket = name, uuid = %basket.uuid(), "created basket");
        Ok(basket)
    }

    fn load_basket(&self, name: &str) -> StoreResult<Basket> {
        let state = self.inner.read().expect("lock poisoned");
        state
            .baskets
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::BasketNotFound(name.to_string()))
    }

    fn list_baskets(&self) -> StoreResult<Vec<Basket>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.baskets.values().cloned().collect())
    }

    fn delete_basket(&self, name: &str) -> StoreResult<bool> {
        let mut state = self.inner.write().expect("lock poisoned");
        let Some(basket) = state.baskets.remove(name) else {
            return Ok(false);
        };
        // Cascade: drop every snapshot owned by this basket.
        let uuid = basket.uuid();
        state.snapshots.retain(|(owner, _), _| *owner != uuid);
        debug!(basket = name, "deleted basket and its snapshots");
        Ok(true)
    }

    fn insert_snapshot(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let key = (snapshot.basket_uuid(), snapshot.ts_create());
        let mut state = self.inner.write().expect("lock poisoned");
        if state.snapshots.contains_key(&key) {
            return Err(StoreError::SnapshotExists {
                basket_uuid: key.0,
                ts_create: key.1,
            });
        }
        state.snapshots.insert(key, snapshot.clone());
        debug!(
            basket_uuid = %key.0,
            ts = %key.1,
            checksum = %snapshot.content_checksum().short_hex(),
            "stored snapshot"
        );
        Ok(())
    }

    fn load_snapshot(&self, basket_uuid: Uuid, ts_create: TimestampMs) -> StoreResult<Snapshot> {
        let state = self.inner.read().expect("lock poisoned");
        state
            .snapshots
            .get(&(basket_uuid, ts_create))
            .cloned()
            .ok_or(StoreError::SnapshotNotFound {
                basket_uuid,
                ts_create,
            })
    }

    fn list_snapshots(&self, basket_uuid: Uuid) -> StoreResult<Vec<SnapshotMeta>> {
        let state = self.inner.read().expect("lock poisoned");
        // Range over this basket's keyspace; reverse for newest-first.
        let metas = state
            .snapshots
            .range(
                (basket_uuid, TimestampMs::from_millis(0))
                    ..=(basket_uuid, TimestampMs::from_millis(u64::MAX)),
            )
            .rev()
            .map(|(_, snapshot)| snapshot.meta())
            .collect();
        Ok(metas)
    }

    fn delete_snapshot(&self, basket_uuid: Uuid, ts_create: TimestampMs) -> StoreResult<bool> {
        let mut state = self.inner.write().expect("lock poisoned");
        Ok(state.snapshots.remove(&(basket_uuid, ts_create)).is_some())
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotStore")
            .field("baskets", &self.basket_count())
            .field("snapshots", &self.snapshot_count())
            .finish()
    }
}
