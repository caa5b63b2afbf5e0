//! The [`SnapshotStore`] trait defining the persistence boundary.
//!
//! Production deployments back this with a relational store; tests and
//! embedding use [`InMemorySnapshotStore`](crate::InMemorySnapshotStore).

use uuid::Uuid;

use basket_types::TimestampMs;

use crate::basket::Basket;
use crate::error::StoreResult;
use crate::provider::ObjectProvider;
use crate::snapshot::{Snapshot, SnapshotMeta};

/// Storage backend for baskets and snapshots.
///
/// Implementations must be thread-safe (`Send + Sync`) and enforce the two
/// uniqueness invariants atomically:
/// - basket names are unique,
/// - `(basket_uuid, ts_create)` is unique per snapshot (a collision is a
///   conflict error, never a silent overwrite).
///
/// Snapshots are immutable: there is no update operation, only insert,
/// load, list, and delete.
pub trait SnapshotStore: Send + Sync {
    /// Register a new basket under a unique name.
    ///
    /// Fails with `BasketExists` if the name is taken.
    fn create_basket(&self, name: &str) -> StoreResult<Basket>;

    /// Load a basket by name. Fails with `BasketNotFound` if absent.
    fn load_basket(&self, name: &str) -> StoreResult<Basket>;

    /// All baskets in name order.
    fn list_baskets(&self) -> StoreResult<Vec<Basket>>;

    /// Delete a basket and, per store policy, its snapshots.
    ///
    /// Returns `Ok(true)` if the basket existed. Cascade to snapshots is a
    /// store-level concern; the in-memory implementation cascades.
    fn delete_basket(&self, name: &str) -> StoreResult<bool>;

    /// Persist a snapshot.
    ///
    /// Fails with `SnapshotExists` if a snapshot already exists at
    /// `(basket_uuid, ts_create)`; the caller retries with a fresh clock
    /// read.
    fn insert_snapshot(&self, snapshot: &Snapshot) -> StoreResult<()>;

    /// Load a snapshot by its identity. Fails with `SnapshotNotFound` if
    /// absent.
    fn load_snapshot(&self, basket_uuid: Uuid, ts_create: TimestampMs) -> StoreResult<Snapshot>;

    /// Listing metadata for all snapshots of a basket, newest first.
    fn list_snapshots(&self, basket_uuid: Uuid) -> StoreResult<Vec<SnapshotMeta>>;

    /// Delete one snapshot, independent of any others.
    ///
    /// Returns `Ok(true)` if it existed.
    fn delete_snapshot(&self, basket_uuid: Uuid, ts_create: TimestampMs) -> StoreResult<bool>;

    /// Capture the basket's current selection and persist it in one step.
    fn create_snapshot(
        &self,
        basket: &Basket,
        provider: &dyn ObjectProvider,
    ) -> StoreResult<Snapshot> {
        let snapshot = Snapshot::capture(basket, provider)?;
        self.insert_snapshot(&snapshot)?;
        Ok(snapshot)
    }
}
