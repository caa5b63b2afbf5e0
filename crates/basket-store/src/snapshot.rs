use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use basket_canon::{checksum_graph, encode_graph, CanonResult};
use basket_types::{Checksum, ObjectGraph, TimestampMs};

use crate::basket::Basket;
use crate::error::StoreResult;
use crate::provider::ObjectProvider;

/// Immutable, checksummed capture of a basket's full object graph.
///
/// A snapshot is identified by `(basket_uuid, ts_create)`; the timestamp is
/// the sole version key. `content_checksum` always equals the checksum
/// recomputed from `content` — the struct exposes no mutation, only
/// creation and reads, so the invariant holds by construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    basket_uuid: Uuid,
    ts_create: TimestampMs,
    content_checksum: Checksum,
    content: ObjectGraph,
}

impl Snapshot {
    /// Capture the basket's current selection as a snapshot dated now.
    ///
    /// Asks the provider for the full grouped collection, computes the
    /// content checksum over its canonical serialization, and stamps the
    /// snapshot with the current wall-clock time. Nothing is persisted;
    /// see [`SnapshotStore::create_snapshot`](crate::SnapshotStore::create_snapshot).
    pub fn capture(basket: &Basket, provider: &dyn ObjectProvider) -> StoreResult<Self> {
        Self::capture_at(basket, provider, TimestampMs::now())
    }

    /// Capture with an explicit creation timestamp.
    ///
    /// Lets callers control the version key, e.g. to retry after a
    /// timestamp collision with a fresh clock read, or to force a
    /// collision in tests.
    pub fn capture_at(
        basket: &Basket,
        provider: &dyn ObjectProvider,
        ts_create: TimestampMs,
    ) -> StoreResult<Self> {
        let content = provider.collect(basket)?;
        let content_checksum = checksum_graph(&content)?;
        debug!(
            basket = basket.name(),
            ts = %ts_create,
            checksum = %content_checksum.short_hex(),
            objects = content.len(),
            "captured snapshot"
        );
        Ok(Self {
            basket_uuid: basket.uuid(),
            ts_create,
            content_checksum,
            content,
        })
    }

    /// The owning basket's identifier.
    pub fn basket_uuid(&self) -> Uuid {
        self.basket_uuid
    }

    /// Creation timestamp; the snapshot's version key within its basket.
    pub fn ts_create(&self) -> TimestampMs {
        self.ts_create
    }

    /// Digest of the canonical serialization of `content`.
    pub fn content_checksum(&self) -> Checksum {
        self.content_checksum
    }

    /// The captured grouped collection.
    pub fn content(&self) -> &ObjectGraph {
        &self.content
    }

    /// The canonical serialization of `content`, suitable for interchange.
    ///
    /// Decoding this text yields the grouped collection back, and hashing
    /// these exact bytes reproduces `content_checksum`.
    pub fn json_dump(&self) -> CanonResult<String> {
        encode_graph(&self.content)
    }

    /// Recompute the checksum from `content` and compare it to the stored
    /// digest. Detects corruption in a snapshot read back from storage.
    pub fn verify(&self) -> CanonResult<bool> {
        Ok(checksum_graph(&self.content)? == self.content_checksum)
    }

    /// The snapshot's listing metadata.
    pub fn meta(&self) -> SnapshotMeta {
        SnapshotMeta {
            basket_uuid: self.basket_uuid,
            ts_create: self.ts_create,
            content_checksum: self.content_checksum,
            object_count: self.content.len(),
        }
    }
}

/// Listing metadata for one snapshot; everything but the content blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub basket_uuid: Uuid,
    pub ts_create: TimestampMs,
    pub content_checksum: Checksum,
    pub object_count: usize,
}
