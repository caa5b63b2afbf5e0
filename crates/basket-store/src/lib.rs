//! Basket and snapshot entities plus the snapshot persistence boundary.
//!
//! This crate provides:
//! - [`Basket`] — named, versioned container of configuration selections
//! - [`Snapshot`] — immutable, checksummed capture of a basket's object graph
//! - [`SnapshotStore`] trait — the persistence collaborator (relational in
//!   production, [`InMemorySnapshotStore`] for tests and embedding)
//! - [`ObjectProvider`] trait — the seam through which a basket's current
//!   selection is collected at snapshot time

pub mod basket;
pub mod error;
pub mod memory;
pub mod provider;
pub mod snapshot;
pub mod traits;

pub use basket::Basket;
pub use error::{StoreError, StoreResult};
pub use memory::InMemorySnapshotStore;
pub use provider::{FixedProvider, ObjectProvider};
pub use snapshot::{Snapshot, SnapshotMeta};
pub use traits::SnapshotStore;
