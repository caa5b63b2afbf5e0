//! Restore engine for configuration baskets.
//!
//! Replays a snapshot, or a single object from it, into a live store.
//! Applies are idempotent upserts keyed by `(type, key)`; a single
//! object's failure never aborts the batch unless the store signals a
//! transactional abort.
//!
//! # Key Types
//!
//! - [`Selector`] — all objects, or one `(type, key)`
//! - [`RestoreReport`] / [`RestoreEntry`] / [`RestoreOutcome`] — per-object
//!   applied / skipped / failed outcomes
//! - [`restore_snapshot`] — the engine entry point

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{restore_snapshot, Selector};
pub use error::{RestoreError, RestoreResult};
pub use report::{RestoreEntry, RestoreOutcome, RestoreReport, SkipReason};
