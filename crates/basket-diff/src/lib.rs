//! Diff engine for configuration baskets.
//!
//! Compares a snapshot's grouped collection object-by-object against a
//! live store, and produces human-readable line diffs for single objects.
//!
//! Diffing is one-directional with the snapshot as the source of truth:
//! objects present in the live store but absent from the snapshot are
//! never reported.
//!
//! # Key Types
//!
//! - [`SnapshotDiff`] / [`DiffEntry`] / [`Classification`] — per-object
//!   NEW / MODIFIED / UNCHANGED / ERROR classification
//! - [`ObjectDiff`] / [`DiffHunk`] / [`DiffLine`] — line-level diff of one
//!   object's canonical forms

pub mod error;
pub mod object_diff;
pub mod snapshot_diff;

pub use error::{DiffError, DiffResult};
pub use object_diff::{diff_object, diff_texts, DiffHunk, DiffLine, ObjectDiff};
pub use snapshot_diff::{diff_snapshot, Classification, DiffEntry, SnapshotDiff};
