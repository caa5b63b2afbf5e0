//! Live configuration store boundary.
//!
//! The live store holds the current, mutable configuration objects that
//! snapshots are diffed against and restored into. This crate defines:
//! - [`LiveObjectStore`] trait — `lookup` / `export` / `apply` plus an
//!   optional dependency-ordering hint
//! - [`LiveError`] — the per-object vs. fatal failure taxonomy
//! - [`SelectionProvider`] — captures a basket's selection by exporting
//!   from a live store
//! - [`InMemoryLiveStore`] — test/embedding implementation with export
//!   transforms, fault injection, and dependency ranks

pub mod error;
pub mod memory;
pub mod provider;
pub mod traits;

pub use error::{LiveError, LiveResult};
pub use memory::InMemoryLiveStore;
pub use provider::SelectionProvider;
pub use traits::LiveObjectStore;
