//! Foundation types for configuration baskets.
//!
//! This crate provides the identity, content, and policy types used
//! throughout the basket system. Every other basket crate depends on
//! `basket-types`.
//!
//! # Key Types
//!
//! - [`ObjectRef`] — `(type, key)` identity of a configuration object
//! - [`ConfigObject`] — semi-structured record with authored field order
//! - [`ObjectGraph`] — grouped collection: type → key → object
//! - [`Checksum`] — 256-bit content digest of a canonical serialization
//! - [`TimestampMs`] — millisecond wall-clock timestamp (snapshot version key)
//! - [`PolicyTable`] — per-type comparable/restorable policy

pub mod checksum;
pub mod error;
pub mod graph;
pub mod object;
pub mod policy;
pub mod temporal;

pub use checksum::Checksum;
pub use error::TypeError;
pub use graph::ObjectGraph;
pub use object::{ConfigObject, ObjectRef};
pub use policy::{PolicyTable, TypePolicy};
pub use temporal::TimestampMs;
