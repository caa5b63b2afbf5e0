//! Canonical serialization and content addressing for configuration baskets.
//!
//! The canonical form is JSON with normalized (lexicographic) type/key
//! ordering and authored field order inside each object. It defines
//! equality for the diff engine and is the input to the content checksum
//! that identifies a snapshot.
//!
//! # Key Functions
//!
//! - [`encode_graph`] / [`decode_graph`] — grouped collection ↔ canonical text
//! - [`encode_object`] / [`decode_object`] — single object ↔ canonical text
//! - [`checksum_graph`] — domain-separated BLAKE3 digest of a graph
//! - [`checksum_text`] — digest of an already-serialized dump, byte-for-byte

pub mod codec;
pub mod error;
pub mod hasher;

pub use codec::{
    decode_graph, decode_object, encode_graph, encode_graph_pretty, encode_object,
    encode_object_pretty,
};
pub use error::{CanonError, CanonResult};
pub use hasher::{checksum_graph, checksum_text, CHECKSUM_DOMAIN};
