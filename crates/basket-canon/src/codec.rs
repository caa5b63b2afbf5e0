//! Deterministic encode/decode between in-memory records and canonical text.
//!
//! Two objects (or graphs) are equal for diffing purposes exactly when
//! their compact canonical encodings are byte-identical. The pretty
//! variants feed the human-readable single-object diff; they carry the
//! same ordering guarantees, only the whitespace differs.

use basket_types::{ConfigObject, ObjectGraph};

use crate::error::{CanonError, CanonResult};

/// Encode a grouped collection to compact canonical text.
///
/// Identical logical content always yields byte-identical output: type and
/// key order is normalized by the graph itself, field order is authored
/// order.
pub fn encode_graph(graph: &ObjectGraph) -> CanonResult<String> {
    serde_json::to_string(graph).map_err(|e| CanonError::Encode(e.to_string()))
}

/// Encode a grouped collection with pretty-printing, for display and diffs.
pub fn encode_graph_pretty(graph: &ObjectGraph) -> CanonResult<String> {
    serde_json::to_string_pretty(graph).map_err(|e| CanonError::Encode(e.to_string()))
}

/// Decode canonical text back into a grouped collection.
pub fn decode_graph(text: &str) -> CanonResult<ObjectGraph> {
    serde_json::from_str(text).map_err(|e| CanonError::Parse(e.to_string()))
}

/// Encode a single object to compact canonical text.
pub fn encode_object(object: &ConfigObject) -> CanonResult<String> {
    serde_json::to_string(object).map_err(|e| CanonError::Encode(e.to_string()))
}

/// Encode a single object with pretty-printing, for display and diffs.
pub fn encode_object_pretty(object: &ConfigObject) -> CanonResult<String> {
    serde_json::to_string_pretty(object).map_err(|e| CanonError::Encode(e.to_string()))
}

/// Decode canonical text back into a single object.
pub fn decode_object(text: &str) -> CanonResult<ConfigObject> {
    serde_json::from_str(text).map_err(|e| CanonError::Parse(e.to_string()))
}
