use basket_types::{Checksum, ObjectGraph};

use crate::codec::encode_graph;
use crate::error::CanonResult;

/// Domain tag mixed into every content checksum.
///
/// Domain separation keeps snapshot digests from colliding with hashes of
/// the same bytes computed elsewhere for another purpose.
pub const CHECKSUM_DOMAIN: &str = "basket-snapshot-v1";

/// Compute the content checksum of a grouped collection.
///
/// The digest is BLAKE3 over the compact canonical encoding. It is a pure
/// function: the only failure mode is a serialization failure of the input.
pub fn checksum_graph(graph: &ObjectGraph) -> CanonResult<Checksum> {
    let text = encode_graph(graph)?;
    Ok(checksum_text(&text))
}

/// Compute the checksum of an already-serialized canonical dump.
///
/// Any tool holding a persisted snapshot dump must reproduce the stored
/// checksum from the same bytes; this is the interchange contract.
pub fn checksum_text(text: &str) -> Checksum {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CHECKSUM_DOMAIN.as_bytes());
    hasher.update(b":");
    hasher.update(text.as_bytes());
    Checksum::from_hash(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_types::ConfigObject;

    fn graph_with(entries: &[(&str, &str, &str)]) -> ObjectGraph {
        let mut graph = ObjectGraph::new();
        for (object_type, key, address) in entries {
            graph.insert(
                object_type.to_string(),
                key.to_string(),
                ConfigObject::new().with("address", *address),
            );
        }
        graph
    }

    #[test]
    fn checksum_is_deterministic() {
        let graph = graph_with(&[("Host", "srv1", "10.0.0.1")]);
        assert_eq!(
            checksum_graph(&graph).unwrap(),
            checksum_graph(&graph).unwrap()
        );
    }

    #[test]
    fn checksum_is_independent_of_insertion_order() {
        let forward = graph_with(&[("Host", "a", "1"), ("Host", "b", "2"), ("Zone", "z", "3")]);
        let reversed = graph_with(&[("Zone", "z", "3"), ("Host", "b", "2"), ("Host", "a", "1")]);
        assert_eq!(
            checksum_graph(&forward).unwrap(),
            checksum_graph(&reversed).unwrap()
        );
    }

    #[test]
    fn different_content_produces_different_checksums() {
        let a = graph_with(&[("Host", "srv1", "10.0.0.1")]);
        let b = graph_with(&[("Host", "srv1", "10.0.0.2")]);
        assert_ne!(checksum_graph(&a).unwrap(), checksum_graph(&b).unwrap());
    }

    #[test]
    fn text_checksum_matches_graph_checksum() {
        let graph = graph_with(&[("Host", "srv1", "10.0.0.1")]);
        let dump = encode_graph(&graph).unwrap();
        assert_eq!(checksum_text(&dump), checksum_graph(&graph).unwrap());
    }

    #[test]
    fn domain_tag_separates_from_raw_hash() {
        let graph = ObjectGraph::new();
        let dump = encode_graph(&graph).unwrap();
        let raw = Checksum::from_hash(*blake3::hash(dump.as_bytes()).as_bytes());
        assert_ne!(checksum_text(&dump), raw);
    }
}
