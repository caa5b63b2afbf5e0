use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// 256-bit content digest identifying a snapshot's serialized content.
///
/// A `Checksum` is computed over the canonical serialization of a grouped
/// object collection. Identical logical content always produces the same
/// checksum, so two snapshots can be compared by digest alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Checksum([u8; 32]);

impl Checksum {
    /// Create a `Checksum` from a pre-computed digest.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex form (first 7 characters), as shown in listings.
    pub fn short_hex(&self) -> String {
        let full = hex::encode(&self.0[..4]);
        full[..7].to_string()
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.short_hex())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Checksum {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Checksum> for [u8; 32] {
    fn from(sum: Checksum) -> Self {
        sum.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let sum = Checksum::from_hash([0xab; 32]);
        let hex = sum.to_hex();
        let parsed = Checksum::from_hex(&hex).unwrap();
        assert_eq!(sum, parsed);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            Checksum::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
        assert!(matches!(
            Checksum::from_hex("abcd"),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 2
            })
        ));
    }

    #[test]
    fn short_hex_is_7_chars() {
        let sum = Checksum::from_hash([0x5e; 32]);
        assert_eq!(sum.short_hex().len(), 7);
        assert!(sum.to_hex().starts_with(&sum.short_hex()));
    }

    #[test]
    fn display_is_full_hex() {
        let sum = Checksum::from_hash([7; 32]);
        let display = format!("{sum}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, sum.to_hex());
    }

    #[test]
    fn serde_roundtrip() {
        let sum = Checksum::from_hash([0x11; 32]);
        let json = serde_json::to_string(&sum).unwrap();
        let parsed: Checksum = serde_json::from_str(&json).unwrap();
        assert_eq!(sum, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let a = Checksum::from_hash([0; 32]);
        let b = Checksum::from_hash([1; 32]);
        assert!(a < b);
    }
}
