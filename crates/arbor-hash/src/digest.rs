use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::errors::HashError;

/// Length in bytes of a digest value.
pub const DIGEST_LEN: usize = 32;

/// Domain separator for interior tree nodes: `b"arbor:node:v1\0"`.
const NODE_DOMAIN_SEPARATOR: &[u8] = b"arbor:node:v1\0";

/// Supported digest algorithms for content addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256 (the current Arbor default).
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + raw digest bytes, rendered as lowercase hex.
///
/// Digests are immutable and compared by value. The canonical text
/// form is the 64-character lowercase hex encoding of the bytes; the
/// JSON shape is `{"alg":"sha-256","hex":"..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest {
    alg: DigestAlg,
    bytes: [u8; DIGEST_LEN],
}

impl Digest {
    /// Wraps raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest {
            alg: DigestAlg::Sha256,
            bytes,
        }
    }

    /// Hashes a byte sequence.
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Digest::from_bytes(hasher.finalize().into())
    }

    /// Hashes an ordered pair of digests into an interior tree node.
    ///
    /// The node digest is `sha256(domain_separator || left || right)`;
    /// the domain separator keeps interior nodes from colliding with
    /// leaf digests.
    pub fn combine(left: &Digest, right: &Digest) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(NODE_DOMAIN_SEPARATOR);
        hasher.update(left.bytes);
        hasher.update(right.bytes);
        Digest::from_bytes(hasher.finalize().into())
    }

    /// Parses a validated digest from its canonical hex form.
    pub fn parse(alg: DigestAlg, hex_text: &str) -> Result<Self, HashError> {
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(hex_text) {
            return Err(HashError::MalformedDigest {
                value: hex_text.to_string(),
            });
        }
        let decoded = hex::decode(hex_text).map_err(|_| HashError::MalformedDigest {
            value: hex_text.to_string(),
        })?;
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Digest { alg, bytes })
    }

    /// Digest algorithm.
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// Canonical lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[derive(Serialize, Deserialize)]
struct DigestRepr {
    alg: DigestAlg,
    hex: String,
}

impl Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DigestRepr {
            alg: self.alg,
            hex: self.to_hex(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = DigestRepr::deserialize(deserializer)?;
        Digest::parse(repr.alg, &repr.hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_bytes_is_deterministic() {
        assert_eq!(Digest::of_bytes(b"arbor"), Digest::of_bytes(b"arbor"));
        assert_ne!(Digest::of_bytes(b"arbor"), Digest::of_bytes(b"arbol"));
    }

    #[test]
    fn combine_is_order_sensitive() {
        let a = Digest::of_bytes(b"a");
        let b = Digest::of_bytes(b"b");
        assert_ne!(Digest::combine(&a, &b), Digest::combine(&b, &a));
    }

    #[test]
    fn hex_round_trip() {
        let digest = Digest::of_bytes(b"round trip");
        let restored = Digest::parse(DigestAlg::Sha256, &digest.to_hex()).unwrap();
        assert_eq!(digest, restored);
    }

    #[test]
    fn parse_rejects_uppercase_and_short_input() {
        let upper = Digest::of_bytes(b"x").to_hex().to_uppercase();
        assert!(Digest::parse(DigestAlg::Sha256, &upper).is_err());
        assert!(Digest::parse(DigestAlg::Sha256, "abc123").is_err());
    }
}
