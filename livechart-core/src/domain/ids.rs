use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of one configured indicator.
///
/// Survives recomputation so derived output can be matched back to the same
/// rendered visual element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IndicatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Deterministic content hash (BLAKE3, hex encoded).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    pub fn from_digest(hash: blake3::Hash) -> Self {
        Self(hash.to_hex().to_string())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_digest(blake3::hash(bytes))
    }

    /// Hash of several hashes, order-sensitive.
    pub fn combine(parts: &[&ContentHash]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part.0.as_bytes());
            hasher.update(b"|");
        }
        Self::from_digest(hasher.finalize())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_order_sensitive() {
        let a = ContentHash::from_bytes(b"a");
        let b = ContentHash::from_bytes(b"b");
        assert_ne!(ContentHash::combine(&[&a, &b]), ContentHash::combine(&[&b, &a]));
        assert_eq!(ContentHash::combine(&[&a, &b]), ContentHash::combine(&[&a, &b]));
    }

    #[test]
    fn indicator_id_is_transparent_in_json() {
        let id = IndicatorId::new("rsi-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""rsi-1""#);
    }
}
