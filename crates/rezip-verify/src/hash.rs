use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Result, VerifyError};

/// A 256-bit content fingerprint.
///
/// Displays and serializes as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; ContentHash::LEN]);

impl ContentHash {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; Self::LEN]) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] { &self.0 }

    pub fn to_hex(&self) -> String { hex::encode(self.0) }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for ContentHash {
    type Error = VerifyError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; Self::LEN] = bytes.try_into().map_err(|_| VerifyError::InvalidLength {
            expected: Self::LEN,
            actual:   bytes.len(),
        })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl FromStr for ContentHash {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> { Self::from_hex(s) }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256Hasher;

    #[test]
    fn test_hex_round_trip() {
        let hash = Sha256Hasher::digest(b"abc");
        let parsed: ContentHash = hash.to_hex().parse().unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let hash = ContentHash::new([0xAB; ContentHash::LEN]);
        assert_eq!(hash.to_string(), "ab".repeat(32));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = ContentHash::from_hex("abcd").unwrap_err();
        assert!(matches!(
            err,
            VerifyError::InvalidLength {
                expected: 32,
                actual:   2
            }
        ));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(matches!(
            ContentHash::from_hex("zz"),
            Err(VerifyError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let hash = Sha256Hasher::digest(b"abc");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
