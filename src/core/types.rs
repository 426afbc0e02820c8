//! Core data types for hashtree

use crate::core::error::{HashTreeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of a digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// 256-bit digest produced by the compression hash
///
/// Bytes are stored in big-endian order, exactly as the eight state words are
/// serialized at the end of a hash computation. Two digests are equal only if
/// all 32 bytes are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Create a Digest from a 32-byte array
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }

    /// Create a Digest from a slice, which must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; DIGEST_SIZE] = bytes.try_into().map_err(|_| {
            HashTreeError::invalid_digest(format!(
                "expected {} bytes, got {}",
                DIGEST_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Digest(array))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Consume the digest and return its bytes
    pub fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Parse a digest from 64 hex characters (either case, no separators)
    pub fn from_hex(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.len() != DIGEST_SIZE * 2 {
            return Err(HashTreeError::invalid_digest(format!(
                "expected {} hex characters, got {}",
                DIGEST_SIZE * 2,
                text.len()
            )));
        }
        let bytes = hex::decode(text)?;
        Self::from_slice(&bytes)
    }

    /// Convert to a lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to an uppercase hex string
    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Render as hex in the requested case
    pub fn to_hex_case(&self, uppercase: bool) -> String {
        if uppercase {
            self.to_hex_upper()
        } else {
            self.to_hex()
        }
    }

    /// The all-zero digest (for testing and special cases)
    pub const fn zero() -> Self {
        Digest([0u8; DIGEST_SIZE])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &hex::encode(self.0)[..8])
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex_upper())
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::str::FromStr for Digest {
    type Err = HashTreeError;

    fn from_str(s: &str) -> Result<Self> {
        Digest::from_hex(s)
    }
}

// Serialized as hex strings instead of byte arrays
impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Digest::from_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}
