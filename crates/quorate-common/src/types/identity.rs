//! Identity - opaque 20-byte member identifier
//!
//! An identity is derived from a signer's public key by the recovery scheme
//! that produced it (see [`crate::crypto`]). Governance only ever compares
//! identities, so the value is treated as opaque outside the crypto layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Width of an identity in bytes
pub const IDENTITY_LENGTH: usize = 20;

/// Public-key-derived member identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity([u8; IDENTITY_LENGTH]);

impl Identity {
    /// Create from raw bytes
    pub const fn new(bytes: [u8; IDENTITY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Take the trailing 20 bytes of a 32-byte hash
    pub fn from_hash_tail(hash: &[u8; 32]) -> Self {
        let mut bytes = [0u8; IDENTITY_LENGTH];
        bytes.copy_from_slice(&hash[32 - IDENTITY_LENGTH..]);
        Self(bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LENGTH] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; IDENTITY_LENGTH]> for Identity {
    fn from(bytes: [u8; IDENTITY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Identity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let decoded = hex::decode(digits).map_err(|_| IdentityParseError::InvalidHex)?;
        let bytes: [u8; IDENTITY_LENGTH] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| IdentityParseError::InvalidLength(v.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors parsing an identity from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityParseError {
    #[error("Invalid hex encoding")]
    InvalidHex,

    #[error("Invalid identity length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}
