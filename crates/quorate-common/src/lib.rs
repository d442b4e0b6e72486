//! # Quorate Common
//!
//! Shared types, errors, and signature recovery primitives for Quorate.
//!
//! ## Core Types
//!
//! - [`Identity`]: 20-byte public-key-derived member identity
//! - [`Signature`]: opaque signature bytes
//! - [`MessageHash`]: 32-byte digest under authorization
//! - [`SignatureScheme`]: which recovery primitive interprets signatures
//!
//! ## Crypto
//!
//! - [`crypto::secp256k1`]: recoverable ECDSA (Ethereum-style identities)
//! - [`crypto::ed25519`]: Ed25519 with embedded public key
//! - [`crypto::digest`]: Keccak-256 helpers

pub mod crypto;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use crypto::SignerRecovery;
pub use error::{CryptoError, GovernanceError, QuorateError, Result, StorageError};
pub use types::{
    identity::{Identity, IdentityParseError},
    signature::{MessageHash, Signature, SignatureScheme},
};

/// Quorate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default threshold precision (percent)
pub const DEFAULT_PRECISION: u64 = 100;

/// Default threshold percentage (simple majority of precision)
pub const DEFAULT_PERCENTAGE: u64 = 50;
