//! Signature recovery primitives for Quorate
//!
//! This module provides:
//! - The [`SignerRecovery`] seam consumed by quorum validation
//! - Recoverable ECDSA over secp256k1 (Ethereum-style identities)
//! - Ed25519 signatures carrying their own public key
//! - Digest helpers (Keccak-256, signed-message prefixing)

pub mod digest;
pub mod ed25519;
pub mod secp256k1;

pub use digest::{eth_signed_message_hash, keccak256};
pub use ed25519::{Ed25519Recovery, Ed25519Signer};
pub use secp256k1::{Secp256k1Recovery, Secp256k1Signer};

use crate::error::CryptoError;
use crate::types::{
    identity::Identity,
    signature::{MessageHash, Signature, SignatureScheme},
};

/// Recovers the identity that produced a signature over a digest.
///
/// Implementations must be deterministic and stateless.
pub trait SignerRecovery: Send + Sync {
    /// Scheme this primitive understands
    fn scheme(&self) -> SignatureScheme;

    /// Recover the signer identity, failing on malformed or invalid input
    fn recover_signer(
        &self,
        digest: &MessageHash,
        signature: &Signature,
    ) -> Result<Identity, CryptoError>;
}

impl<T: SignerRecovery + ?Sized> SignerRecovery for Box<T> {
    fn scheme(&self) -> SignatureScheme {
        (**self).scheme()
    }

    fn recover_signer(
        &self,
        digest: &MessageHash,
        signature: &Signature,
    ) -> Result<Identity, CryptoError> {
        (**self).recover_signer(digest, signature)
    }
}

/// Build the recovery primitive for a configured scheme
pub fn recovery_for(scheme: SignatureScheme) -> Box<dyn SignerRecovery> {
    match scheme {
        SignatureScheme::Secp256k1 => Box::new(Secp256k1Recovery),
        SignatureScheme::Ed25519 => Box::new(Ed25519Recovery),
    }
}
