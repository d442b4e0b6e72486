//! Ed25519 signatures carrying their own public key
//!
//! Ed25519 has no public key recovery, so the wire form embeds the key:
//! `public_key (32) || signature (64)`. Recovery verifies the signature
//! strictly and derives the identity as the last 20 bytes of `blake3(public_key)`.

use crate::crypto::SignerRecovery;
use crate::error::CryptoError;
use crate::types::{
    identity::Identity,
    signature::{MessageHash, Signature, SignatureScheme},
};
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// Length of the `public_key || signature` encoding
pub const ED25519_SIGNATURE_LENGTH: usize = 96;

/// Ed25519 signer recovery
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Recovery;

impl SignerRecovery for Ed25519Recovery {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    fn recover_signer(
        &self,
        digest: &MessageHash,
        signature: &Signature,
    ) -> Result<Identity, CryptoError> {
        let bytes = signature.as_bytes();
        if bytes.len() != ED25519_SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidLength {
                expected: ED25519_SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(&bytes[..32]);
        let mut sig_bytes = [0u8; 64];
        sig_bytes.copy_from_slice(&bytes[32..]);

        let key = VerifyingKey::from_bytes(&public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = DalekSignature::from_bytes(&sig_bytes);
        key.verify_strict(digest, &sig)
            .map_err(|_| CryptoError::InvalidSignature)?;

        Ok(identity_from_public_key(&public_key))
    }
}

/// Map an Ed25519 public key to its identity
pub fn identity_from_public_key(public_key: &[u8; 32]) -> Identity {
    Identity::from_hash_tail(blake3::hash(public_key).as_bytes())
}

/// Local Ed25519 signer
#[derive(Clone)]
pub struct Ed25519Signer {
    key: SigningKey,
}

impl Ed25519Signer {
    /// Generate a fresh key from the OS RNG
    pub fn random() -> Self {
        Self {
            key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(secret),
        }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    pub fn identity(&self) -> Identity {
        identity_from_public_key(&self.public_key())
    }

    /// Sign a digest, producing the 96-byte self-describing form
    pub fn sign_digest(&self, digest: &MessageHash) -> Signature {
        let sig = self.key.sign(digest);
        let mut bytes = Vec::with_capacity(ED25519_SIGNATURE_LENGTH);
        bytes.extend_from_slice(&self.public_key());
        bytes.extend_from_slice(&sig.to_bytes());
        Signature::new(bytes)
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("identity", &self.identity())
            .finish_non_exhaustive()
    }
}
