//! Recoverable ECDSA over secp256k1
//!
//! Wire form is 65 bytes, `r (32) || s (32) || v (1)`, with `v` in `{27, 28}`
//! (`{0, 1}` is accepted as well). Signatures with a high `s` are rejected so
//! that a single signer cannot produce two distinct valid encodings.
//!
//! Identity derivation: last 20 bytes of `keccak256(uncompressed_pubkey[1..])`.

use crate::crypto::{digest::keccak256, SignerRecovery};
use crate::error::CryptoError;
use crate::types::{
    identity::Identity,
    signature::{MessageHash, Signature, SignatureScheme},
};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

/// Length of the `r || s || v` encoding
pub const SECP256K1_SIGNATURE_LENGTH: usize = 65;

/// Offset added to the recovery id in the `v` byte
const V_OFFSET: u8 = 27;

/// secp256k1 signer recovery
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl Secp256k1Recovery {
    fn split(signature: &Signature) -> Result<(EcdsaSignature, RecoveryId), CryptoError> {
        let bytes = signature.as_bytes();
        if bytes.len() != SECP256K1_SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidLength {
                expected: SECP256K1_SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let v = bytes[64];
        let parity = match v {
            0 | 1 => v,
            27 | 28 => v - V_OFFSET,
            other => return Err(CryptoError::InvalidRecoveryId(other)),
        };

        let sig = EcdsaSignature::from_slice(&bytes[..64])
            .map_err(|_| CryptoError::InvalidSignature)?;

        // normalize_s returns Some only when s was in the upper half
        if sig.normalize_s().is_some() {
            return Err(CryptoError::MalleableSignature);
        }

        let recid = RecoveryId::new(parity == 1, false);
        Ok((sig, recid))
    }
}

impl SignerRecovery for Secp256k1Recovery {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Secp256k1
    }

    fn recover_signer(
        &self,
        digest: &MessageHash,
        signature: &Signature,
    ) -> Result<Identity, CryptoError> {
        let (sig, recid) = Self::split(signature)?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recid)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
        Ok(identity_from_verifying_key(&key))
    }
}

/// Map a secp256k1 public key to its identity
pub fn identity_from_verifying_key(key: &VerifyingKey) -> Identity {
    let public_key = k256::PublicKey::from(key);
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Identity::from_hash_tail(&hash)
}

/// Local secp256k1 signer producing recoverable signatures
#[derive(Clone)]
pub struct Secp256k1Signer {
    key: SigningKey,
}

impl Secp256k1Signer {
    /// Generate a fresh key from the OS RNG
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    /// Load from a 32-byte secret scalar
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, CryptoError> {
        let key = SigningKey::from_slice(secret).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    pub fn identity(&self) -> Identity {
        identity_from_verifying_key(self.key.verifying_key())
    }

    /// Sign a 32-byte digest directly (no message prefix is applied)
    pub fn sign_digest(&self, digest: &MessageHash) -> Result<Signature, CryptoError> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;

        // Keep s in the lower half; flipping s flips the y parity
        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (sig, recid),
        };

        let mut bytes = Vec::with_capacity(SECP256K1_SIGNATURE_LENGTH);
        bytes.extend_from_slice(&sig.to_bytes());
        bytes.push(V_OFFSET + u8::from(recid.is_y_odd()));
        Ok(Signature::new(bytes))
    }
}

impl std::fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("identity", &self.identity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_recover() {
        let signer = Secp256k1Signer::random();
        let digest = keccak256(b"authorize mint");
        let sig = signer.sign_digest(&digest).unwrap();

        assert_eq!(sig.len(), SECP256K1_SIGNATURE_LENGTH);
        assert!(matches!(sig.as_bytes()[64], 27 | 28));

        let recovered = Secp256k1Recovery.recover_signer(&digest, &sig).unwrap();
        assert_eq!(recovered, signer.identity());
    }

    #[test]
    fn test_known_address() {
        // Secret key 1 maps to the well-known generator-point address
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let signer = Secp256k1Signer::from_bytes(&secret).unwrap();
        assert_eq!(
            signer.identity().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_raw_parity_byte_accepted() {
        let signer = Secp256k1Signer::random();
        let digest = keccak256(b"raw v");
        let mut bytes = signer.sign_digest(&digest).unwrap().into_bytes();
        bytes[64] -= 27;

        let recovered = Secp256k1Recovery
            .recover_signer(&digest, &Signature::new(bytes))
            .unwrap();
        assert_eq!(recovered, signer.identity());
    }

    #[test]
    fn test_wrong_digest_recovers_other_identity() {
        let signer = Secp256k1Signer::random();
        let sig = signer.sign_digest(&keccak256(b"one")).unwrap();
        let recovered = Secp256k1Recovery.recover_signer(&keccak256(b"two"), &sig);
        // Either a different key comes back or recovery fails outright
        if let Ok(id) = recovered {
            assert_ne!(id, signer.identity());
        }
    }

    #[test]
    fn test_rejects_bad_length() {
        let err = Secp256k1Recovery
            .recover_signer(&[0u8; 32], &Signature::new(vec![0u8; 64]))
            .unwrap_err();
        assert_eq!(err, CryptoError::InvalidLength { expected: 65, actual: 64 });
    }

    #[test]
    fn test_rejects_bad_v() {
        let signer = Secp256k1Signer::random();
        let digest = keccak256(b"v");
        let mut bytes = signer.sign_digest(&digest).unwrap().into_bytes();
        bytes[64] = 29;
        let err = Secp256k1Recovery
            .recover_signer(&digest, &Signature::new(bytes))
            .unwrap_err();
        assert_eq!(err, CryptoError::InvalidRecoveryId(29));
    }

    #[test]
    fn test_rejects_high_s() {
        let signer = Secp256k1Signer::random();
        let digest = keccak256(b"malleable");
        let bytes = signer.sign_digest(&digest).unwrap().into_bytes();

        // s' = n - s gives the malleated twin of a valid signature
        let sig = EcdsaSignature::from_slice(&bytes[..64]).unwrap();
        let (r, s) = sig.split_scalars();
        let high = EcdsaSignature::from_scalars(r, -*s).unwrap();

        let mut malleated = high.to_bytes().to_vec();
        malleated.push(if bytes[64] == 27 { 28 } else { 27 });
        let err = Secp256k1Recovery
            .recover_signer(&digest, &Signature::new(malleated))
            .unwrap_err();
        assert_eq!(err, CryptoError::MalleableSignature);
    }

    #[test]
    fn test_rejects_zero_signature() {
        let mut bytes = vec![0u8; 64];
        bytes.push(27);
        let err = Secp256k1Recovery
            .recover_signer(&[1u8; 32], &Signature::new(bytes))
            .unwrap_err();
        assert_eq!(err, CryptoError::InvalidSignature);
    }
}
