//! Signature quorum validation
//!
//! Checks, in order:
//! 1. more signatures than members -> `TooManySignatures` (no recovery attempted)
//! 2. count at or below the quorum floor -> `InsufficientSignatures`
//! 3. per signature: recovery, membership, then uniqueness within the call

use crate::state::GovernanceState;
use crate::threshold::quorum_floor;
use quorate_common::{GovernanceError, Identity, MessageHash, Signature, SignerRecovery};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Validates signature sets against a governance state snapshot
pub struct QuorumValidator<'a, R: ?Sized> {
    state: &'a GovernanceState,
    recovery: &'a R,
}

impl<'a, R: SignerRecovery + ?Sized> QuorumValidator<'a, R> {
    pub fn new(state: &'a GovernanceState, recovery: &'a R) -> Self {
        Self { state, recovery }
    }

    /// Succeeds iff every signature is a valid, unique member signature over
    /// `digest` and their number reaches quorum.
    pub fn validate(
        &self,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> Result<(), GovernanceError> {
        self.recover_quorum(digest, signatures).map(|_| ())
    }

    /// Same checks as [`validate`](Self::validate), returning the accepted
    /// signers in signature order.
    #[instrument(skip(self, digest, signatures), fields(count = signatures.len()))]
    pub fn recover_quorum(
        &self,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> Result<Vec<Identity>, GovernanceError> {
        let provided = signatures.len();
        let members = self.state.member_count();

        if provided > members {
            warn!(provided, members, "Rejected: more signatures than members");
            return Err(GovernanceError::TooManySignatures { provided, members });
        }

        let floor = quorum_floor(members, self.state.percentage(), self.state.precision());
        if provided as u128 <= floor {
            let required = self.state.required_signer_count();
            warn!(provided, required, "Rejected: quorum not reached");
            return Err(GovernanceError::InsufficientSignatures { provided, required });
        }

        let mut seen = HashSet::with_capacity(provided);
        let mut signers = Vec::with_capacity(provided);

        for signature in signatures {
            let signer = self.recovery.recover_signer(digest, signature).map_err(|e| {
                warn!(error = %e, "Rejected: signature recovery failed");
                GovernanceError::InvalidSignature
            })?;

            if !self.state.is_member(&signer) {
                warn!("Rejected: signer is not a member");
                return Err(GovernanceError::UnauthorizedSigner);
            }

            if !seen.insert(signer) {
                warn!("Rejected: duplicate signer");
                return Err(GovernanceError::DuplicateSigner);
            }

            signers.push(signer);
        }

        debug!(signers = signers.len(), "Quorum reached");
        Ok(signers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorate_common::crypto::{keccak256, Secp256k1Recovery, Secp256k1Signer};
    use quorate_common::CryptoError;
    use quorate_common::SignatureScheme;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Recovery double: the signature's first byte names the signer
    #[derive(Default)]
    struct ByteRecovery {
        calls: AtomicUsize,
    }

    impl SignerRecovery for ByteRecovery {
        fn scheme(&self) -> SignatureScheme {
            SignatureScheme::Secp256k1
        }

        fn recover_signer(
            &self,
            _: &MessageHash,
            sig: &Signature,
        ) -> Result<Identity, CryptoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match sig.as_bytes().first() {
                Some(0) | None => Err(CryptoError::InvalidSignature),
                Some(b) => Ok(Identity::new([*b; 20])),
            }
        }
    }

    fn id(byte: u8) -> Identity {
        Identity::new([byte; 20])
    }

    /// Distinct encodings for the same signer: [signer, nonce]
    fn sig(signer: u8, nonce: u8) -> Signature {
        Signature::new(vec![signer, nonce])
    }

    fn state(count: u8, percentage: u64) -> GovernanceState {
        let members: Vec<Identity> = (1..=count).map(id).collect();
        let mut state = GovernanceState::empty();
        state.initialize(&members, percentage, 100).unwrap();
        state
    }

    #[test]
    fn test_accepts_quorum() {
        let state = state(4, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        let signers = validator
            .recover_quorum(&[0u8; 32], &[sig(1, 0), sig(3, 0), sig(4, 0)])
            .unwrap();
        assert_eq!(signers, vec![id(1), id(3), id(4)]);
    }

    #[test]
    fn test_insufficient_before_recovery() {
        let state = state(4, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(1, 0), sig(2, 0)]),
            Err(GovernanceError::InsufficientSignatures { provided: 2, required: 3 })
        );
        assert_eq!(recovery.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_too_many_before_recovery() {
        let state = state(2, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(1, 0), sig(2, 0), sig(1, 1)]),
            Err(GovernanceError::TooManySignatures { provided: 3, members: 2 })
        );
        assert_eq!(recovery.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_signature() {
        let state = state(3, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(1, 0), sig(0, 0)]),
            Err(GovernanceError::InvalidSignature)
        );
    }

    #[test]
    fn test_unauthorized_signer() {
        let state = state(3, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(1, 0), sig(9, 0)]),
            Err(GovernanceError::UnauthorizedSigner)
        );
    }

    #[test]
    fn test_duplicate_signer_distinct_encodings() {
        // Threshold 0 makes a single signature sufficient, so only dedup can reject
        let state = state(3, 0);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert!(validator.validate(&[0u8; 32], &[sig(2, 0)]).is_ok());
        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(2, 0), sig(2, 1)]),
            Err(GovernanceError::DuplicateSigner)
        );
    }

    #[test]
    fn test_duplicate_detected_after_other_signers() {
        let state = state(5, 50);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);

        assert_eq!(
            validator.validate(&[0u8; 32], &[sig(1, 0), sig(2, 0), sig(3, 0), sig(1, 5)]),
            Err(GovernanceError::DuplicateSigner)
        );
    }

    #[test]
    fn test_empty_signature_list() {
        let state = state(1, 0);
        let recovery = ByteRecovery::default();
        let validator = QuorumValidator::new(&state, &recovery);
        assert_eq!(
            validator.validate(&[0u8; 32], &[]),
            Err(GovernanceError::InsufficientSignatures { provided: 0, required: 1 })
        );
    }

    #[test]
    fn test_real_secp256k1_signatures() {
        let signers: Vec<Secp256k1Signer> = (0..3).map(|_| Secp256k1Signer::random()).collect();
        let members: Vec<Identity> = signers.iter().map(|s| s.identity()).collect();
        let mut state = GovernanceState::empty();
        state.initialize(&members, 50, 100).unwrap();

        let digest = keccak256(b"release batch 42");
        let sigs: Vec<Signature> = signers[..2]
            .iter()
            .map(|s| s.sign_digest(&digest).unwrap())
            .collect();

        let validator = QuorumValidator::new(&state, &Secp256k1Recovery);
        assert!(validator.validate(&digest, &sigs).is_ok());

        // Same signatures over another digest recover to strangers
        let other = keccak256(b"release batch 43");
        assert!(validator.validate(&other, &sigs).is_err());
    }
}
