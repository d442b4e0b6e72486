//! Digest helpers

use crate::types::signature::MessageHash;
use sha3::{Digest, Keccak256};

/// Prefix used by wallets when signing a 32-byte hash
const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 of arbitrary bytes
pub fn keccak256(data: &[u8]) -> MessageHash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Hash that a wallet actually signs when asked to sign `hash` as a message
pub fn eth_signed_message_hash(hash: &MessageHash) -> MessageHash {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(hash);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}
