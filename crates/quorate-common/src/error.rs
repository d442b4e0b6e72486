//! Error types for Quorate
//!
//! Provides a unified error type and domain-specific error variants

use crate::types::identity::Identity;
use thiserror::Error;

/// Result type alias using QuorateError
pub type Result<T> = std::result::Result<T, QuorateError>;

/// Unified error type for Quorate operations
#[derive(Debug, Error)]
pub enum QuorateError {
    // Governance errors
    #[error("Governance error: {0}")]
    Governance(#[from] GovernanceError),

    // Crypto errors
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    // Namespaced storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Governance lifecycle, membership, threshold, and quorum validation errors
///
/// Signer-level rejections deliberately carry no signature index or identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("Governance state is already initialized")]
    AlreadyInitialized,

    #[error("Governance state is not initialized")]
    NotInitialized,

    #[error("Initial member list is empty")]
    NoMembers,

    #[error("Identity is already a member: {0}")]
    AlreadyMember(Identity),

    #[error("Identity is not a member: {0}")]
    NotMember(Identity),

    #[error("Cannot remove the last remaining member")]
    LastMember,

    #[error("Invalid threshold: percentage {percentage} must be below precision {precision}")]
    InvalidThreshold { percentage: u64, precision: u64 },

    #[error("Member index {index} out of range (member count: {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("Too many signatures: {provided} provided for {members} members")]
    TooManySignatures { provided: usize, members: usize },

    #[error("Insufficient signatures: {provided} of {required} required")]
    InsufficientSignatures { provided: usize, required: usize },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signer is not authorized")]
    UnauthorizedSigner,

    #[error("Duplicate signer")]
    DuplicateSigner,

    #[error("Caller is not the owner")]
    NotOwner,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Signature recovery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("Malleable signature: s value is in the upper half of the curve order")]
    MalleableSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Signer recovery failed: {0}")]
    RecoveryFailed(String),
}

/// Namespaced state store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Namespace {namespace} holds a region of a different type")]
    TypeMismatch { namespace: String },

    #[error("Namespace {namespace} is reserved for governance state")]
    ReservedNamespace { namespace: String },
}

impl From<serde_json::Error> for QuorateError {
    fn from(err: serde_json::Error) -> Self {
        QuorateError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for QuorateError {
    fn from(err: std::io::Error) -> Self {
        QuorateError::Config(err.to_string())
    }
}
