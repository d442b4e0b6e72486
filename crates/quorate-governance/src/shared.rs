//! Thread-safe governance handle
//!
//! Wraps the store in a single `RwLock`: queries and validation share the
//! read lock, mutations hold the write lock for their whole duration, so no
//! caller ever observes a partially applied change.

use crate::config::GovernanceConfig;
use crate::events::{EventLog, GovernanceEvent};
use crate::facet::GovernanceFacet;
use crate::ownership::OwnershipFacet;
use crate::store::{NamespaceKey, SiblingStore, StateStore};
use parking_lot::RwLock;
use quorate_common::{
    crypto::recovery_for, GovernanceError, Identity, MessageHash, Result, Signature,
    SignerRecovery,
};
use std::sync::Arc;
use tracing::info;

/// Cloneable handle to one governance state shared across threads
pub struct SharedGovernance<R> {
    store: Arc<RwLock<StateStore>>,
    governance: Arc<GovernanceFacet<R>>,
    ownership: OwnershipFacet,
    reserved: [NamespaceKey; 3],
}

impl<R> Clone for SharedGovernance<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            governance: Arc::clone(&self.governance),
            ownership: self.ownership,
            reserved: self.reserved,
        }
    }
}

impl SharedGovernance<Box<dyn SignerRecovery>> {
    /// Build and initialize from configuration.
    ///
    /// Without `config.owner` the owner slot stays empty: owner-gated
    /// mutations fail with `NotInitialized` until
    /// [`initialize_owner`](SharedGovernance::initialize_owner) is called.
    pub fn from_config(config: &GovernanceConfig) -> Result<Self> {
        config.validate()?;

        let shared = Self::new(GovernanceFacet::new(recovery_for(config.scheme)));
        shared.initialize(&config.members, config.percentage, config.precision)?;
        if let Some(owner) = config.owner {
            shared.initialize_owner(owner)?;
        }

        info!(
            members = config.members.len(),
            percentage = config.percentage,
            precision = config.precision,
            scheme = %config.scheme,
            "Shared governance ready"
        );
        Ok(shared)
    }
}

impl<R: SignerRecovery> SharedGovernance<R> {
    pub fn new(governance: GovernanceFacet<R>) -> Self {
        Self::with_store(StateStore::new(), governance)
    }

    /// Attach to an existing store that sibling modules may already use
    pub fn with_store(store: StateStore, governance: GovernanceFacet<R>) -> Self {
        let ownership = OwnershipFacet::new();
        let reserved = [governance.namespace(), ownership.namespace(), EventLog::key()];
        Self {
            store: Arc::new(RwLock::new(store)),
            governance: Arc::new(governance),
            ownership,
            reserved,
        }
    }

    pub fn facet(&self) -> &GovernanceFacet<R> {
        &self.governance
    }

    /// Run a closure under the read lock
    pub fn read<T>(&self, f: impl FnOnce(&StateStore) -> T) -> T {
        f(&self.store.read())
    }

    /// Run a closure under the write lock with access to sibling regions only
    pub fn write<T>(&self, f: impl FnOnce(&mut SiblingStore<'_>) -> T) -> T {
        let mut store = self.store.write();
        f(&mut SiblingStore::new(&mut store, &self.reserved))
    }

    fn write_governed<T>(&self, f: impl FnOnce(&mut StateStore) -> T) -> T {
        f(&mut self.store.write())
    }

    // ============ LIFECYCLE ============

    pub fn initialize(
        &self,
        members: &[Identity],
        percentage: u64,
        precision: u64,
    ) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| {
            self.governance.initialize(store, members, percentage, precision)
        })
    }

    /// Set the owner once. Until an owner is set, whoever reaches this first
    /// becomes the owner; later calls fail with `AlreadyInitialized`.
    pub fn initialize_owner(&self, owner: Identity) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| self.ownership.initialize_owner(store, owner))
    }

    pub fn owner(&self) -> std::result::Result<Identity, GovernanceError> {
        self.read(|store| self.ownership.owner(store))
    }

    pub fn transfer_ownership(
        &self,
        caller: &Identity,
        new_owner: Identity,
    ) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| self.ownership.transfer_ownership(store, caller, new_owner))
    }

    // ============ QUERIES ============

    pub fn is_member(&self, identity: &Identity) -> std::result::Result<bool, GovernanceError> {
        self.read(|store| self.governance.is_member(store, identity))
    }

    pub fn member_count(&self) -> std::result::Result<usize, GovernanceError> {
        self.read(|store| self.governance.member_count(store))
    }

    pub fn member_at(&self, index: usize) -> std::result::Result<Identity, GovernanceError> {
        self.read(|store| self.governance.member_at(store, index))
    }

    pub fn members(&self) -> std::result::Result<Vec<Identity>, GovernanceError> {
        self.read(|store| self.governance.members(store))
    }

    pub fn percentage(&self) -> std::result::Result<u64, GovernanceError> {
        self.read(|store| self.governance.percentage(store))
    }

    pub fn precision(&self) -> std::result::Result<u64, GovernanceError> {
        self.read(|store| self.governance.precision(store))
    }

    pub fn required_signer_count(&self) -> std::result::Result<usize, GovernanceError> {
        self.read(|store| self.governance.required_signer_count(store))
    }

    // ============ OWNER-GATED MUTATIONS ============

    pub fn add_member(
        &self,
        caller: &Identity,
        identity: Identity,
    ) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| {
            self.ownership.enforce_owner(store, caller)?;
            self.governance.add_member(store, identity)
        })
    }

    pub fn remove_member(
        &self,
        caller: &Identity,
        identity: Identity,
    ) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| {
            self.ownership.enforce_owner(store, caller)?;
            self.governance.remove_member(store, identity)
        })
    }

    pub fn update_percentage(
        &self,
        caller: &Identity,
        percentage: u64,
    ) -> std::result::Result<(), GovernanceError> {
        self.write_governed(|store| {
            self.ownership.enforce_owner(store, caller)?;
            self.governance.update_percentage(store, percentage)
        })
    }

    // ============ VALIDATION ============

    pub fn validate(
        &self,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> std::result::Result<(), GovernanceError> {
        self.read(|store| self.governance.validate(store, digest, signatures))
    }

    pub fn recover_quorum(
        &self,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> std::result::Result<Vec<Identity>, GovernanceError> {
        self.read(|store| self.governance.recover_quorum(store, digest, signatures))
    }

    // ============ EVENTS ============

    pub fn events(&self) -> std::result::Result<Vec<GovernanceEvent>, GovernanceError> {
        Ok(self.read(EventLog::events)?)
    }

    pub fn drain_events(&self) -> std::result::Result<Vec<GovernanceEvent>, GovernanceError> {
        Ok(self.write_governed(EventLog::drain)?)
    }
}
