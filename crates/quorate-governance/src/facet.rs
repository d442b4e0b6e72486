//! Governance facet
//!
//! Stateless entry point for membership, threshold, and quorum validation.
//! State lives in the caller's [`StateStore`] under the facet's namespace;
//! every operation except initialization requires an initialized state.
//! Caller authorization is not checked here (see [`crate::ownership`]).

use crate::events::{EventLog, GovernanceEvent};
use crate::state::{GovernanceRegion, GovernanceState, GOVERNANCE_NAMESPACE};
use crate::store::{NamespaceKey, StateStore};
use crate::validator::QuorumValidator;
use quorate_common::{GovernanceError, Identity, MessageHash, Signature, SignerRecovery};
use tracing::{info, instrument};

/// Membership registry, threshold configuration, and quorum validator
/// bound to one namespace and one recovery primitive
pub struct GovernanceFacet<R> {
    namespace: NamespaceKey,
    recovery: R,
}

impl<R: SignerRecovery> GovernanceFacet<R> {
    /// Facet addressing the default governance namespace
    pub fn new(recovery: R) -> Self {
        Self::with_namespace(GOVERNANCE_NAMESPACE, recovery)
    }

    /// Facet addressing a custom namespace tag
    pub fn with_namespace(tag: &str, recovery: R) -> Self {
        Self {
            namespace: NamespaceKey::from_tag(tag),
            recovery,
        }
    }

    pub fn namespace(&self) -> NamespaceKey {
        self.namespace
    }

    pub fn recovery(&self) -> &R {
        &self.recovery
    }

    /// Read-only view of the initialized state
    pub fn state<'s>(&self, store: &'s StateStore) -> Result<&'s GovernanceState, GovernanceError> {
        match store.get::<GovernanceRegion>(&self.namespace)? {
            Some(GovernanceRegion(state)) if state.is_initialized() => Ok(state),
            _ => Err(GovernanceError::NotInitialized),
        }
    }

    fn state_mut<'s>(
        &self,
        store: &'s mut StateStore,
    ) -> Result<&'s mut GovernanceState, GovernanceError> {
        EventLog::prepare(store)?;
        let GovernanceRegion(state) = store.resolve::<GovernanceRegion>(&self.namespace)?;
        if !state.is_initialized() {
            return Err(GovernanceError::NotInitialized);
        }
        Ok(state)
    }

    // ============ LIFECYCLE ============

    /// One-time setup with a non-empty member list and `percentage < precision`
    #[instrument(skip(self, store, members), fields(count = members.len()))]
    pub fn initialize(
        &self,
        store: &mut StateStore,
        members: &[Identity],
        percentage: u64,
        precision: u64,
    ) -> Result<(), GovernanceError> {
        EventLog::prepare(store)?;
        store
            .resolve::<GovernanceRegion>(&self.namespace)?
            .0
            .initialize(members, percentage, precision)?;

        info!(percentage, precision, "Governance initialized");
        EventLog::record(
            store,
            GovernanceEvent::Initialized {
                members: members.to_vec(),
                percentage,
                precision,
            },
        )?;
        Ok(())
    }

    pub fn is_initialized(&self, store: &StateStore) -> Result<bool, GovernanceError> {
        Ok(store
            .get::<GovernanceRegion>(&self.namespace)?
            .is_some_and(|region| region.0.is_initialized()))
    }

    // ============ MEMBERSHIP ============

    pub fn is_member(
        &self,
        store: &StateStore,
        identity: &Identity,
    ) -> Result<bool, GovernanceError> {
        Ok(self.state(store)?.is_member(identity))
    }

    pub fn member_count(&self, store: &StateStore) -> Result<usize, GovernanceError> {
        Ok(self.state(store)?.member_count())
    }

    pub fn member_at(&self, store: &StateStore, index: usize) -> Result<Identity, GovernanceError> {
        self.state(store)?.member_at(index)
    }

    /// Snapshot of all members in registry order
    pub fn members(&self, store: &StateStore) -> Result<Vec<Identity>, GovernanceError> {
        Ok(self.state(store)?.members().to_vec())
    }

    #[instrument(skip(self, store))]
    pub fn add_member(
        &self,
        store: &mut StateStore,
        identity: Identity,
    ) -> Result<(), GovernanceError> {
        self.state_mut(store)?.add_member(identity)?;
        EventLog::record(store, GovernanceEvent::MemberAdded { member: identity })?;
        Ok(())
    }

    #[instrument(skip(self, store))]
    pub fn remove_member(
        &self,
        store: &mut StateStore,
        identity: Identity,
    ) -> Result<(), GovernanceError> {
        self.state_mut(store)?.remove_member(&identity)?;
        EventLog::record(store, GovernanceEvent::MemberRemoved { member: identity })?;
        Ok(())
    }

    // ============ THRESHOLD ============

    pub fn percentage(&self, store: &StateStore) -> Result<u64, GovernanceError> {
        Ok(self.state(store)?.percentage())
    }

    pub fn precision(&self, store: &StateStore) -> Result<u64, GovernanceError> {
        Ok(self.state(store)?.precision())
    }

    /// Signatures needed for quorum at the current membership size
    pub fn required_signer_count(&self, store: &StateStore) -> Result<usize, GovernanceError> {
        Ok(self.state(store)?.required_signer_count())
    }

    #[instrument(skip(self, store))]
    pub fn update_percentage(
        &self,
        store: &mut StateStore,
        percentage: u64,
    ) -> Result<(), GovernanceError> {
        let previous = self.state_mut(store)?.update_percentage(percentage)?;
        EventLog::record(
            store,
            GovernanceEvent::PercentageUpdated {
                previous,
                current: percentage,
            },
        )?;
        Ok(())
    }

    // ============ VALIDATION ============

    /// Accept iff enough distinct members signed `digest`
    pub fn validate(
        &self,
        store: &StateStore,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> Result<(), GovernanceError> {
        QuorumValidator::new(self.state(store)?, &self.recovery).validate(digest, signatures)
    }

    /// Like [`validate`](Self::validate) but returns the accepted signers
    pub fn recover_quorum(
        &self,
        store: &StateStore,
        digest: &MessageHash,
        signatures: &[Signature],
    ) -> Result<Vec<Identity>, GovernanceError> {
        QuorumValidator::new(self.state(store)?, &self.recovery).recover_quorum(digest, signatures)
    }
}

impl<R: SignerRecovery> std::fmt::Debug for GovernanceFacet<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceFacet")
            .field("namespace", &self.namespace)
            .field("scheme", &self.recovery.scheme())
            .finish()
    }
}
