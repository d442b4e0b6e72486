//! Ownership gate
//!
//! A sibling facet that stores the administrator identity in its own
//! namespace. Governance mutations assume this gate has already passed.

use crate::events::{EventLog, GovernanceEvent};
use crate::store::{NamespaceKey, StateStore};
use quorate_common::{GovernanceError, Identity};
use tracing::warn;

/// Tag hashed into the ownership namespace key
pub const OWNERSHIP_NAMESPACE: &str = "quorate.ownership.storage";

#[derive(Debug, Default)]
pub(crate) struct OwnershipState {
    owner: Option<Identity>,
}

/// Owner bookkeeping and caller checks
#[derive(Debug, Clone, Copy)]
pub struct OwnershipFacet {
    namespace: NamespaceKey,
}

impl Default for OwnershipFacet {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipFacet {
    pub fn new() -> Self {
        Self {
            namespace: NamespaceKey::from_tag(OWNERSHIP_NAMESPACE),
        }
    }

    pub fn namespace(&self) -> NamespaceKey {
        self.namespace
    }

    pub fn initialize_owner(
        &self,
        store: &mut StateStore,
        owner: Identity,
    ) -> Result<(), GovernanceError> {
        EventLog::prepare(store)?;
        let state = store.resolve::<OwnershipState>(&self.namespace)?;
        if state.owner.is_some() {
            return Err(GovernanceError::AlreadyInitialized);
        }
        state.owner = Some(owner);
        EventLog::record(
            store,
            GovernanceEvent::OwnershipTransferred {
                previous: None,
                current: owner,
            },
        )?;
        Ok(())
    }

    pub fn owner(&self, store: &StateStore) -> Result<Identity, GovernanceError> {
        store
            .get::<OwnershipState>(&self.namespace)?
            .and_then(|state| state.owner)
            .ok_or(GovernanceError::NotInitialized)
    }

    pub fn enforce_owner(
        &self,
        store: &StateStore,
        caller: &Identity,
    ) -> Result<(), GovernanceError> {
        if self.owner(store)? != *caller {
            warn!(%caller, "Caller is not the owner");
            return Err(GovernanceError::NotOwner);
        }
        Ok(())
    }

    pub fn transfer_ownership(
        &self,
        store: &mut StateStore,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<(), GovernanceError> {
        self.enforce_owner(store, caller)?;
        EventLog::prepare(store)?;
        let state = store.resolve::<OwnershipState>(&self.namespace)?;
        let previous = state.owner.replace(new_owner);
        EventLog::record(
            store,
            GovernanceEvent::OwnershipTransferred {
                previous,
                current: new_owner,
            },
        )?;
        Ok(())
    }
}
