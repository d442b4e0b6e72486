//! Governance event journal
//!
//! Applied mutations are appended to a journal region in the shared store
//! and read back through [`EventLog`]. Rejected calls record nothing.

use crate::store::{NamespaceKey, StateStore};
use quorate_common::{Identity, StorageError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tag hashed into the event journal namespace key
pub const EVENTS_NAMESPACE: &str = "quorate.events.storage";

/// State transitions emitted by the governance and ownership facets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    Initialized {
        members: Vec<Identity>,
        percentage: u64,
        precision: u64,
    },
    MemberAdded {
        member: Identity,
    },
    MemberRemoved {
        member: Identity,
    },
    PercentageUpdated {
        previous: u64,
        current: u64,
    },
    OwnershipTransferred {
        previous: Option<Identity>,
        current: Identity,
    },
}

/// Append-only list of events, drained by the host
#[derive(Debug)]
pub struct EventLog;

#[derive(Debug, Default)]
struct Journal {
    entries: Vec<GovernanceEvent>,
}

impl EventLog {
    pub(crate) fn key() -> NamespaceKey {
        NamespaceKey::from_tag(EVENTS_NAMESPACE)
    }

    /// Materialize the journal region ahead of a mutation so that recording
    /// afterwards cannot fail.
    pub(crate) fn prepare(store: &mut StateStore) -> Result<(), StorageError> {
        store.resolve::<Journal>(&Self::key()).map(|_| ())
    }

    pub(crate) fn record(
        store: &mut StateStore,
        event: GovernanceEvent,
    ) -> Result<(), StorageError> {
        info!(?event, "Governance event");
        store.resolve::<Journal>(&Self::key())?.entries.push(event);
        Ok(())
    }

    /// Events recorded so far, oldest first
    pub fn events(store: &StateStore) -> Result<Vec<GovernanceEvent>, StorageError> {
        Ok(store
            .get::<Journal>(&Self::key())?
            .map(|log| log.entries.clone())
            .unwrap_or_default())
    }

    /// Remove and return all recorded events
    pub fn drain(store: &mut StateStore) -> Result<Vec<GovernanceEvent>, StorageError> {
        Ok(std::mem::take(
            &mut store.resolve::<Journal>(&Self::key())?.entries,
        ))
    }
}
