//! Governance state region
//!
//! Invariants after initialization:
//! - `percentage < precision`
//! - at least one member
//! - no duplicate members

use quorate_common::{GovernanceError, Identity};
use std::collections::HashMap;

/// Tag hashed into the governance namespace key
pub const GOVERNANCE_NAMESPACE: &str = "quorate.governance.storage";

/// Insertion-ordered identity set with O(1) membership checks.
///
/// Removal swaps the last member into the vacated slot, so positions are
/// stable only until the next mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    members: Vec<Identity>,
    positions: HashMap<Identity, usize>,
}

impl MemberSet {
    pub fn contains(&self, identity: &Identity) -> bool {
        self.positions.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Identity> {
        self.members.get(index)
    }

    pub fn as_slice(&self) -> &[Identity] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.members.iter()
    }

    /// Returns false if already present
    pub fn insert(&mut self, identity: Identity) -> bool {
        if self.positions.contains_key(&identity) {
            return false;
        }
        self.positions.insert(identity, self.members.len());
        self.members.push(identity);
        true
    }

    /// Returns false if absent
    pub fn remove(&mut self, identity: &Identity) -> bool {
        let Some(index) = self.positions.remove(identity) else {
            return false;
        };
        self.members.swap_remove(index);
        if let Some(moved) = self.members.get(index) {
            self.positions.insert(*moved, index);
        }
        true
    }
}

/// Read-only view of the governance state.
///
/// Only this crate can create or reset a state, so an initialized state can
/// never be swapped back to an uninitialized one through the store:
///
/// ```compile_fail
/// use quorate_governance::{GovernanceState, NamespaceKey, StateStore};
///
/// let mut store = StateStore::new();
/// let key = NamespaceKey::from_tag("quorate.governance.storage");
/// store.resolve::<GovernanceState>(&key).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GovernanceState {
    pub(crate) initialized: bool,
    pub(crate) members: MemberSet,
    pub(crate) precision: u64,
    pub(crate) percentage: u64,
}

/// Store region wrapping the state; not nameable outside the crate
#[derive(Debug)]
pub(crate) struct GovernanceRegion(pub(crate) GovernanceState);

impl Default for GovernanceRegion {
    fn default() -> Self {
        Self(GovernanceState::empty())
    }
}

impl GovernanceState {
    pub(crate) fn empty() -> Self {
        Self {
            initialized: false,
            members: MemberSet::default(),
            precision: 0,
            percentage: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// One-time setup. All checks run before any field is written.
    pub(crate) fn initialize(
        &mut self,
        members: &[Identity],
        percentage: u64,
        precision: u64,
    ) -> Result<(), GovernanceError> {
        if self.initialized {
            return Err(GovernanceError::AlreadyInitialized);
        }
        if members.is_empty() {
            return Err(GovernanceError::NoMembers);
        }
        if percentage >= precision {
            return Err(GovernanceError::InvalidThreshold {
                percentage,
                precision,
            });
        }

        let mut set = MemberSet::default();
        for identity in members {
            if !set.insert(*identity) {
                return Err(GovernanceError::AlreadyMember(*identity));
            }
        }

        self.members = set;
        self.percentage = percentage;
        self.precision = precision;
        self.initialized = true;
        Ok(())
    }
}
