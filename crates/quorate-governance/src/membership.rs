//! Membership registry operations on the governance state

use crate::state::GovernanceState;
use quorate_common::{GovernanceError, Identity};

impl GovernanceState {
    pub fn is_member(&self, identity: &Identity) -> bool {
        self.members.contains(identity)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_at(&self, index: usize) -> Result<Identity, GovernanceError> {
        self.members
            .get(index)
            .copied()
            .ok_or(GovernanceError::OutOfRange {
                index,
                count: self.members.len(),
            })
    }

    pub fn members(&self) -> &[Identity] {
        self.members.as_slice()
    }

    pub(crate) fn add_member(&mut self, identity: Identity) -> Result<(), GovernanceError> {
        if !self.members.insert(identity) {
            return Err(GovernanceError::AlreadyMember(identity));
        }
        Ok(())
    }

    /// The last-member guard runs before the presence check, so a
    /// single-member set rejects removal of any identity.
    pub(crate) fn remove_member(&mut self, identity: &Identity) -> Result<(), GovernanceError> {
        if self.members.len() == 1 {
            return Err(GovernanceError::LastMember);
        }
        if !self.members.remove(identity) {
            return Err(GovernanceError::NotMember(*identity));
        }
        Ok(())
    }
}
