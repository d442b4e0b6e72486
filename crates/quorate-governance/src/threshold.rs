//! Threshold configuration and quorum arithmetic
//!
//! Quorum is the smallest signer count strictly greater than
//! `floor(members * percentage / precision)`. Products are taken in `u128`.

use crate::state::GovernanceState;
use quorate_common::GovernanceError;

/// `floor(member_count * percentage / precision)`; a count at or below this
/// value does not reach quorum.
pub fn quorum_floor(member_count: usize, percentage: u64, precision: u64) -> u128 {
    // precision is never zero once initialized
    (member_count as u128 * percentage as u128) / precision.max(1) as u128
}

/// Minimum number of unique member signatures that reaches quorum
pub fn required_signers(member_count: usize, percentage: u64, precision: u64) -> usize {
    let required = quorum_floor(member_count, percentage, precision) + 1;
    usize::try_from(required).unwrap_or(usize::MAX)
}

impl GovernanceState {
    pub fn percentage(&self) -> u64 {
        self.percentage
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// Evaluated against the live member count
    pub fn required_signer_count(&self) -> usize {
        required_signers(self.members.len(), self.percentage, self.precision)
    }

    /// Returns the previous percentage
    pub(crate) fn update_percentage(&mut self, percentage: u64) -> Result<u64, GovernanceError> {
        if percentage >= self.precision {
            return Err(GovernanceError::InvalidThreshold {
                percentage,
                precision: self.precision,
            });
        }
        Ok(std::mem::replace(&mut self.percentage, percentage))
    }
}
