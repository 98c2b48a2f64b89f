//! Governance parameters.
//!
//! Both values are configuration points rather than hard-coded constants.

use crate::amount::ShareAmount;
use serde::{Deserialize, Serialize};

/// Seven days, in seconds.
pub const DEFAULT_VOTING_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Minimum share balance an account needs to author a proposal.
pub const DEFAULT_PROPOSAL_THRESHOLD: ShareAmount = ShareAmount::new(100);

/// Parameters governing proposal creation and voting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Shares an author must hold (inclusive) to create a proposal.
    pub proposal_threshold: ShareAmount,

    /// Length of the voting window, measured from proposal creation.
    /// Votes are accepted while `now < created_at + voting_period_secs`.
    pub voting_period_secs: u64,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            proposal_threshold: DEFAULT_PROPOSAL_THRESHOLD,
            voting_period_secs: DEFAULT_VOTING_PERIOD_SECS,
        }
    }
}
