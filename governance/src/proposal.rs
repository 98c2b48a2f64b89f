//! Governance proposals and their lifecycle.

use crate::error::GovernanceError;
use dao_types::{AccountAddress, ProposalId, ShareAmount, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where a proposal stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Open: neither side holds a majority of outstanding shares yet.
    Undecided,
    /// Yes-weight exceeded half of total shares. Terminal.
    Approved,
    /// No-weight exceeded half of total shares. Terminal.
    Rejected,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

/// Which way a vote is cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteSide {
    Yes,
    No,
}

/// A governance proposal.
///
/// Tallies only grow, the voter set only grows, and a terminal status never
/// changes. Mutation is reserved to the voting engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    id: ProposalId,
    author: AccountAddress,
    created_at: Timestamp,
    votes_yes: ShareAmount,
    votes_no: ShareAmount,
    status: ProposalStatus,
    /// Accounts that have voted (membership only).
    voters: BTreeSet<AccountAddress>,
}

impl Proposal {
    pub(crate) fn new(id: ProposalId, author: AccountAddress, now: Timestamp) -> Self {
        Self {
            id,
            author,
            created_at: now,
            votes_yes: ShareAmount::ZERO,
            votes_no: ShareAmount::ZERO,
            status: ProposalStatus::Undecided,
            voters: BTreeSet::new(),
        }
    }

    /// Reassemble a proposal from persisted fields.
    pub fn restore(
        id: ProposalId,
        author: AccountAddress,
        created_at: Timestamp,
        votes_yes: ShareAmount,
        votes_no: ShareAmount,
        status: ProposalStatus,
        voters: impl IntoIterator<Item = AccountAddress>,
    ) -> Self {
        Self {
            id,
            author,
            created_at,
            votes_yes,
            votes_no,
            status,
            voters: voters.into_iter().collect(),
        }
    }

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn author(&self) -> &AccountAddress {
        &self.author
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn votes_yes(&self) -> ShareAmount {
        self.votes_yes
    }

    pub fn votes_no(&self) -> ShareAmount {
        self.votes_no
    }

    /// `(votes_yes, votes_no)`.
    pub fn tally(&self) -> (ShareAmount, ShareAmount) {
        (self.votes_yes, self.votes_no)
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn has_voted(&self, account: &AccountAddress) -> bool {
        self.voters.contains(account)
    }

    pub fn voters(&self) -> impl Iterator<Item = &AccountAddress> + '_ {
        self.voters.iter()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// First instant at which votes are no longer accepted.
    pub fn voting_ends_at(&self, voting_period_secs: u64) -> Timestamp {
        self.created_at.plus_secs(voting_period_secs)
    }

    pub fn is_voting_open(&self, voting_period_secs: u64, now: Timestamp) -> bool {
        !self.created_at.has_expired(voting_period_secs, now)
    }

    /// Add `weight` to one side and remember the voter. Callers check eligibility first.
    pub(crate) fn record_vote(
        &mut self,
        voter: &AccountAddress,
        side: VoteSide,
        weight: ShareAmount,
    ) -> Result<(), GovernanceError> {
        let slot = match side {
            VoteSide::Yes => &mut self.votes_yes,
            VoteSide::No => &mut self.votes_no,
        };
        *slot = slot.checked_add(weight).ok_or(GovernanceError::TallyOverflow)?;
        self.voters.insert(voter.clone());
        Ok(())
    }

    /// Re-evaluate the status against the current total supply.
    ///
    /// Yes is checked first, so if both sides somehow held a majority the
    /// proposal would be approved. A terminal status is returned unchanged.
    pub(crate) fn resolve(&mut self, total_shares: ShareAmount) -> ProposalStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        if self.votes_yes.is_majority_of(total_shares) {
            self.status = ProposalStatus::Approved;
        } else if self.votes_no.is_majority_of(total_shares) {
            self.status = ProposalStatus::Rejected;
        }
        self.status
    }
}
