//! Voting engine: time-boxed, share-weighted, one vote per account.

use crate::error::GovernanceError;
use crate::proposal::{ProposalStatus, VoteSide};
use crate::registry::ProposalRegistry;
use dao_ledger::ShareLedger;
use dao_types::{AccountAddress, GovernanceParams, ProposalId, ShareAmount, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of an accepted vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Weight applied: the voter's share balance at the moment of voting.
    pub weight: ShareAmount,
    pub side: VoteSide,
    /// Status of the proposal after this vote was counted.
    pub status: ProposalStatus,
}

impl VoteReceipt {
    /// Whether this vote moved the proposal into a terminal status.
    pub fn resolved(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Casts votes against proposals held in a [`ProposalRegistry`].
#[derive(Clone, Copy, Debug)]
pub struct VotingEngine {
    voting_period_secs: u64,
}

impl VotingEngine {
    pub fn new(params: &GovernanceParams) -> Self {
        Self {
            voting_period_secs: params.voting_period_secs,
        }
    }

    pub fn voting_period_secs(&self) -> u64 {
        self.voting_period_secs
    }

    /// Cast `voter`'s live share balance on `side` of proposal `id`.
    ///
    /// Checks, in order: the proposal exists, the window is still open
    /// (`now < created_at + voting_period`), the voter has not voted yet,
    /// and the proposal is still Undecided. The tally and voter set are only
    /// touched once every check has passed. After counting, the proposal
    /// resolves if either side now holds a strict majority of
    /// `ledger.total_shares()`.
    pub fn cast_vote(
        &self,
        registry: &mut ProposalRegistry,
        ledger: &ShareLedger,
        voter: &AccountAddress,
        id: &ProposalId,
        side: VoteSide,
        now: Timestamp,
    ) -> Result<VoteReceipt, GovernanceError> {
        let proposal = registry.get_proposal_mut(id)?;

        if !proposal.is_voting_open(self.voting_period_secs, now) {
            return Err(GovernanceError::VotingClosed {
                id: *id,
                ended_at: proposal.voting_ends_at(self.voting_period_secs),
                now,
            });
        }
        if proposal.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted(voter.to_string()));
        }
        if proposal.is_resolved() {
            return Err(GovernanceError::ProposalResolved(*id));
        }

        let weight = ledger.shares_of(voter);
        proposal.record_vote(voter, side, weight)?;
        let status = proposal.resolve(ledger.total_shares());

        debug!(%id, %voter, ?side, weight = weight.raw(), "vote counted");
        if status.is_terminal() {
            let (yes, no) = proposal.tally();
            info!(
                %id,
                ?status,
                votes_yes = yes.raw(),
                votes_no = no.raw(),
                total_shares = ledger.total_shares().raw(),
                "proposal resolved"
            );
        }

        Ok(VoteReceipt {
            weight,
            side,
            status,
        })
    }

    pub fn status(
        &self,
        registry: &ProposalRegistry,
        id: &ProposalId,
    ) -> Result<ProposalStatus, GovernanceError> {
        Ok(registry.get_proposal(id)?.status())
    }

    /// `(votes_yes, votes_no)` for proposal `id`.
    pub fn tally(
        &self,
        registry: &ProposalRegistry,
        id: &ProposalId,
    ) -> Result<(ShareAmount, ShareAmount), GovernanceError> {
        Ok(registry.get_proposal(id)?.tally())
    }

    /// First instant at which proposal `id` stops accepting votes.
    pub fn voting_ends_at(
        &self,
        registry: &ProposalRegistry,
        id: &ProposalId,
    ) -> Result<Timestamp, GovernanceError> {
        Ok(registry
            .get_proposal(id)?
            .voting_ends_at(self.voting_period_secs))
    }
}
