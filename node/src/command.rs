//! Serialisable request/response surface over the node.
//!
//! Every command maps onto exactly one node operation, so a transport only
//! has to decode a [`Command`] and hand it to `DaoNode::execute`.

use serde::{Deserialize, Serialize};

use dao_governance::{Proposal, ProposalStatus, VoteReceipt, VoteSide};
use dao_types::{AccountAddress, ProposalId, ShareAmount, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Deposit {
        account: AccountAddress,
        amount: ShareAmount,
    },
    Withdraw {
        account: AccountAddress,
        amount: ShareAmount,
    },
    CreateProposal {
        author: AccountAddress,
        id: ProposalId,
    },
    Vote {
        voter: AccountAddress,
        id: ProposalId,
        side: VoteSide,
    },
    SharesOf {
        account: AccountAddress,
    },
    TotalShares,
    GetProposal {
        id: ProposalId,
    },
    ListProposals,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutput {
    /// New balance after a deposit or withdrawal, or a queried balance.
    Balance { amount: ShareAmount },
    TotalShares { amount: ShareAmount },
    Vote { receipt: VoteReceipt },
    Proposal { proposal: ProposalView },
    Proposals { proposals: Vec<ProposalView> },
}

/// Read-only view of a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub id: ProposalId,
    pub author: AccountAddress,
    pub created_at: Timestamp,
    pub voting_ends_at: Timestamp,
    pub votes_yes: ShareAmount,
    pub votes_no: ShareAmount,
    pub status: ProposalStatus,
    pub voter_count: usize,
}

impl ProposalView {
    pub fn from_proposal(proposal: &Proposal, voting_period_secs: u64) -> Self {
        Self {
            id: proposal.id(),
            author: proposal.author().clone(),
            created_at: proposal.created_at(),
            voting_ends_at: proposal.voting_ends_at(voting_period_secs),
            votes_yes: proposal.votes_yes(),
            votes_no: proposal.votes_no(),
            status: proposal.status(),
            voter_count: proposal.voter_count(),
        }
    }
}
