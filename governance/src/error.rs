use dao_types::{ProposalId, ShareAmount, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("insufficient shares to create a proposal: have {have}, need {need}")]
    InsufficientSharesForProposal { have: ShareAmount, need: ShareAmount },

    #[error("proposal {0} already exists")]
    DuplicateProposal(ProposalId),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting on proposal {id} closed at {ended_at} (now {now})")]
    VotingClosed {
        id: ProposalId,
        ended_at: Timestamp,
        now: Timestamp,
    },

    #[error("account {0} has already voted on this proposal")]
    AlreadyVoted(String),

    #[error("proposal {0} is already resolved")]
    ProposalResolved(ProposalId),

    #[error("arithmetic overflow in vote tally")]
    TallyOverflow,
}
