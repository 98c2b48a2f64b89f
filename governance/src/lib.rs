//! Share-weighted governance for the DAO.
//!
//! Lifecycle: Undecided → Approved | Rejected (both terminal).
//! A proposal resolves on the vote that gives one side a strict majority of
//! *all* outstanding shares, not merely of the shares that voted. Votes are
//! accepted for a fixed window after creation; expiry is evaluated lazily at
//! vote time.
//!
//! Key principle: one account = one vote per proposal, weighted by the
//! account's live share balance.

pub mod error;
pub mod proposal;
pub mod registry;
pub mod voting;

pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalStatus, VoteSide};
pub use registry::ProposalRegistry;
pub use voting::{VoteReceipt, VotingEngine};
