//! Pre-built [`tracing::Span`] constructors for DAO operations.
//!
//! Every state-changing operation runs inside one of these spans so that log
//! lines emitted by the ledger and governance crates carry the account or
//! proposal they belong to.

use tracing::{info_span, Span};

/// Span covering a collateral deposit.
pub fn deposit_span(account: &str, amount: u128) -> Span {
    info_span!("deposit", account = %account, amount = %amount)
}

/// Span covering a collateral withdrawal.
pub fn withdraw_span(account: &str, amount: u128) -> Span {
    info_span!("withdraw", account = %account, amount = %amount)
}

/// Span covering proposal creation.
pub fn create_proposal_span(proposal: &str, author: &str) -> Span {
    info_span!("create_proposal", proposal = %proposal, author = %author)
}

/// Span covering a single vote.
pub fn vote_span(proposal: &str, voter: &str) -> Span {
    info_span!("vote", proposal = %proposal, voter = %voter)
}

/// Span covering snapshot persistence or restore.
pub fn snapshot_span(action: &str) -> Span {
    info_span!("snapshot", action = %action)
}
