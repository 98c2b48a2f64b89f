//! The authoritative DAO state: share ledger plus proposal registry.
//!
//! [`DaoState`] is plain data with synchronous operations. The node wraps it
//! in a single lock together with the collateral asset so each operation is
//! observed as one atomic step.

use dao_governance::{Proposal, ProposalRegistry, VoteReceipt, VoteSide, VotingEngine};
use dao_ledger::{CollateralAsset, ShareLedger};
use dao_types::{AccountAddress, GovernanceParams, ProposalId, ShareAmount, Timestamp};

use crate::NodeError;

#[derive(Clone, Debug)]
pub struct DaoState {
    params: GovernanceParams,
    ledger: ShareLedger,
    registry: ProposalRegistry,
    engine: VotingEngine,
}

impl DaoState {
    pub fn new(params: GovernanceParams) -> Self {
        Self::from_parts(params, ShareLedger::new(), ProposalRegistry::new())
    }

    pub(crate) fn from_parts(
        params: GovernanceParams,
        ledger: ShareLedger,
        registry: ProposalRegistry,
    ) -> Self {
        let engine = VotingEngine::new(&params);
        Self {
            params,
            ledger,
            registry,
            engine,
        }
    }

    /// Returns the account's new balance.
    pub fn deposit<C: CollateralAsset + ?Sized>(
        &mut self,
        collateral: &mut C,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, NodeError> {
        Ok(self.ledger.deposit(collateral, account, amount)?)
    }

    /// Returns the account's new balance.
    pub fn withdraw<C: CollateralAsset + ?Sized>(
        &mut self,
        collateral: &mut C,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, NodeError> {
        Ok(self.ledger.withdraw(collateral, account, amount)?)
    }

    pub fn create_proposal(
        &mut self,
        author: &AccountAddress,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<&Proposal, NodeError> {
        Ok(self
            .registry
            .create_proposal(&self.ledger, &self.params, author, id, now)?)
    }

    pub fn vote(
        &mut self,
        voter: &AccountAddress,
        id: &ProposalId,
        side: VoteSide,
        now: Timestamp,
    ) -> Result<VoteReceipt, NodeError> {
        Ok(self
            .engine
            .cast_vote(&mut self.registry, &self.ledger, voter, id, side, now)?)
    }

    pub fn shares_of(&self, account: &AccountAddress) -> ShareAmount {
        self.ledger.shares_of(account)
    }

    pub fn total_shares(&self) -> ShareAmount {
        self.ledger.total_shares()
    }

    pub fn get_proposal(&self, id: &ProposalId) -> Result<&Proposal, NodeError> {
        Ok(self.registry.get_proposal(id)?)
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> + '_ {
        self.registry.iter()
    }

    pub fn proposal_count(&self) -> usize {
        self.registry.len()
    }

    pub fn account_count(&self) -> usize {
        self.ledger.account_count()
    }

    pub fn ledger(&self) -> &ShareLedger {
        &self.ledger
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Verify that `total_shares` equals the sum of all balances.
    ///
    /// Tallies are not bounded by the current total: shares withdrawn after
    /// voting stay counted.
    pub fn verify_invariants(&self) -> Result<(), NodeError> {
        self.ledger.verify_supply()?;
        Ok(())
    }
}
