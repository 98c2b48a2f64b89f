//! Versioned bincode snapshots of the DAO state.
//!
//! A snapshot carries balances, the recorded total and every proposal with
//! its voter set. Governance parameters are not part of it: they come from
//! configuration on restore.

use serde::{Deserialize, Serialize};

use dao_governance::{Proposal, ProposalRegistry, ProposalStatus};
use dao_ledger::ShareLedger;
use dao_types::{AccountAddress, GovernanceParams, ProposalId, ShareAmount, Timestamp};

use crate::state::DaoState;
use crate::NodeError;

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoSnapshot {
    pub version: u32,
    pub total_shares: ShareAmount,
    pub accounts: Vec<(AccountAddress, ShareAmount)>,
    pub proposals: Vec<ProposalRecord>,
}

/// Flat, serialisable form of a [`Proposal`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub author: AccountAddress,
    pub created_at: Timestamp,
    pub votes_yes: ShareAmount,
    pub votes_no: ShareAmount,
    pub status: ProposalStatus,
    pub voters: Vec<AccountAddress>,
}

impl From<&Proposal> for ProposalRecord {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id(),
            author: p.author().clone(),
            created_at: p.created_at(),
            votes_yes: p.votes_yes(),
            votes_no: p.votes_no(),
            status: p.status(),
            voters: p.voters().cloned().collect(),
        }
    }
}

impl From<ProposalRecord> for Proposal {
    fn from(r: ProposalRecord) -> Self {
        Proposal::restore(
            r.id,
            r.author,
            r.created_at,
            r.votes_yes,
            r.votes_no,
            r.status,
            r.voters,
        )
    }
}

impl DaoSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, NodeError> {
        bincode::serialize(self).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, NodeError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(NodeError::Snapshot(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}

impl DaoState {
    pub fn to_snapshot(&self) -> DaoSnapshot {
        DaoSnapshot {
            version: SNAPSHOT_VERSION,
            total_shares: self.total_shares(),
            accounts: self
                .ledger()
                .iter()
                .map(|(account, amount)| (account.clone(), amount))
                .collect(),
            proposals: self.proposals().map(ProposalRecord::from).collect(),
        }
    }

    /// Rebuild state from a snapshot.
    ///
    /// Rejects repeated accounts, repeated proposal ids, and balances that do
    /// not sum to the recorded total.
    pub fn from_snapshot(
        params: GovernanceParams,
        snapshot: DaoSnapshot,
    ) -> Result<Self, NodeError> {
        let ledger = ShareLedger::from_balances(snapshot.accounts, snapshot.total_shares)?;
        let registry =
            ProposalRegistry::from_proposals(snapshot.proposals.into_iter().map(Proposal::from))?;
        let state = DaoState::from_parts(params, ledger, registry);
        state.verify_invariants()?;
        Ok(state)
    }
}
