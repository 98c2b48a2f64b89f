//! Proposal registry: creation preconditions and lookup.

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use dao_ledger::ShareLedger;
use dao_types::{AccountAddress, GovernanceParams, ProposalId, Timestamp};
use std::collections::BTreeMap;
use tracing::debug;

/// Stores every proposal ever created, keyed by id.
///
/// There is no delete: an id stays taken for the lifetime of the system,
/// including after its proposal resolves.
#[derive(Clone, Debug, Default)]
pub struct ProposalRegistry {
    proposals: BTreeMap<ProposalId, Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from persisted proposals, rejecting repeated ids.
    pub fn from_proposals(
        proposals: impl IntoIterator<Item = Proposal>,
    ) -> Result<Self, GovernanceError> {
        let mut map = BTreeMap::new();
        for proposal in proposals {
            let id = proposal.id();
            if map.insert(id, proposal).is_some() {
                return Err(GovernanceError::DuplicateProposal(id));
            }
        }
        Ok(Self { proposals: map })
    }

    /// Create an Undecided proposal authored by `author`.
    ///
    /// The author must hold at least `params.proposal_threshold` shares and
    /// `id` must never have been used.
    pub fn create_proposal(
        &mut self,
        ledger: &ShareLedger,
        params: &GovernanceParams,
        author: &AccountAddress,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<&Proposal, GovernanceError> {
        let have = ledger.shares_of(author);
        if have < params.proposal_threshold {
            return Err(GovernanceError::InsufficientSharesForProposal {
                have,
                need: params.proposal_threshold,
            });
        }
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::DuplicateProposal(id));
        }
        debug!(%id, %author, created_at = now.as_secs(), "proposal created");
        Ok(self
            .proposals
            .entry(id)
            .or_insert_with(|| Proposal::new(id, author.clone(), now)))
    }

    pub fn get_proposal(&self, id: &ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(id)
            .ok_or(GovernanceError::ProposalNotFound(*id))
    }

    pub(crate) fn get_proposal_mut(
        &mut self,
        id: &ProposalId,
    ) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(*id))
    }

    pub fn contains(&self, id: &ProposalId) -> bool {
        self.proposals.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> + '_ {
        self.proposals.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalStatus;
    use dao_ledger::{CollateralAsset, CollateralError};
    use dao_types::ShareAmount;

    /// Collateral that always locks.
    struct Unlimited;

    impl CollateralAsset for Unlimited {
        fn lock(&mut self, _: &AccountAddress, _: ShareAmount) -> Result<(), CollateralError> {
            Ok(())
        }

        fn release(&mut self, _: &AccountAddress, _: ShareAmount) -> Result<(), CollateralError> {
            Ok(())
        }
    }

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::new(s)
    }

    fn ledger_with(balances: &[(&str, u128)]) -> ShareLedger {
        let mut ledger = ShareLedger::new();
        for (name, amount) in balances {
            ledger
                .deposit(&mut Unlimited, &addr(name), ShareAmount::new(*amount))
                .unwrap();
        }
        ledger
    }

    #[test]
    fn author_below_threshold_rejected() {
        let ledger = ledger_with(&[("voter2", 50)]);
        let mut registry = ProposalRegistry::new();
        let err = registry
            .create_proposal(
                &ledger,
                &GovernanceParams::default(),
                &addr("voter2"),
                ProposalId::from_label("p1"),
                Timestamp::new(10),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::InsufficientSharesForProposal { have, need }
                if have == ShareAmount::new(50) && need == ShareAmount::new(100)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn author_at_threshold_creates_undecided_proposal() {
        let ledger = ledger_with(&[("voter1", 100)]);
        let mut registry = ProposalRegistry::new();
        let id = ProposalId::from_label("p1");
        let created = registry
            .create_proposal(
                &ledger,
                &GovernanceParams::default(),
                &addr("voter1"),
                id,
                Timestamp::new(10),
            )
            .unwrap();
        assert_eq!(created.status(), ProposalStatus::Undecided);
        assert_eq!(created.created_at(), Timestamp::new(10));

        let fetched = registry.get_proposal(&id).unwrap();
        assert_eq!(fetched.author(), &addr("voter1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_id_rejected() {
        let ledger = ledger_with(&[("voter1", 100), ("voter3", 300)]);
        let params = GovernanceParams::default();
        let mut registry = ProposalRegistry::new();
        let id = ProposalId::from_label("p1");
        registry
            .create_proposal(&ledger, &params, &addr("voter1"), id, Timestamp::new(1))
            .unwrap();
        let err = registry
            .create_proposal(&ledger, &params, &addr("voter3"), id, Timestamp::new(2))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::DuplicateProposal(dup) if dup == id));
        // The original proposal is untouched.
        assert_eq!(registry.get_proposal(&id).unwrap().author(), &addr("voter1"));
    }

    #[test]
    fn threshold_is_configurable() {
        let ledger = ledger_with(&[("voter2", 50)]);
        let params = GovernanceParams {
            proposal_threshold: ShareAmount::new(50),
            ..GovernanceParams::default()
        };
        let mut registry = ProposalRegistry::new();
        registry
            .create_proposal(
                &ledger,
                &params,
                &addr("voter2"),
                ProposalId::from_label("p"),
                Timestamp::new(0),
            )
            .unwrap();
    }

    #[test]
    fn unknown_id_not_found() {
        let registry = ProposalRegistry::new();
        assert!(matches!(
            registry.get_proposal(&ProposalId::ZERO),
            Err(GovernanceError::ProposalNotFound(_))
        ));
    }

    #[test]
    fn from_proposals_rejects_repeated_ids() {
        let id = ProposalId::from_label("p");
        let p = Proposal::new(id, addr("a"), Timestamp::new(0));
        assert!(ProposalRegistry::from_proposals([p.clone()]).is_ok());
        assert!(matches!(
            ProposalRegistry::from_proposals([p.clone(), p]),
            Err(GovernanceError::DuplicateProposal(_))
        ));
    }
}
