//! DaoNode: the async entry point that serialises every operation over one
//! authoritative state.
//!
//! Ledger, registry and collateral asset sit behind a single
//! [`tokio::sync::Mutex`]. Every operation acquires it once, runs its checks,
//! calls the collateral asset, commits and emits events before releasing it,
//! so concurrent callers observe each operation as a single atomic step.

use tokio::sync::Mutex;

use dao_governance::{Proposal, VoteReceipt, VoteSide};
use dao_ledger::CollateralAsset;
use dao_store::SnapshotStore;
use dao_types::{AccountAddress, Clock, GovernanceParams, ProposalId, ShareAmount, SystemClock};

use crate::command::{Command, CommandOutput, ProposalView};
use crate::config::DaoConfig;
use crate::event::{DaoEvent, EventBus};
use crate::metrics::DaoMetrics;
use crate::snapshot::DaoSnapshot;
use crate::state::DaoState;
use crate::tracing_spans;
use crate::NodeError;

struct NodeInner<C> {
    state: DaoState,
    collateral: C,
}

/// The DAO governance node.
///
/// `C` is the external collateral asset, `K` the clock that supplies "now"
/// for proposal creation and voting.
pub struct DaoNode<C, K = SystemClock> {
    inner: Mutex<NodeInner<C>>,
    clock: K,
    events: EventBus,
    metrics: Option<DaoMetrics>,
}

impl<C, K> DaoNode<C, K>
where
    C: CollateralAsset + Send,
    K: Clock,
{
    pub fn new(params: GovernanceParams, collateral: C, clock: K) -> Self {
        Self::with_state(DaoState::new(params), collateral, clock)
    }

    fn with_state(state: DaoState, collateral: C, clock: K) -> Self {
        Self {
            inner: Mutex::new(NodeInner { state, collateral }),
            clock,
            events: EventBus::new(),
            metrics: None,
        }
    }

    /// Build a node from configuration, with metrics when enabled.
    pub fn from_config(config: &DaoConfig, collateral: C, clock: K) -> Result<Self, NodeError> {
        config.validate()?;
        let node = Self::new(config.params(), collateral, clock);
        if config.enable_metrics {
            node.with_metrics()
        } else {
            Ok(node)
        }
    }

    /// Attach a fresh set of Prometheus metrics.
    pub fn with_metrics(mut self) -> Result<Self, NodeError> {
        self.metrics = Some(DaoMetrics::new()?);
        Ok(self)
    }

    pub fn metrics(&self) -> Option<&DaoMetrics> {
        self.metrics.as_ref()
    }

    /// Register an event listener. Listeners run while the state lock is held.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&DaoEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Lock `amount` of collateral from `account` and credit shares 1:1.
    /// Returns the new balance.
    pub async fn deposit(
        &self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, NodeError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        tracing_spans::deposit_span(account.as_str(), amount.raw()).in_scope(|| {
            let result = inner.state.deposit(&mut inner.collateral, account, amount);
            match &result {
                Ok(balance) => {
                    tracing::info!(
                        %account,
                        amount = amount.raw(),
                        balance = balance.raw(),
                        "deposit accepted"
                    );
                    if let Some(m) = &self.metrics {
                        m.deposits.inc();
                    }
                    self.events.emit(&DaoEvent::Deposited {
                        account: account.clone(),
                        amount,
                        balance: *balance,
                    });
                }
                Err(e) => self.rejected("deposit", e),
            }
            self.observe(&inner.state);
            result
        })
    }

    /// Burn `amount` shares from `account` and release the collateral.
    /// Returns the new balance.
    pub async fn withdraw(
        &self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, NodeError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        tracing_spans::withdraw_span(account.as_str(), amount.raw()).in_scope(|| {
            let result = inner.state.withdraw(&mut inner.collateral, account, amount);
            match &result {
                Ok(balance) => {
                    tracing::info!(
                        %account,
                        amount = amount.raw(),
                        balance = balance.raw(),
                        "withdrawal accepted"
                    );
                    if let Some(m) = &self.metrics {
                        m.withdrawals.inc();
                    }
                    self.events.emit(&DaoEvent::Withdrawn {
                        account: account.clone(),
                        amount,
                        balance: *balance,
                    });
                }
                Err(e) => self.rejected("withdraw", e),
            }
            self.observe(&inner.state);
            result
        })
    }

    /// Open proposal `id` for voting, timestamped with the node clock.
    pub async fn create_proposal(
        &self,
        author: &AccountAddress,
        id: ProposalId,
    ) -> Result<Proposal, NodeError> {
        let mut guard = self.inner.lock().await;
        let now = self.clock.now();
        tracing_spans::create_proposal_span(&id.to_string(), author.as_str()).in_scope(|| {
            let result = guard.state.create_proposal(author, id, now).cloned();
            match &result {
                Ok(proposal) => {
                    tracing::info!(%id, %author, created_at = now.as_secs(), "proposal created");
                    if let Some(m) = &self.metrics {
                        m.proposals_created.inc();
                    }
                    self.events.emit(&DaoEvent::ProposalCreated {
                        id,
                        author: author.clone(),
                        created_at: proposal.created_at(),
                    });
                }
                Err(e) => self.rejected("create_proposal", e),
            }
            self.observe(&guard.state);
            result
        })
    }

    /// Cast `voter`'s live share balance on `side` of proposal `id`.
    pub async fn vote(
        &self,
        voter: &AccountAddress,
        id: &ProposalId,
        side: VoteSide,
    ) -> Result<VoteReceipt, NodeError> {
        let mut guard = self.inner.lock().await;
        let now = self.clock.now();
        tracing_spans::vote_span(&id.to_string(), voter.as_str()).in_scope(|| {
            let result = guard.state.vote(voter, id, side, now);
            match &result {
                Ok(receipt) => {
                    if let Some(m) = &self.metrics {
                        m.votes_cast.inc();
                    }
                    self.events.emit(&DaoEvent::VoteCast {
                        id: *id,
                        voter: voter.clone(),
                        side,
                        weight: receipt.weight,
                    });
                    if receipt.resolved() {
                        self.on_resolved(&guard.state, id, receipt);
                    }
                }
                Err(e) => self.rejected("vote", e),
            }
            result
        })
    }

    pub async fn shares_of(&self, account: &AccountAddress) -> ShareAmount {
        self.inner.lock().await.state.shares_of(account)
    }

    pub async fn total_shares(&self) -> ShareAmount {
        self.inner.lock().await.state.total_shares()
    }

    pub async fn get_proposal(&self, id: &ProposalId) -> Result<Proposal, NodeError> {
        Ok(self.inner.lock().await.state.get_proposal(id)?.clone())
    }

    /// All proposals in id order.
    pub async fn list_proposals(&self) -> Vec<ProposalView> {
        let guard = self.inner.lock().await;
        let period = guard.state.params().voting_period_secs;
        guard
            .state
            .proposals()
            .map(|p| ProposalView::from_proposal(p, period))
            .collect()
    }

    /// Dispatch a [`Command`] to the matching operation.
    pub async fn execute(&self, command: Command) -> Result<CommandOutput, NodeError> {
        match command {
            Command::Deposit { account, amount } => Ok(CommandOutput::Balance {
                amount: self.deposit(&account, amount).await?,
            }),
            Command::Withdraw { account, amount } => Ok(CommandOutput::Balance {
                amount: self.withdraw(&account, amount).await?,
            }),
            Command::CreateProposal { author, id } => {
                let proposal = self.create_proposal(&author, id).await?;
                Ok(CommandOutput::Proposal {
                    proposal: self.view(&proposal).await,
                })
            }
            Command::Vote { voter, id, side } => Ok(CommandOutput::Vote {
                receipt: self.vote(&voter, &id, side).await?,
            }),
            Command::SharesOf { account } => Ok(CommandOutput::Balance {
                amount: self.shares_of(&account).await,
            }),
            Command::TotalShares => Ok(CommandOutput::TotalShares {
                amount: self.total_shares().await,
            }),
            Command::GetProposal { id } => {
                let proposal = self.get_proposal(&id).await?;
                Ok(CommandOutput::Proposal {
                    proposal: self.view(&proposal).await,
                })
            }
            Command::ListProposals => Ok(CommandOutput::Proposals {
                proposals: self.list_proposals().await,
            }),
        }
    }

    // ── Persistence ─────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> DaoSnapshot {
        self.inner.lock().await.state.to_snapshot()
    }

    /// Encode the current state and hand it to `store`.
    pub async fn persist<S: SnapshotStore + ?Sized>(&self, store: &S) -> Result<(), NodeError> {
        let guard = self.inner.lock().await;
        tracing_spans::snapshot_span("persist").in_scope(|| -> Result<(), NodeError> {
            let bytes = guard.state.to_snapshot().encode()?;
            store.put_snapshot(&bytes)?;
            tracing::info!(
                bytes = bytes.len(),
                accounts = guard.state.account_count(),
                proposals = guard.state.proposal_count(),
                "snapshot persisted"
            );
            Ok(())
        })
    }

    /// Rebuild a node from the snapshot in `store`, or start empty when the
    /// store holds none.
    ///
    /// The collateral asset is not part of the snapshot; the caller must pass
    /// one whose custody matches the restored total.
    pub fn restore<S: SnapshotStore + ?Sized>(
        store: &S,
        params: GovernanceParams,
        collateral: C,
        clock: K,
    ) -> Result<Self, NodeError> {
        let _span = tracing_spans::snapshot_span("restore").entered();
        let state = match store.get_snapshot()? {
            Some(bytes) => {
                let state = DaoState::from_snapshot(params, DaoSnapshot::decode(&bytes)?)?;
                tracing::info!(
                    accounts = state.account_count(),
                    proposals = state.proposal_count(),
                    total_shares = state.total_shares().raw(),
                    "state restored from snapshot"
                );
                state
            }
            None => {
                tracing::info!("no snapshot found, starting with empty state");
                DaoState::new(params)
            }
        };
        Ok(Self::with_state(state, collateral, clock))
    }

    // ── Collateral access ───────────────────────────────────────────────

    /// Inspect the collateral asset under the state lock.
    pub async fn with_collateral<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.lock().await.collateral)
    }

    /// Mutate the collateral asset under the state lock.
    pub async fn with_collateral_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.lock().await.collateral)
    }

    /// Check the supply invariant of the current state.
    pub async fn verify_invariants(&self) -> Result<(), NodeError> {
        self.inner.lock().await.state.verify_invariants()
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    async fn view(&self, proposal: &Proposal) -> ProposalView {
        let period = self.inner.lock().await.state.params().voting_period_secs;
        ProposalView::from_proposal(proposal, period)
    }

    fn on_resolved(&self, state: &DaoState, id: &ProposalId, receipt: &VoteReceipt) {
        let Ok(proposal) = state.get_proposal(id) else {
            return;
        };
        if let Some(m) = &self.metrics {
            match receipt.status {
                dao_governance::ProposalStatus::Approved => m.proposals_approved.inc(),
                dao_governance::ProposalStatus::Rejected => m.proposals_rejected.inc(),
                dao_governance::ProposalStatus::Undecided => {}
            }
        }
        self.events.emit(&DaoEvent::ProposalResolved {
            id: *id,
            status: receipt.status,
            votes_yes: proposal.votes_yes(),
            votes_no: proposal.votes_no(),
        });
    }

    fn rejected(&self, operation: &str, error: &NodeError) {
        tracing::warn!(operation, error = %error, "operation rejected");
        if let Some(m) = &self.metrics {
            m.operations_rejected.inc();
        }
    }

    fn observe(&self, state: &DaoState) {
        if let Some(m) = &self.metrics {
            m.observe_state(
                state.total_shares().raw(),
                state.account_count(),
                state.proposal_count(),
            );
        }
    }
}
