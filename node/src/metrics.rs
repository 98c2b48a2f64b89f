//! Prometheus metrics for the DAO node.
//!
//! Counters track committed and rejected operations; gauges mirror the size
//! of the authoritative state. [`DaoMetrics`] owns a dedicated [`Registry`]
//! that an exporter can encode with [`DaoMetrics::encode_text`].

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, IntCounter,
    IntGauge, Opts, Registry, TextEncoder,
};

use crate::NodeError;

/// Central collection of all node-level Prometheus metrics.
pub struct DaoMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    pub deposits: IntCounter,
    pub withdrawals: IntCounter,
    pub proposals_created: IntCounter,
    pub votes_cast: IntCounter,
    pub proposals_approved: IntCounter,
    pub proposals_rejected: IntCounter,
    /// Operations that failed and left the state untouched.
    pub operations_rejected: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Total outstanding shares (saturates at `i64::MAX`).
    pub total_shares: IntGauge,
    /// Accounts that have ever deposited.
    pub account_count: IntGauge,
    pub proposal_count: IntGauge,
}

impl DaoMetrics {
    /// Create a fresh set of metrics, all registered under a new [`Registry`].
    pub fn new() -> Result<Self, NodeError> {
        let registry = Registry::new();

        // Counters
        let deposits = register_int_counter_with_registry!(
            Opts::new("dao_deposits_total", "Total successful deposits"),
            registry
        )?;
        let withdrawals = register_int_counter_with_registry!(
            Opts::new("dao_withdrawals_total", "Total successful withdrawals"),
            registry
        )?;
        let proposals_created = register_int_counter_with_registry!(
            Opts::new("dao_proposals_created_total", "Total proposals created"),
            registry
        )?;
        let votes_cast = register_int_counter_with_registry!(
            Opts::new("dao_votes_cast_total", "Total votes counted"),
            registry
        )?;
        let proposals_approved = register_int_counter_with_registry!(
            Opts::new("dao_proposals_approved_total", "Total proposals approved"),
            registry
        )?;
        let proposals_rejected = register_int_counter_with_registry!(
            Opts::new("dao_proposals_rejected_total", "Total proposals rejected"),
            registry
        )?;
        let operations_rejected = register_int_counter_with_registry!(
            Opts::new(
                "dao_operations_rejected_total",
                "Total operations that failed without effect"
            ),
            registry
        )?;

        // Gauges
        let total_shares = register_int_gauge_with_registry!(
            Opts::new("dao_total_shares", "Total outstanding shares"),
            registry
        )?;
        let account_count = register_int_gauge_with_registry!(
            Opts::new("dao_account_count", "Accounts that have deposited"),
            registry
        )?;
        let proposal_count = register_int_gauge_with_registry!(
            Opts::new("dao_proposal_count", "Proposals ever created"),
            registry
        )?;

        Ok(Self {
            registry,
            deposits,
            withdrawals,
            proposals_created,
            votes_cast,
            proposals_approved,
            proposals_rejected,
            operations_rejected,
            total_shares,
            account_count,
            proposal_count,
        })
    }

    /// Refresh the state gauges.
    pub fn observe_state(&self, total_shares: u128, accounts: usize, proposals: usize) {
        self.total_shares
            .set(i64::try_from(total_shares).unwrap_or(i64::MAX));
        self.account_count
            .set(i64::try_from(accounts).unwrap_or(i64::MAX));
        self.proposal_count
            .set(i64::try_from(proposals).unwrap_or(i64::MAX));
    }

    /// Encode every metric in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, NodeError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
