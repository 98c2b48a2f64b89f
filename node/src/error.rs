use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] dao_ledger::LedgerError),

    #[error("governance error: {0}")]
    Governance(#[from] dao_governance::GovernanceError),

    #[error("store error: {0}")]
    Store(#[from] dao_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
