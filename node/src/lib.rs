//! DAO governance node: serialises deposits, withdrawals, proposals and
//! votes over one authoritative in-memory state.
//!
//! The node is the central coordinator that:
//! - Locks collateral and credits shares 1:1 through the share ledger
//! - Opens proposals for accounts holding enough shares
//! - Counts share-weighted votes within a fixed voting window
//! - Resolves a proposal once one side holds a strict majority of all shares
//! - Persists and restores versioned snapshots through a `SnapshotStore`
//! - Emits events, structured logs and Prometheus metrics for every operation

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod node;
pub mod snapshot;
pub mod state;
pub mod tracing_spans;

pub use command::{Command, CommandOutput, ProposalView};
pub use config::{DaoConfig, GovernanceConfig};
pub use error::NodeError;
pub use event::{DaoEvent, EventBus};
pub use logging::{init_logging, LogFormat};
pub use metrics::DaoMetrics;
pub use node::DaoNode;
pub use snapshot::{DaoSnapshot, ProposalRecord, SNAPSHOT_VERSION};
pub use state::DaoState;
