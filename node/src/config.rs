//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use dao_store::FileSnapshotStore;
use dao_types::params::{DEFAULT_PROPOSAL_THRESHOLD, DEFAULT_VOTING_PERIOD_SECS};
use dao_types::{GovernanceParams, ShareAmount};

use crate::logging::{init_logging, LogFormat};
use crate::NodeError;

/// Configuration for a DAO node.
///
/// Can be loaded from a TOML file via [`DaoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaoConfig {
    /// Proposal and voting parameters.
    #[serde(default)]
    pub governance: GovernanceConfig,

    /// Where snapshots are written. No persistence when unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to keep Prometheus metrics.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
}

/// The `[governance]` table.
///
/// Kept separate from [`GovernanceParams`] so the TOML surface only carries
/// integer widths TOML can represent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Minimum shares (inclusive) needed to author a proposal.
    #[serde(default = "default_proposal_threshold")]
    pub proposal_threshold: u64,

    /// Voting window length in seconds.
    #[serde(default = "default_voting_period_secs")]
    pub voting_period_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_proposal_threshold() -> u64 {
    DEFAULT_PROPOSAL_THRESHOLD.raw() as u64
}

fn default_voting_period_secs() -> u64 {
    DEFAULT_VOTING_PERIOD_SECS
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    pub fn params(&self) -> GovernanceParams {
        GovernanceParams {
            proposal_threshold: ShareAmount::new(u128::from(self.proposal_threshold)),
            voting_period_secs: self.voting_period_secs,
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            proposal_threshold: default_proposal_threshold(),
            voting_period_secs: default_voting_period_secs(),
        }
    }
}

impl DaoConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Reject values the node cannot run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.governance.voting_period_secs == 0 {
            return Err(NodeError::Config(
                "governance.voting_period_secs must be positive".into(),
            ));
        }
        self.log_format()?;
        Ok(())
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    /// Install the global tracing subscriber with the configured format and level.
    pub fn init_logging(&self) -> Result<(), NodeError> {
        init_logging(self.log_format()?, &self.log_level)
    }

    pub fn params(&self) -> GovernanceParams {
        self.governance.params()
    }

    /// File-backed snapshot store at `snapshot_path`, if one is configured.
    pub fn snapshot_store(&self) -> Option<FileSnapshotStore> {
        self.snapshot_path.as_ref().map(FileSnapshotStore::new)
    }
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            governance: GovernanceConfig::default(),
            snapshot_path: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
            enable_metrics: default_true(),
        }
    }
}
