//! Fundamental types for the DAO governance engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, share amounts, proposal identifiers, timestamps, the clock
//! abstraction, and the governance parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod proposal_id;
pub mod time;

pub use address::AccountAddress;
pub use amount::ShareAmount;
pub use error::TypesError;
pub use params::GovernanceParams;
pub use proposal_id::ProposalId;
pub use time::{Clock, SystemClock, Timestamp};
