//! Share ledger for the DAO governance engine.
//!
//! Account holders lock a fungible collateral asset and receive voting shares
//! 1:1. The ledger never embeds token-transfer logic: it drives an external
//! [`CollateralAsset`] through `lock` and `release` and propagates failures.
//!
//! Invariant: `total_shares` always equals the sum of all account balances.

pub mod collateral;
pub mod error;
pub mod shares;

pub use collateral::{CollateralAsset, CollateralError};
pub use error::LedgerError;
pub use shares::ShareLedger;
