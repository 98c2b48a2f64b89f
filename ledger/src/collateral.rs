//! The collateral asset collaborator.

use dao_types::{AccountAddress, ShareAmount};
use thiserror::Error;

/// Failure reported by the external collateral asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollateralError {
    #[error("account {account} holds {available} collateral, needs {needed}")]
    InsufficientBalance {
        account: String,
        available: u128,
        needed: u128,
    },

    #[error("account {account} authorised {allowed} collateral, needs {needed}")]
    InsufficientAllowance {
        account: String,
        allowed: u128,
        needed: u128,
    },

    #[error("custody holds {available} collateral, cannot release {needed}")]
    CustodyShortfall { available: u128, needed: u128 },

    #[error("collateral transfer rejected: {0}")]
    Rejected(String),
}

/// A fungible asset the share ledger locks on deposit and releases on withdraw.
///
/// Both operations are all-or-nothing: on `Err` no collateral has moved.
pub trait CollateralAsset {
    /// Move `amount` from `account` into the governance system's custody.
    fn lock(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError>;

    /// Move `amount` from custody back to `account`.
    fn release(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError>;
}

impl<C: CollateralAsset + ?Sized> CollateralAsset for &mut C {
    fn lock(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        (**self).lock(account, amount)
    }

    fn release(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        (**self).release(account, amount)
    }
}

impl<C: CollateralAsset + ?Sized> CollateralAsset for Box<C> {
    fn lock(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        (**self).lock(account, amount)
    }

    fn release(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        (**self).release(account, amount)
    }
}
