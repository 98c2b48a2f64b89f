use crate::collateral::CollateralError;
use dao_types::ShareAmount;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient shares: have {have}, need {need}")]
    InsufficientShares { have: ShareAmount, need: ShareAmount },

    #[error("collateral transfer failed: {0}")]
    TransferFailed(#[from] CollateralError),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("arithmetic overflow in share accounting")]
    Overflow,

    #[error("account {0} appears more than once")]
    DuplicateAccount(String),

    #[error("total shares {recorded} does not match sum of balances {computed}")]
    SupplyMismatch {
        recorded: ShareAmount,
        computed: ShareAmount,
    },
}
