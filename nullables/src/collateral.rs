//! Nullable collateral: an in-memory fungible token with allowances.
//!
//! Behaves like a minimal ERC-20 style asset: accounts are funded through a
//! faucet, authorise the governance system with [`NullCollateral::approve`],
//! and `lock` spends that allowance. Released collateral goes straight back to
//! the account's balance.

use dao_ledger::{CollateralAsset, CollateralError};
use dao_types::{AccountAddress, ShareAmount};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct NullCollateral {
    balances: HashMap<AccountAddress, u128>,
    allowances: HashMap<AccountAddress, u128>,
    custody: u128,
    fail_locks: bool,
    fail_releases: bool,
}

impl NullCollateral {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` to `account`.
    pub fn faucet(&mut self, account: &AccountAddress, amount: u128) {
        *self.balances.entry(account.clone()).or_default() += amount;
    }

    /// Set how much the governance system may lock from `account`.
    pub fn approve(&mut self, account: &AccountAddress, amount: u128) {
        self.allowances.insert(account.clone(), amount);
    }

    /// Fund and approve in one step.
    pub fn fund(&mut self, account: &AccountAddress, amount: u128) {
        self.faucet(account, amount);
        self.approve(account, amount);
    }

    pub fn balance_of(&self, account: &AccountAddress) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, account: &AccountAddress) -> u128 {
        self.allowances.get(account).copied().unwrap_or(0)
    }

    /// Collateral currently held in custody by the governance system.
    pub fn custody_balance(&self) -> u128 {
        self.custody
    }

    /// Sum of all account balances plus custody. Constant across lock/release.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().sum::<u128>() + self.custody
    }

    /// Make every subsequent `lock` fail with [`CollateralError::Rejected`].
    pub fn set_fail_locks(&mut self, fail: bool) {
        self.fail_locks = fail;
    }

    /// Make every subsequent `release` fail with [`CollateralError::Rejected`].
    pub fn set_fail_releases(&mut self, fail: bool) {
        self.fail_releases = fail;
    }
}

impl CollateralAsset for NullCollateral {
    fn lock(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        if self.fail_locks {
            return Err(CollateralError::Rejected("lock disabled".into()));
        }
        let needed = amount.raw();
        let allowed = self.allowance(account);
        if allowed < needed {
            return Err(CollateralError::InsufficientAllowance {
                account: account.to_string(),
                allowed,
                needed,
            });
        }
        let available = self.balance_of(account);
        if available < needed {
            return Err(CollateralError::InsufficientBalance {
                account: account.to_string(),
                available,
                needed,
            });
        }
        self.allowances.insert(account.clone(), allowed - needed);
        self.balances.insert(account.clone(), available - needed);
        self.custody += needed;
        Ok(())
    }

    fn release(
        &mut self,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<(), CollateralError> {
        if self.fail_releases {
            return Err(CollateralError::Rejected("release disabled".into()));
        }
        let needed = amount.raw();
        if self.custody < needed {
            return Err(CollateralError::CustodyShortfall {
                available: self.custody,
                needed,
            });
        }
        self.custody -= needed;
        *self.balances.entry(account.clone()).or_default() += needed;
        Ok(())
    }
}
