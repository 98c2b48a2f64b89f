//! Share balances and total supply.

use crate::collateral::CollateralAsset;
use crate::error::LedgerError;
use dao_types::{AccountAddress, ShareAmount};
use std::collections::BTreeMap;
use tracing::debug;

/// Maps accounts to share balances backed 1:1 by locked collateral.
///
/// Accounts are created implicitly on first deposit and never removed; a
/// balance may fall to zero.
#[derive(Clone, Debug, Default)]
pub struct ShareLedger {
    shares: BTreeMap<AccountAddress, ShareAmount>,
    total_shares: ShareAmount,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from recorded balances and a recorded total.
    ///
    /// Fails if an account repeats or the balances do not sum to `recorded_total`.
    pub fn from_balances(
        balances: impl IntoIterator<Item = (AccountAddress, ShareAmount)>,
        recorded_total: ShareAmount,
    ) -> Result<Self, LedgerError> {
        let mut shares = BTreeMap::new();
        let mut computed = ShareAmount::ZERO;
        for (account, amount) in balances {
            computed = computed.checked_add(amount).ok_or(LedgerError::Overflow)?;
            if shares.insert(account.clone(), amount).is_some() {
                return Err(LedgerError::DuplicateAccount(account.to_string()));
            }
        }
        if computed != recorded_total {
            return Err(LedgerError::SupplyMismatch {
                recorded: recorded_total,
                computed,
            });
        }
        Ok(Self {
            shares,
            total_shares: computed,
        })
    }

    /// Lock `amount` of collateral from `account` and credit the same number of shares.
    ///
    /// Nothing is credited unless the lock succeeds, and the lock is never
    /// attempted if the credit could not be applied.
    pub fn deposit<C: CollateralAsset + ?Sized>(
        &mut self,
        collateral: &mut C,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        let new_balance = self
            .shares_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_total = self
            .total_shares
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        collateral.lock(account, amount)?;

        self.shares.insert(account.clone(), new_balance);
        self.total_shares = new_total;
        debug!(%account, amount = amount.raw(), balance = new_balance.raw(), "shares credited");
        Ok(new_balance)
    }

    /// Burn `amount` shares from `account` and release the backing collateral.
    ///
    /// If the release fails the ledger is left exactly as it was. Withdrawing
    /// zero is a no-op that returns the current balance without touching the
    /// collateral asset.
    pub fn withdraw<C: CollateralAsset + ?Sized>(
        &mut self,
        collateral: &mut C,
        account: &AccountAddress,
        amount: ShareAmount,
    ) -> Result<ShareAmount, LedgerError> {
        let have = self.shares_of(account);
        if amount.is_zero() {
            return Ok(have);
        }
        let new_balance = have
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientShares { have, need: amount })?;
        let new_total = self
            .total_shares
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        collateral.release(account, amount)?;

        self.shares.insert(account.clone(), new_balance);
        self.total_shares = new_total;
        debug!(%account, amount = amount.raw(), balance = new_balance.raw(), "shares debited");
        Ok(new_balance)
    }

    /// Current share balance; zero for unknown accounts.
    pub fn shares_of(&self, account: &AccountAddress) -> ShareAmount {
        self.shares.get(account).copied().unwrap_or(ShareAmount::ZERO)
    }

    pub fn total_shares(&self) -> ShareAmount {
        self.total_shares
    }

    /// Number of accounts that have ever deposited.
    pub fn account_count(&self) -> usize {
        self.shares.len()
    }

    /// Balances in account order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountAddress, ShareAmount)> + '_ {
        self.shares.iter().map(|(account, amount)| (account, *amount))
    }

    /// Recompute the sum of balances and compare it with the recorded total.
    pub fn verify_supply(&self) -> Result<(), LedgerError> {
        let mut computed = ShareAmount::ZERO;
        for amount in self.shares.values() {
            computed = computed.checked_add(*amount).ok_or(LedgerError::Overflow)?;
        }
        if computed != self.total_shares {
            return Err(LedgerError::SupplyMismatch {
                recorded: self.total_shares,
                computed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collateral::CollateralError;
    use std::collections::HashMap;

    /// Minimal collateral double: per-account balances, no allowances.
    #[derive(Default)]
    struct Vault {
        balances: HashMap<AccountAddress, u128>,
        custody: u128,
        refuse_release: bool,
    }

    impl Vault {
        fn funded(account: &AccountAddress, amount: u128) -> Self {
            let mut vault = Self::default();
            vault.balances.insert(account.clone(), amount);
            vault
        }
    }

    impl CollateralAsset for Vault {
        fn lock(
            &mut self,
            account: &AccountAddress,
            amount: ShareAmount,
        ) -> Result<(), CollateralError> {
            let balance = self.balances.entry(account.clone()).or_default();
            if *balance < amount.raw() {
                return Err(CollateralError::InsufficientBalance {
                    account: account.to_string(),
                    available: *balance,
                    needed: amount.raw(),
                });
            }
            *balance -= amount.raw();
            self.custody += amount.raw();
            Ok(())
        }

        fn release(
            &mut self,
            account: &AccountAddress,
            amount: ShareAmount,
        ) -> Result<(), CollateralError> {
            if self.refuse_release {
                return Err(CollateralError::Rejected("paused".into()));
            }
            self.custody -= amount.raw();
            *self.balances.entry(account.clone()).or_default() += amount.raw();
            Ok(())
        }
    }

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::new(s)
    }

    fn amt(raw: u128) -> ShareAmount {
        ShareAmount::new(raw)
    }

    #[test]
    fn deposit_credits_shares_and_total() {
        let v1 = addr("voter1");
        let mut vault = Vault::funded(&v1, 100);
        let mut ledger = ShareLedger::new();

        let balance = ledger.deposit(&mut vault, &v1, amt(100)).unwrap();
        assert_eq!(balance, amt(100));
        assert_eq!(ledger.shares_of(&v1), amt(100));
        assert_eq!(ledger.total_shares(), amt(100));
        assert_eq!(vault.custody, 100);
        assert_eq!(vault.balances[&v1], 0);
    }

    #[test]
    fn failed_lock_changes_nothing() {
        let v2 = addr("voter2");
        let mut vault = Vault::funded(&v2, 50);
        let mut ledger = ShareLedger::new();

        let err = ledger.deposit(&mut vault, &v2, amt(51)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::TransferFailed(CollateralError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.shares_of(&v2), ShareAmount::ZERO);
        assert_eq!(ledger.total_shares(), ShareAmount::ZERO);
        assert_eq!(ledger.account_count(), 0);
        assert_eq!(vault.custody, 0);
    }

    #[test]
    fn zero_deposit_rejected_before_lock() {
        let v1 = addr("voter1");
        let mut vault = Vault::default();
        let mut ledger = ShareLedger::new();
        assert!(matches!(
            ledger.deposit(&mut vault, &v1, ShareAmount::ZERO),
            Err(LedgerError::ZeroAmount)
        ));
        assert!(vault.balances.is_empty());
    }

    #[test]
    fn zero_withdraw_is_a_noop() {
        let v1 = addr("voter1");
        let mut vault = Vault::funded(&v1, 100);
        let mut ledger = ShareLedger::new();
        ledger.deposit(&mut vault, &v1, amt(100)).unwrap();
        vault.refuse_release = true;

        let balance = ledger.withdraw(&mut vault, &v1, ShareAmount::ZERO).unwrap();
        assert_eq!(balance, amt(100));
        assert_eq!(ledger.shares_of(&v1), amt(100));
        assert_eq!(ledger.total_shares(), amt(100));
        assert_eq!(vault.custody, 100);

        let ghost = addr("ghost");
        assert_eq!(
            ledger.withdraw(&mut vault, &ghost, ShareAmount::ZERO).unwrap(),
            ShareAmount::ZERO
        );
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn withdraw_all_then_withdraw_again_fails() {
        let v1 = addr("voter1");
        let mut vault = Vault::funded(&v1, 100);
        let mut ledger = ShareLedger::new();
        ledger.deposit(&mut vault, &v1, amt(100)).unwrap();

        let balance = ledger.withdraw(&mut vault, &v1, amt(100)).unwrap();
        assert_eq!(balance, ShareAmount::ZERO);
        assert_eq!(ledger.shares_of(&v1), ShareAmount::ZERO);
        assert_eq!(vault.balances[&v1], 100);

        let err = ledger.withdraw(&mut vault, &v1, amt(1)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientShares { have, need }
                if have == ShareAmount::ZERO && need == amt(1)
        ));
        // Account persists with a zero balance.
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn failed_release_rolls_back_withdraw() {
        let v1 = addr("voter1");
        let mut vault = Vault::funded(&v1, 100);
        let mut ledger = ShareLedger::new();
        ledger.deposit(&mut vault, &v1, amt(100)).unwrap();

        vault.refuse_release = true;
        let err = ledger.withdraw(&mut vault, &v1, amt(40)).unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed(CollateralError::Rejected(_))));
        assert_eq!(ledger.shares_of(&v1), amt(100));
        assert_eq!(ledger.total_shares(), amt(100));
        assert_eq!(vault.custody, 100);
    }

    #[test]
    fn withdraw_unknown_account_is_insufficient() {
        let mut vault = Vault::default();
        let mut ledger = ShareLedger::new();
        assert!(matches!(
            ledger.withdraw(&mut vault, &addr("ghost"), amt(1)),
            Err(LedgerError::InsufficientShares { .. })
        ));
    }

    #[test]
    fn overflowing_deposit_is_rejected_before_lock() {
        let v1 = addr("voter1");
        let mut ledger =
            ShareLedger::from_balances([(v1.clone(), amt(u128::MAX))], amt(u128::MAX)).unwrap();
        let mut vault = Vault::funded(&v1, 10);
        assert!(matches!(
            ledger.deposit(&mut vault, &v1, amt(1)),
            Err(LedgerError::Overflow)
        ));
        assert_eq!(vault.balances[&v1], 10);
    }

    #[test]
    fn from_balances_validates_supply() {
        let ok = ShareLedger::from_balances([(addr("a"), amt(5)), (addr("b"), amt(7))], amt(12));
        assert_eq!(ok.unwrap().total_shares(), amt(12));

        let mismatch = ShareLedger::from_balances([(addr("a"), amt(5))], amt(6));
        assert!(matches!(mismatch, Err(LedgerError::SupplyMismatch { .. })));

        let dup = ShareLedger::from_balances([(addr("a"), amt(5)), (addr("a"), amt(1))], amt(6));
        assert!(matches!(dup, Err(LedgerError::DuplicateAccount(_))));
    }

    #[test]
    fn iter_is_ordered_and_supply_verifies() {
        let mut ledger = ShareLedger::new();
        let mut vault = Vault::default();
        for (name, amount) in [("c", 3u128), ("a", 1), ("b", 2)] {
            vault.balances.insert(addr(name), amount);
            ledger.deposit(&mut vault, &addr(name), amt(amount)).unwrap();
        }
        let names: Vec<&str> = ledger.iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        ledger.verify_supply().unwrap();
    }
}
