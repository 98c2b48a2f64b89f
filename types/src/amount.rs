//! Share amounts.
//!
//! Shares are minted 1:1 against locked collateral, so an amount is expressed
//! in the collateral asset's smallest unit. Stored as a fixed-point integer
//! (u128) to avoid floating-point errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of shares (equivalently, of locked collateral).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShareAmount(u128);

impl ShareAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Whether this amount is a strict majority of `total`, i.e. `2 * self > total`.
    ///
    /// Doubling saturates: an amount above `u128::MAX / 2` is a majority of
    /// any representable total.
    pub fn is_majority_of(&self, total: Self) -> bool {
        self.0.saturating_mul(2) > total.0
    }
}

impl From<u128> for ShareAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ShareAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shares", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_arithmetic() {
        let a = ShareAmount::new(100);
        assert_eq!(a.checked_add(ShareAmount::new(5)), Some(ShareAmount::new(105)));
        assert_eq!(a.checked_sub(ShareAmount::new(101)), None);
        assert_eq!(ShareAmount::new(u128::MAX).checked_add(ShareAmount::new(1)), None);
    }

    #[test]
    fn majority_is_strict() {
        let total = ShareAmount::new(300);
        assert!(!ShareAmount::new(150).is_majority_of(total));
        assert!(ShareAmount::new(151).is_majority_of(total));
        assert!(!ShareAmount::new(105).is_majority_of(total));
        assert!(ShareAmount::new(200).is_majority_of(total));
    }

    #[test]
    fn majority_of_empty_supply() {
        assert!(!ShareAmount::ZERO.is_majority_of(ShareAmount::ZERO));
        assert!(ShareAmount::new(1).is_majority_of(ShareAmount::ZERO));
    }

    #[test]
    fn majority_saturates_instead_of_overflowing() {
        let huge = ShareAmount::new(u128::MAX / 2 + 1);
        assert!(huge.is_majority_of(ShareAmount::new(u128::MAX)));
    }
}
