//! Timestamps and the clock abstraction.
//!
//! Timestamps are Unix epoch seconds (UTC). The governance engine never reads
//! the system clock directly: every time-dependent operation receives "now"
//! from a [`Clock`], so voting windows can be tested without real delay.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A system clock set before the Unix epoch reads as [`Timestamp::EPOCH`].
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `secs`, saturating at `u64::MAX`.
    pub fn plus_secs(&self, secs: u64) -> Timestamp {
        Self(self.0.saturating_add(secs))
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    ///
    /// The window is half-open: at exactly `self + duration_secs` it has expired.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now >= self.plus_secs(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Source of "now" for time-boxed operations.
///
/// Implementations must be monotonically non-decreasing.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
