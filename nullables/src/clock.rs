//! Nullable clock: deterministic time for testing.

use dao_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Clones share the same time, so a
/// test can keep a handle while the system under test owns another.
#[derive(Clone, Debug)]
pub struct NullClock {
    current: Arc<AtomicU64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Arc::new(AtomicU64::new(initial_secs)),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.store(secs, Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.load(Ordering::SeqCst))
    }
}
