//! Nullable snapshot store: thread-safe in-memory storage for testing.

use dao_store::{SnapshotStore, StoreError};
use std::sync::Mutex;

/// Keeps the latest snapshot in memory.
#[derive(Default)]
pub struct NullSnapshotStore {
    snapshot: Mutex<Option<Vec<u8>>>,
}

impl NullSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored bytes directly, bypassing any encoder.
    pub fn set_raw(&self, data: Vec<u8>) -> Result<(), StoreError> {
        let mut slot = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *slot = Some(data);
        Ok(())
    }
}

impl SnapshotStore for NullSnapshotStore {
    fn put_snapshot(&self, data: &[u8]) -> Result<(), StoreError> {
        let mut slot = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *slot = Some(data.to_vec());
        Ok(())
    }

    fn get_snapshot(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let slot = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(slot.clone())
    }
}
