//! Snapshot storage trait.

use crate::StoreError;

/// Trait for storing the latest encoded snapshot of the governance state.
///
/// The payload is opaque to the store; encoding and validation belong to the
/// caller.
pub trait SnapshotStore {
    /// Replace the stored snapshot. Must be all-or-nothing.
    fn put_snapshot(&self, data: &[u8]) -> Result<(), StoreError>;

    /// The stored snapshot, or `None` if nothing has been stored yet.
    fn get_snapshot(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Whether a snapshot has been stored (convenience wrapper).
    fn has_snapshot(&self) -> Result<bool, StoreError> {
        Ok(self.get_snapshot()?.is_some())
    }
}
