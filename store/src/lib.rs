//! Abstract snapshot storage for the DAO governance engine.
//!
//! The authoritative state lives in memory. A storage backend only keeps the
//! latest encoded snapshot of it; the rest of the codebase depends on the
//! [`SnapshotStore`] trait, never on a concrete backend.

pub mod error;
pub mod file;
pub mod snapshot;

pub use error::StoreError;
pub use file::FileSnapshotStore;
pub use snapshot::SnapshotStore;
