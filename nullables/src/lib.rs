//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of the governance engine (clock, collateral
//! asset, snapshot storage) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod collateral;
pub mod store;

pub use clock::NullClock;
pub use collateral::NullCollateral;
pub use store::NullSnapshotStore;
