//! Nullable infrastructure for deterministic testing.
//!
//! The timelock reads time and executes foreign contracts through the
//! traits in `govlock_governance::host`. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::{NullContract, NullLedger, ValueContract};
