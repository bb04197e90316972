//! Fundamental value types for the govlock timelock.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! contract addresses, function selectors, opaque call payloads and timestamps.

pub mod address;
pub mod error;
pub mod payload;
pub mod selector;
pub mod time;

pub use address::ContractAddress;
pub use error::TypesError;
pub use payload::CallPayload;
pub use selector::Selector;
pub use time::Timestamp;
