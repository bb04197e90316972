//! Persistable snapshot of a timelock.

use serde::{Deserialize, Serialize};

use crate::delay::DelayEntry;
use crate::record::CallRecord;

/// Everything needed to rebuild a [`crate::CallTimelock`].
///
/// Bucket vectors keep their registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockState {
    #[serde(default)]
    pub delays: Vec<DelayEntry>,
    #[serde(default)]
    pub pending: Vec<CallRecord>,
    #[serde(default)]
    pub executed: Vec<CallRecord>,
    #[serde(default)]
    pub cancelled: Vec<CallRecord>,
    #[serde(default)]
    pub total_calls: u64,
}

impl TimelockState {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
