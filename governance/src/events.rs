//! Events recorded on every successful state change.

use govlock_types::{ContractAddress, Selector, Timestamp};
use serde::{Deserialize, Serialize};

use crate::record::CallId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelockEvent {
    CallPrepared {
        id: CallId,
        target: ContractAddress,
        selector: Selector,
        ready_at: Timestamp,
    },
    CallExecuted {
        id: CallId,
        target: ContractAddress,
        selector: Selector,
    },
    CallCancelled {
        id: CallId,
    },
    /// A delay-free call went straight through without a record.
    QuickExecuted {
        target: ContractAddress,
        selector: Selector,
    },
    DelaySet {
        target: ContractAddress,
        selector: Selector,
        delay_secs: u64,
    },
    DelayUpdated {
        target: ContractAddress,
        selector: Selector,
        old_delay_secs: u64,
        new_delay_secs: u64,
    },
}
