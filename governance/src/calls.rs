//! The timelock's own entry points as encodable payloads.
//!
//! Operational tooling submits these payloads (e.g. through a multisig) and
//! decodes them for review. The timelock itself decodes payloads addressed
//! to its own address when executing self-calls.

use govlock_types::{CallPayload, ContractAddress, Selector};
use serde::{Deserialize, Serialize};

use crate::error::TimelockError;
use crate::record::{CallId, CallRecord};

pub const PREPARE_CALL: &str = "prepareCall(address,bytes,bool)";
pub const EXECUTE_CALL: &str = "executeCall(uint64)";
pub const CANCEL_CALL: &str = "cancelCall(uint64)";
pub const QUICK_EXECUTE_CALL: &str = "quickExecuteCall(address,bytes)";
pub const SET_DELAY: &str = "setDelay(address,bytes4,uint64)";
pub const UPDATE_DELAY: &str = "updateDelay(address,bytes4,uint64)";
pub const TEST_CALL: &str = "testCall((uint64,uint64,address,string,bytes))";

/// Every signature the timelock answers to.
pub const ALL_SIGNATURES: [&str; 7] = [
    PREPARE_CALL,
    EXECUTE_CALL,
    CANCEL_CALL,
    QUICK_EXECUTE_CALL,
    SET_DELAY,
    UPDATE_DELAY,
    TEST_CALL,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimelockCall {
    PrepareCall {
        target: ContractAddress,
        payload: CallPayload,
        validate: bool,
    },
    ExecuteCall {
        id: CallId,
    },
    CancelCall {
        id: CallId,
    },
    QuickExecuteCall {
        target: ContractAddress,
        payload: CallPayload,
    },
    SetDelay {
        target: ContractAddress,
        selector: Selector,
        delay_secs: u64,
    },
    UpdateDelay {
        target: ContractAddress,
        selector: Selector,
        delay_secs: u64,
    },
    TestCall {
        record: CallRecord,
    },
}

#[derive(Serialize, Deserialize)]
struct DelayArgs {
    target: ContractAddress,
    selector: Selector,
    delay_secs: u64,
}

impl TimelockCall {
    pub fn signature(&self) -> &'static str {
        match self {
            Self::PrepareCall { .. } => PREPARE_CALL,
            Self::ExecuteCall { .. } => EXECUTE_CALL,
            Self::CancelCall { .. } => CANCEL_CALL,
            Self::QuickExecuteCall { .. } => QUICK_EXECUTE_CALL,
            Self::SetDelay { .. } => SET_DELAY,
            Self::UpdateDelay { .. } => UPDATE_DELAY,
            Self::TestCall { .. } => TEST_CALL,
        }
    }

    pub fn selector(&self) -> Selector {
        Selector::from_signature(self.signature())
    }

    /// Short entry point name, e.g. `updateDelay`.
    pub fn name(&self) -> &'static str {
        let signature = self.signature();
        signature.split('(').next().unwrap_or(signature)
    }

    pub fn encode(&self) -> Result<CallPayload, TimelockError> {
        let selector = self.selector();
        let payload = match self {
            Self::PrepareCall {
                target,
                payload,
                validate,
            } => CallPayload::encode(selector, &(target, payload, validate))?,
            Self::ExecuteCall { id } | Self::CancelCall { id } => CallPayload::encode(selector, id)?,
            Self::QuickExecuteCall { target, payload } => CallPayload::encode(selector, &(target, payload))?,
            Self::SetDelay {
                target,
                selector: fn_selector,
                delay_secs,
            }
            | Self::UpdateDelay {
                target,
                selector: fn_selector,
                delay_secs,
            } => CallPayload::encode(
                selector,
                &DelayArgs {
                    target: *target,
                    selector: *fn_selector,
                    delay_secs: *delay_secs,
                },
            )?,
            Self::TestCall { record } => CallPayload::encode(selector, record)?,
        };
        Ok(payload)
    }

    /// Decode a payload addressed to the timelock.
    ///
    /// Returns `Ok(None)` when the selector is not one of the timelock's
    /// entry points.
    pub fn decode(payload: &CallPayload) -> Result<Option<Self>, TimelockError> {
        let selector = payload.selector();
        let matches = |signature: &str| selector == Selector::from_signature(signature);

        let call = if matches(PREPARE_CALL) {
            let (target, payload, validate) = payload.decode_args()?;
            Self::PrepareCall {
                target,
                payload,
                validate,
            }
        } else if matches(EXECUTE_CALL) {
            Self::ExecuteCall {
                id: payload.decode_args()?,
            }
        } else if matches(CANCEL_CALL) {
            Self::CancelCall {
                id: payload.decode_args()?,
            }
        } else if matches(QUICK_EXECUTE_CALL) {
            let (target, payload) = payload.decode_args()?;
            Self::QuickExecuteCall { target, payload }
        } else if matches(SET_DELAY) {
            let args: DelayArgs = payload.decode_args()?;
            Self::SetDelay {
                target: args.target,
                selector: args.selector,
                delay_secs: args.delay_secs,
            }
        } else if matches(UPDATE_DELAY) {
            let args: DelayArgs = payload.decode_args()?;
            Self::UpdateDelay {
                target: args.target,
                selector: args.selector,
                delay_secs: args.delay_secs,
            }
        } else if matches(TEST_CALL) {
            Self::TestCall {
                record: payload.decode_args()?,
            }
        } else {
            return Ok(None);
        };
        Ok(Some(call))
    }
}

/// Payload for an `updateDelay` self-call.
pub fn update_delay_payload(
    target: ContractAddress,
    selector: Selector,
    delay_secs: u64,
) -> Result<CallPayload, TimelockError> {
    TimelockCall::UpdateDelay {
        target,
        selector,
        delay_secs,
    }
    .encode()
}
