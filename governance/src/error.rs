use govlock_types::{Timestamp, TypesError};
use thiserror::Error;

use crate::record::CallId;

#[derive(Debug, Error)]
pub enum TimelockError {
    #[error("Ownable: caller is not the owner")]
    Unauthorized,

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Call already pending")]
    DuplicatePending,

    #[error("Call not found: {0}")]
    NotFound(CallId),

    #[error("Call not ready: executable at {ready_at}")]
    NotReady { ready_at: Timestamp },

    #[error("Call has a delay")]
    HasDelay,

    #[error("Delay already set")]
    DelayAlreadySet,

    #[error("Delay not already set")]
    DelayNotSet,

    #[error("Must be called via timelock")]
    MustBeCalledViaTimelock,

    #[error("Only callable by this contract")]
    OnlyCallableBySelf,

    #[error("Call would revert when executed: {0}")]
    WouldRevert(String),

    #[error("Call execution failed: {0}")]
    ExecutionFailed(String),

    #[error("malformed timelock call: {0}")]
    Codec(#[from] TypesError),

    #[error("corrupt timelock state: {0}")]
    CorruptState(String),
}

