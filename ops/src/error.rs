use govlock_governance::TimelockError;
use govlock_types::{Selector, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("timelock error: {0}")]
    Timelock(#[from] TimelockError),

    #[error("codec error: {0}")]
    Types(#[from] TypesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{} governable function(s) not reviewed: {}", .0.len(), .0.join(", "))]
    UnreviewedFunctions(Vec<String>),

    #[error("selector mismatch for {signature}: recorded {recorded}, derived {derived}")]
    SelectorMismatch {
        signature: String,
        recorded: Selector,
        derived: Selector,
    },

    #[error("not a timelock call: unknown selector {0}")]
    NotTimelockCall(Selector),
}
