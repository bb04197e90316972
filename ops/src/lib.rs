//! Operational tooling around the govlock timelock.
//!
//! - [`GovernableFunctions`]: the reviewed list of owner-gated functions and
//!   the delay each should carry.
//! - [`SignatureBook`]: selector to signature lookup for human review.
//! - [`plan_delays`] / [`apply_plan`]: reconcile the timelock's delay table
//!   with the governable functions file.
//! - [`CallDecoder`]: render timelock payloads for review before signing.

pub mod config;
pub mod decode;
pub mod deployments;
pub mod error;
pub mod functions;
mod hexstr;
pub mod planner;
pub mod signatures;

pub use config::ToolConfig;
pub use decode::CallDecoder;
pub use deployments::Deployments;
pub use error::OpsError;
pub use functions::{GovernableFunction, GovernableFunctions, SECS_PER_DAY};
pub use planner::{apply_plan, plan_delays, ApplyReport, DelayAction, DelayPlan, PlannedDelay};
pub use signatures::SignatureBook;
