//! Shared utilities for govlock tooling.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
pub use time::{format_delay, format_duration};
