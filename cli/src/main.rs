//! govlock: operator tool for the governance timelock.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use govlock_ops::ToolConfig;
use govlock_utils::LogFormat;

#[derive(Parser)]
#[command(name = "govlock", about = "Governance timelock operator tool")]
struct Cli {
    /// Path to a TOML configuration file. Flags and env vars override it.
    #[arg(long, env = "GOVLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GOVLOCK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GOVLOCK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Timelock state snapshot (JSON).
    #[arg(long, env = "GOVLOCK_STATE")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Check that every governable function is reviewed and its selector
    /// matches its signature.
    ValidateFunctions,

    /// Describe a hex-encoded timelock payload.
    Decode {
        /// Payload hex, with or without 0x prefix.
        payload: String,
    },

    /// Print the selector of a function signature.
    Selector {
        /// Canonical signature, e.g. "setFee(uint256)".
        signature: String,
    },

    /// Show pending calls from the state snapshot, split by readiness.
    Status {
        /// Evaluate readiness at this unix time instead of now.
        #[arg(long)]
        now: Option<u64>,
    },

    /// Show the delay changes needed to match the governable functions file.
    Plan {
        /// Evaluate readiness at this unix time instead of now.
        #[arg(long)]
        now: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ToolConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ToolConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(state) = cli.state {
        config.state_path = state;
    }

    govlock_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::ValidateFunctions => commands::validate_functions(&config),
        Command::Decode { payload } => commands::decode(&config, &payload),
        Command::Selector { signature } => {
            commands::selector(&signature);
            Ok(())
        }
        Command::Status { now } => commands::status(&config, now),
        Command::Plan { now } => commands::plan(&config, now),
    }
}
