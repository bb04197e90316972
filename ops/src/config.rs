//! Tool configuration with TOML file support.

use std::path::{Path, PathBuf};

use govlock_types::ContractAddress;
use govlock_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::OpsError;

/// Configuration shared by the `govlock` commands.
///
/// Loaded from a TOML file via [`ToolConfig::from_toml_file`]; every field
/// has a default so an empty file is valid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Address of the deployed timelock.
    #[serde(with = "crate::hexstr", default = "default_address")]
    pub timelock_address: ContractAddress,

    /// Account that owns the timelock and submits prepared calls.
    #[serde(with = "crate::hexstr", default = "default_address")]
    pub owner: ContractAddress,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Reviewed list of governable functions.
    #[serde(default = "default_functions_path")]
    pub functions_path: PathBuf,

    /// Selector to signature map used when decoding payloads.
    #[serde(default = "default_signatures_path")]
    pub signatures_path: PathBuf,

    /// Contract name to deployed addresses.
    #[serde(default = "default_deployments_path")]
    pub deployments_path: PathBuf,

    /// JSON snapshot of the timelock state.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_address() -> ContractAddress {
    ContractAddress::ZERO
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_functions_path() -> PathBuf {
    PathBuf::from("./config/governable_functions.json")
}

fn default_signatures_path() -> PathBuf {
    PathBuf::from("./build/signatures.json")
}

fn default_deployments_path() -> PathBuf {
    PathBuf::from("./config/deployments.json")
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./state/timelock.json")
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ToolConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OpsError> {
        let content = std::fs::read_to_string(path).map_err(|e| OpsError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, OpsError> {
        toml::from_str(s).map_err(|e| OpsError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, OpsError> {
        toml::to_string_pretty(self).map_err(|e| OpsError::Config(e.to_string()))
    }

    /// Fails unless both the timelock and its owner are configured.
    pub fn require_addresses(&self) -> Result<(), OpsError> {
        if self.timelock_address.is_zero() {
            return Err(OpsError::Config("timelock_address is not set".into()));
        }
        if self.owner.is_zero() {
            return Err(OpsError::Config("owner is not set".into()));
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            timelock_address: default_address(),
            owner: default_address(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            functions_path: default_functions_path(),
            signatures_path: default_signatures_path(),
            deployments_path: default_deployments_path(),
            state_path: default_state_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ToolConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = ToolConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.timelock_address, config.timelock_address);
        assert_eq!(parsed.functions_path, config.functions_path);
        assert_eq!(parsed.log_format, config.log_format);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ToolConfig::from_toml_str("").expect("empty toml should use defaults");
        assert!(config.timelock_address.is_zero());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.state_path, PathBuf::from("./state/timelock.json"));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            timelock_address = "0x7171717171717171717171717171717171717171"
            log_format = "json"
            state_path = "/var/lib/govlock/state.json"
        "#;
        let config = ToolConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.timelock_address, ContractAddress::repeat(0x71));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.state_path, PathBuf::from("/var/lib/govlock/state.json"));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn malformed_address_is_config_error() {
        let err = ToolConfig::from_toml_str(r#"owner = "0x1234""#).unwrap_err();
        assert!(matches!(err, OpsError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ToolConfig::from_toml_file("/nonexistent/govlock.toml");
        assert!(matches!(result, Err(OpsError::Config(_))));
    }

    #[test]
    fn unset_addresses_are_rejected() {
        let mut config = ToolConfig::default();
        assert!(config.require_addresses().is_err());
        config.timelock_address = ContractAddress::repeat(1);
        config.owner = ContractAddress::repeat(2);
        assert!(config.require_addresses().is_ok());
    }
}
