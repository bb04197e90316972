//! Deployed contract addresses, keyed by contract name.
//!
//! File format: a JSON object mapping each contract name to the list of
//! its deployed addresses, e.g. `{"LiquidityPool": ["0x…", "0x…"]}`.

use std::collections::BTreeMap;
use std::path::Path;

use govlock_types::ContractAddress;

use crate::OpsError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deployments {
    contracts: BTreeMap<String, Vec<ContractAddress>>,
}

impl Deployments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OpsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(s: &str) -> Result<Self, OpsError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(s)?;
        let mut contracts = BTreeMap::new();
        for (name, addresses) in raw {
            let parsed = addresses
                .iter()
                .map(|a| a.parse::<ContractAddress>())
                .collect::<Result<Vec<_>, _>>()?;
            contracts.insert(name, parsed);
        }
        Ok(Self { contracts })
    }

    pub fn insert(&mut self, contract: impl Into<String>, address: ContractAddress) {
        self.contracts.entry(contract.into()).or_default().push(address);
    }

    /// Deployed addresses of `contract`, `None` when it is not listed.
    pub fn addresses(&self, contract: &str) -> Option<&[ContractAddress]> {
        self.contracts.get(contract).map(Vec::as_slice)
    }

    /// Name under which `address` is deployed.
    pub fn name_of(&self, address: &ContractAddress) -> Option<&str> {
        self.contracts
            .iter()
            .find(|(_, addresses)| addresses.contains(address))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_addresses_per_contract() {
        let json = format!(
            r#"{{"Pool": ["{}", "{}"], "Vault": []}}"#,
            ContractAddress::repeat(1),
            ContractAddress::repeat(2)
        );
        let deployments = Deployments::from_json(&json).unwrap();
        assert_eq!(
            deployments.addresses("Pool").unwrap(),
            &[ContractAddress::repeat(1), ContractAddress::repeat(2)]
        );
        assert!(deployments.addresses("Vault").unwrap().is_empty());
        assert!(deployments.addresses("Controller").is_none());
        assert_eq!(deployments.name_of(&ContractAddress::repeat(2)), Some("Pool"));
    }

    #[test]
    fn rejects_malformed_address() {
        let err = Deployments::from_json(r#"{"Pool": ["0xzz"]}"#).unwrap_err();
        assert!(matches!(err, OpsError::Types(_)));
    }
}
