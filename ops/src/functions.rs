//! The governable functions file.
//!
//! A JSON array listing every owner-gated function of the managed contracts
//! together with the delay (in days) it should carry. Entries start out
//! unreviewed; delays are only applied once every entry has been reviewed.

use std::collections::HashSet;
use std::path::Path;

use govlock_types::Selector;
use serde::{Deserialize, Serialize};

use crate::OpsError;

pub const SECS_PER_DAY: u64 = 86_400;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernableFunction {
    /// Contract name as listed in the deployments file.
    pub contract: String,
    pub name: String,
    pub signature: String,
    #[serde(with = "crate::hexstr")]
    pub selector: Selector,
    /// Delay in days.
    #[serde(default)]
    pub delay: u64,
    #[serde(default)]
    pub reviewed: bool,
}

impl GovernableFunction {
    /// Fresh, unreviewed entry with no delay.
    pub fn new(contract: impl Into<String>, signature: impl Into<String>) -> Self {
        let signature = signature.into();
        let name = signature.split('(').next().unwrap_or(&signature).to_string();
        Self {
            contract: contract.into(),
            name,
            selector: Selector::from_signature(&signature),
            signature,
            delay: 0,
            reviewed: false,
        }
    }

    pub fn delay_secs(&self) -> u64 {
        self.delay.saturating_mul(SECS_PER_DAY)
    }

    /// Identity used for sorting and merging.
    pub fn key(&self) -> (&str, Selector) {
        (&self.contract, self.selector)
    }

    /// `Contract.signature`, for messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.contract, self.signature)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GovernableFunctions(Vec<GovernableFunction>);

impl GovernableFunctions {
    pub fn new(functions: Vec<GovernableFunction>) -> Self {
        Self(functions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OpsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OpsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(s: &str) -> Result<Self, OpsError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, OpsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GovernableFunction> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn unreviewed(&self) -> impl Iterator<Item = &GovernableFunction> + '_ {
        self.0.iter().filter(|f| !f.reviewed)
    }

    /// Fails with [`OpsError::UnreviewedFunctions`] naming every entry that
    /// still needs review.
    pub fn ensure_reviewed(&self) -> Result<(), OpsError> {
        let pending: Vec<String> = self.unreviewed().map(GovernableFunction::qualified_name).collect();
        if pending.is_empty() {
            Ok(())
        } else {
            Err(OpsError::UnreviewedFunctions(pending))
        }
    }

    /// Fails if a recorded selector does not belong to its signature.
    pub fn check_selectors(&self) -> Result<(), OpsError> {
        for function in &self.0 {
            let derived = Selector::from_signature(&function.signature);
            if derived != function.selector {
                return Err(OpsError::SelectorMismatch {
                    signature: function.qualified_name(),
                    recorded: function.selector,
                    derived,
                });
            }
        }
        Ok(())
    }

    /// Entries ordered by `(contract, selector)`.
    pub fn sorted(mut self) -> Self {
        self.0.sort_by(|a, b| a.key().cmp(&b.key()));
        self
    }

    /// Keep every existing entry, review state included, and append the
    /// entries of `current` whose `(contract, selector)` is not yet known.
    pub fn merge(mut self, current: impl IntoIterator<Item = GovernableFunction>) -> Self {
        let known: HashSet<(String, Selector)> = self
            .0
            .iter()
            .map(|f| (f.contract.clone(), f.selector))
            .collect();
        let fresh: Vec<GovernableFunction> = current
            .into_iter()
            .filter(|f| !known.contains(&(f.contract.clone(), f.selector)))
            .collect();
        self.0.extend(fresh);
        self
    }
}

impl FromIterator<GovernableFunction> for GovernableFunctions {
    fn from_iter<I: IntoIterator<Item = GovernableFunction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewed(contract: &str, signature: &str, delay: u64) -> GovernableFunction {
        GovernableFunction {
            delay,
            reviewed: true,
            ..GovernableFunction::new(contract, signature)
        }
    }

    #[test]
    fn new_entry_derives_name_and_selector() {
        let f = GovernableFunction::new("Controller", "setInflationManager(address)");
        assert_eq!(f.name, "setInflationManager");
        assert_eq!(f.selector, Selector::from_signature("setInflationManager(address)"));
        assert!(!f.reviewed);
        assert_eq!(f.delay_secs(), 0);
    }

    #[test]
    fn parses_file_format() {
        let selector = Selector::from_signature("setFee(uint256)");
        let json = format!(
            r#"[{{"contract":"Pool","name":"setFee","signature":"setFee(uint256)","selector":"{selector}","delay":3,"reviewed":true}}]"#
        );
        let functions = GovernableFunctions::from_json(&json).unwrap();
        let f = functions.iter().next().unwrap();
        assert_eq!(f.selector, selector);
        assert_eq!(f.delay_secs(), 3 * SECS_PER_DAY);
        functions.check_selectors().unwrap();
    }

    #[test]
    fn review_gate_names_unreviewed_entries() {
        let functions = GovernableFunctions::new(vec![
            reviewed("Pool", "setFee(uint256)", 1),
            GovernableFunction::new("Vault", "setStrategy(address)"),
        ]);
        match functions.ensure_reviewed() {
            Err(OpsError::UnreviewedFunctions(names)) => {
                assert_eq!(names, vec!["Vault.setStrategy(address)".to_string()])
            }
            other => panic!("expected UnreviewedFunctions, got {other:?}"),
        }

        let functions = GovernableFunctions::new(vec![reviewed("Pool", "setFee(uint256)", 1)]);
        functions.ensure_reviewed().unwrap();
    }

    #[test]
    fn selector_mismatch_is_reported() {
        let mut f = reviewed("Pool", "setFee(uint256)", 1);
        f.selector = Selector::new([0, 0, 0, 1]);
        let err = GovernableFunctions::new(vec![f]).check_selectors().unwrap_err();
        assert!(matches!(err, OpsError::SelectorMismatch { .. }));
    }

    #[test]
    fn merge_keeps_existing_review_state() {
        let existing = GovernableFunctions::new(vec![reviewed("Pool", "setFee(uint256)", 2)]);
        let merged = existing
            .merge(vec![
                GovernableFunction::new("Pool", "setFee(uint256)"),
                GovernableFunction::new("Pool", "pause()"),
            ])
            .sorted();
        assert_eq!(merged.len(), 2);
        let fee = merged
            .iter()
            .find(|f| f.signature == "setFee(uint256)")
            .unwrap();
        assert!(fee.reviewed);
        assert_eq!(fee.delay, 2);
        assert_eq!(merged.unreviewed().count(), 1);
    }

    #[test]
    fn sorted_orders_by_contract_then_selector() {
        let functions = GovernableFunctions::new(vec![
            GovernableFunction::new("Vault", "a()"),
            GovernableFunction::new("Pool", "b()"),
            GovernableFunction::new("Pool", "c()"),
        ])
        .sorted();
        let keys: Vec<_> = functions.iter().map(|f| (f.contract.clone(), f.selector)).collect();
        let mut expected = keys.clone();
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(keys[2].0, "Vault");
    }
}
