//! Selector to signature lookup.
//!
//! File format: a JSON object keyed by `0x`-prefixed selector hex, e.g.
//! `{"0x1a2b3c4d": "setFee(uint256)"}`.

use std::collections::BTreeMap;
use std::path::Path;

use govlock_governance::calls::ALL_SIGNATURES;
use govlock_types::Selector;

use crate::{GovernableFunctions, OpsError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureBook {
    signatures: BTreeMap<Selector, String>,
}

impl SignatureBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book that knows the timelock's own entry points.
    pub fn with_timelock_signatures() -> Self {
        ALL_SIGNATURES.iter().copied().collect()
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
        let raw: BTreeMap<String, String> = serde_json::from_str(s)?;
        let mut signatures = BTreeMap::new();
        for (selector, signature) in raw {
            signatures.insert(selector.parse::<Selector>()?, signature);
        }
        Ok(Self { signatures })
    }

    pub fn to_json(&self) -> Result<String, OpsError> {
        let raw: BTreeMap<String, &str> = self
            .signatures
            .iter()
            .map(|(selector, signature)| (selector.to_string(), signature.as_str()))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Record a signature and return its selector.
    pub fn insert(&mut self, signature: impl Into<String>) -> Selector {
        let signature = signature.into();
        let selector = Selector::from_signature(&signature);
        self.signatures.insert(selector, signature);
        selector
    }

    /// Take every entry of `other`, replacing signatures already known.
    pub fn merge(&mut self, other: SignatureBook) {
        self.signatures.extend(other.signatures);
    }

    /// Add every signature of the governable functions file.
    pub fn extend_from_functions(&mut self, functions: &GovernableFunctions) {
        for function in functions.iter() {
            self.signatures
                .insert(function.selector, function.signature.clone());
        }
    }

    pub fn lookup(&self, selector: &Selector) -> Option<&str> {
        self.signatures.get(selector).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SignatureBook {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut book = Self::new();
        for signature in iter {
            book.insert(signature);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govlock_governance::calls::UPDATE_DELAY;

    #[test]
    fn knows_timelock_entry_points() {
        let book = SignatureBook::with_timelock_signatures();
        assert_eq!(book.len(), ALL_SIGNATURES.len());
        assert_eq!(
            book.lookup(&Selector::from_signature(UPDATE_DELAY)),
            Some(UPDATE_DELAY)
        );
    }

    #[test]
    fn json_keys_are_selector_hex() {
        let mut book = SignatureBook::new();
        let selector = book.insert("pause()");
        let json = book.to_json().unwrap();
        assert!(json.contains(&selector.to_string()));
        assert_eq!(SignatureBook::from_json(&json).unwrap(), book);
    }

    #[test]
    fn unknown_selector_is_none() {
        let book = SignatureBook::new();
        assert!(book.lookup(&Selector::new([1, 2, 3, 4])).is_none());
    }
}
