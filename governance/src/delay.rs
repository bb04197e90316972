//! Per-function delay table.
//!
//! Maps `(target, selector)` to a delay in seconds. A missing entry means
//! the function is undelayed. Entries are created once with
//! [`DelayTable::set`]; afterwards they can only change through
//! [`DelayTable::update`], which the timelock reaches exclusively from its
//! own execution path.

use std::collections::BTreeMap;

use govlock_types::{ContractAddress, Selector};
use serde::{Deserialize, Serialize};

use crate::error::TimelockError;

/// One `(target, selector, delay)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayEntry {
    pub target: ContractAddress,
    pub selector: Selector,
    pub delay_secs: u64,
}

#[derive(Clone, Debug, Default)]
pub struct DelayTable {
    delays: BTreeMap<(ContractAddress, Selector), u64>,
}

impl DelayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay for `(target, selector)`, 0 when unset.
    pub fn get(&self, target: &ContractAddress, selector: &Selector) -> u64 {
        self.delays.get(&(*target, *selector)).copied().unwrap_or(0)
    }

    /// Set the initial delay for a key.
    ///
    /// A zero delay leaves the key unset.
    pub fn set(&mut self, target: ContractAddress, selector: Selector, delay_secs: u64) -> Result<(), TimelockError> {
        if self.get(&target, &selector) != 0 {
            return Err(TimelockError::DelayAlreadySet);
        }
        if delay_secs != 0 {
            self.delays.insert((target, selector), delay_secs);
        }
        Ok(())
    }

    /// Fails if [`DelayTable::update`] would be rejected.
    pub fn check_update(&self, target: &ContractAddress, selector: &Selector) -> Result<(), TimelockError> {
        if self.get(target, selector) == 0 {
            return Err(TimelockError::DelayNotSet);
        }
        Ok(())
    }

    /// Change an existing delay. Updating to 0 removes the entry.
    pub fn update(&mut self, target: ContractAddress, selector: Selector, delay_secs: u64) -> Result<(), TimelockError> {
        self.check_update(&target, &selector)?;
        if delay_secs == 0 {
            self.delays.remove(&(target, selector));
        } else {
            self.delays.insert((target, selector), delay_secs);
        }
        Ok(())
    }

    /// All configured delays, ordered by `(target, selector)`.
    pub fn entries(&self) -> impl Iterator<Item = DelayEntry> + '_ {
        self.delays.iter().map(|(&(target, selector), &delay_secs)| DelayEntry {
            target,
            selector,
            delay_secs,
        })
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

impl FromIterator<DelayEntry> for DelayTable {
    fn from_iter<I: IntoIterator<Item = DelayEntry>>(iter: I) -> Self {
        let delays = iter
            .into_iter()
            .filter(|e| e.delay_secs != 0)
            .map(|e| ((e.target, e.selector), e.delay_secs))
            .collect();
        Self { delays }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    fn key() -> (ContractAddress, Selector) {
        (
            ContractAddress::repeat(1),
            Selector::from_signature("updateValue(uint256)"),
        )
    }

    #[test]
    fn unset_delay_is_zero() {
        let table = DelayTable::new();
        let (target, selector) = key();
        assert_eq!(table.get(&target, &selector), 0);
    }

    #[test]
    fn set_only_once() {
        let mut table = DelayTable::new();
        let (target, selector) = key();
        table.set(target, selector, 3 * DAY).unwrap();
        assert_eq!(table.get(&target, &selector), 3 * DAY);
        let err = table.set(target, selector, 4 * DAY).unwrap_err();
        assert!(matches!(err, TimelockError::DelayAlreadySet));
        assert_eq!(table.get(&target, &selector), 3 * DAY);
    }

    #[test]
    fn setting_zero_leaves_key_unset() {
        let mut table = DelayTable::new();
        let (target, selector) = key();
        table.set(target, selector, 0).unwrap();
        assert!(table.is_empty());
        table.set(target, selector, DAY).unwrap();
        assert_eq!(table.get(&target, &selector), DAY);
    }

    #[test]
    fn update_requires_existing_delay() {
        let mut table = DelayTable::new();
        let (target, selector) = key();
        let err = table.update(target, selector, DAY).unwrap_err();
        assert!(matches!(err, TimelockError::DelayNotSet));
        table.set(target, selector, DAY).unwrap();
        table.update(target, selector, 2 * DAY).unwrap();
        assert_eq!(table.get(&target, &selector), 2 * DAY);
    }

    #[test]
    fn update_to_zero_removes_entry() {
        let mut table = DelayTable::new();
        let (target, selector) = key();
        table.set(target, selector, DAY).unwrap();
        table.update(target, selector, 0).unwrap();
        assert_eq!(table.get(&target, &selector), 0);
        assert!(matches!(
            table.check_update(&target, &selector),
            Err(TimelockError::DelayNotSet)
        ));
    }

    #[test]
    fn entries_are_ordered() {
        let mut table = DelayTable::new();
        let selector = Selector::from_signature("f()");
        table.set(ContractAddress::repeat(9), selector, 9).unwrap();
        table.set(ContractAddress::repeat(2), selector, 2).unwrap();
        let targets: Vec<_> = table.entries().map(|e| e.target).collect();
        assert_eq!(targets, vec![ContractAddress::repeat(2), ContractAddress::repeat(9)]);
        let rebuilt: DelayTable = table.entries().collect();
        assert_eq!(rebuilt.len(), 2);
    }
}
