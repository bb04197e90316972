//! Caller provenance.
//!
//! Every entry point of the timelock receives an [`Origin`] saying who is
//! calling. Outside this crate only external origins can be built, so the
//! self-dispatched origin can only come from the timelock's own execution
//! path.

use govlock_types::ContractAddress;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Provenance {
    External(ContractAddress),
    Timelock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Origin(Provenance);

impl Origin {
    /// A call made by an outside principal.
    pub fn external(caller: ContractAddress) -> Self {
        Self(Provenance::External(caller))
    }

    pub(crate) fn timelock() -> Self {
        Self(Provenance::Timelock)
    }

    pub fn is_self_dispatched(&self) -> bool {
        matches!(self.0, Provenance::Timelock)
    }

    /// The external caller, `None` for self-dispatched calls.
    pub fn caller(&self) -> Option<ContractAddress> {
        match self.0 {
            Provenance::External(addr) => Some(addr),
            Provenance::Timelock => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Provenance::External(addr) => write!(f, "{addr}"),
            Provenance::Timelock => write!(f, "timelock"),
        }
    }
}
