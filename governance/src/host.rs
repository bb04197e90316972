//! Collaborator traits supplied by the host environment.
//!
//! The timelock never authenticates callers, reads wall-clock time or
//! executes foreign code itself. The host provides each of these behind a
//! trait so tests can swap in the deterministic implementations from
//! `govlock-nullables`.

use govlock_types::{CallPayload, ContractAddress, Timestamp};
use thiserror::Error;

/// Why an invocation of a target failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// Nothing executable lives at the target address.
    #[error("invalid contract")]
    NoCode,

    /// The target does not recognise the selector.
    #[error("low-level call failed")]
    UnknownFunction,

    /// The target's own logic rejected the call.
    #[error("{0}")]
    Reverted(String),
}

/// Single-principal ownership check.
pub trait Authority {
    fn is_owner(&self, caller: &ContractAddress) -> bool;
}

/// Externally advanced clock.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Executes payloads against target contracts.
pub trait CallTarget {
    /// Run the call and persist its effects.
    fn invoke(&mut self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError>;

    /// Run the call against current state and discard its effects.
    fn simulate(&self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError>;
}

impl<A: Authority + ?Sized> Authority for &A {
    fn is_owner(&self, caller: &ContractAddress) -> bool {
        (**self).is_owner(caller)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: CallTarget + ?Sized> CallTarget for &mut T {
    fn invoke(&mut self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        (**self).invoke(target, payload)
    }

    fn simulate(&self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        (**self).simulate(target, payload)
    }
}

/// A single fixed owner address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleOwner(pub ContractAddress);

impl Authority for SingleOwner {
    fn is_owner(&self, caller: &ContractAddress) -> bool {
        *caller == self.0
    }
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A fixed point in time, for read-only inspection of persisted state.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A host with no deployed contracts: every foreign call fails with
/// [`InvokeError::NoCode`]. Calls targeting the timelock itself still work.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTargets;

impl CallTarget for NoTargets {
    fn invoke(&mut self, _target: &ContractAddress, _payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        Err(InvokeError::NoCode)
    }

    fn simulate(&self, _target: &ContractAddress, _payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        Err(InvokeError::NoCode)
    }
}
