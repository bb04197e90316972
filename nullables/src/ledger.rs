//! Nullable ledger — in-memory contracts the timelock can call.
//!
//! Simulation runs the call against a fork of the target contract and
//! throws the fork away, so it never changes ledger state.

use std::any::Any;
use std::collections::HashMap;

use govlock_governance::{CallTarget, InvokeError};
use govlock_types::{CallPayload, ContractAddress, Selector};

/// A contract deployed on a [`NullLedger`].
pub trait NullContract {
    fn call(&mut self, payload: &CallPayload) -> Result<Vec<u8>, InvokeError>;

    /// A copy of this contract's state, used for simulation.
    fn fork(&self) -> Box<dyn NullContract>;

    fn as_any(&self) -> &dyn Any;
}

/// An in-memory set of contracts keyed by address.
#[derive(Default)]
pub struct NullLedger {
    contracts: HashMap<ContractAddress, Box<dyn NullContract>>,
    invocations: Vec<(ContractAddress, CallPayload)>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy(&mut self, address: ContractAddress, contract: impl NullContract + 'static) {
        self.contracts.insert(address, Box::new(contract));
    }

    /// Borrow a deployed contract as its concrete type.
    pub fn contract<C: 'static>(&self, address: &ContractAddress) -> Option<&C> {
        self.contracts
            .get(address)
            .and_then(|c| c.as_any().downcast_ref::<C>())
    }

    /// Every committed invocation, in order.
    pub fn invocations(&self) -> &[(ContractAddress, CallPayload)] {
        &self.invocations
    }
}

impl CallTarget for NullLedger {
    fn invoke(&mut self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        let contract = self.contracts.get_mut(target).ok_or(InvokeError::NoCode)?;
        let output = contract.call(payload)?;
        self.invocations.push((*target, payload.clone()));
        Ok(output)
    }

    fn simulate(&self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        let contract = self.contracts.get(target).ok_or(InvokeError::NoCode)?;
        contract.fork().call(payload)
    }
}

/// A contract holding one number.
///
/// - `updateValue(uint256)` stores its argument.
/// - `justRevert(uint256)` always reverts with `"I just revert"`.
/// - `value()` returns the stored number.
#[derive(Clone, Debug, Default)]
pub struct ValueContract {
    value: u64,
}

impl ValueContract {
    pub const UPDATE_VALUE: &'static str = "updateValue(uint256)";
    pub const JUST_REVERT: &'static str = "justRevert(uint256)";
    pub const VALUE: &'static str = "value()";
    pub const REVERT_REASON: &'static str = "I just revert";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn update_value_selector() -> Selector {
        Selector::from_signature(Self::UPDATE_VALUE)
    }

    pub fn update_value_payload(value: u64) -> CallPayload {
        encode(Self::UPDATE_VALUE, &value)
    }

    pub fn just_revert_payload(value: u64) -> CallPayload {
        encode(Self::JUST_REVERT, &value)
    }
}

impl NullContract for ValueContract {
    fn call(&mut self, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        let selector = payload.selector();
        if selector == Selector::from_signature(Self::UPDATE_VALUE) {
            self.value = payload
                .decode_args()
                .map_err(|e| InvokeError::Reverted(e.to_string()))?;
            Ok(Vec::new())
        } else if selector == Selector::from_signature(Self::JUST_REVERT) {
            Err(InvokeError::Reverted(Self::REVERT_REASON.to_string()))
        } else if selector == Selector::from_signature(Self::VALUE) {
            Ok(self.value.to_be_bytes().to_vec())
        } else {
            Err(InvokeError::UnknownFunction)
        }
    }

    fn fork(&self) -> Box<dyn NullContract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn encode(signature: &str, value: &u64) -> CallPayload {
    CallPayload::encode(Selector::from_signature(signature), value).expect("u64 arguments always encode")
}
