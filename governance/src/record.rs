//! Call records — one governed call and its immutable identity.

use govlock_types::{CallPayload, ContractAddress, Selector, Timestamp};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a call when it is prepared. Never reused.
pub type CallId = u64;

/// Which registry bucket a call currently lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallStatus {
    Pending,
    Executed,
    Cancelled,
}

/// A prepared administrative call.
///
/// Every field is fixed at preparation time. Only the bucket holding the
/// record changes over its lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    id: CallId,
    created_at: Timestamp,
    target: ContractAddress,
    function_signature: String,
    selector: Selector,
    payload: CallPayload,
}

impl CallRecord {
    pub fn new(id: CallId, created_at: Timestamp, target: ContractAddress, payload: CallPayload) -> Self {
        let selector = payload.selector();
        Self {
            id,
            created_at,
            target,
            function_signature: selector.to_string(),
            selector,
            payload,
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn target(&self) -> ContractAddress {
        self.target
    }

    /// Hex form of the selector, kept for human inspection.
    pub fn function_signature(&self) -> &str {
        &self.function_signature
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn payload(&self) -> &CallPayload {
        &self.payload
    }

    /// Whether the stored selector and signature agree with the payload.
    pub fn is_consistent(&self) -> bool {
        let selector = self.payload.selector();
        self.selector == selector && self.function_signature == selector.to_string()
    }

    /// Whether this record calls `target` with byte-identical `payload`.
    pub fn matches(&self, target: &ContractAddress, payload: &CallPayload) -> bool {
        self.target == *target && self.payload == *payload
    }

    /// `(id, created_at, target, function_signature, payload)` for external tooling.
    pub fn as_tuple(&self) -> (CallId, Timestamp, ContractAddress, &str, &CallPayload) {
        (
            self.id,
            self.created_at,
            self.target,
            &self.function_signature,
            &self.payload,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_and_signature_come_from_payload() {
        let sel = Selector::from_signature("updateValue(uint256)");
        let payload = CallPayload::encode(sel, &1u64).unwrap();
        let record = CallRecord::new(3, Timestamp::new(100), ContractAddress::repeat(7), payload.clone());
        assert_eq!(record.selector(), sel);
        assert_eq!(record.function_signature(), sel.to_string());
        let (id, created_at, target, signature, data) = record.as_tuple();
        assert_eq!(id, 3);
        assert_eq!(created_at, Timestamp::new(100));
        assert_eq!(target, ContractAddress::repeat(7));
        assert_eq!(signature, sel.to_string());
        assert_eq!(data, &payload);
        assert!(record.is_consistent());
    }

    #[test]
    fn edited_selector_is_inconsistent() {
        let payload = CallPayload::encode(Selector::from_signature("updateValue(uint256)"), &1u64).unwrap();
        let record = CallRecord::new(0, Timestamp::EPOCH, ContractAddress::repeat(7), payload);
        let mut json: serde_json::Value = serde_json::to_value(&record).unwrap();
        json["selector"] = serde_json::to_value(Selector::new([1, 2, 3, 4])).unwrap();
        let edited: CallRecord = serde_json::from_value(json.clone()).unwrap();
        assert!(!edited.is_consistent());

        json["selector"] = serde_json::to_value(record.selector()).unwrap();
        json["function_signature"] = serde_json::Value::String("transferOwnership(address)".into());
        let edited: CallRecord = serde_json::from_value(json).unwrap();
        assert!(!edited.is_consistent());
    }

    #[test]
    fn matches_requires_identical_bytes() {
        let sel = Selector::from_signature("updateValue(uint256)");
        let one = CallPayload::encode(sel, &1u64).unwrap();
        let two = CallPayload::encode(sel, &2u64).unwrap();
        let target = ContractAddress::repeat(7);
        let record = CallRecord::new(0, Timestamp::EPOCH, target, one.clone());
        assert!(record.matches(&target, &one));
        assert!(!record.matches(&target, &two));
        assert!(!record.matches(&ContractAddress::repeat(8), &one));
    }
}
