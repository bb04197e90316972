//! Opaque call payloads.
//!
//! The timelock treats a payload as uninterpreted bytes. By convention the
//! first 4 bytes are the target function's [`Selector`] and the remainder
//! is the bincode encoding of the call arguments.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{decode_hex, TypesError};
use crate::selector::Selector;

/// Encoded call data: selector followed by arguments.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CallPayload(Vec<u8>);

impl CallPayload {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Encode a call to `selector` with the given arguments.
    pub fn encode<A: Serialize + ?Sized>(selector: Selector, args: &A) -> Result<Self, TypesError> {
        let encoded = bincode::serialize(args).map_err(|e| TypesError::Encoding(e.to_string()))?;
        let mut bytes = Vec::with_capacity(Selector::LEN + encoded.len());
        bytes.extend_from_slice(selector.as_bytes());
        bytes.extend_from_slice(&encoded);
        Ok(Self(bytes))
    }

    /// The selector used for delay lookups.
    ///
    /// Payloads shorter than 4 bytes are zero-padded.
    pub fn selector(&self) -> Selector {
        let mut bytes = [0u8; 4];
        let n = self.0.len().min(Selector::LEN);
        bytes[..n].copy_from_slice(&self.0[..n]);
        Selector::new(bytes)
    }

    /// The argument bytes following the selector.
    pub fn args(&self) -> &[u8] {
        self.0.get(Selector::LEN..).unwrap_or(&[])
    }

    /// Decode the argument tail as `T`.
    pub fn decode_args<T: DeserializeOwned>(&self) -> Result<T, TypesError> {
        if self.0.len() < Selector::LEN {
            return Err(TypesError::PayloadTooShort(self.0.len()));
        }
        bincode::deserialize(self.args()).map_err(|e| TypesError::Encoding(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CallPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallPayload({} bytes, {})", self.0.len(), self.selector())
    }
}

impl fmt::Display for CallPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for CallPayload {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_hex(s)?))
    }
}

impl From<Vec<u8>> for CallPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_prefixes_selector() {
        let sel = Selector::from_signature("updateValue(uint256)");
        let payload = CallPayload::encode(sel, &7u64).unwrap();
        assert_eq!(payload.selector(), sel);
        assert_eq!(&payload.as_bytes()[..4], sel.as_bytes());
        assert_eq!(payload.decode_args::<u64>().unwrap(), 7);
    }

    #[test]
    fn short_payload_selector_is_padded() {
        let payload = CallPayload::from_bytes(vec![0xab, 0xcd]);
        assert_eq!(payload.selector(), Selector::new([0xab, 0xcd, 0, 0]));
        assert!(payload.args().is_empty());
        assert!(matches!(
            payload.decode_args::<u64>(),
            Err(TypesError::PayloadTooShort(2))
        ));
    }

    #[test]
    fn different_args_give_different_payloads() {
        let sel = Selector::from_signature("updateValue(uint256)");
        let one = CallPayload::encode(sel, &1u64).unwrap();
        let two = CallPayload::encode(sel, &2u64).unwrap();
        assert_ne!(one, two);
        assert_eq!(one.selector(), two.selector());
    }
}
