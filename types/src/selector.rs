//! Function selectors.
//!
//! A selector is the 4-byte identifier that prefixes every encoded call.
//! It is derived from the canonical function signature text, e.g.
//! `updateDelay(address,bytes4,uint64)`, as the first 4 bytes of its
//! Blake2b-256 digest.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{decode_hex, TypesError};

type Blake2b256 = Blake2b<U32>;

/// A 4-byte function selector.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const LEN: usize = 4;

    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Derive the selector of a canonical function signature.
    pub fn from_signature(signature: &str) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(signature.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&digest[..4]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Selector {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let array: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidLength {
                expected: Self::LEN,
                got: bytes.len(),
            })?;
        Ok(Self(array))
    }
}
