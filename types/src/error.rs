//! Error type for parsing and decoding value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("payload too short: {0} bytes, a selector needs 4")]
    PayloadTooShort(usize),

    #[error("argument encoding error: {0}")]
    Encoding(String),
}

/// Strip an optional `0x` prefix and decode the remaining hex.
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, TypesError> {
    let trimmed = s.trim();
    let raw = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(raw)?)
}
