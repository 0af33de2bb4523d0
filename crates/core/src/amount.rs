//! Revenue amounts and the fixed-width earnings encoding.

use num_bigint::BigUint;

use crate::{LedgerError, Result};

/// Width of the big-endian earnings field in a leaf encoding
pub const EARNINGS_WIDTH: usize = 32;

/// Parse a decimal, non-negative integer amount.
///
/// Signs, decimal points, exponents and empty input are rejected with
/// `InvalidAmount`. Surrounding whitespace is ignored.
pub fn parse_amount(input: &str) -> Result<BigUint> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::InvalidAmount(input.to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| LedgerError::InvalidAmount(input.to_string()))
}

/// Whether `value` fits the 32-byte earnings field.
pub fn fits_encoding(value: &BigUint) -> bool {
    value.bits() <= (EARNINGS_WIDTH * 8) as u64
}

/// Encode `value` as a zero-padded 32-byte big-endian integer.
///
/// Returns `None` if the value needs more than 32 bytes.
pub fn encode_earnings(value: &BigUint) -> Option<[u8; EARNINGS_WIDTH]> {
    if !fits_encoding(value) {
        return None;
    }
    let bytes = value.to_bytes_be();
    let mut out = [0u8; EARNINGS_WIDTH];
    out[EARNINGS_WIDTH - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}
