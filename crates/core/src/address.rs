//! Canonical member addresses.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{LedgerError, Result};

/// Length of an address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte member address.
///
/// Parsing accepts 40 hex digits in any letter case, with or without the
/// `0x` prefix. The canonical rendering is `0x` followed by 40 lowercase hex
/// digits. Ordering compares the raw bytes, which is the same order as the
/// canonical strings.
///
/// Only the shape is checked here. Chain-specific checksum rules are left to
/// whoever hands addresses to the ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Parse and normalize an address string.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(LedgerError::AddressFormat(input.to_string()));
        }

        let decoded =
            hex::decode(digits).map_err(|_| LedgerError::AddressFormat(input.to_string()))?;
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

    #[test]
    fn test_parse_without_prefix() {
        let addr = Address::parse(PLAIN).unwrap();
        assert_eq!(addr.to_string(), format!("0x{}", PLAIN));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let upper = format!("0X{}", PLAIN.to_uppercase());
        let addr = Address::parse(&upper).unwrap();
        assert_eq!(addr.to_string(), format!("0x{}", PLAIN));
        assert_eq!(addr, Address::parse(PLAIN).unwrap());
    }

    #[test]
    fn test_parse_rejects_short() {
        assert!(matches!(
            Address::parse("short"),
            Err(LedgerError::AddressFormat(s)) if s == "short"
        ));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let bad = format!("0x{}zz", &PLAIN[..38]);
        assert!(matches!(Address::parse(&bad), Err(LedgerError::AddressFormat(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_length_with_prefix() {
        let long = format!("0x{}00", PLAIN);
        assert!(Address::parse(&long).is_err());
        assert!(Address::parse("0x").is_err());
    }

    #[test]
    fn test_ordering_matches_canonical_strings() {
        let a = Address::parse("0x0000000000000000000000000000000000000001").unwrap();
        let b = Address::parse("0x00000000000000000000000000000000000000ff").unwrap();
        let c = Address::parse("0x1000000000000000000000000000000000000000").unwrap();
        assert!(a < b && b < c);
        assert!(a.to_string() < b.to_string() && b.to_string() < c.to_string());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let addr = Address::parse(PLAIN).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", PLAIN));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        assert!(serde_json::from_str::<Address>("\"0x12\"").is_err());
    }
}
