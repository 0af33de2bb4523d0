//! Member records and their display form.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::{encode_earnings, fits_encoding, Address, LedgerError, Result, ADDRESS_LEN, EARNINGS_WIDTH};

/// Length of `MemberRecord::encode_for_hashing` output: address || earnings
pub const LEAF_DATA_LEN: usize = ADDRESS_LEN + EARNINGS_WIDTH;

/// Accounting record for one member.
///
/// `earnings` only ever grows and always fits the 32-byte leaf field, so
/// `encode_for_hashing` cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    address: Address,
    name: Option<String>,
    earnings: BigUint,
    active: bool,
}

impl MemberRecord {
    /// Create an active member with zero earnings.
    pub fn new(address: &str, name: Option<&str>) -> Result<Self> {
        Self::with_earnings(address, name, BigUint::zero())
    }

    /// Create an active member with a starting balance.
    pub fn with_earnings(address: &str, name: Option<&str>, earnings: BigUint) -> Result<Self> {
        let address = Address::parse(address)?;
        if !fits_encoding(&earnings) {
            return Err(LedgerError::EarningsOverflow(address));
        }
        Ok(Self {
            address,
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            earnings,
            active: true,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn earnings(&self) -> &BigUint {
        &self.earnings
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `false` freezes the member: earnings are kept, no new shares.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether adding `amount` keeps earnings inside the leaf encoding.
    pub fn can_receive(&self, amount: &BigUint) -> bool {
        fits_encoding(&(&self.earnings + amount))
    }

    /// Credit `amount` to this member. Nothing changes on error.
    pub fn add_revenue(&mut self, amount: &BigUint) -> Result<()> {
        if !self.can_receive(amount) {
            return Err(LedgerError::EarningsOverflow(self.address));
        }
        self.earnings += amount;
        Ok(())
    }

    /// Fixed-width leaf data: 20 address bytes, then earnings as a 32-byte
    /// big-endian integer.
    pub fn encode_for_hashing(&self) -> [u8; LEAF_DATA_LEN] {
        let mut out = [0u8; LEAF_DATA_LEN];
        out[..ADDRESS_LEN].copy_from_slice(self.address.as_bytes());
        if let Some(earnings) = encode_earnings(&self.earnings) {
            out[ADDRESS_LEN..].copy_from_slice(&earnings);
        }
        out
    }

    /// Earnings as `f64`, for display only.
    ///
    /// Lossy: values above 2^53 are rounded to the nearest representable
    /// float. Never feed the result back into accounting.
    pub fn earnings_lossy_f64(&self) -> f64 {
        self.earnings.to_f64().unwrap_or(f64::INFINITY)
    }

    pub fn to_display(&self) -> MemberView {
        MemberView {
            address: self.address.to_string(),
            name: self.name.clone(),
            earnings: self.earnings.to_string(),
        }
    }
}

/// Public view of a member. Earnings are a decimal string so no precision is
/// lost in transit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub earnings: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x00000000000000000000000000000000000000a1";

    #[test]
    fn test_new_member_defaults() {
        let m = MemberRecord::new(ALICE, Some("Alice")).unwrap();
        assert_eq!(m.address().to_string(), ALICE);
        assert_eq!(m.name(), Some("Alice"));
        assert!(m.earnings().is_zero());
        assert!(m.is_active());
    }

    #[test]
    fn test_empty_name_is_absent() {
        let m = MemberRecord::new(ALICE, Some("")).unwrap();
        assert_eq!(m.name(), None);
        let json = serde_json::to_value(m.to_display()).unwrap();
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_bad_address_rejected() {
        assert!(matches!(
            MemberRecord::new("nope", None),
            Err(LedgerError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_add_revenue_accumulates() {
        let mut m = MemberRecord::new(ALICE, None).unwrap();
        m.add_revenue(&BigUint::from(30u32)).unwrap();
        m.add_revenue(&BigUint::from(12u32)).unwrap();
        assert_eq!(m.earnings(), &BigUint::from(42u32));
    }

    #[test]
    fn test_set_active_keeps_earnings() {
        let mut m = MemberRecord::with_earnings(ALICE, None, BigUint::from(7u32)).unwrap();
        m.set_active(false);
        assert!(!m.is_active());
        assert_eq!(m.earnings(), &BigUint::from(7u32));
        m.set_active(true);
        assert!(m.is_active());
    }

    #[test]
    fn test_add_revenue_overflow_leaves_record_untouched() {
        let max = (BigUint::from(1u32) << 256usize) - BigUint::from(1u32);
        let mut m = MemberRecord::with_earnings(ALICE, None, max.clone()).unwrap();
        let before = m.clone();
        assert!(matches!(
            m.add_revenue(&BigUint::from(1u32)),
            Err(LedgerError::EarningsOverflow(_))
        ));
        assert_eq!(m, before);
        assert_eq!(m.earnings(), &max);
    }

    #[test]
    fn test_with_earnings_rejects_oversized_balance() {
        let too_big = BigUint::from(1u32) << 256usize;
        assert!(matches!(
            MemberRecord::with_earnings(ALICE, None, too_big),
            Err(LedgerError::EarningsOverflow(_))
        ));
    }

    #[test]
    fn test_encode_for_hashing_layout() {
        let m = MemberRecord::with_earnings(ALICE, Some("ignored"), BigUint::from(258u32)).unwrap();
        let data = m.encode_for_hashing();
        assert_eq!(data.len(), 52);
        assert_eq!(&data[..20], m.address().as_bytes());
        assert_eq!(&data[20..50], &[0u8; 30]);
        assert_eq!(data[50], 1);
        assert_eq!(data[51], 2);
    }

    #[test]
    fn test_encode_ignores_name_and_active_flag() {
        let a = MemberRecord::with_earnings(ALICE, Some("A"), BigUint::from(5u32)).unwrap();
        let mut b = MemberRecord::with_earnings(ALICE, Some("B"), BigUint::from(5u32)).unwrap();
        b.set_active(false);
        assert_eq!(a.encode_for_hashing(), b.encode_for_hashing());
    }

    #[test]
    fn test_display_keeps_full_precision() {
        let big = BigUint::parse_bytes(b"98765432109876543210987654321", 10).unwrap();
        let m = MemberRecord::with_earnings(ALICE, None, big).unwrap();
        let view = m.to_display();
        assert_eq!(view.earnings, "98765432109876543210987654321");
        assert_eq!(view.address, ALICE);
        assert!(m.earnings_lossy_f64() > 9.8e28);
    }
}
