//! Revenue splitting arithmetic.

use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use plasmaledger_core::BigUint;

/// Outcome of one `add_revenue` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueSplit {
    /// Amount handed to `add_revenue`
    pub amount: BigUint,
    /// Amount credited to each active member
    pub share: BigUint,
    /// Number of active members credited
    pub recipients: usize,
}

impl RevenueSplit {
    /// `share * recipients`, which may differ from `amount` by rounding.
    pub fn distributed(&self) -> BigUint {
        &self.share * BigUint::from(self.recipients)
    }

    /// `distributed - amount`. Positive when the remainder rounded up.
    pub fn drift(&self) -> i128 {
        let distributed = self.distributed();
        if distributed >= self.amount {
            (distributed - &self.amount).to_i128().unwrap_or(i128::MAX)
        } else {
            -(&self.amount - distributed).to_i128().unwrap_or(i128::MAX)
        }
    }
}

/// `amount / recipients`, remainder rounded half up.
///
/// The quotient is bumped by one when `2 * remainder >= recipients`. The
/// total handed out is not conserved: it can differ from `amount` by up to
/// `recipients - 1` units either way. `None` when there are no recipients.
pub fn split_share(amount: &BigUint, recipients: usize) -> Option<BigUint> {
    if recipients == 0 {
        return None;
    }
    let divisor = BigUint::from(recipients);
    let (quotient, remainder) = amount.div_rem(&divisor);
    if !remainder.is_zero() && remainder * 2u32 >= divisor {
        Some(quotient + 1u32)
    } else {
        Some(quotient)
    }
}
