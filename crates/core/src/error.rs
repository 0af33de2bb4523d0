use num_bigint::BigUint;
use thiserror::Error;

use crate::Address;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Bad address: {0}")]
    AddressFormat(String),

    #[error("Member already exists: {0}")]
    DuplicateMember(Address),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("No active members, revenue of {0} not distributed")]
    NoActiveMembers(BigUint),

    #[error("Earnings of {0} would not fit in 256 bits")]
    EarningsOverflow(Address),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
