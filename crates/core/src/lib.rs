//! plasmaledger core types
//!
//! Member addresses, member records, amount handling and the error type
//! shared by every plasmaledger crate.

mod address;
mod amount;
mod error;
mod member;

pub use address::*;
pub use amount::*;
pub use error::*;
pub use member::*;

pub use num_bigint::BigUint;
