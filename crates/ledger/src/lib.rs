//! plasmaledger Ledger
//!
//! Tracks cumulative earnings per member and commits to them with a Merkle
//! root that an external settlement contract can hold.
//!
//! ## Flow
//!
//! 1. **Members**: `add_member` registers an address with zero earnings;
//!    `remove_member` freezes it (earnings kept, no new shares).
//! 2. **Revenue**: `add_revenue(amount)` splits the amount over the active
//!    members, rounding half up, then rebuilds the tree over every member
//!    with a non-zero balance.
//! 3. **Claims**: `get_member` / `get_proof` return a member's earnings with
//!    the proof path to `get_root_hash()`. Zero balances get an empty proof.

mod api;
mod ledger;
mod split;

pub use api::MemberApi;
pub use ledger::{Ledger, MemberDetail};
pub use split::{split_share, RevenueSplit};
