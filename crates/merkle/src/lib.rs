//! plasmaledger Merkle accumulator
//!
//! Binary SHA-256 Merkle tree over member records, with side-tagged
//! inclusion proofs.
//!
//! The ledger rebuilds a `MerkleTree` whenever earnings change and publishes
//! its root. A settlement contract holding only that root can check a
//! member's `(address, earnings)` claim with `MerkleTree::verify`, or the
//! equivalent fold over `MerkleProof::steps`:
//!
//! ```text
//! acc = SHA256(address || earnings_be32)
//! for step in proof:
//!     acc = step.side == left ? SHA256(step.hash || acc) : SHA256(acc || step.hash)
//! acc == root
//! ```

mod hash;
mod proof;
mod tree;

pub use hash::{hash_bytes, hash_from_hex, hash_pair, hash_to_hex, merkle_leaf, Hash, EMPTY_ROOT};
pub use proof::{MerkleProof, ProofStep, Side};
pub use tree::MerkleTree;
