use plasmaledger_core::MemberRecord;
use sha2::{Digest, Sha256};

/// 32-byte SHA-256 digest
pub type Hash = [u8; 32];

/// Root of a tree with no leaves
pub const EMPTY_ROOT: Hash = [0u8; 32];

pub fn hash_bytes(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// `SHA256(left || right)`
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// `SHA256(address || earnings_be32)`, see `MemberRecord::encode_for_hashing`.
pub fn merkle_leaf(member: &MemberRecord) -> Hash {
    hash_bytes(&member.encode_for_hashing())
}

/// `0x`-prefixed lowercase hex.
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a 32-byte hash, with or without the `0x` prefix.
pub fn hash_from_hex(s: &str) -> Option<Hash> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}
