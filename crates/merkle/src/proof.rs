//! Proof paths.
//!
//! A proof is the list of sibling hashes from leaf to root. Each step says
//! which side the sibling sits on, so a verifier needs no knowledge of leaf
//! indices or tree size. Layers where the node was carried up contribute no
//! step.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::{hash_from_hex, hash_pair, hash_to_hex, Hash};

/// Position of a sibling relative to the node being proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One sibling on the path to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub side: Side,
    #[serde(serialize_with = "serialize_hash", deserialize_with = "deserialize_hash")]
    pub hash: Hash,
}

/// Inclusion proof for one leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    pub steps: Vec<ProofStep>,
}

impl MerkleProof {
    /// The proof for a zero balance, which needs no backing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the steps over `leaf` and return the implied root.
    pub fn compute_root(&self, leaf: &Hash) -> Hash {
        self.steps.iter().fold(*leaf, |acc, step| match step.side {
            Side::Left => hash_pair(&step.hash, &acc),
            Side::Right => hash_pair(&acc, &step.hash),
        })
    }
}

fn serialize_hash<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hash_to_hex(hash))
}

fn deserialize_hash<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
    let s = String::deserialize(deserializer)?;
    hash_from_hex(&s).ok_or_else(|| de::Error::custom(format!("invalid 32-byte hash: {}", s)))
}
