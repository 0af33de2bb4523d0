//! Binary Merkle tree over member records.
//!
//! Leaves are ordered by canonical address. Adjacent nodes are paired left
//! to right; the last node of an odd layer is carried up unchanged rather
//! than duplicated or padded, so proofs for edge leaves simply skip that
//! layer.

use plasmaledger_core::{Address, MemberRecord};
use tracing::trace;

use crate::hash::{hash_pair, merkle_leaf, Hash, EMPTY_ROOT};
use crate::proof::{MerkleProof, ProofStep, Side};

/// Immutable Merkle tree built from one member snapshot.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// Leaf addresses in canonical order, parallel to `layers[0]`
    addresses: Vec<Address>,
    /// `layers[0]` = leaf hashes, last layer = `[root]` (or empty)
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// An empty tree. Its root is `EMPTY_ROOT`.
    pub fn new() -> Self {
        Self {
            addresses: Vec::new(),
            layers: vec![Vec::new()],
        }
    }

    /// Build a tree from member records, active or not.
    ///
    /// Records are sorted by address here, so the caller's iteration order
    /// never affects the root. Addresses are expected to be unique.
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a MemberRecord>,
    {
        let mut entries: Vec<(Address, Hash)> = members
            .into_iter()
            .map(|m| (*m.address(), merkle_leaf(m)))
            .collect();
        entries.sort_by_key(|(address, _)| *address);

        let (addresses, leaves): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let layers = build_layers(leaves);
        trace!("Built Merkle tree: {} leaves, {} layers", addresses.len(), layers.len());

        Self { addresses, layers }
    }

    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(EMPTY_ROOT)
    }

    /// Root as `0x`-prefixed hex.
    pub fn root_hex(&self) -> String {
        crate::hash_to_hex(&self.root())
    }

    pub fn leaf_count(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn leaf(&self, index: usize) -> Option<Hash> {
        self.layers.first()?.get(index).copied()
    }

    pub fn leaf_index(&self, address: &Address) -> Option<usize> {
        self.addresses.binary_search(address).ok()
    }

    /// Proof for the leaf at `index`. `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut steps = Vec::new();
        let mut position = index;
        // Every layer except the root contributes at most one sibling
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = layer.get(sibling) {
                let side = if position % 2 == 0 { Side::Right } else { Side::Left };
                steps.push(ProofStep { side, hash: *hash });
            }
            position /= 2;
        }

        Some(MerkleProof { steps })
    }

    /// Proof for the leaf belonging to `address`. `None` if it is not in
    /// this snapshot.
    pub fn proof_for(&self, address: &Address) -> Option<MerkleProof> {
        self.proof(self.leaf_index(address)?)
    }

    /// Check that `leaf` combined with `proof` reproduces `root`.
    pub fn verify(root: &Hash, leaf: &Hash, proof: &MerkleProof) -> bool {
        proof.compute_root(leaf) == *root
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

fn build_layers(leaves: Vec<Hash>) -> Vec<Vec<Hash>> {
    let mut layers = vec![leaves];
    loop {
        let next: Vec<Hash> = match layers.last() {
            Some(layer) if layer.len() > 1 => layer
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    // odd tail: carried up as-is
                    _ => pair[0],
                })
                .collect(),
            _ => break,
        };
        layers.push(next);
    }
    layers
}
