//! The earnings ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use plasmaledger_core::{Address, BigUint, LedgerError, MemberRecord, MemberView, Result};
use plasmaledger_merkle::{Hash, MerkleProof, MerkleTree};

use crate::api::MemberApi;
use crate::split::{split_share, RevenueSplit};

/// A member together with the proof backing its earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetail {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub earnings: String,
    /// Empty when earnings are zero
    pub proof: MerkleProof,
}

/// Off-chain earnings ledger.
///
/// Members are kept sorted by address. The Merkle tree covers every member
/// with non-zero earnings, active or not. It is rebuilt after every earnings
/// change and published by replacing the `Arc`, so a snapshot handed out
/// earlier is never modified.
///
/// Zero balances get no leaf, so the root depends only on the balances and
/// not on when a member joined relative to the last rebuild.
///
/// Mutations take `&mut self`; the caller serializes writers.
#[derive(Debug, Clone)]
pub struct Ledger {
    members: BTreeMap<Address, MemberRecord>,
    tree: Arc<MerkleTree>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            tree: Arc::new(MerkleTree::new()),
        }
    }

    /// Create a ledger from a genesis snapshot and build its tree.
    ///
    /// Fails with `DuplicateMember` if two records share an address.
    pub fn with_members<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = MemberRecord>,
    {
        let mut members = BTreeMap::new();
        for record in records {
            let address = *record.address();
            if members.insert(address, record).is_some() {
                return Err(LedgerError::DuplicateMember(address));
            }
        }

        let mut ledger = Self {
            members,
            tree: Arc::new(MerkleTree::new()),
        };
        ledger.rebuild();
        info!(
            "Ledger created with {} members, root {}",
            ledger.members.len(),
            ledger.get_root_hash()
        );
        Ok(ledger)
    }

    // =========================================================================
    // Member API
    // =========================================================================

    /// Active members in address order.
    pub fn get_members(&self) -> Vec<MemberView> {
        self.members
            .values()
            .filter(|m| m.is_active())
            .map(MemberRecord::to_display)
            .collect()
    }

    /// One member (active or not) with its proof.
    pub fn get_member(&self, address: &str) -> Result<MemberDetail> {
        let record = self.record(address)?;
        let view = record.to_display();
        Ok(MemberDetail {
            address: view.address,
            name: view.name,
            earnings: view.earnings,
            proof: self.proof_for_record(record),
        })
    }

    /// Proof of a member's earnings against `get_root_hash()`.
    ///
    /// Empty for a zero balance.
    pub fn get_proof(&self, address: &str) -> Result<MerkleProof> {
        let record = self.record(address)?;
        Ok(self.proof_for_record(record))
    }

    /// Current root as `0x` hex.
    pub fn get_root_hash(&self) -> String {
        self.tree.root_hex()
    }

    pub fn root(&self) -> Hash {
        self.tree.root()
    }

    /// Handle to the current tree. It stays consistent after later rebuilds.
    pub fn snapshot(&self) -> Arc<MerkleTree> {
        Arc::clone(&self.tree)
    }

    /// Read-only view exposing only the member operations.
    pub fn member_api(&self) -> MemberApi<'_> {
        MemberApi::new(self)
    }

    /// Look up a member record by address string.
    ///
    /// Unparseable addresses are reported as `MemberNotFound`, since no
    /// such member can exist.
    pub fn record(&self, address: &str) -> Result<&MemberRecord> {
        Address::parse(address)
            .ok()
            .and_then(|a| self.members.get(&a))
            .ok_or_else(|| LedgerError::MemberNotFound(address.to_string()))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn active_count(&self) -> usize {
        self.members.values().filter(|m| m.is_active()).count()
    }

    fn proof_for_record(&self, record: &MemberRecord) -> MerkleProof {
        if record.earnings().is_zero() {
            return MerkleProof::empty();
        }
        // Non-zero earnings only come from genesis or add_revenue, both of
        // which rebuild, so the member is always in the current tree.
        self.tree.proof_for(record.address()).unwrap_or_else(|| {
            warn!("Member {} has earnings but no leaf", record.address());
            MerkleProof::empty()
        })
    }

    // =========================================================================
    // Admin API
    // =========================================================================

    /// Split `amount` over the active members and rebuild the tree.
    ///
    /// Each active member gets `round_half_up(amount / active_count)`. With
    /// no active members the revenue is dropped and `NoActiveMembers`
    /// returned. Every check runs before any balance changes, so a failed
    /// call leaves earnings and root untouched.
    pub fn add_revenue(&mut self, amount: &BigUint) -> Result<RevenueSplit> {
        let active: Vec<Address> = self
            .members
            .values()
            .filter(|m| m.is_active())
            .map(|m| *m.address())
            .collect();

        let Some(share) = split_share(amount, active.len()) else {
            warn!("No active members, dropping revenue of {}", amount);
            return Err(LedgerError::NoActiveMembers(amount.clone()));
        };

        if let Some(full) = self
            .members
            .values()
            .find(|m| m.is_active() && !m.can_receive(&share))
        {
            return Err(LedgerError::EarningsOverflow(*full.address()));
        }

        for address in &active {
            if let Some(member) = self.members.get_mut(address) {
                member.add_revenue(&share)?;
            }
        }
        self.rebuild();

        debug!(
            "Distributed revenue {}: share {} to {} members, root {}",
            amount,
            share,
            active.len(),
            self.get_root_hash()
        );

        Ok(RevenueSplit {
            amount: amount.clone(),
            share,
            recipients: active.len(),
        })
    }

    /// Add an active member with zero earnings.
    ///
    /// The tree is not rebuilt: a zero balance has an empty proof, so the
    /// missing leaf is never observable.
    pub fn add_member(&mut self, address: &str, name: Option<&str>) -> Result<Address> {
        let record = MemberRecord::new(address, name)?;
        let address = *record.address();
        if self.members.contains_key(&address) {
            return Err(LedgerError::DuplicateMember(address));
        }
        self.members.insert(address, record);
        debug!("Added member {}", address);
        Ok(address)
    }

    /// Deactivate a member. Earnings and the current root are kept.
    pub fn remove_member(&mut self, address: &str) -> Result<()> {
        let member = Address::parse(address)
            .ok()
            .and_then(|a| self.members.get_mut(&a))
            .ok_or_else(|| LedgerError::MemberNotFound(address.to_string()))?;
        member.set_active(false);
        debug!("Deactivated member {}", member.address());
        Ok(())
    }

    /// Full rebuild over every member holding earnings, then swap the
    /// published tree.
    fn rebuild(&mut self) {
        let tree = MerkleTree::from_members(
            self.members.values().filter(|m| !m.earnings().is_zero()),
        );
        self.tree = Arc::new(tree);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
