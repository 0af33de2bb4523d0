use plasmaledger_core::{MemberView, Result};
use plasmaledger_merkle::MerkleProof;

use crate::ledger::{Ledger, MemberDetail};

/// Read-only member API over a ledger.
///
/// Hand this to query-serving code that must not reach the admin
/// operations.
#[derive(Debug, Clone, Copy)]
pub struct MemberApi<'a> {
    ledger: &'a Ledger,
}

impl<'a> MemberApi<'a> {
    pub(crate) fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn get_members(&self) -> Vec<MemberView> {
        self.ledger.get_members()
    }

    pub fn get_member(&self, address: &str) -> Result<MemberDetail> {
        self.ledger.get_member(address)
    }

    pub fn get_proof(&self, address: &str) -> Result<MerkleProof> {
        self.ledger.get_proof(address)
    }

    pub fn get_root_hash(&self) -> String {
        self.ledger.get_root_hash()
    }
}
