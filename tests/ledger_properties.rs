//! Property tests for ledger invariants
//!
//! Random member sets and operation histories, checking:
//! - root independence from insertion order
//! - root independence from how admin operations interleave with revenue
//! - every non-zero balance proves against the root
//! - zero balances have empty proofs
//! - split drift stays below the recipient count
//! - failed revenue leaves state untouched

use proptest::prelude::*;

use plasmaledger_core::{BigUint, LedgerError};
use plasmaledger_ledger::Ledger;
use plasmaledger_merkle::{merkle_leaf, MerkleTree};

fn address(seed: u8) -> String {
    format!("0x{:040x}", seed)
}

/// One step of an admin history.
#[derive(Debug, Clone)]
enum Step {
    Add(u8),
    Remove(u8),
    Revenue(u64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    // small seed range so adds and removes hit the same members
    prop_oneof![
        (0u8..12).prop_map(Step::Add),
        (0u8..12).prop_map(Step::Remove),
        (0u64..1_000_000).prop_map(Step::Revenue),
    ]
}

/// Revenue either lands or is dropped for lack of active members.
fn add_revenue(ledger: &mut Ledger, revenue: u64) {
    match ledger.add_revenue(&BigUint::from(revenue)) {
        Err(LedgerError::NoActiveMembers(_)) => {}
        other => {
            other.unwrap();
        }
    }
}

fn apply(ledger: &mut Ledger, step: &Step) {
    match step {
        Step::Add(seed) => match ledger.add_member(&address(*seed), None) {
            Err(LedgerError::DuplicateMember(_)) => {}
            other => {
                other.unwrap();
            }
        },
        Step::Remove(seed) => match ledger.remove_member(&address(*seed)) {
            Err(LedgerError::MemberNotFound(_)) => {}
            other => other.unwrap(),
        },
        Step::Revenue(revenue) => add_revenue(ledger, *revenue),
    }
}

/// Distinct member seeds, plus which of them end up deactivated.
fn members_strategy() -> impl Strategy<Value = Vec<(u8, bool)>> {
    prop::collection::btree_map(any::<u8>(), any::<bool>(), 1..24)
        .prop_map(|m| m.into_iter().collect())
}

fn build(members: &[(u8, bool)], revenues: &[u64]) -> Ledger {
    let mut ledger = Ledger::new();
    for (seed, _) in members {
        ledger.add_member(&address(*seed), None).unwrap();
    }
    for (i, revenue) in revenues.iter().enumerate() {
        // deactivate halfway through so inactive members carry balances
        if i == revenues.len() / 2 {
            for (seed, removed) in members {
                if *removed {
                    ledger.remove_member(&address(*seed)).unwrap();
                }
            }
        }
        add_revenue(&mut ledger, *revenue);
    }
    ledger
}

proptest! {
    #[test]
    fn prop_root_independent_of_insertion_order(
        members in members_strategy(),
        revenues in prop::collection::vec(0u64..1_000_000, 0..6),
    ) {
        let forward = build(&members, &revenues);
        let mut reversed_members = members.clone();
        reversed_members.reverse();
        let reversed = build(&reversed_members, &revenues);

        prop_assert_eq!(forward.get_root_hash(), reversed.get_root_hash());
    }

    #[test]
    fn prop_root_depends_only_on_final_state(
        steps in prop::collection::vec(step_strategy(), 0..40),
    ) {
        let mut replayed = Ledger::new();
        for step in &steps {
            apply(&mut replayed, step);
        }

        // rebuild the same final records from scratch in one go
        let records: Vec<_> = (0u8..12)
            .filter_map(|seed| replayed.record(&address(seed)).ok().cloned())
            .collect();
        prop_assert_eq!(records.len(), replayed.member_count());
        let genesis = Ledger::with_members(records).unwrap();

        prop_assert_eq!(replayed.get_root_hash(), genesis.get_root_hash());
    }

    #[test]
    fn prop_every_balance_is_provable(
        steps in prop::collection::vec(step_strategy(), 0..40),
    ) {
        let mut ledger = Ledger::new();
        for step in &steps {
            apply(&mut ledger, step);
        }
        let root = ledger.root();

        for seed in 0u8..12 {
            let address = address(seed);
            let Ok(record) = ledger.record(&address) else {
                continue;
            };
            let proof = ledger.get_proof(&address).unwrap();
            if record.earnings().bits() == 0 {
                prop_assert!(proof.is_empty());
            } else {
                prop_assert!(MerkleTree::verify(&root, &merkle_leaf(record), &proof));
            }
        }
    }

    #[test]
    fn prop_drift_below_recipient_count(
        members in members_strategy(),
        revenue in 0u64..u64::MAX,
    ) {
        let mut ledger = build(&members, &[]);
        let split = ledger.add_revenue(&BigUint::from(revenue)).unwrap();

        prop_assert_eq!(split.recipients, members.len());
        prop_assert!(split.drift().unsigned_abs() < members.len() as u128);
    }

    #[test]
    fn prop_failed_revenue_changes_nothing(
        members in members_strategy(),
        revenue in 0u64..1_000_000,
    ) {
        let mut ledger = build(&members, &[revenue]);
        for (seed, _) in &members {
            ledger.remove_member(&address(*seed)).unwrap();
        }
        let root = ledger.get_root_hash();
        let before: Vec<String> = members
            .iter()
            .map(|(seed, _)| ledger.get_member(&address(*seed)).unwrap().earnings)
            .collect();

        prop_assert!(matches!(
            ledger.add_revenue(&BigUint::from(revenue)),
            Err(LedgerError::NoActiveMembers(_))
        ));

        let after: Vec<String> = members
            .iter()
            .map(|(seed, _)| ledger.get_member(&address(*seed)).unwrap().earnings)
            .collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(ledger.get_root_hash(), root);
    }
}
