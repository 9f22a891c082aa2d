//! Property-based tests for the balance engine
//!
//! Bills are generated over small random groups; members are created inside
//! each case since ids are random.

use billbling::balance::{
    apply_transfers, compute_ledger, residual_imbalances, simplify_debts, DEFAULT_TOLERANCE,
};
use billbling::models::{Bill, Member, MemberId, Money};
use proptest::prelude::*;

/// (payer index, participant mask, amount in cents)
type BillSpec = (usize, Vec<bool>, i64);

fn group_and_bills(max_cents: i64) -> impl Strategy<Value = (usize, Vec<BillSpec>)> {
    (2usize..8).prop_flat_map(move |n| {
        (
            Just(n),
            prop::collection::vec(
                (0..n, prop::collection::vec(any::<bool>(), n), 0..max_cents),
                0..20,
            ),
        )
    })
}

fn build(n: usize, specs: &[BillSpec]) -> (Vec<Member>, Vec<Bill>) {
    let members: Vec<Member> = (0..n).map(|i| Member::new(format!("M{}", i))).collect();
    let bills = specs
        .iter()
        .map(|(payer, mask, cents)| {
            let participants: Vec<MemberId> = members
                .iter()
                .zip(mask)
                .filter(|(_, included)| **included)
                .map(|(m, _)| m.id)
                .collect();
            Bill::new("Shared", Money::from_cents(*cents), members[*payer].id, participants)
        })
        .collect();
    (members, bills)
}

/// Like [`build`] but every share is a whole dollar, so nets are exact
fn build_even(n: usize, specs: &[BillSpec]) -> (Vec<Member>, Vec<Bill>) {
    let even: Vec<BillSpec> = specs
        .iter()
        .map(|(payer, mask, cents)| {
            let count = mask.iter().filter(|included| **included).count() as i64;
            (*payer, mask.clone(), (cents / 100) * count * 100)
        })
        .collect();
    build(n, &even)
}

proptest! {
    /// Property: nets sum to zero (within tolerance) when every bill has participants
    #[test]
    fn ledger_is_zero_sum((n, specs) in group_and_bills(1_000_000)) {
        let (members, bills) = build(n, &specs);
        let bills: Vec<Bill> = bills.into_iter().filter(|b| !b.participants.is_empty()).collect();

        let ledger = compute_ledger(&members, &bills).unwrap();

        prop_assert!(ledger.total_net().is_within(DEFAULT_TOLERANCE));
    }

    /// Property: net == paid - owed for every member
    #[test]
    fn ledger_conserves_paid_and_owed((n, specs) in group_and_bills(1_000_000)) {
        let (members, bills) = build(n, &specs);

        let ledger = compute_ledger(&members, &bills).unwrap();

        prop_assert_eq!(ledger.len(), members.len());
        for entry in &ledger {
            prop_assert_eq!(entry.net, entry.paid - entry.owed);
        }
    }

    /// Property: the same snapshot always yields the same ledger and plan
    #[test]
    fn computation_is_idempotent((n, specs) in group_and_bills(1_000_000)) {
        let (members, bills) = build(n, &specs);

        let first = compute_ledger(&members, &bills).unwrap();
        let second = compute_ledger(&members, &bills).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(simplify_debts(&members, &first), simplify_debts(&members, &second));
    }

    /// Property: every planned transfer is above tolerance
    #[test]
    fn transfers_are_positive((n, specs) in group_and_bills(1_000_000)) {
        let (members, bills) = build(n, &specs);
        let ledger = compute_ledger(&members, &bills).unwrap();

        for transfer in simplify_debts(&members, &ledger) {
            prop_assert!(!transfer.amount.is_within(DEFAULT_TOLERANCE));
            prop_assert_ne!(transfer.from, transfer.to);
        }
    }

    /// Property: paying the plan settles everyone
    #[test]
    fn plan_settles_all_balances((n, specs) in group_and_bills(50_000)) {
        let (members, bills) = build_even(n, &specs);
        let ledger = compute_ledger(&members, &bills).unwrap();

        let transfers = simplify_debts(&members, &ledger);

        prop_assert!(residual_imbalances(&ledger, &transfers, DEFAULT_TOLERANCE).is_empty());
        for balance in apply_transfers(&ledger, &transfers).values() {
            prop_assert!(balance.is_within(DEFAULT_TOLERANCE));
        }
    }

    /// Property: at most members - 1 transfers
    #[test]
    fn plan_uses_at_most_n_minus_one_transfers((n, specs) in group_and_bills(50_000)) {
        let (members, bills) = build_even(n, &specs);
        let ledger = compute_ledger(&members, &bills).unwrap();

        let transfers = simplify_debts(&members, &ledger);

        prop_assert!(transfers.len() < members.len());
    }
}
