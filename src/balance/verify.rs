//! Settlement verification
//!
//! Replays a transfer list against a ledger and reports any member left with
//! a balance above tolerance. The planner itself never fails; callers use
//! these checks to detect inconsistent data or accumulated drift.

use std::collections::HashMap;

use super::ledger::Ledger;
use super::settlement::SettlementTransfer;
use crate::error::{BillError, BillResult};
use crate::models::{MemberId, Money};

/// Net balances after every transfer has been paid
///
/// A payment raises the payer's net and lowers the recipient's. Members
/// named only by transfers start from zero.
pub fn apply_transfers(
    ledger: &Ledger,
    transfers: &[SettlementTransfer],
) -> HashMap<MemberId, Money> {
    let mut balances: HashMap<MemberId, Money> =
        ledger.iter().map(|e| (e.member_id, e.net)).collect();

    for transfer in transfers {
        *balances.entry(transfer.from).or_default() += transfer.amount;
        *balances.entry(transfer.to).or_default() -= transfer.amount;
    }

    balances
}

/// Members whose balance after the transfers still exceeds `tolerance`
///
/// Returned in ledger order, followed by any members only the transfers name.
pub fn residual_imbalances(
    ledger: &Ledger,
    transfers: &[SettlementTransfer],
    tolerance: Money,
) -> Vec<(MemberId, Money)> {
    let balances = apply_transfers(ledger, transfers);

    let mut order: Vec<MemberId> = ledger.iter().map(|e| e.member_id).collect();
    for transfer in transfers {
        for id in [transfer.from, transfer.to] {
            if ledger.get(id).is_none() && !order.contains(&id) {
                order.push(id);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            let residual = balances.get(&id).copied().unwrap_or_default();
            (!residual.is_within(tolerance)).then_some((id, residual))
        })
        .collect()
}

/// Fail with [`BillError::ResidualImbalance`] for the first unsettled member
pub fn verify_settlement(
    ledger: &Ledger,
    transfers: &[SettlementTransfer],
    tolerance: Money,
) -> BillResult<()> {
    match residual_imbalances(ledger, transfers, tolerance).first() {
        Some((member, amount)) => Err(BillError::ResidualImbalance {
            member: member.to_string(),
            amount: amount.to_string(),
        }),
        None => Ok(()),
    }
}
