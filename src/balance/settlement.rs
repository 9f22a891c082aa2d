//! Debt simplification
//!
//! Greedy largest-to-largest matching between debtors and creditors.
//!
//! # Algorithm
//!
//! 1. Split members into debtors (net below `-tolerance`) and creditors
//!    (net above `tolerance`); everyone else is already settled
//! 2. Sort debtors most-negative first and creditors most-positive first,
//!    keeping member order among equal balances
//! 3. Walk both lists with one cursor each, settling `min(debt, credit)`
//!    between the current pair and advancing whichever side reaches zero
//!
//! ```text
//! Net balances:
//!   A: +$60   B: $0   C: -$60
//!
//! Transfers:
//!   C pays A: $60
//! ```
//!
//! The result zeroes every balance within tolerance using at most
//! `members - 1` transfers. It is not guaranteed to be the global minimum
//! number of transfers.

use serde::{Deserialize, Serialize};

use super::ledger::Ledger;
use super::DEFAULT_TOLERANCE;
use crate::models::{Member, MemberId, Money};

/// One payment in a settlement plan: `from` pays `to` `amount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Plans settlement transfers with a fixed tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementPlanner {
    tolerance: Money,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl SettlementPlanner {
    /// Create a planner; negative tolerances are treated as their magnitude
    pub fn new(tolerance: Money) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Produce the ordered transfer list that settles `ledger`
    ///
    /// `members` fixes the tie-break order; members missing from the ledger
    /// count as settled.
    pub fn plan(&self, members: &[Member], ledger: &Ledger) -> Vec<SettlementTransfer> {
        let tolerance = self.tolerance;

        let mut debtors: Vec<(MemberId, Money)> = Vec::new();
        let mut creditors: Vec<(MemberId, Money)> = Vec::new();
        for member in members {
            let net = ledger.net(member.id);
            if net.is_within(tolerance) {
                continue;
            }
            if net.is_negative() {
                debtors.push((member.id, net));
            } else {
                creditors.push((member.id, net));
            }
        }

        // Stable sorts keep member order between equal balances
        debtors.sort_by(|a, b| a.1.cmp(&b.1));
        creditors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut transfers = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let (debtor_id, debtor_net) = &mut debtors[i];
            let (creditor_id, creditor_net) = &mut creditors[j];

            let debt = debtor_net.abs();
            let credit = *creditor_net;
            let settlement = debt.min(credit);

            if settlement.is_within(tolerance) {
                // Both sides were above tolerance when reached, so this only
                // happens if a caller bypassed the partition above
                tracing::trace!(%debtor_id, %creditor_id, %settlement, "skipping negligible transfer");
            } else {
                transfers.push(SettlementTransfer {
                    from: *debtor_id,
                    to: *creditor_id,
                    amount: settlement,
                });
            }

            *debtor_net += settlement;
            *creditor_net -= settlement;

            let debtor_done = debtor_net.is_within(tolerance);
            let creditor_done = creditor_net.is_within(tolerance);
            if debtor_done {
                i += 1;
            }
            if creditor_done {
                j += 1;
            }
        }

        if i < debtors.len() || j < creditors.len() {
            tracing::debug!(
                unmatched_debtors = debtors.len() - i,
                unmatched_creditors = creditors.len() - j,
                "settlement sweep ended with unmatched balances"
            );
        }

        tracing::debug!(
            members = members.len(),
            transfers = transfers.len(),
            %tolerance,
            "planned settlement"
        );

        transfers
    }
}

/// Simplify debts with [`DEFAULT_TOLERANCE`]
pub fn simplify_debts(members: &[Member], ledger: &Ledger) -> Vec<SettlementTransfer> {
    SettlementPlanner::default().plan(members, ledger)
}
