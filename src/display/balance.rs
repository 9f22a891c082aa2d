//! Balance and settlement display formatting

use super::{display_name, name_lookup};
use crate::balance::{Ledger, SettlementTransfer};
use crate::models::Member;
use crate::services::BalanceSummary;

/// Format the ledger as a table: paid, owed and signed net per member
pub fn format_ledger(members: &[Member], ledger: &Ledger, symbol: &str) -> String {
    if ledger.is_empty() {
        return "No members yet.\n".to_string();
    }

    let names = name_lookup(members);
    let name_width = members
        .iter()
        .map(|m| m.display_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
        "Member", "Paid", "Owed", "Net"
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->12}\n",
        "", "", "", ""
    ));

    for entry in ledger {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
            display_name(&names, entry.member_id),
            format!("+{}", entry.paid.format_with_symbol(symbol)),
            format!("-{}", entry.owed.format_with_symbol(symbol)),
            entry.net.format_signed(symbol),
        ));
    }

    output
}

/// Format a settlement plan, one transfer per line
pub fn format_transfers(members: &[Member], transfers: &[SettlementTransfer], symbol: &str) -> String {
    if transfers.is_empty() {
        return "All balances are settled.\n".to_string();
    }

    let names = name_lookup(members);
    let mut output = String::new();

    for (i, transfer) in transfers.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {} pays {} {}\n",
            i + 1,
            display_name(&names, transfer.from),
            display_name(&names, transfer.to),
            transfer.amount.format_with_symbol(symbol),
        ));
    }

    output
}

/// Totals, ledger and plan together
pub fn format_balance_summary(summary: &BalanceSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total spending: {} across {} bill(s)",
        summary.total_spending.format_with_symbol(symbol),
        summary.bill_count
    ));
    if summary.settlement_count > 0 {
        output.push_str(&format!(", {} settlement(s) recorded", summary.settlement_count));
    }
    output.push_str("\n\n");

    output.push_str(&format_ledger(&summary.members, &summary.ledger, symbol));
    output.push_str("\nSettlement plan:\n");
    output.push_str(&format_transfers(&summary.members, &summary.transfers, symbol));

    output
}
