//! Shareable settlement summary
//!
//! Plain text meant for pasting into a group chat. Asterisks mark bold in
//! the common messengers.

use std::collections::HashMap;

use crate::balance::SettlementTransfer;
use crate::models::{Group, Member, MemberId};

pub const SUMMARY_TITLE: &str = "*BillBling Settlement Summary*";

pub const ALL_SETTLED: &str = "All balances are settled. Good job!";

/// Render the settlement plan as a chat message
///
/// ```text
/// *BillBling Settlement Summary*
/// Group: Maple Street
///
/// Here's how we can settle up:
///
/// - Carol owes Alice $60.00
/// ```
pub fn settlement_summary_text(
    group: Option<&Group>,
    members: &[Member],
    transfers: &[SettlementTransfer],
    currency_symbol: &str,
) -> String {
    let names: HashMap<MemberId, &str> = members
        .iter()
        .map(|m| (m.id, m.display_name.as_str()))
        .collect();
    let name_of = |id: MemberId| {
        names
            .get(&id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let mut text = String::from(SUMMARY_TITLE);
    if let Some(group) = group {
        text.push_str(&format!("\nGroup: {}", group.name));
    }
    text.push_str("\n\n");

    if transfers.is_empty() {
        text.push_str(ALL_SETTLED);
        return text;
    }

    text.push_str("Here's how we can settle up:\n\n");
    let lines: Vec<String> = transfers
        .iter()
        .map(|t| {
            format!(
                "- {} owes {} {}",
                name_of(t.from),
                name_of(t.to),
                t.amount.format_with_symbol(currency_symbol)
            )
        })
        .collect();
    text.push_str(&lines.join("\n"));
    text
}
