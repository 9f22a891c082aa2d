//! Member display formatting

use crate::balance::{Ledger, LedgerEntry};
use crate::models::Member;

/// Format members as a table, with net balances when a ledger is given
pub fn format_member_list(members: &[Member], ledger: Option<&Ledger>, symbol: &str) -> String {
    if members.is_empty() {
        return "No members yet. Add one with 'billbling member add <name>'.\n".to_string();
    }

    let name_width = members
        .iter()
        .map(|m| m.display_name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<12}  {:<10}  {:>12}\n",
        "Name",
        "ID",
        "Joined",
        if ledger.is_some() { "Net" } else { "" },
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<12}  {:-<10}  {:->12}\n",
        "", "", "", "",
    ));

    for member in members {
        let net = ledger
            .map(|l| l.net(member.id).format_signed(symbol))
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<name_width$}  {:<12}  {:<10}  {:>12}\n",
            member.display_name,
            member.id.to_string(),
            member.created_at.format("%Y-%m-%d").to_string(),
            net,
        ));
    }

    output.push_str(&format!("\n{} member(s)\n", members.len()));
    output
}

/// Format one member with their balance breakdown
pub fn format_member_details(
    member: &Member,
    entry: Option<&LedgerEntry>,
    bill_count: usize,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Member: {} ({})\n", member.display_name, member.initials()));
    output.push_str(&format!("  ID:     {}\n", member.id.to_full_string()));
    if let Some(email) = &member.email {
        output.push_str(&format!("  Email:  {}\n", email));
    }
    output.push_str(&format!(
        "  Joined: {}\n",
        member.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("  Bills:  {}\n", bill_count));

    if let Some(entry) = entry {
        output.push('\n');
        output.push_str(&format!("  Paid:   {}\n", entry.paid.format_with_symbol(symbol)));
        output.push_str(&format!("  Owed:   {}\n", entry.owed.format_with_symbol(symbol)));
        output.push_str(&format!("  Net:    {}\n", entry.net.format_signed(symbol)));
    }

    output
}
