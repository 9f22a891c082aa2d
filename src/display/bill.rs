//! Bill display formatting

use super::{display_name, name_lookup, truncate};
use crate::models::{Bill, Member};

/// Format bills as a register, newest first as given
pub fn format_bill_list(bills: &[Bill], members: &[Member], symbol: &str, date_format: &str) -> String {
    if bills.is_empty() {
        return "No bills found.\n".to_string();
    }

    let names = name_lookup(members);
    let mut output = String::new();

    output.push_str(&format!(
        "{:<12}  {:<10}  {:<28}  {:<14}  {:<16}  {:>12}\n",
        "ID", "Date", "Description", "Category", "Paid By", "Amount"
    ));
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for bill in bills {
        let description = if bill.is_settlement {
            format!("⇄ {}", bill.description)
        } else {
            bill.description.clone()
        };

        output.push_str(&format!(
            "{:<12}  {:<10}  {:<28}  {:<14}  {:<16}  {:>12}\n",
            bill.id.to_string(),
            bill.created_at.format(date_format).to_string(),
            truncate(&description, 28),
            truncate(bill.category.as_deref().unwrap_or(""), 14),
            truncate(&display_name(&names, bill.paid_by), 16),
            bill.amount.format_with_symbol(symbol),
        ));
    }

    output.push_str(&format!("\n{} bill(s)\n", bills.len()));
    output
}

/// Format one bill with its per-participant split
pub fn format_bill_details(bill: &Bill, members: &[Member], symbol: &str, date_format: &str) -> String {
    let names = name_lookup(members);
    let mut output = String::new();

    let kind = if bill.is_settlement { "Settlement" } else { "Bill" };
    output.push_str(&format!("{}: {}\n", kind, bill.description));
    output.push_str(&format!("  ID:       {}\n", bill.id.to_full_string()));
    output.push_str(&format!(
        "  Date:     {}\n",
        bill.created_at.format(date_format)
    ));
    output.push_str(&format!(
        "  Amount:   {}\n",
        bill.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Paid by:  {}\n",
        display_name(&names, bill.paid_by)
    ));
    if let Some(category) = &bill.category {
        output.push_str(&format!("  Category: {}\n", category));
    }

    match bill.share() {
        Some(share) => {
            output.push_str(&format!(
                "\n  Split between {} ({} each):\n",
                bill.participants.len(),
                share.format_with_symbol(symbol)
            ));
            for participant in &bill.participants {
                output.push_str(&format!("    - {}\n", display_name(&names, *participant)));
            }
        }
        None => output.push_str("\n  No participants; this bill does not affect balances.\n"),
    }

    output
}
