//! Display formatting for terminal output
//!
//! Plain-text tables for members, bills, balances and settlement plans.
//! Money columns always carry the configured currency symbol.

pub mod balance;
pub mod bill;
pub mod member;

use std::collections::HashMap;

use crate::models::{Member, MemberId};

pub use balance::{format_balance_summary, format_ledger, format_transfers};
pub use bill::{format_bill_details, format_bill_list};
pub use member::{format_member_details, format_member_list};

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return ".".repeat(max_len);
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{}...", head)
}

/// Display names keyed by member id
pub(crate) fn name_lookup(members: &[Member]) -> HashMap<MemberId, &str> {
    members
        .iter()
        .map(|m| (m.id, m.display_name.as_str()))
        .collect()
}

/// Name for `id`, or its short id when the member is gone
pub(crate) fn display_name(names: &HashMap<MemberId, &str>, id: MemberId) -> String {
    names
        .get(&id)
        .map(|n| n.to_string())
        .unwrap_or_else(|| id.to_string())
}
