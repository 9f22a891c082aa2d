//! Per-member ledger computation
//!
//! Turns a snapshot of members and bills into paid/owed/net totals for every
//! member. The computation is pure: inputs are borrowed, never mutated, and
//! the ledger is rebuilt from scratch on each call.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{BillError, BillResult};
use crate::models::{Bill, Member, MemberId, Money};

/// Paid/owed/net totals for one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub member_id: MemberId,
    /// Sum of amounts of bills this member paid
    pub paid: Money,
    /// Sum of this member's shares across the bills they participate in
    pub owed: Money,
    /// `paid - owed`; positive means the group owes this member
    pub net: Money,
}

impl LedgerEntry {
    fn empty(member_id: MemberId) -> Self {
        Self {
            member_id,
            paid: Money::zero(),
            owed: Money::zero(),
            net: Money::zero(),
        }
    }
}

/// Balances for every member, in the order the members were supplied
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    #[serde(skip)]
    index: HashMap<MemberId, usize>,
}

impl Ledger {
    /// Build a ledger from precomputed entries
    ///
    /// Later duplicates of a member id shadow earlier ones in lookups.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.member_id, i))
            .collect();
        Self { entries, index }
    }

    /// Look up a member's entry
    pub fn get(&self, member_id: MemberId) -> Option<&LedgerEntry> {
        self.index.get(&member_id).map(|&i| &self.entries[i])
    }

    /// A member's net balance, zero for members not in the ledger
    pub fn net(&self, member_id: MemberId) -> Money {
        self.get(member_id).map(|e| e.net).unwrap_or_default()
    }

    /// Iterate entries in member order
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total paid across all members
    pub fn total_paid(&self) -> Money {
        self.entries.iter().map(|e| e.paid).sum()
    }

    /// Sum of all net balances; zero up to rounding for a consistent snapshot
    pub fn total_net(&self) -> Money {
        self.entries.iter().map(|e| e.net).sum()
    }

    /// True when every member's net balance is within `tolerance` of zero
    pub fn is_settled(&self, tolerance: Money) -> bool {
        self.entries.iter().all(|e| e.net.is_within(tolerance))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compute paid, owed and net totals for every member
///
/// Every payer and participant must be one of `members`; the first bill that
/// names anyone else fails the whole computation with
/// [`BillError::UnknownMember`]. Bills without participants are skipped and
/// touch neither `paid` nor `owed`. Totals too large for `Decimal` fail with
/// [`BillError::Validation`].
pub fn compute_ledger(members: &[Member], bills: &[Bill]) -> BillResult<Ledger> {
    let mut index: HashMap<MemberId, usize> = HashMap::with_capacity(members.len());
    for (i, member) in members.iter().enumerate() {
        if index.insert(member.id, i).is_some() {
            return Err(BillError::Duplicate {
                entity_type: "Member",
                identifier: member.id.to_string(),
            });
        }
    }

    // Reject the whole snapshot before accumulating anything
    for bill in bills {
        validate_bill(bill, &index)?;
    }

    let mut entries: Vec<LedgerEntry> = members.iter().map(|m| LedgerEntry::empty(m.id)).collect();
    let mut skipped = 0usize;
    let mut grand_paid = Money::zero();
    let mut grand_owed = Money::zero();

    for bill in bills {
        let Some(share) = bill.share() else {
            skipped += 1;
            continue;
        };

        let overflow = || {
            BillError::Validation(format!("Balances overflow at bill {} ({})", bill.id, bill.amount))
        };

        // Grand totals bound every per-member sum and every partial sum of nets
        grand_paid = grand_paid.checked_add(bill.amount).ok_or_else(overflow)?;

        let payer = &mut entries[index[&bill.paid_by]];
        payer.paid = payer.paid.checked_add(bill.amount).ok_or_else(overflow)?;
        for participant in &bill.participants {
            grand_owed = grand_owed.checked_add(share).ok_or_else(overflow)?;
            let entry = &mut entries[index[participant]];
            entry.owed = entry.owed.checked_add(share).ok_or_else(overflow)?;
        }
    }

    for entry in &mut entries {
        entry.net = entry.paid.checked_sub(entry.owed).ok_or_else(|| {
            BillError::Validation(format!("Net balance overflow for member {}", entry.member_id))
        })?;
    }

    tracing::debug!(
        members = members.len(),
        bills = bills.len(),
        skipped_empty = skipped,
        "computed ledger"
    );

    Ok(Ledger { entries, index })
}

fn validate_bill(bill: &Bill, index: &HashMap<MemberId, usize>) -> BillResult<()> {
    if bill.amount.is_negative() {
        return Err(BillError::Validation(format!(
            "Bill {} has a negative amount: {}",
            bill.id, bill.amount
        )));
    }

    let unknown = |member: MemberId| BillError::UnknownMember {
        bill: bill.id.to_string(),
        member: member.to_string(),
    };

    if !index.contains_key(&bill.paid_by) {
        return Err(unknown(bill.paid_by));
    }

    for (pos, participant) in bill.participants.iter().enumerate() {
        if !index.contains_key(participant) {
            return Err(unknown(*participant));
        }
        if bill.participants[..pos].contains(participant) {
            return Err(BillError::Validation(format!(
                "Bill {} lists participant {} more than once",
                bill.id, participant
            )));
        }
    }

    Ok(())
}
