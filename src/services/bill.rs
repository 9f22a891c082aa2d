//! Bill service
//!
//! Logs shared expenses and settle-up payments. Every bill written here
//! references only current members, so the balance engine never sees a
//! dangling id from this path.

use crate::audit::EntityType;
use crate::error::{BillError, BillResult};
use crate::models::{Bill, BillId, Member, MemberId, Money};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewBill {
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    /// Members sharing the bill; empty means everyone in the group
    pub participants: Vec<MemberId>,
    pub category: Option<String>,
}

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
}

impl<'a> BillService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log an expense
    pub fn add(&self, input: NewBill) -> BillResult<Bill> {
        let members = self.storage.members.get_all()?;
        if members.is_empty() {
            return Err(BillError::Validation(
                "Add members before logging bills".into(),
            ));
        }

        let participants = if input.participants.is_empty() {
            members.iter().map(|m| m.id).collect()
        } else {
            input.participants
        };

        let mut bill = Bill::new(
            input.description.trim(),
            input.amount,
            input.paid_by,
            participants,
        );
        bill.category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        self.check_members(&bill, &members)?;
        self.insert(bill)
    }

    /// Record that `from` paid `to` back `amount`
    pub fn record_settlement(&self, from: MemberId, to: MemberId, amount: Money) -> BillResult<Bill> {
        if !amount.is_positive() {
            return Err(BillError::Validation(format!(
                "Settlement amount must be positive (got {})",
                amount
            )));
        }

        let members = self.storage.members.get_all()?;
        let bill = Bill::settlement(from, to, amount);
        self.check_members(&bill, &members)?;
        self.insert(bill)
    }

    pub fn get(&self, id: BillId) -> BillResult<Option<Bill>> {
        self.storage.bills.get(id)
    }

    /// Find a bill by full id or short display id
    pub fn find(&self, identifier: &str) -> BillResult<Option<Bill>> {
        if let Ok(id) = identifier.parse::<BillId>() {
            return self.storage.bills.get(id);
        }

        let needle = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .bills
            .get_all()?
            .into_iter()
            .find(|b| b.id.to_string() == needle))
    }

    /// All bills, newest first
    pub fn list(&self) -> BillResult<Vec<Bill>> {
        self.storage.bills.get_all()
    }

    /// Bills whose description, category or payer name contains `term`
    ///
    /// Case-insensitive; newest first. An empty term matches everything.
    pub fn search(&self, term: &str) -> BillResult<Vec<Bill>> {
        let term = term.trim().to_lowercase();
        let bills = self.storage.bills.get_all()?;
        if term.is_empty() {
            return Ok(bills);
        }

        let members = self.storage.members.get_all()?;
        let payer_name = |id: MemberId| {
            members
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.display_name.to_lowercase())
                .unwrap_or_default()
        };

        Ok(bills
            .into_iter()
            .filter(|b| {
                b.description.to_lowercase().contains(&term)
                    || b
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&term))
                    || payer_name(b.paid_by).contains(&term)
            })
            .collect())
    }

    pub fn delete(&self, id: BillId) -> BillResult<Bill> {
        let bill = self
            .storage
            .bills
            .delete(id)?
            .ok_or_else(|| BillError::bill_not_found(id.to_string()))?;
        self.storage.bills.save()?;

        self.storage.log_delete(
            EntityType::Bill,
            bill.id.to_string(),
            Some(bill.description.clone()),
            &bill,
        )?;

        tracing::info!(bill = %bill.id, "deleted bill");
        Ok(bill)
    }

    fn check_members(&self, bill: &Bill, members: &[Member]) -> BillResult<()> {
        let unknown = bill
            .participants
            .iter()
            .chain(std::iter::once(&bill.paid_by))
            .find(|id| !members.iter().any(|m| m.id == **id));

        if let Some(member) = unknown {
            return Err(BillError::UnknownMember {
                bill: bill.id.to_string(),
                member: member.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&self, bill: Bill) -> BillResult<Bill> {
        bill.validate()
            .map_err(|e| BillError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        self.storage.log_create(
            EntityType::Bill,
            bill.id.to_string(),
            Some(bill.description.clone()),
            &bill,
        )?;

        tracing::info!(
            bill = %bill.id,
            amount = %bill.amount,
            participants = bill.participants.len(),
            settlement = bill.is_settlement,
            "recorded bill"
        );
        Ok(bill)
    }
}
