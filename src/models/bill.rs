//! Bill model
//!
//! A bill is one shared expense: a member paid `amount` on behalf of a set of
//! participants who split it evenly. Settle-up payments are stored as bills
//! too, flagged with `is_settlement`, so they flow through the same balance
//! computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::{BillId, MemberId};
use super::money::{Money, MAX_AMOUNT};

/// Maximum length of a bill description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,

    /// What the bill was for (e.g., "Monthly Rent")
    pub description: String,

    /// Total amount paid
    pub amount: Money,

    /// Member who paid the bill
    pub paid_by: MemberId,

    /// Members sharing the bill; the payer need not be one of them
    pub participants: Vec<MemberId>,

    /// Free-form category label (e.g., "Groceries")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// True for a recorded settle-up payment rather than an expense
    #[serde(default)]
    pub is_settlement: bool,

    /// When the bill was logged
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Create a new bill
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: MemberId,
        participants: Vec<MemberId>,
    ) -> Self {
        Self {
            id: BillId::new(),
            description: description.into(),
            amount,
            paid_by,
            participants,
            category: None,
            is_settlement: false,
            created_at: Utc::now(),
        }
    }

    /// Create a settle-up payment: `from` hands `amount` to `to`
    ///
    /// Recorded as a bill paid by `from` whose only participant is `to`, which
    /// raises `from`'s net balance and lowers `to`'s by the same amount.
    pub fn settlement(from: MemberId, to: MemberId, amount: Money) -> Self {
        let mut bill = Self::new("Settlement", amount, from, vec![to]);
        bill.is_settlement = true;
        bill
    }

    /// Set the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Amount owed by each participant, or `None` if nobody shares the bill
    pub fn share(&self) -> Option<Money> {
        self.amount.split(self.participants.len())
    }

    /// Check if a member paid for or shares this bill
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.paid_by == member_id || self.participants.contains(&member_id)
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), BillValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(BillValidationError::EmptyDescription);
        }

        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(BillValidationError::DescriptionTooLong(len));
        }

        if self.amount.is_negative() {
            return Err(BillValidationError::NegativeAmount(self.amount));
        }

        if self.amount > MAX_AMOUNT {
            return Err(BillValidationError::AmountTooLarge(self.amount));
        }

        let mut seen = HashSet::with_capacity(self.participants.len());
        for participant in &self.participants {
            if !seen.insert(participant) {
                return Err(BillValidationError::DuplicateParticipant(*participant));
            }
        }

        if self.is_settlement {
            if self.participants.len() != 1 {
                return Err(BillValidationError::SettlementRecipients(
                    self.participants.len(),
                ));
            }
            if self.participants[0] == self.paid_by {
                return Err(BillValidationError::SettlementToSelf);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.amount)
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    NegativeAmount(Money),
    AmountTooLarge(Money),
    DuplicateParticipant(MemberId),
    SettlementRecipients(usize),
    SettlementToSelf,
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Bill description cannot be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Bill description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::NegativeAmount(amount) => {
                write!(f, "Bill amount cannot be negative: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Bill amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::DuplicateParticipant(id) => {
                write!(f, "Participant {} listed more than once", id)
            }
            Self::SettlementRecipients(count) => write!(
                f,
                "A settlement must have exactly one recipient, found {}",
                count
            ),
            Self::SettlementToSelf => write!(f, "A member cannot settle with themselves"),
        }
    }
}

impl std::error::Error for BillValidationError {}
