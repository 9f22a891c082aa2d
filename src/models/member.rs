//! Member model
//!
//! A person in the household group who pays for and shares bills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// Maximum length of a member's display name
pub const MAX_NAME_LEN: usize = 50;

/// A member of the household group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Name shown in balances and settlement summaries
    pub display_name: String,

    /// Optional contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// When the member joined the group
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            display_name: display_name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new member with a contact email
    pub fn with_email(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        let mut member = Self::new(display_name);
        member.email = Some(email.into());
        member
    }

    /// Normalize a display name for case-insensitive lookup
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Up to two initials, e.g. "Beth Smith" -> "BS"
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(MemberValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(MemberValidationError::NameTooLong(len));
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(MemberValidationError::InvalidEmail(email.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Member name too long ({} chars, max {})",
                len, MAX_NAME_LEN
            ),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for MemberValidationError {}
