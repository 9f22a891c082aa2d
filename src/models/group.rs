//! Household group model
//!
//! One data directory holds exactly one group. The invite code is a short,
//! human-friendly token shown to members so they can find the right group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::GroupId;

/// Length of a generated invite code
pub const INVITE_CODE_LEN: usize = 6;

/// A household group that shares bills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name (e.g., "The Fun House")
    pub name: String,

    /// Invite code, six uppercase alphanumeric characters
    pub invite_code: String,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group with a fresh invite code
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            invite_code: generate_invite_code(),
            created_at: Utc::now(),
        }
    }

    /// Replace the invite code with a new random one
    pub fn regenerate_invite_code(&mut self) {
        self.invite_code = generate_invite_code();
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }

        if !is_valid_invite_code(&self.invite_code) {
            return Err(GroupValidationError::InvalidInviteCode(
                self.invite_code.clone(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.invite_code)
    }
}

/// Generate an invite code from the leading characters of a random UUID
pub fn generate_invite_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(INVITE_CODE_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Check the shape of an invite code
pub fn is_valid_invite_code(code: &str) -> bool {
    code.len() == INVITE_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    InvalidInviteCode(String),
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name cannot be empty"),
            Self::InvalidInviteCode(code) => write!(f, "Invalid invite code: {}", code),
        }
    }
}

impl std::error::Error for GroupValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_shape() {
        for _ in 0..20 {
            let code = generate_invite_code();
            assert!(is_valid_invite_code(&code), "bad code {}", code);
        }
        assert!(is_valid_invite_code("FUN123"));
        assert!(!is_valid_invite_code("fun123"));
        assert!(!is_valid_invite_code("FUN12"));
    }

    #[test]
    fn test_new_group_is_valid() {
        let group = Group::new("The Fun House");
        assert!(group.validate().is_ok());
        assert!(group.to_string().starts_with("The Fun House ["));
    }

    #[test]
    fn test_empty_name_rejected() {
        let group = Group::new("  ");
        assert_eq!(group.validate(), Err(GroupValidationError::EmptyName));
    }
}
