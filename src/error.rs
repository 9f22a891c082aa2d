//! Custom error types for BillBling
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BillBling operations
#[derive(Error, Debug)]
pub enum BillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A bill names a payer or participant that is not a member of the group
    #[error("Bill {bill} references unknown member {member}")]
    UnknownMember { bill: String, member: String },

    /// A member cannot be removed while bills still reference them
    #[error("Member {member} is referenced by {bill_count} bill(s)")]
    MemberInUse { member: String, bill_count: usize },

    /// A member still carries a balance after applying the settlement plan
    #[error("Residual imbalance for member {member}: {amount}")]
    ResidualImbalance { member: String, amount: String },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for the household group
    pub fn group_not_found() -> Self {
        Self::NotFound {
            entity_type: "Group",
            identifier: "run 'billbling init' first".into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from bad member references in bill data
    pub fn is_unknown_member(&self) -> bool {
        matches!(self, Self::UnknownMember { .. })
    }
}

impl From<std::io::Error> for BillError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BillBling operations
pub type BillResult<T> = Result<T, BillError>;
