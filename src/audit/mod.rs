//! Audit trail for BillBling
//!
//! Every create, update and delete of a group, member or bill is appended to
//! `audit.log` as one JSON object per line. Entries carry the entity's JSON
//! before and after the change plus a short field-level diff, which is what
//! `billbling history` prints.
//!
//! ```rust,ignore
//! use billbling::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Bill,
//!     bill.id.to_string(),
//!     Some(bill.description.clone()),
//!     &bill,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
