//! Storage layer for BillBling
//!
//! One JSON file per entity kind under `<base>/data/`, written atomically,
//! plus the append-only audit log. Services borrow a [`Storage`] and go
//! through its repositories and audit hooks.

pub mod bills;
pub mod file_io;
pub mod group;
pub mod members;

pub use bills::BillRepository;
pub use file_io::{read_json, write_json_atomic};
pub use group::GroupRepository;
pub use members::MemberRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BillPaths;
use crate::error::BillError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BillPaths,
    audit: AuditLogger,
    pub group: GroupRepository,
    pub members: MemberRepository,
    pub bills: BillRepository,
}

impl Storage {
    /// Open storage rooted at `paths`, creating directories as needed
    ///
    /// Nothing is read until [`Storage::load_all`] is called.
    pub fn new(paths: BillPaths) -> Result<Self, BillError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            group: GroupRepository::new(paths.group_file()),
            members: MemberRepository::new(paths.members_file()),
            bills: BillRepository::new(paths.bills_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BillPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BillError> {
        self.group.load()?;
        self.members.load()?;
        self.bills.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BillError> {
        self.group.save()?;
        self.members.save()?;
        self.bills.save()?;
        Ok(())
    }

    /// True once a group has been created in this data directory
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BillError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update; without an explicit summary the diff is derived
    /// from the serialized before and after states
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), BillError> {
        let diff_summary = match diff_summary {
            Some(summary) => Some(summary),
            None => generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?),
        };

        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BillError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
