//! Full JSON export with schema versioning

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::EntityType;
use crate::error::{BillError, BillResult};
use crate::models::{Bill, Group, Member};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything in a data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of billbling that wrote the export
    pub app_version: String,
    pub group: Option<Group>,
    pub members: Vec<Member>,
    /// Newest first
    pub bills: Vec<Bill>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub bill_count: usize,
    pub settlement_count: usize,
    pub earliest_bill: Option<DateTime<Utc>>,
    pub latest_bill: Option<DateTime<Utc>>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> BillResult<Self> {
        let group = storage.group.get()?;
        let members = storage.members.get_all()?;
        let bills = storage.bills.get_all()?;

        let metadata = ExportMetadata {
            member_count: members.len(),
            bill_count: bills.len(),
            settlement_count: bills.iter().filter(|b| b.is_settlement).count(),
            earliest_bill: bills.iter().map(|b| b.created_at).min(),
            latest_bill: bills.iter().map(|b| b.created_at).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            group,
            members,
            bills,
            metadata,
        })
    }

    /// Check schema version and that every bill references known members
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut member_ids = HashSet::with_capacity(self.members.len());
        let mut names = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            if !member_ids.insert(member.id) {
                return Err(format!("Member {} appears more than once", member.id));
            }
            if !names.insert(Member::normalize_name(&member.display_name)) {
                return Err(format!("Member name '{}' is used twice", member.display_name));
            }
        }

        let mut bill_ids = HashSet::with_capacity(self.bills.len());
        for bill in &self.bills {
            if !bill_ids.insert(bill.id) {
                return Err(format!("Bill {} appears more than once", bill.id));
            }
            if let Some(unknown) = std::iter::once(&bill.paid_by)
                .chain(&bill.participants)
                .find(|id| !member_ids.contains(*id))
            {
                return Err(format!(
                    "Bill {} references unknown member {}",
                    bill.id, unknown
                ));
            }
            bill.validate()
                .map_err(|e| format!("Bill {} is invalid: {}", bill.id, e))?;
        }

        Ok(())
    }

    /// Load this export into an empty data directory
    ///
    /// The export must carry a group, and the target must not have one yet.
    /// Nothing is written unless the export validates.
    pub fn restore(&self, storage: &Storage) -> BillResult<()> {
        if let Some(existing) = storage.group.get()? {
            return Err(BillError::Duplicate {
                entity_type: "Group",
                identifier: existing.name,
            });
        }
        if storage.members.count()? > 0 || storage.bills.count()? > 0 {
            return Err(BillError::Import(
                "Data directory already holds members or bills".into(),
            ));
        }

        self.validate().map_err(BillError::Import)?;
        let group = self
            .group
            .clone()
            .ok_or_else(|| BillError::Import("Export has no group".into()))?;

        storage.group.set(group.clone())?;
        for member in &self.members {
            storage.members.upsert(member.clone())?;
        }
        for bill in &self.bills {
            storage.bills.upsert(bill.clone())?;
        }
        storage.save_all()?;

        storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        tracing::info!(
            group = %group.id,
            members = self.members.len(),
            bills = self.bills.len(),
            "restored export"
        );
        Ok(())
    }
}

/// Export the full data directory to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> BillResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BillError::Export(e.to_string()))
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> BillResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| BillError::Import(e.to_string()))?;

    export.validate().map_err(BillError::Import)?;
    Ok(export)
}
