//! Group service
//!
//! Creates and maintains the single household group of a data directory.

use crate::audit::EntityType;
use crate::error::{BillError, BillResult};
use crate::models::Group;
use crate::storage::Storage;

/// Service for the household group
pub struct GroupService<'a> {
    storage: &'a Storage,
}

impl<'a> GroupService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the group; a data directory holds only one
    pub fn create(&self, name: &str) -> BillResult<Group> {
        if let Some(existing) = self.storage.group.get()? {
            return Err(BillError::Duplicate {
                entity_type: "Group",
                identifier: existing.name,
            });
        }

        let group = Group::new(name.trim());
        group
            .validate()
            .map_err(|e| BillError::Validation(e.to_string()))?;

        self.storage.group.set(group.clone())?;
        self.storage.group.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        tracing::info!(group = %group.id, name = %group.name, "created group");
        Ok(group)
    }

    /// The group, or [`BillError::NotFound`] before `init`
    pub fn get(&self) -> BillResult<Group> {
        self.storage
            .group
            .get()?
            .ok_or_else(BillError::group_not_found)
    }

    pub fn rename(&self, name: &str) -> BillResult<Group> {
        let before = self.get()?;
        let mut group = before.clone();
        group.name = name.trim().to_string();
        group
            .validate()
            .map_err(|e| BillError::Validation(e.to_string()))?;

        self.save_update(&before, &group)?;
        Ok(group)
    }

    /// Issue a new invite code, invalidating the old one
    pub fn regenerate_invite_code(&self) -> BillResult<Group> {
        let before = self.get()?;
        let mut group = before.clone();
        while group.invite_code == before.invite_code {
            group.regenerate_invite_code();
        }

        self.save_update(&before, &group)?;
        Ok(group)
    }

    fn save_update(&self, before: &Group, after: &Group) -> BillResult<()> {
        self.storage.group.set(after.clone())?;
        self.storage.group.save()?;

        self.storage.log_update(
            EntityType::Group,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            None,
        )
    }
}
