//! Group repository backed by group.json
//!
//! A data directory holds exactly one household group.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BillError;
use crate::models::Group;

use super::file_io::{read_json, write_json_atomic};

pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<Option<Group>>,
}

impl GroupRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    pub fn load(&self) -> Result<(), BillError> {
        let group: Option<Group> = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = group;
        Ok(())
    }

    /// Write the group file; nothing is written before a group exists
    pub fn save(&self) -> Result<(), BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        match data.as_ref() {
            Some(group) => write_json_atomic(&self.path, group),
            None => Ok(()),
        }
    }

    pub fn get(&self) -> Result<Option<Group>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    pub fn set(&self, group: Group) -> Result<(), BillError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = Some(group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_has_no_group() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GroupRepository::new(temp_dir.path().join("group.json"));
        repo.load().unwrap();

        assert!(repo.get().unwrap().is_none());
        repo.save().unwrap();
        assert!(!temp_dir.path().join("group.json").exists());
    }

    #[test]
    fn test_set_save_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("group.json");
        let repo = GroupRepository::new(path.clone());
        let group = Group::new("Maple Street");
        repo.set(group.clone()).unwrap();
        repo.save().unwrap();

        let reopened = GroupRepository::new(path);
        reopened.load().unwrap();
        assert_eq!(reopened.get().unwrap(), Some(group));
    }
}
