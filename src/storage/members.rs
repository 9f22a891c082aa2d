//! Member repository backed by members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BillError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<HashMap<MemberId, Member>>,
    /// Normalized display name -> member id
    by_name: RwLock<HashMap<String, MemberId>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load members from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), BillError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_name.clear();

        for member in file_data.members {
            by_name.insert(Member::normalize_name(&member.display_name), member.id);
            data.insert(member.id, member);
        }

        Ok(())
    }

    /// Save members to disk in join order
    pub fn save(&self) -> Result<(), BillError> {
        let members = self.get_all()?;
        write_json_atomic(&self.path, &MemberData { members })
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&id).cloned())
    }

    /// All members, oldest first
    ///
    /// This order is the tie-break order the settlement planner sees, so it
    /// must not depend on hash iteration.
    pub fn get_all(&self) -> Result<Vec<Member>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.display_name.cmp(&b.display_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(members)
    }

    /// Look up a member by display name, ignoring case and surrounding space
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_name = self
            .by_name
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_name
            .get(&Member::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a member, keeping the name index in step
    pub fn upsert(&self, member: Member) -> Result<(), BillError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&member.id) {
            by_name.remove(&Member::normalize_name(&old.display_name));
        }
        by_name.insert(Member::normalize_name(&member.display_name), member.id);
        data.insert(member.id, member);
        Ok(())
    }

    /// Remove a member; returns whether one was removed
    pub fn delete(&self, id: MemberId) -> Result<bool, BillError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(member) => {
                by_name.remove(&Member::normalize_name(&member.display_name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
