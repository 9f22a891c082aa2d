//! Bill repository backed by bills.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BillError;
use crate::models::{Bill, BillId, MemberId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BillData {
    bills: Vec<Bill>,
}

/// Repository for bill persistence
pub struct BillRepository {
    path: PathBuf,
    data: RwLock<HashMap<BillId, Bill>>,
}

impl BillRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), BillError> {
        let file_data: BillData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.bills.into_iter().map(|b| (b.id, b)).collect();
        Ok(())
    }

    /// Save bills to disk, oldest first
    pub fn save(&self) -> Result<(), BillError> {
        let mut bills = self.get_all()?;
        bills.reverse();
        write_json_atomic(&self.path, &BillData { bills })
    }

    pub fn get(&self, id: BillId) -> Result<Option<Bill>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&id).cloned())
    }

    /// All bills, newest first
    pub fn get_all(&self) -> Result<Vec<Bill>, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut bills: Vec<_> = data.values().cloned().collect();
        bills.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(bills)
    }

    /// Bills naming `member_id` as payer or participant
    pub fn get_involving(&self, member_id: MemberId) -> Result<Vec<Bill>, BillError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.involves(member_id))
            .collect())
    }

    pub fn upsert(&self, bill: Bill) -> Result<(), BillError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(bill.id, bill);
        Ok(())
    }

    /// Remove a bill, returning it if it existed
    pub fn delete(&self, id: BillId) -> Result<Option<Bill>, BillError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, BillError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
