//! User settings for BillBling
//!
//! Currency symbol, settlement tolerance and the category applied to bills
//! that were logged without one.

use serde::{Deserialize, Serialize};

use super::paths::BillPaths;
use crate::balance::DEFAULT_TOLERANCE;
use crate::error::BillError;
use crate::models::Money;

/// User settings for BillBling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display and shared summaries
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Balances at or below this magnitude count as settled
    #[serde(default = "default_tolerance")]
    pub settle_tolerance: Money,

    /// Category reported for bills without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_tolerance() -> Money {
    DEFAULT_TOLERANCE
}

fn default_category() -> String {
    "Other".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            settle_tolerance: default_tolerance(),
            default_category: default_category(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written back; callers decide when to persist.
    pub fn load_or_create(paths: &BillPaths) -> Result<Self, BillError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BillError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BillError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillPaths) -> Result<(), BillError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BillError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BillError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Tolerance handed to the settlement planner
    pub fn tolerance(&self) -> Money {
        self.settle_tolerance.abs()
    }

    /// Reject values the rest of the tool cannot work with
    pub fn validate(&self) -> Result<(), BillError> {
        if self.settle_tolerance.is_negative() {
            return Err(BillError::Config(format!(
                "settle_tolerance must not be negative (got {})",
                self.settle_tolerance.amount()
            )));
        }
        if self.default_category.trim().is_empty() {
            return Err(BillError::Config(
                "default_category must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
