//! Path management for BillBling
//!
//! Everything lives under a single base directory:
//!
//! ```text
//! <base>/config.json        settings
//! <base>/audit.log          append-only change log
//! <base>/data/group.json    the household group
//! <base>/data/members.json
//! <base>/data/bills.json
//! ```
//!
//! ## Base directory resolution
//!
//! 1. `BILLBLING_DATA_DIR` environment variable (if set and non-empty)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/billbling` or `~/.config/billbling`
//! 3. Windows: `%APPDATA%\billbling`

use std::path::{Path, PathBuf};

use crate::error::BillError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BILLBLING_DATA_DIR";

const APP_DIR_NAME: &str = "billbling";

/// Resolves every file BillBling reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPaths {
    base_dir: PathBuf,
}

impl BillPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config
    /// directory cannot be determined.
    pub fn new() -> Result<Self, BillError> {
        match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => Ok(Self::with_base_dir(custom.into())),
            _ => Ok(Self::with_base_dir(resolve_default_path()?)),
        }
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the entity files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn group_file(&self) -> PathBuf {
        self.data_dir().join("group.json")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    /// Create the base and data directories if they are missing
    pub fn ensure_directories(&self) -> Result<(), BillError> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            BillError::Io(format!(
                "Failed to create data directory {}: {}",
                self.data_dir().display(),
                e
            ))
        })
    }

    /// True once `init` has written a group file
    pub fn is_initialized(&self) -> bool {
        self.group_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BillError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        BillError::Config(format!(
            "Could not determine home directory; set {}",
            DATA_DIR_ENV
        ))
    })?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BillError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BillError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
}
