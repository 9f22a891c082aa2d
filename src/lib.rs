//! BillBling - shared household expenses from the terminal
//!
//! This library records who paid for what in a household group and works out
//! who owes whom. The balance engine reduces the bill history to per-member
//! net balances and then to a short list of transfers that settles everyone.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `balance`: Ledger computation and debt simplification (pure functions)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, bills, the group, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Spending reports
//! - `export`: CSV/JSON/YAML export and the shareable settlement summary
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `billbling` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use billbling::config::{paths::BillPaths, settings::Settings};
//! use billbling::services::BalanceService;
//! use billbling::storage::Storage;
//!
//! let paths = BillPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let (_, transfers) = BalanceService::new(&storage, settings.tolerance()).plan()?;
//! ```

pub mod audit;
pub mod balance;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use balance::{compute_ledger, simplify_debts, Ledger, SettlementTransfer, DEFAULT_TOLERANCE};
pub use error::{BillError, BillResult};
pub use models::{Bill, Member, Money};
