//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balance;
pub mod bill;
pub mod export;
pub mod group;
pub mod history;
pub mod member;
pub mod report;
pub mod settle;

pub use balance::{handle_balance_command, BalanceCommands};
pub use bill::{handle_bill_command, BillCommands};
pub use export::{handle_export_command, handle_import_command, ExportCommands, ExportFormat};
pub use group::{handle_group_command, GroupCommands};
pub use history::handle_history_command;
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settle::{handle_settle_command, SettleCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{BillError, BillResult};
use crate::models::{Money, MAX_AMOUNT};

/// Parse a user-supplied amount such as `42`, `12.50` or `$1,200`
pub(crate) fn parse_amount(input: &str) -> BillResult<Money> {
    let amount = Money::parse(input).map_err(|e| BillError::Validation(e.to_string()))?;
    if amount > MAX_AMOUNT {
        return Err(BillError::Validation(format!(
            "Amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    Ok(amount)
}

/// Open `path` for writing an export
pub(crate) fn create_output(path: &Path) -> BillResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BillError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
