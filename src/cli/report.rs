//! CLI commands for reports

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::BillResult;
use crate::reports::SpendingReport;
use crate::storage::Storage;

use super::create_output;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category, settle-up payments excluded
    Spending {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BillResult<()> {
    match cmd {
        ReportCommands::Spending { output, top } => {
            let mut report = SpendingReport::generate(storage, &settings.default_category)?;

            if let Some(limit) = top {
                report.categories = report.top_categories(limit).to_vec();
            }

            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Spending report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&settings.currency_symbol)),
            }
        }
    }

    Ok(())
}
