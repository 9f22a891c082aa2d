//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats, and for
//! restoring a full export into a fresh data directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{BillError, BillResult};
use crate::export::{
    export_bills_csv, export_full_json, export_full_yaml, import_from_json, import_from_yaml,
    settlement_summary_text, FullExport,
};
use crate::services::{BalanceService, MemberService};
use crate::storage::Storage;

use super::create_output;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full database)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export bills to CSV
    Bills {
        /// Output file path
        output: PathBuf,
    },

    /// Write the settlement summary text to a file
    Summary {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> BillResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Bills { output } => {
            let writer = create_output(&output)?;
            export_bills_csv(storage, writer, &settings.date_format)?;

            let count = storage.bills.count()?;
            println!("Exported {} bills to: {}", count, output.display());
        }

        ExportCommands::Summary { output } => {
            let (_, transfers) = BalanceService::new(storage, settings.tolerance()).plan()?;
            let members = MemberService::new(storage).list()?;
            let group = storage.group.get()?;
            let text = settlement_summary_text(
                group.as_ref(),
                &members,
                &transfers,
                &settings.currency_symbol,
            );

            let mut writer = create_output(&output)?;
            writeln!(writer, "{}", text)
                .and_then(|_| writer.flush())
                .map_err(|e| BillError::Export(format!("Failed to write summary: {}", e)))?;
            println!("Settlement summary written to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================");
            println!();
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            println!();
            println!("Data to export:");
            println!("  Members:     {}", export.metadata.member_count);
            println!("  Bills:       {}", export.metadata.bill_count);
            println!("  Settlements: {}", export.metadata.settlement_count);

            if let (Some(earliest), Some(latest)) =
                (&export.metadata.earliest_bill, &export.metadata.latest_bill)
            {
                println!();
                println!("Bill date range: {} to {}", earliest, latest);
            }

            if let Err(problem) = export.validate() {
                println!();
                println!("Warning: {}", problem);
            }
        }
    }

    Ok(())
}

/// Restore a full JSON or YAML export into an empty data directory
///
/// The format follows the file extension; anything other than `.yaml` or
/// `.yml` is read as JSON.
pub fn handle_import_command(storage: &Storage, file: &Path) -> BillResult<()> {
    let contents = std::fs::read_to_string(file).map_err(|e| {
        BillError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let is_yaml = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let export = if is_yaml {
        import_from_yaml(&contents)?
    } else {
        import_from_json(&contents)?
    };

    export.restore(storage)?;

    let group_name = export.group.as_ref().map(|g| g.name.as_str()).unwrap_or_default();
    println!("Imported group '{}' from: {}", group_name, file.display());
    println!(
        "  {} members, {} bills ({} settlements)",
        export.members.len(),
        export.bills.len(),
        export.bills.iter().filter(|b| b.is_settlement).count()
    );
    Ok(())
}
