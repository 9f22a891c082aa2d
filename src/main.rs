use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use billbling::cli::{
    handle_balance_command, handle_bill_command, handle_export_command, handle_group_command,
    handle_history_command, handle_import_command, handle_member_command, handle_report_command,
    handle_settle_command,
};
use billbling::config::paths::{BillPaths, DATA_DIR_ENV};
use billbling::config::settings::Settings;
use billbling::services::GroupService;
use billbling::storage::Storage;

/// Environment variable holding the tracing filter, e.g. `billbling=debug`
const LOG_ENV: &str = "BILLBLING_LOG";

#[derive(Parser)]
#[command(
    name = "billbling",
    version,
    about = "Split household bills and settle up from the terminal",
    long_about = "BillBling keeps track of who paid for what in a shared household \
                  and works out the fewest payments that settle everyone up."
)]
struct Cli {
    /// Directory holding settings, data files and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the household group in the data directory
    Init {
        /// Group name
        #[arg(short, long, default_value = "Household")]
        name: String,
    },

    /// Show current configuration and paths
    Config,

    /// Group commands
    #[command(subcommand)]
    Group(billbling::cli::GroupCommands),

    /// Member management commands
    #[command(subcommand)]
    Member(billbling::cli::MemberCommands),

    /// Bill management commands
    #[command(subcommand)]
    Bill(billbling::cli::BillCommands),

    /// Record settle-up payments
    #[command(subcommand)]
    Settle(billbling::cli::SettleCommands),

    /// Balances and settlement plans
    #[command(subcommand, alias = "balances")]
    Balance(billbling::cli::BalanceCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(billbling::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(billbling::cli::ExportCommands),

    /// Restore a full JSON or YAML export into an empty data directory
    Import {
        /// Export file written by 'billbling export all'
        file: PathBuf,
    },

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = match cli.data_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => BillPaths::with_base_dir(dir),
        None => BillPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all().context("Failed to load data")?;

    let Some(command) = cli.command else {
        println!("BillBling - split household bills and settle up");
        println!();
        println!("Run 'billbling --help' for usage information.");
        if !storage.is_initialized() {
            println!("Run 'billbling init --name <group>' to get started.");
        }
        return Ok(());
    };

    let needs_group = !matches!(
        command,
        Commands::Init { .. } | Commands::Config | Commands::Import { .. }
    );
    if needs_group && !storage.is_initialized() {
        bail!(
            "No group found in {}. Run 'billbling init --name <group>' first.",
            paths.base_dir().display()
        );
    }

    match command {
        Commands::Init { name } => {
            let group = GroupService::new(&storage).create(&name)?;
            settings.save(&paths)?;
            println!("Created group '{}' at: {}", group.name, paths.base_dir().display());
            println!("Invite code: {}", group.invite_code);
            println!();
            println!("Next, add the people you share bills with:");
            println!("  billbling member add <name>");
        }
        Commands::Config => {
            println!("BillBling Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Settle tolerance: {}", settings.format_money(settings.tolerance()));
            println!("  Default category: {}", settings.default_category);
            println!("  Date format:      {}", settings.date_format);
        }
        Commands::Group(cmd) => handle_group_command(&storage, &settings, cmd)?,
        Commands::Member(cmd) => handle_member_command(&storage, &settings, cmd)?,
        Commands::Bill(cmd) => handle_bill_command(&storage, &settings, cmd)?,
        Commands::Settle(cmd) => handle_settle_command(&storage, &settings, cmd)?,
        Commands::Balance(cmd) => handle_balance_command(&storage, &settings, cmd)
            .context("Balances unavailable")?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, cmd)?,
        Commands::Import { file } => {
            handle_import_command(&storage, &file)?;
            settings.save(&paths)?;
        }
        Commands::History { limit } => handle_history_command(&storage, limit)?,
    }

    Ok(())
}
