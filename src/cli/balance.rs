//! Balance CLI commands
//!
//! `show` prints the full picture, `plan` only the transfers, and `share`
//! the chat-ready summary text.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_balance_summary, format_transfers};
use crate::error::BillResult;
use crate::export::settlement_summary_text;
use crate::services::{BalanceService, MemberService};
use crate::storage::Storage;

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Show totals, per-member balances and the settlement plan
    Show,
    /// Show who should pay whom to settle up
    Plan,
    /// Print the settlement plan as text for sharing
    Share,
}

/// Handle a balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BalanceCommands,
) -> BillResult<()> {
    let service = BalanceService::new(storage, settings.tolerance());
    let symbol = &settings.currency_symbol;

    match cmd {
        BalanceCommands::Show => {
            let summary = service.summary()?;
            print!("{}", format_balance_summary(&summary, symbol));
        }

        BalanceCommands::Plan => {
            let (_, transfers) = service.plan()?;
            let members = MemberService::new(storage).list()?;
            print!("{}", format_transfers(&members, &transfers, symbol));
        }

        BalanceCommands::Share => {
            let (_, transfers) = service.plan()?;
            let members = MemberService::new(storage).list()?;
            let group = storage.group.get()?;
            println!(
                "{}",
                settlement_summary_text(group.as_ref(), &members, &transfers, symbol)
            );
        }
    }

    Ok(())
}
