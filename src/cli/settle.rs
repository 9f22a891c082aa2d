//! Settle-up CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::BillResult;
use crate::services::{BillService, MemberService};
use crate::storage::Storage;

use super::parse_amount;

/// Settle subcommands
#[derive(Subcommand)]
pub enum SettleCommands {
    /// Record that one member paid another back
    Record {
        /// Member who paid (name or ID)
        from: String,
        /// Member who received the money (name or ID)
        to: String,
        /// Amount paid
        amount: String,
    },
}

/// Handle a settle command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettleCommands,
) -> BillResult<()> {
    let members = MemberService::new(storage);

    match cmd {
        SettleCommands::Record { from, to, amount } => {
            let amount = parse_amount(&amount)?;
            let from = members.resolve(&from)?;
            let to = members.resolve(&to)?;

            let bill = BillService::new(storage).record_settlement(from.id, to.id, amount)?;

            println!(
                "Recorded: {} paid {} {}",
                from.display_name,
                to.display_name,
                settings.format_money(bill.amount)
            );
        }
    }

    Ok(())
}
