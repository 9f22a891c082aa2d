//! Member CLI commands
//!
//! Implements CLI commands for managing the people in the group.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_member_details, format_member_list};
use crate::error::BillResult;
use crate::services::{BalanceService, MemberService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to the group
    Add {
        /// Display name
        name: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List members with their net balances
    List,
    /// Show member details
    Show {
        /// Member name or ID
        member: String,
    },
    /// Rename a member
    Rename {
        /// Member name or ID
        member: String,
        /// New display name
        name: String,
    },
    /// Remove a member who appears on no bill
    Remove {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MemberCommands,
) -> BillResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, email } => {
            let member = service.add(&name, email.as_deref())?;
            println!("Added member: {}", member.display_name);
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            let members = service.list()?;
            let ledger = BalanceService::new(storage, settings.tolerance()).ledger()?;
            print!(
                "{}",
                format_member_list(&members, Some(&ledger), &settings.currency_symbol)
            );
        }

        MemberCommands::Show { member } => {
            let member = service.resolve(&member)?;
            let bill_count = storage.bills.get_involving(member.id)?.len();
            let ledger = BalanceService::new(storage, settings.tolerance()).ledger()?;
            print!(
                "{}",
                format_member_details(
                    &member,
                    ledger.get(member.id),
                    bill_count,
                    &settings.currency_symbol
                )
            );
        }

        MemberCommands::Rename { member, name } => {
            let before = service.resolve(&member)?;
            let renamed = service.rename(before.id, &name)?;
            println!(
                "Renamed member: {} -> {}",
                before.display_name, renamed.display_name
            );
        }

        MemberCommands::Remove { member } => {
            let member = service.resolve(&member)?;
            let removed = service.remove(member.id)?;
            println!("Removed member: {}", removed.display_name);
        }
    }

    Ok(())
}
