//! Group CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::BillResult;
use crate::services::{BalanceService, GroupService, MemberService};
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Show the group, its invite code and members
    Show,
    /// Rename the group
    Rename {
        /// New group name
        name: String,
    },
    /// Show the invite code
    Invite {
        /// Issue a new code, invalidating the current one
        #[arg(long)]
        regenerate: bool,
    },
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> BillResult<()> {
    let service = GroupService::new(storage);

    match cmd {
        GroupCommands::Show => {
            let group = service.get()?;
            let members = MemberService::new(storage).list()?;

            println!("Group:       {}", group.name);
            println!("ID:          {}", group.id);
            println!("Invite code: {}", group.invite_code);
            println!("Created:     {}", group.created_at.format("%Y-%m-%d"));
            println!();

            // A broken bill set should not hide the member roster
            let ledger = BalanceService::new(storage, settings.tolerance())
                .ledger()
                .ok();
            print!(
                "{}",
                crate::display::format_member_list(
                    &members,
                    ledger.as_ref(),
                    &settings.currency_symbol
                )
            );
        }

        GroupCommands::Rename { name } => {
            let group = service.rename(&name)?;
            println!("Renamed group to: {}", group.name);
        }

        GroupCommands::Invite { regenerate } => {
            let group = if regenerate {
                service.regenerate_invite_code()?
            } else {
                service.get()?
            };
            println!("Invite code for {}: {}", group.name, group.invite_code);
        }
    }

    Ok(())
}
