//! Bill CLI commands
//!
//! Implements CLI commands for recording and browsing shared expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_bill_details, format_bill_list};
use crate::error::{BillError, BillResult};
use crate::services::{BillService, MemberService, NewBill};
use crate::storage::Storage;

use super::parse_amount;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Record a shared expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount paid (e.g. 42.50)
        amount: String,
        /// Member who paid (name or ID)
        #[arg(short = 'p', long)]
        paid_by: String,
        /// Members sharing the cost; defaults to everyone
        #[arg(short = 's', long = "split", value_delimiter = ',')]
        participants: Vec<String>,
        /// Spending category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List bills, newest first
    List {
        /// Number of bills to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include settle-up payments
        #[arg(long)]
        all: bool,
    },
    /// Show bill details
    Show {
        /// Bill ID
        bill: String,
    },
    /// Delete a bill
    Delete {
        /// Bill ID
        bill: String,
    },
    /// Search bills by description, category or payer
    Search {
        /// Text to look for
        term: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BillCommands,
) -> BillResult<()> {
    let service = BillService::new(storage);
    let member_service = MemberService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BillCommands::Add {
            description,
            amount,
            paid_by,
            participants,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let payer = member_service.resolve(&paid_by)?;
            let participants = participants
                .iter()
                .map(|p| member_service.resolve(p).map(|m| m.id))
                .collect::<BillResult<Vec<_>>>()?;

            let bill = service.add(NewBill {
                description,
                amount,
                paid_by: payer.id,
                participants,
                category,
            })?;

            println!(
                "Added bill: {} {}",
                bill.description,
                settings.format_money(bill.amount)
            );
            println!("  ID: {}", bill.id);
            if let Some(share) = bill.share() {
                println!(
                    "  Split {} ways, {} each",
                    bill.participants.len(),
                    settings.format_money(share)
                );
            }
        }

        BillCommands::List { limit, all } => {
            let members = member_service.list()?;
            let bills: Vec<_> = service
                .list()?
                .into_iter()
                .filter(|b| all || !b.is_settlement)
                .take(limit)
                .collect();
            print!(
                "{}",
                format_bill_list(&bills, &members, symbol, &settings.date_format)
            );
        }

        BillCommands::Show { bill } => {
            let bill = service
                .find(&bill)?
                .ok_or_else(|| BillError::bill_not_found(&bill))?;
            let members = member_service.list()?;
            print!(
                "{}",
                format_bill_details(&bill, &members, symbol, &settings.date_format)
            );
        }

        BillCommands::Delete { bill } => {
            let found = service
                .find(&bill)?
                .ok_or_else(|| BillError::bill_not_found(&bill))?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted bill: {} {}",
                deleted.description,
                settings.format_money(deleted.amount)
            );
        }

        BillCommands::Search { term } => {
            let members = member_service.list()?;
            let bills = service.search(&term)?;
            print!(
                "{}",
                format_bill_list(&bills, &members, symbol, &settings.date_format)
            );
        }
    }

    Ok(())
}
