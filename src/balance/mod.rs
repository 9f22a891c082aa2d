//! Balance engine
//!
//! Pure functions that turn a snapshot of members and bills into per-member
//! balances and a settlement plan. Nothing here touches storage, settings or
//! the clock, so the engine can run on any consistent snapshot, from any
//! thread, as often as needed.
//!
//! # Example
//!
//! ```
//! use billbling::balance::{compute_ledger, simplify_debts};
//! use billbling::models::{Bill, Member, Money};
//!
//! let alice = Member::new("Alice");
//! let bob = Member::new("Bob");
//! let members = vec![alice.clone(), bob.clone()];
//! let bills = vec![Bill::new(
//!     "Dinner",
//!     Money::from_cents(10000),
//!     alice.id,
//!     vec![alice.id, bob.id],
//! )];
//!
//! let ledger = compute_ledger(&members, &bills)?;
//! let transfers = simplify_debts(&members, &ledger);
//!
//! assert_eq!(transfers.len(), 1);
//! assert_eq!(transfers[0].from, bob.id);
//! assert_eq!(transfers[0].amount, Money::from_cents(5000));
//! # Ok::<(), billbling::BillError>(())
//! ```

pub mod ledger;
pub mod settlement;
pub mod verify;

use rust_decimal::Decimal;

use crate::models::Money;

pub use ledger::{compute_ledger, Ledger, LedgerEntry};
pub use settlement::{simplify_debts, SettlementPlanner, SettlementTransfer};
pub use verify::{apply_transfers, residual_imbalances, verify_settlement};

/// Balances at or below this magnitude count as settled (one cent)
pub const DEFAULT_TOLERANCE: Money = Money::new(Decimal::from_parts(1, 0, 0, false, 2));
