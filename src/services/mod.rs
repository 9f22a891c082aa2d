//! Service layer for BillBling
//!
//! Services validate input, keep storage and the audit log in step, and feed
//! the balance engine consistent snapshots.

pub mod balance;
pub mod bill;
pub mod group;
pub mod member;

pub use balance::{BalanceService, BalanceSummary};
pub use bill::{BillService, NewBill};
pub use group::GroupService;
pub use member::MemberService;
