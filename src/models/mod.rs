//! Core data models for BillBling
//!
//! This module contains the data structures of the shared-expense domain:
//! members, bills, the household group, and the money type they share.

pub mod bill;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;

pub use bill::{Bill, BillValidationError};
pub use group::{Group, GroupValidationError};
pub use ids::{BillId, GroupId, MemberId};
pub use member::{Member, MemberValidationError};
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
