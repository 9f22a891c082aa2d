//! Reports for BillBling

pub mod spending;

pub use spending::{SpendingByCategory, SpendingReport};
