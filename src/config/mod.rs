//! Configuration for BillBling
//!
//! Directory resolution and the user settings file.

pub mod paths;
pub mod settings;

pub use paths::BillPaths;
pub use settings::Settings;
