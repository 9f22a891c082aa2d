//! Export module for BillBling
//!
//! - CSV: the bill list, for spreadsheets
//! - JSON / YAML: the whole data directory, schema-versioned and re-importable
//! - Summary: the settlement plan as shareable text

pub mod csv;
pub mod json;
pub mod summary;
pub mod yaml;

pub use self::csv::{export_bills_csv, BILLS_CSV_HEADER};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use summary::settlement_summary_text;
pub use yaml::{export_full_yaml, import_from_yaml};
