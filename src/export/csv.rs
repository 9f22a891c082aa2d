//! CSV export of the bill list

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BillError, BillResult};
use crate::models::MemberId;
use crate::storage::Storage;

/// Header row of the bills export
pub const BILLS_CSV_HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Description",
    "Category",
    "Paid By",
    "Participants",
    "Amount",
    "Settlement",
];

/// Export every bill, newest first
///
/// Member ids are replaced by display names; participants are joined with
/// `"; "`. Amounts are plain decimals with two places and no symbol.
pub fn export_bills_csv<W: Write>(
    storage: &Storage,
    writer: W,
    date_format: &str,
) -> BillResult<()> {
    let names: HashMap<MemberId, String> = storage
        .members
        .get_all()?
        .into_iter()
        .map(|m| (m.id, m.display_name))
        .collect();
    let name_of = |id: &MemberId| names.get(id).cloned().unwrap_or_else(|| id.to_string());

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(BILLS_CSV_HEADER)
        .map_err(|e| BillError::Export(e.to_string()))?;

    for bill in storage.bills.get_all()? {
        let participants: Vec<String> = bill.participants.iter().map(name_of).collect();

        csv_writer
            .write_record([
                bill.id.to_full_string(),
                bill.created_at.format(date_format).to_string(),
                bill.description.clone(),
                bill.category.clone().unwrap_or_default(),
                name_of(&bill.paid_by),
                participants.join("; "),
                format!("{:.2}", bill.amount.rounded().amount()),
                bill.is_settlement.to_string(),
            ])
            .map_err(|e| BillError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BillError::Export(e.to_string()))
}
