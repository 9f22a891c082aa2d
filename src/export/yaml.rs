//! Full YAML export, readable by humans and re-importable

use std::io::Write;

use crate::error::{BillError, BillResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full data directory to YAML with a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> BillResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# BillBling export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BillError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BillError::Export(e.to_string()))
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> BillResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BillError::Import(e.to_string()))?;

    export.validate().map_err(BillError::Import)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillPaths;
    use crate::models::{Bill, Member, Money};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(BillPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage.load_all().unwrap();

        let member = Member::new("Mina");
        storage.members.upsert(member.clone()).unwrap();
        storage
            .bills
            .upsert(
                Bill::new("Cleaning supplies", Money::from_cents(1899), member.id, vec![member.id])
                    .with_category("Household"),
            )
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# BillBling export"));
        assert!(yaml.contains("Cleaning supplies"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.members[0].display_name, "Mina");
        assert_eq!(imported.bills[0].amount, Money::from_cents(1899));
        assert_eq!(imported.bills[0].category.as_deref(), Some("Household"));
    }

    #[test]
    fn test_invalid_yaml_is_import_error() {
        assert!(matches!(
            import_from_yaml("schema_version: [unterminated"),
            Err(BillError::Import(_))
        ));
    }
}
