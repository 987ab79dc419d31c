//! YAML export and import
//!
//! Writes the same snapshot as the JSON export, prefixed with a comment
//! header.

use std::io::Write;

use super::json::{collect_records, LedgerExport};
use super::ParsedImport;
use crate::error::{TallyError, TallyResult};
use crate::storage::Storage;

/// Export the ledger to YAML
pub fn export_yaml<W: Write>(storage: &Storage, mut writer: W) -> TallyResult<()> {
    let export = LedgerExport::from_storage(storage)?;

    writeln!(writer, "# Tally ledger export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Read transaction records from a YAML snapshot
pub fn import_from_yaml(yaml_str: &str) -> TallyResult<ParsedImport> {
    let document: serde_yaml::Value =
        serde_yaml::from_str(yaml_str).map_err(|e| TallyError::Import(e.to_string()))?;

    let items = document
        .get("transactions")
        .and_then(serde_yaml::Value::as_sequence)
        .ok_or_else(|| TallyError::Import("Invalid file format".into()))?;

    Ok(collect_records(items.iter().cloned().map(serde_yaml::from_value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::services::LedgerService;

    #[test]
    fn test_yaml_export_and_import() {
        let storage = Storage::in_memory();
        let ledger = LedgerService::new(&storage);
        ledger.add(NewTransaction::income(300.0, "Freelance")).unwrap();
        ledger.add(NewTransaction::expense(20.0, "Transport")).unwrap();

        let mut output = Vec::new();
        export_yaml(&storage, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Tally ledger export"));
        assert!(text.contains("totalTransactions: 2"));

        let parsed = import_from_yaml(&text).unwrap();
        assert_eq!(parsed.malformed, 0);
        assert_eq!(
            parsed.records,
            vec![
                NewTransaction::expense(20.0, "Transport").with_description("Transport"),
                NewTransaction::income(300.0, "Freelance").with_description("Freelance"),
            ]
        );
    }

    #[test]
    fn test_yaml_import_requires_transactions() {
        let err = import_from_yaml("exportDate: today\n").unwrap_err();
        assert!(matches!(err, TallyError::Import(_)));
    }
}
