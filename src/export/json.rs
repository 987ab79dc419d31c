//! JSON export and import
//!
//! The snapshot layout (`exportDate`, `totalTransactions`, `transactions`)
//! is also the layout accepted by [`import_from_json`].

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ParsedImport;
use crate::error::{TallyError, TallyResult};
use crate::models::{NewTransaction, Transaction};
use crate::storage::Storage;

/// Ledger snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Export timestamp
    #[serde(rename = "exportDate")]
    pub exported_at: DateTime<Utc>,

    /// Number of transactions in the snapshot
    #[serde(rename = "totalTransactions")]
    pub transaction_count: usize,

    /// All transactions, most recent first
    pub transactions: Vec<Transaction>,
}

impl LedgerExport {
    /// Snapshot a list of transactions
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            exported_at: Utc::now(),
            transaction_count: transactions.len(),
            transactions,
        }
    }

    /// Snapshot the ledger held in storage
    pub fn from_storage(storage: &Storage) -> TallyResult<Self> {
        Ok(Self::new(storage.transactions.get_all()?))
    }
}

/// Export the ledger to JSON
pub fn export_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> TallyResult<()> {
    let export = LedgerExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Read transaction records from a JSON document
///
/// The document must be an object with a `transactions` array. Other
/// snapshot fields are not checked.
pub fn import_from_json(json_str: &str) -> TallyResult<ParsedImport> {
    let document: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| TallyError::Import(e.to_string()))?;

    let items = document
        .get("transactions")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| TallyError::Import("Invalid file format".into()))?;

    Ok(collect_records(items.iter().cloned().map(serde_json::from_value)))
}

/// Collect records, counting the ones that failed to deserialize
pub(super) fn collect_records<E: std::fmt::Display>(
    items: impl Iterator<Item = Result<NewTransaction, E>>,
) -> ParsedImport {
    let mut parsed = ParsedImport::default();

    for (index, item) in items.enumerate() {
        match item {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed import record");
                parsed.malformed += 1;
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LedgerService;

    fn sample_storage() -> Storage {
        let storage = Storage::in_memory();
        let ledger = LedgerService::new(&storage);
        ledger.add(NewTransaction::income(2500.0, "Salary")).unwrap();
        ledger
            .add(NewTransaction::expense(42.5, "Food").with_description("Groceries"))
            .unwrap();
        storage
    }

    #[test]
    fn test_snapshot_layout() {
        let storage = sample_storage();

        let mut output = Vec::new();
        export_json(&storage, &mut output, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["totalTransactions"], 2);
        assert!(value["exportDate"].is_string());
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["transactions"][0]["description"], "Groceries");
    }

    #[test]
    fn test_empty_ledger_exports_empty_snapshot() {
        let export = LedgerExport::from_storage(&Storage::in_memory()).unwrap();
        assert_eq!(export.transaction_count, 0);
        assert!(export.transactions.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_entries_not_identity() {
        let source = sample_storage();
        let mut output = Vec::new();
        export_json(&source, &mut output, false).unwrap();

        let parsed = import_from_json(std::str::from_utf8(&output).unwrap()).unwrap();
        assert_eq!(parsed.malformed, 0);

        let target = Storage::in_memory();
        let ledger = LedgerService::new(&target);
        ledger.import(parsed.records).unwrap();

        let mut before: Vec<_> = source
            .transactions
            .get_all()
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.amount.to_bits(), t.category.clone(), t.description.clone()))
            .collect();
        let mut after: Vec<_> = ledger
            .all()
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.amount.to_bits(), t.category.clone(), t.description.clone()))
            .collect();
        before.sort_by(|a, b| a.2.cmp(&b.2));
        after.sort_by(|a, b| a.2.cmp(&b.2));
        assert_eq!(before, after);

        let source_ids: Vec<_> = source.transactions.get_all().unwrap().iter().map(|t| t.id).collect();
        assert!(ledger.all().unwrap().iter().all(|t| !source_ids.contains(&t.id)));
    }

    #[test]
    fn test_import_requires_transactions_array() {
        let err = import_from_json(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, TallyError::Import(ref msg) if msg == "Invalid file format"));

        let err = import_from_json(r#"{"transactions": {}}"#).unwrap_err();
        assert!(matches!(err, TallyError::Import(_)));

        assert!(import_from_json("not json").is_err());
    }

    #[test]
    fn test_import_counts_malformed_records() {
        let parsed = import_from_json(
            r#"{"transactions": [
                {"id": "x", "type": "income", "amount": 10, "category": "Gift", "date": "2020-01-01"},
                {"type": "transfer", "amount": 5, "category": "Food"},
                {"type": "expense", "category": "Food"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0], NewTransaction::income(10.0, "Gift"));
        assert_eq!(parsed.malformed, 2);
        assert_eq!(parsed.total(), 3);
    }
}
