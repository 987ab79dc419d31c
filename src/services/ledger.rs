//! Ledger service
//!
//! Records, removes and lists transactions. Every mutation is followed by a
//! full write of the collection; a failed write is logged and the in-memory
//! change is kept.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Service for ledger management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction type
    pub kind: Option<TransactionType>,
    /// Case-insensitive text matched against description and category
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by type
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by search text
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a transaction passes the filter (ignores the limit)
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                txn.description.to_lowercase().contains(&query)
                    || txn.category.to_lowercase().contains(&query)
            }
            _ => true,
        }
    }
}

/// Outcome of ingesting a batch of imported records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records recorded as new transactions
    pub imported: usize,
    /// Records rejected by validation
    pub skipped: usize,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction dated now
    ///
    /// Invalid entries are rejected before anything is stored.
    pub fn add(&self, entry: NewTransaction) -> TallyResult<Transaction> {
        entry
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let txn = Transaction::record(entry, Utc::now());
        self.storage.transactions.prepend(txn.clone())?;
        self.persist();

        debug!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "Recorded transaction");
        Ok(txn)
    }

    /// Delete a transaction; unknown IDs are a no-op
    pub fn delete(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        let removed = self.storage.transactions.delete(id)?;

        match &removed {
            Some(txn) => {
                self.persist();
                debug!(id = %txn.id, "Deleted transaction");
            }
            None => debug!(id = %id, "Delete ignored, transaction not found"),
        }

        Ok(removed)
    }

    /// Find a transaction by full or abbreviated ID
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    /// Remove every transaction
    ///
    /// `confirmed` is the caller's explicit confirmation; without it nothing
    /// is removed.
    pub fn clear(&self, confirmed: bool) -> TallyResult<usize> {
        if !confirmed {
            debug!("Clear skipped, not confirmed");
            return Ok(0);
        }

        let removed = self.storage.transactions.clear()?;
        self.persist();

        info!(removed, "Cleared all transactions");
        Ok(removed)
    }

    /// All transactions, most recent first
    pub fn all(&self) -> TallyResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// List transactions matching a filter, most recent first
    pub fn list(&self, filter: &TransactionFilter) -> TallyResult<Vec<Transaction>> {
        let mut transactions = self.all()?;
        transactions.retain(|t| filter.matches(t));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Number of transactions
    pub fn count(&self) -> TallyResult<usize> {
        self.storage.transactions.count()
    }

    /// Sum of all income amounts
    pub fn total_income(&self) -> TallyResult<f64> {
        Ok(sum_of(&self.all()?, TransactionType::Income))
    }

    /// Sum of all expense amounts
    pub fn total_expense(&self) -> TallyResult<f64> {
        Ok(sum_of(&self.all()?, TransactionType::Expense))
    }

    /// Total income minus total expense
    pub fn balance(&self) -> TallyResult<f64> {
        let transactions = self.all()?;
        Ok(sum_of(&transactions, TransactionType::Income)
            - sum_of(&transactions, TransactionType::Expense))
    }

    /// Ingest imported records one at a time through `add`
    ///
    /// Each record gets a fresh ID and timestamp. Records that fail
    /// validation are skipped and counted.
    pub fn import(&self, entries: Vec<NewTransaction>) -> TallyResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for entry in entries {
            match self.add(entry) {
                Ok(_) => summary.imported += 1,
                Err(TallyError::Validation(reason)) => {
                    warn!(%reason, "Skipping invalid imported record");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(imported = summary.imported, skipped = summary.skipped, "Import finished");
        Ok(summary)
    }

    fn persist(&self) {
        if let Err(e) = self.storage.transactions.save() {
            warn!(error = %e, "Failed to persist transactions");
        }
    }
}

fn sum_of(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{PersistencePort, TRANSACTIONS_KEY};
    use std::sync::Arc;

    struct FailingPort;

    impl PersistencePort for FailingPort {
        fn get(&self, _key: &str) -> TallyResult<Option<String>> {
            Err(TallyError::Storage("unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> TallyResult<()> {
            Err(TallyError::Storage("read-only".into()))
        }
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);

        let first = service.add(NewTransaction::income(1000.0, "Salary")).unwrap();
        let second = service
            .add(NewTransaction::expense(25.0, "Food").with_description("Groceries"))
            .unwrap();

        let all = service.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(first.description, "Salary");

        let stored = storage.port().get(TRANSACTIONS_KEY).unwrap().unwrap();
        let persisted: Vec<Transaction> = serde_json::from_str(&stored).unwrap();
        assert_eq!(persisted, all);
    }

    #[test]
    fn test_add_rejects_invalid_without_changing_state() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);

        let err = service.add(NewTransaction::expense(0.0, "Food")).unwrap_err();
        assert!(err.is_validation());

        let err = service.add(NewTransaction::expense(10.0, "")).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
        assert!(storage.port().get(TRANSACTIONS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_balance_matches_totals_after_every_add() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);
        let entries = [
            NewTransaction::income(1200.5, "Salary"),
            NewTransaction::expense(13.25, "Food"),
            NewTransaction::expense(99.99, "Bills"),
            NewTransaction::income(0.1, "Gift"),
            NewTransaction::expense(0.2, "Other"),
        ];

        for entry in entries {
            service.add(entry).unwrap();
            let income = service.total_income().unwrap();
            let expense = service.total_expense().unwrap();
            assert_eq!(service.balance().unwrap(), income - expense);
        }

        assert!((service.total_expense().unwrap() - 113.44).abs() < 1e-9);
    }

    #[test]
    fn test_delete_removes_only_that_id() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);
        let keep = service.add(NewTransaction::income(5.0, "Gift")).unwrap();
        let drop = service.add(NewTransaction::expense(3.0, "Food")).unwrap();

        assert!(service.delete(drop.id).unwrap().is_some());

        let all = service.all().unwrap();
        assert!(all.iter().all(|t| t.id != drop.id));
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, keep.id);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);
        service.add(NewTransaction::income(5.0, "Gift")).unwrap();
        let before = service.all().unwrap();

        assert!(service.delete(TransactionId::new()).unwrap().is_none());
        assert_eq!(service.all().unwrap(), before);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);
        service.add(NewTransaction::income(5.0, "Gift")).unwrap();
        service.add(NewTransaction::expense(2.0, "Food")).unwrap();

        assert_eq!(service.clear(false).unwrap(), 0);
        assert_eq!(service.count().unwrap(), 2);

        assert_eq!(service.clear(true).unwrap(), 2);
        assert_eq!(service.count().unwrap(), 0);
        assert_eq!(service.balance().unwrap(), 0.0);
        assert_eq!(
            storage.port().get(TRANSACTIONS_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_list_with_filter() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);
        service.add(NewTransaction::income(100.0, "Salary")).unwrap();
        service
            .add(NewTransaction::expense(20.0, "Food").with_description("Pizza night"))
            .unwrap();
        service
            .add(NewTransaction::expense(40.0, "Entertainment").with_description("Cinema"))
            .unwrap();

        let expenses = service
            .list(&TransactionFilter::new().kind(TransactionType::Expense))
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let pizza = service.list(&TransactionFilter::new().search("PIZZA")).unwrap();
        assert_eq!(pizza.len(), 1);
        assert_eq!(pizza[0].category, "Food");

        let by_category = service.list(&TransactionFilter::new().search("sal")).unwrap();
        assert_eq!(by_category.len(), 1);

        let limited = service.list(&TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].category, "Entertainment");
    }

    #[test]
    fn test_import_assigns_fresh_identity_and_skips_invalid() {
        let storage = Storage::in_memory();
        let service = LedgerService::new(&storage);

        let summary = service
            .import(vec![
                NewTransaction::income(10.0, "Gift"),
                NewTransaction::expense(-1.0, "Food"),
                NewTransaction::expense(4.0, "Transport").with_description("Bus"),
            ])
            .unwrap();

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 1 });
        let all = service.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let storage = Storage::new(Arc::new(FailingPort));
        storage.load_all().unwrap();
        let service = LedgerService::new(&storage);

        let txn = service.add(NewTransaction::expense(7.0, "Food")).unwrap();
        assert_eq!(service.all().unwrap()[0].id, txn.id);
        assert!(service.delete(txn.id).unwrap().is_some());
    }
}
