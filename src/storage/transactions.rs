//! Transaction repository
//!
//! Holds the ledger in memory, most recent first, and mirrors it into the
//! `tally.transactions` slot of the persistence port.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{Transaction, TransactionId};

use super::port::PersistencePort;

/// Persistence key for the transaction collection
pub const TRANSACTIONS_KEY: &str = "tally.transactions";

/// Repository for transaction persistence
pub struct TransactionRepository {
    port: Arc<dyn PersistencePort>,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new, empty transaction repository
    pub fn new(port: Arc<dyn PersistencePort>) -> Self {
        Self {
            port,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from the port
    ///
    /// Missing or malformed data leaves the repository empty; the condition
    /// is logged rather than returned.
    pub fn load(&self) -> TallyResult<()> {
        let transactions = match self.port.get(TRANSACTIONS_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Transaction>>(&text) {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!(key = TRANSACTIONS_KEY, error = %e, "Failed to parse stored transactions");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = TRANSACTIONS_KEY, error = %e, "Failed to read stored transactions");
                Vec::new()
            }
        };

        debug!(count = transactions.len(), "Loaded transactions");
        *self.write()? = transactions;
        Ok(())
    }

    /// Write the full collection to the port
    pub fn save(&self) -> TallyResult<()> {
        let data = self.read()?;
        let json = serde_json::to_string(&*data)?;
        self.port.set(TRANSACTIONS_KEY, &json)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    /// Find a transaction by full or abbreviated ID
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Transaction>> {
        Ok(self
            .read()?
            .iter()
            .find(|t| t.id.matches(identifier))
            .cloned())
    }

    /// Get all transactions, most recent first
    pub fn get_all(&self) -> TallyResult<Vec<Transaction>> {
        Ok(self.read()?.clone())
    }

    /// Insert a transaction at the front of the collection
    pub fn prepend(&self, txn: Transaction) -> TallyResult<()> {
        self.write()?.insert(0, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it was present
    pub fn delete(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|t| t.id == id)
            .map(|index| data.remove(index)))
    }

    /// Remove every transaction, returning how many were removed
    pub fn clear(&self) -> TallyResult<usize> {
        let mut data = self.write()?;
        let removed = data.len();
        data.clear();
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> TallyResult<usize> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> TallyResult<RwLockReadGuard<'_, Vec<Transaction>>> {
        self.data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TallyResult<RwLockWriteGuard<'_, Vec<Transaction>>> {
        self.data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
