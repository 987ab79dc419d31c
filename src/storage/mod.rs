//! Storage layer for Tally
//!
//! Repositories keep their collections in memory and write them through a
//! [`PersistencePort`]. The file-backed port writes atomically.

pub mod budgets;
pub mod file_io;
pub mod port;
pub mod transactions;

pub use budgets::{BudgetRepository, BUDGETS_KEY};
pub use file_io::{read_text, write_atomic};
pub use port::{FilePort, MemoryPort, PersistencePort};
pub use transactions::{TransactionRepository, TRANSACTIONS_KEY};

use std::sync::Arc;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    port: Arc<dyn PersistencePort>,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create storage on top of any persistence port
    pub fn new(port: Arc<dyn PersistencePort>) -> Self {
        Self {
            transactions: TransactionRepository::new(port.clone()),
            budgets: BudgetRepository::new(port.clone()),
            port,
        }
    }

    /// Open file-backed storage in the data directory
    pub fn open(paths: &TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;
        Ok(Self::new(Arc::new(FilePort::new(paths.data_dir()))))
    }

    /// Create storage backed by memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPort::new()))
    }

    /// Get the underlying persistence port
    pub fn port(&self) -> &Arc<dyn PersistencePort> {
        &self.port
    }

    /// Load all data from the port
    pub fn load_all(&self) -> Result<(), TallyError> {
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }
}
