//! Budget goal repository
//!
//! Manages loading and saving budget goals through the `tally.budgets` slot.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{BudgetGoal, BudgetGoalId};

use super::port::PersistencePort;

/// Persistence key for the budget goal collection
pub const BUDGETS_KEY: &str = "tally.budgets";

/// Repository for budget goal persistence
pub struct BudgetRepository {
    port: Arc<dyn PersistencePort>,
    data: RwLock<Vec<BudgetGoal>>,
}

impl BudgetRepository {
    /// Create a new, empty budget repository
    pub fn new(port: Arc<dyn PersistencePort>) -> Self {
        Self {
            port,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load goals from the port, starting empty if the slot is unreadable
    pub fn load(&self) -> TallyResult<()> {
        let goals = match self.port.get(BUDGETS_KEY) {
            Ok(Some(text)) => serde_json::from_str::<Vec<BudgetGoal>>(&text).unwrap_or_else(|e| {
                warn!(key = BUDGETS_KEY, error = %e, "Failed to parse stored budgets");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = BUDGETS_KEY, error = %e, "Failed to read stored budgets");
                Vec::new()
            }
        };

        debug!(count = goals.len(), "Loaded budget goals");

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = goals;
        Ok(())
    }

    /// Write all goals to the port
    pub fn save(&self) -> TallyResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let json = serde_json::to_string(&*data)?;
        self.port.set(BUDGETS_KEY, &json)
    }

    /// Get all goals in insertion order
    pub fn get_all(&self) -> TallyResult<Vec<BudgetGoal>> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get the goal for a category (first match if several exist)
    pub fn get_by_category(&self, category: &str) -> TallyResult<Option<BudgetGoal>> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|g| g.category == category).cloned())
    }

    /// Find a goal by full or abbreviated ID
    pub fn find(&self, identifier: &str) -> TallyResult<Option<BudgetGoal>> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|g| g.id.matches(identifier)).cloned())
    }

    /// Append a goal, or replace the goal with the same ID in place
    pub fn upsert(&self, goal: BudgetGoal) -> TallyResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => data.push(goal),
        }
        Ok(())
    }

    /// Delete a goal, returning it if it was present
    pub fn delete(&self, id: BudgetGoalId) -> TallyResult<Option<BudgetGoal>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data
            .iter()
            .position(|g| g.id == id)
            .map(|index| data.remove(index)))
    }
}
