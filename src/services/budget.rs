//! Budget service
//!
//! Manages budget goals (one per category) and measures spending against
//! them. Spend figures are supplied by the caller, typically from
//! [`category_spending`](crate::services::aggregation::category_spending).

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{BudgetGoal, BudgetGoalId, BudgetPeriod, BudgetProgress};
use crate::storage::Storage;

/// Service for budget goal management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a goal for a category
    ///
    /// Rejects non-positive amounts and categories that already have a goal.
    pub fn add_goal(
        &self,
        category: &str,
        amount: f64,
        period: BudgetPeriod,
    ) -> TallyResult<BudgetGoal> {
        let goal = BudgetGoal::new(category, amount, period);
        goal.validate().map_err(TallyError::Validation)?;

        if self.storage.budgets.get_by_category(&goal.category)?.is_some() {
            return Err(TallyError::Duplicate {
                entity_type: "Budget goal",
                identifier: goal.category,
            });
        }

        self.storage.budgets.upsert(goal.clone())?;
        self.persist();

        debug!(id = %goal.id, category = %goal.category, amount = goal.amount, "Added budget goal");
        Ok(goal)
    }

    /// Replace a goal as a whole, keeping its ID
    pub fn replace_goal(&self, goal: BudgetGoal) -> TallyResult<BudgetGoal> {
        goal.validate().map_err(TallyError::Validation)?;

        let goals = self.storage.budgets.get_all()?;
        if !goals.iter().any(|g| g.id == goal.id) {
            return Err(TallyError::goal_not_found(goal.id.to_string()));
        }
        if goals
            .iter()
            .any(|g| g.id != goal.id && g.category == goal.category)
        {
            return Err(TallyError::Duplicate {
                entity_type: "Budget goal",
                identifier: goal.category,
            });
        }

        self.storage.budgets.upsert(goal.clone())?;
        self.persist();
        Ok(goal)
    }

    /// Delete a goal; unknown IDs are a no-op
    pub fn delete_goal(&self, id: BudgetGoalId) -> TallyResult<Option<BudgetGoal>> {
        let removed = self.storage.budgets.delete(id)?;
        if removed.is_some() {
            self.persist();
        }
        Ok(removed)
    }

    /// Find a goal by full or abbreviated ID, or by category name
    pub fn find(&self, identifier: &str) -> TallyResult<Option<BudgetGoal>> {
        if let Some(goal) = self.storage.budgets.find(identifier)? {
            return Ok(Some(goal));
        }

        let goals = self.storage.budgets.get_all()?;
        Ok(goals
            .into_iter()
            .find(|g| g.category.eq_ignore_ascii_case(identifier.trim())))
    }

    /// All goals in creation order
    pub fn list(&self) -> TallyResult<Vec<BudgetGoal>> {
        self.storage.budgets.get_all()
    }

    /// Progress of `spent` against the goal for `category`
    ///
    /// Returns `None` when the category has no goal.
    pub fn progress(&self, category: &str, spent: f64) -> TallyResult<Option<BudgetProgress>> {
        Ok(self
            .storage
            .budgets
            .get_by_category(category)?
            .map(|goal| BudgetProgress::compute(&goal, spent)))
    }

    /// Progress for every goal given per-category spending
    pub fn overview(&self, spending: &BTreeMap<String, f64>) -> TallyResult<Vec<BudgetProgress>> {
        Ok(self
            .list()?
            .iter()
            .map(|goal| {
                let spent = spending.get(&goal.category).copied().unwrap_or(0.0);
                BudgetProgress::compute(goal, spent)
            })
            .collect())
    }

    /// Sum of all goal amounts
    pub fn total_budgeted(&self) -> TallyResult<f64> {
        Ok(self.list()?.iter().map(|g| g.amount).sum())
    }

    fn persist(&self) {
        if let Err(e) = self.storage.budgets.save() {
            warn!(error = %e, "Failed to persist budget goals");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BUDGETS_KEY;

    #[test]
    fn test_add_goal_and_total() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);

        service.add_goal("Food", 300.0, BudgetPeriod::Monthly).unwrap();
        service.add_goal("Bills", 450.5, BudgetPeriod::Monthly).unwrap();

        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(service.total_budgeted().unwrap(), 750.5);
        assert!(storage.port().get(BUDGETS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_add_goal_rejects_non_positive_amount() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);

        assert!(service
            .add_goal("Food", 0.0, BudgetPeriod::Monthly)
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_goal("Food", -10.0, BudgetPeriod::Weekly)
            .unwrap_err()
            .is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_add_goal_rejects_duplicate_category() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.add_goal("Food", 100.0, BudgetPeriod::Monthly).unwrap();

        let err = service
            .add_goal("Food", 200.0, BudgetPeriod::Yearly)
            .unwrap_err();
        assert!(matches!(err, TallyError::Duplicate { .. }));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_progress_over_budget() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.add_goal("Food", 100.0, BudgetPeriod::Monthly).unwrap();

        let progress = service.progress("Food", 150.0).unwrap().unwrap();
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(progress.is_over_budget);
    }

    #[test]
    fn test_progress_without_goal_is_none() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);

        assert!(service.progress("Food", 0.0).unwrap().is_none());
    }

    #[test]
    fn test_delete_goal() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let goal = service.add_goal("Health", 60.0, BudgetPeriod::Monthly).unwrap();

        assert!(service.delete_goal(goal.id).unwrap().is_some());
        assert!(service.delete_goal(goal.id).unwrap().is_none());
        assert_eq!(service.total_budgeted().unwrap(), 0.0);
    }

    #[test]
    fn test_replace_goal() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let mut goal = service.add_goal("Food", 100.0, BudgetPeriod::Monthly).unwrap();
        service.add_goal("Bills", 100.0, BudgetPeriod::Monthly).unwrap();

        goal.amount = 80.0;
        goal.period = BudgetPeriod::Weekly;
        service.replace_goal(goal.clone()).unwrap();
        assert_eq!(service.find("Food").unwrap().unwrap(), goal);

        goal.category = "Bills".into();
        assert!(matches!(
            service.replace_goal(goal).unwrap_err(),
            TallyError::Duplicate { .. }
        ));

        let stranger = BudgetGoal::new("Other", 10.0, BudgetPeriod::Monthly);
        assert!(service.replace_goal(stranger).unwrap_err().is_not_found());
    }

    #[test]
    fn test_overview_uses_spending_map() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.add_goal("Food", 200.0, BudgetPeriod::Monthly).unwrap();
        service.add_goal("Bills", 100.0, BudgetPeriod::Monthly).unwrap();

        let mut spending = BTreeMap::new();
        spending.insert("Food".to_string(), 50.0);

        let overview = service.overview(&spending).unwrap();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].percentage, 25.0);
        assert_eq!(overview[1].spent, 0.0);
        assert_eq!(overview[1].remaining, 100.0);
    }
}
