//! Budget goal model
//!
//! A goal caps spending in one category. The period is informational: the
//! spend figure compared against a goal is supplied by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::BudgetGoalId;

/// Period a budget goal applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown budget period '{}' (use weekly, monthly or yearly)",
                other
            )),
        }
    }
}

/// A spending ceiling for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// Unique identifier
    pub id: BudgetGoalId,

    /// Category the goal applies to
    pub category: String,

    /// Target ceiling for the period
    pub amount: f64,

    /// Informational period
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl BudgetGoal {
    /// Create a new goal with a fresh id
    pub fn new(category: impl Into<String>, amount: f64, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetGoalId::new(),
            category: category.into().trim().to_string(),
            amount,
            period,
        }
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(format!(
                "Budget amount must be greater than zero (got {})",
                self.amount
            ));
        }

        if self.category.trim().is_empty() {
            return Err("Budget category is required".into());
        }

        Ok(())
    }
}

/// Progress of spending against a goal
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub goal: BudgetGoal,
    /// Amount spent in the goal's category
    pub spent: f64,
    /// Share of the goal used, 0 to 100
    pub percentage: f64,
    /// Amount left before the ceiling, never negative
    pub remaining: f64,
    pub is_over_budget: bool,
}

impl BudgetProgress {
    /// Compare a spend figure against a goal
    ///
    /// `spent` is reported as given, but a negative or NaN figure counts as
    /// nothing spent for the derived fields.
    pub fn compute(goal: &BudgetGoal, spent: f64) -> Self {
        let used = if spent > 0.0 { spent } else { 0.0 };
        let is_over_budget = used > goal.amount;

        // Over budget and exactly-on-budget both pin to 100 / 0.
        let (percentage, remaining) = if used >= goal.amount {
            (100.0, 0.0)
        } else {
            (used / goal.amount * 100.0, goal.amount - used)
        };

        Self {
            goal: goal.clone(),
            spent,
            percentage,
            remaining,
            is_over_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_validation() {
        assert!(BudgetGoal::new("Food", 100.0, BudgetPeriod::Monthly).validate().is_ok());
        assert!(BudgetGoal::new("Food", 0.0, BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetGoal::new("", 50.0, BudgetPeriod::Monthly).validate().is_err());
    }

    #[test]
    fn test_progress_under_budget() {
        let goal = BudgetGoal::new("Food", 200.0, BudgetPeriod::Monthly);
        let progress = BudgetProgress::compute(&goal, 50.0);

        assert_eq!(progress.percentage, 25.0);
        assert_eq!(progress.remaining, 150.0);
        assert!(!progress.is_over_budget);
    }

    #[test]
    fn test_progress_over_budget() {
        let goal = BudgetGoal::new("Food", 100.0, BudgetPeriod::Monthly);
        let progress = BudgetProgress::compute(&goal, 150.0);

        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(progress.is_over_budget);
    }

    #[test]
    fn test_progress_negative_or_nan_spend_counts_as_zero() {
        let goal = BudgetGoal::new("Food", 100.0, BudgetPeriod::Monthly);

        for spent in [-40.0, f64::NAN] {
            let progress = BudgetProgress::compute(&goal, spent);
            assert_eq!(progress.percentage, 0.0);
            assert_eq!(progress.remaining, 100.0);
            assert!(!progress.is_over_budget);
        }
        assert_eq!(BudgetProgress::compute(&goal, -40.0).spent, -40.0);
    }

    #[test]
    fn test_progress_exactly_on_budget() {
        let goal = BudgetGoal::new("Food", 100.0, BudgetPeriod::Weekly);
        let progress = BudgetProgress::compute(&goal, 100.0);

        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(!progress.is_over_budget);
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("Yearly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert_eq!("w".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert!("daily".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn test_period_serialization() {
        let json = serde_json::to_string(&BudgetPeriod::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");
    }
}
