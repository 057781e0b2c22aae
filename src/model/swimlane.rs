use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;

/// A named horizontal track grouping activities into rows.
///
/// Ordering is the swimlane's index in its owning list; there is no rank field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swimlane {
    pub id: Uuid,
    pub name: String,
    /// Manual display height. `None` means "fit the packed rows".
    #[serde(default)]
    pub height: Option<f32>,
    /// Budget shown as a read-only usage bar next to the lane label.
    #[serde(default)]
    pub budget: Option<f64>,
}

impl Swimlane {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            height: None,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Spend of the activities in this lane against its budget.
    pub fn budget_usage(&self, activities: &[Activity]) -> Option<BudgetUsage> {
        let budget = self.budget?;
        let spent = activities
            .iter()
            .filter(|a| a.swimlane_id == self.id)
            .filter_map(|a| a.cost)
            .sum();
        Some(BudgetUsage { spent, budget })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub spent: f64,
    pub budget: f64,
}

impl BudgetUsage {
    /// Fraction of the budget used, clamped to `0.0..=1.0` for drawing.
    pub fn fill_fraction(&self) -> f32 {
        if self.budget <= 0.0 {
            return if self.spent > 0.0 { 1.0 } else { 0.0 };
        }
        (self.spent / self.budget).clamp(0.0, 1.0) as f32
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn usage_sums_only_own_lane() {
        let lane = Swimlane::new("Paid social").with_budget(1000.0);
        let other = Swimlane::new("Events");
        let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let activities = vec![
            Activity::new("A", d, d, lane.id).with_cost(300.0),
            Activity::new("B", d, d, lane.id).with_cost(450.0),
            Activity::new("C", d, d, other.id).with_cost(9000.0),
            Activity::new("D", d, d, lane.id),
        ];
        let usage = lane.budget_usage(&activities).unwrap();
        assert_eq!(usage.spent, 750.0);
        assert!(!usage.is_over());
        assert!((usage.fill_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn no_budget_no_bar() {
        let lane = Swimlane::new("Organic");
        assert!(lane.budget_usage(&[]).is_none());
    }

    #[test]
    fn zero_budget_with_spend_is_full() {
        let usage = BudgetUsage { spent: 10.0, budget: 0.0 };
        assert_eq!(usage.fill_fraction(), 1.0);
        assert!(usage.is_over());
    }
}
