//! Capital project types.
//!
//! The actual cost of a project is always the sum of its recorded expenses.
//! A stored total is ignored on load and recomputed.

use chrono::NaiveDate;
use properly_shared::types::money::sum_amounts;
use properly_shared::types::{CapitalProjectId, PropertyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CapitalProjectError;

/// Stage of a capital project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapitalProjectStatus {
    /// Approved, not started.
    #[default]
    Planned,
    /// Work underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work finished.
    Completed,
}

impl CapitalProjectStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Money spent on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExpense {
    /// Date of the spend.
    pub date: NaiveDate,
    /// What was bought.
    pub description: String,
    /// Amount, positive.
    pub amount: Decimal,
    /// Supplier or contractor.
    #[serde(default)]
    pub vendor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapitalProjectRecord {
    id: CapitalProjectId,
    property_id: PropertyId,
    name: String,
    #[serde(default)]
    status: CapitalProjectStatus,
    budget: Decimal,
    #[serde(default)]
    expenses: Vec<ProjectExpense>,
}

/// A capital improvement project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CapitalProjectRecord")]
pub struct CapitalProject {
    /// Unique identifier.
    pub id: CapitalProjectId,
    /// Property improved.
    pub property_id: PropertyId,
    /// Project name.
    pub name: String,
    /// Current stage.
    pub status: CapitalProjectStatus,
    /// Approved budget.
    pub budget: Decimal,
    expenses: Vec<ProjectExpense>,
    actual_cost: Decimal,
}

impl From<CapitalProjectRecord> for CapitalProject {
    fn from(record: CapitalProjectRecord) -> Self {
        let actual_cost = sum_amounts(record.expenses.iter().map(|e| e.amount));
        Self {
            id: record.id,
            property_id: record.property_id,
            name: record.name,
            status: record.status,
            budget: record.budget,
            expenses: record.expenses,
            actual_cost,
        }
    }
}

impl CapitalProject {
    /// Creates a project with no spend.
    #[must_use]
    pub fn new(property_id: PropertyId, name: impl Into<String>, budget: Decimal) -> Self {
        Self {
            id: CapitalProjectId::new(),
            property_id,
            name: name.into(),
            status: CapitalProjectStatus::Planned,
            budget,
            expenses: Vec::new(),
            actual_cost: Decimal::ZERO,
        }
    }

    /// Records spend against the project.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the amount is zero or negative.
    pub fn add_expense(&mut self, expense: ProjectExpense) -> Result<(), CapitalProjectError> {
        if expense.amount <= Decimal::ZERO {
            return Err(CapitalProjectError::NonPositiveAmount(expense.amount));
        }
        self.actual_cost += expense.amount;
        self.expenses.push(expense);
        Ok(())
    }

    /// Recorded expenses in entry order.
    #[must_use]
    pub fn expenses(&self) -> &[ProjectExpense] {
        &self.expenses
    }

    /// Sum of recorded expenses.
    #[must_use]
    pub fn actual_cost(&self) -> Decimal {
        self.actual_cost
    }

    /// Budget left. Negative when over budget.
    #[must_use]
    pub fn remaining_budget(&self) -> Decimal {
        self.budget - self.actual_cost
    }

    /// Returns true once spend exceeds the budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.actual_cost > self.budget
    }
}
