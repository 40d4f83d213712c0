use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{generate_id, validate_amount, ExpenseCategory};
use crate::errors::Result;

/// A single spending record. The id is immutable after creation; the date
/// carries no time component.
///
/// Fields are public for serde and the view layer. Only `new` and the
/// store's patch path validate the amount; a struct literal bypasses that
/// check, so construct through `new` outside the persistence boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Builds a new expense with a freshly generated id. Rejects amounts
    /// that are negative or not finite.
    pub fn new(
        amount: f64,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self> {
        validate_amount(amount)?;
        Ok(Self {
            id: generate_id("exp"),
            amount,
            category,
            description: description.into(),
            date,
        })
    }

    /// Partial-field merge; fields left as `None` keep their value. The id
    /// is not patchable.
    pub(crate) fn apply(&mut self, patch: ExpensePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// Field-level patch applied by `update_expense`.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}
