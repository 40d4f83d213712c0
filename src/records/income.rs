use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{generate_id, validate_amount, IncomeCategory};
use crate::errors::Result;

/// A single income record, structurally identical to an expense but drawn
/// from the income category set.
///
/// As with [`Expense`](super::Expense), public fields mean a struct literal
/// bypasses amount validation; construct through `new` outside the
/// persistence boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: String,
    pub amount: f64,
    pub category: IncomeCategory,
    pub description: String,
    pub date: NaiveDate,
}

impl Income {
    /// Builds a new income record with a freshly generated id.
    pub fn new(
        amount: f64,
        category: IncomeCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self> {
        validate_amount(amount)?;
        Ok(Self {
            id: generate_id("inc"),
            amount,
            category,
            description: description.into(),
            date,
        })
    }

    pub(crate) fn apply(&mut self, patch: IncomePatch) {
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

/// Field-level patch applied by `update_income`.
#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub amount: Option<f64>,
    pub category: Option<IncomeCategory>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}
