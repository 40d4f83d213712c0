//! Record types, their fixed category sets, and id generation.

pub mod category;
pub mod expense;
pub mod income;
pub mod sample;

pub use category::{ExpenseCategory, IncomeCategory};
pub use expense::{Expense, ExpensePatch};
pub use income::{Income, IncomePatch};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::StoreError;

/// Generates a record id: prefix, millisecond timestamp, random suffix.
/// Collision-resistant within a session, not globally unique.
pub(crate) fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &random[..9])
}

/// Amounts must be finite and non-negative everywhere a record is built
/// or patched.
pub(crate) fn validate_amount(amount: f64) -> Result<(), StoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(StoreError::InvalidRecord(format!(
            "amount must be a finite non-negative number, got {amount}"
        )));
    }
    Ok(())
}
