//! Validation at the persistence boundary.
//!
//! Stored data is not trusted. Entries are parsed field by field: an entry
//! with a missing, empty, or duplicate id, a non-finite or negative amount,
//! or an unparseable date is dropped with a warning; an unknown category
//! label is repaired to `Other` with a warning. Malformed values never
//! reach the aggregation layer.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::records::{Expense, ExpenseCategory, Income, IncomeCategory};

pub(crate) fn parse_expenses(raw: &[Value]) -> (Vec<Expense>, Vec<String>) {
    let mut expenses = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();
    for (ix, value) in raw.iter().enumerate() {
        match parse_fields(value) {
            Ok(fields) => {
                if !seen_ids.insert(fields.id.clone()) {
                    warnings.push(format!("dropped expense `{}`: duplicate id", fields.id));
                    continue;
                }
                let category =
                    ExpenseCategory::from_label(&fields.category).unwrap_or_else(|| {
                        warnings.push(format!(
                            "expense `{}`: unknown category `{}`, kept as Other",
                            fields.id, fields.category
                        ));
                        ExpenseCategory::Other
                    });
                expenses.push(Expense {
                    id: fields.id,
                    amount: fields.amount,
                    category,
                    description: fields.description,
                    date: fields.date,
                });
            }
            Err(reason) => warnings.push(format!("dropped expense at index {ix}: {reason}")),
        }
    }
    (expenses, warnings)
}

pub(crate) fn parse_income(raw: &[Value]) -> (Vec<Income>, Vec<String>) {
    let mut income = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();
    for (ix, value) in raw.iter().enumerate() {
        match parse_fields(value) {
            Ok(fields) => {
                if !seen_ids.insert(fields.id.clone()) {
                    warnings.push(format!("dropped income `{}`: duplicate id", fields.id));
                    continue;
                }
                let category = IncomeCategory::from_label(&fields.category).unwrap_or_else(|| {
                    warnings.push(format!(
                        "income `{}`: unknown category `{}`, kept as Other",
                        fields.id, fields.category
                    ));
                    IncomeCategory::Other
                });
                income.push(Income {
                    id: fields.id,
                    amount: fields.amount,
                    category,
                    description: fields.description,
                    date: fields.date,
                });
            }
            Err(reason) => warnings.push(format!("dropped income at index {ix}: {reason}")),
        }
    }
    (income, warnings)
}

struct RawFields {
    id: String,
    amount: f64,
    category: String,
    description: String,
    date: NaiveDate,
}

fn parse_fields(value: &Value) -> Result<RawFields, String> {
    let obj = value.as_object().ok_or_else(|| "not a JSON object".to_string())?;
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing or empty id".to_string())?
        .to_string();
    let amount = obj
        .get("amount")
        .and_then(Value::as_f64)
        .ok_or_else(|| "missing or non-numeric amount".to_string())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount {amount} is not a finite non-negative number"));
    }
    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing category".to_string())?
        .to_string();
    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let date_raw = obj
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing date".to_string())?;
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{date_raw}`"))?;
    Ok(RawFields {
        id,
        amount,
        category,
        description,
        date,
    })
}
