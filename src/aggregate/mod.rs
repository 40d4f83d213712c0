//! Pure aggregation helpers shared by every view.
//!
//! Each helper is stateless and recomputed per call; at personal-finance
//! volumes this costs less than keeping caches coherent.

pub mod report;

use chrono::{Datelike, NaiveDate};

use crate::records::{Expense, Income};

/// Read-only view over a record used by the aggregation helpers.
pub trait Entry {
    fn amount(&self) -> f64;
    fn date(&self) -> NaiveDate;
    fn category_label(&self) -> &'static str;
}

impl Entry for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn category_label(&self) -> &'static str {
        self.category.label()
    }
}

impl Entry for Income {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn category_label(&self) -> &'static str {
        self.category.label()
    }
}

/// Records whose date matches `date` exactly. Dates carry no time
/// component, so there is no timezone boundary to get wrong.
pub fn filter_by_date<E: Entry>(entries: &[E], date: NaiveDate) -> Vec<&E> {
    entries.iter().filter(|e| e.date() == date).collect()
}

/// Records dated within `start..=end`, inclusive on both ends.
pub fn filter_by_date_range<E: Entry>(
    entries: &[E],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&E> {
    entries
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .collect()
}

/// Records falling in the given calendar month (1-12) of `year`.
pub fn filter_by_month<E: Entry>(entries: &[E], year: i32, month: u32) -> Vec<&E> {
    entries
        .iter()
        .filter(|e| {
            let date = e.date();
            date.year() == year && date.month() == month
        })
        .collect()
}

/// Arithmetic sum of amounts; 0 for an empty collection.
pub fn sum<'a, E: Entry + 'a>(entries: impl IntoIterator<Item = &'a E>) -> f64 {
    entries.into_iter().map(Entry::amount).sum()
}

/// Per-category total over a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: &'static str,
    pub amount: f64,
    pub count: usize,
}

/// Totals per category, ordered by the supplied category list. Categories
/// with no positive spend are omitted.
pub fn group_by_category<'a, E: Entry + 'a>(
    entries: impl IntoIterator<Item = &'a E>,
    categories: &[&'static str],
) -> Vec<CategoryTotal> {
    let entries: Vec<&E> = entries.into_iter().collect();
    categories
        .iter()
        .map(|&category| {
            let mut amount = 0.0;
            let mut count = 0;
            for entry in entries.iter().filter(|e| e.category_label() == category) {
                amount += entry.amount();
                count += 1;
            }
            CategoryTotal {
                category,
                amount,
                count,
            }
        })
        .filter(|total| total.amount > 0.0)
        .collect()
}
