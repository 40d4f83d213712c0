//! Time-series rollups: daily, weekly, and monthly breakdowns plus the
//! month summary shown on the dashboard.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::{filter_by_date, filter_by_month, sum, Entry};

/// Total spend for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Totals for the `days` days ending at `end`, oldest first. Days with no
/// records appear with a zero amount so the series has no gaps.
pub fn daily_series<E: Entry>(entries: &[E], end: NaiveDate, days: u64) -> Vec<DayTotal> {
    (0..days)
        .rev()
        .filter_map(|back| end.checked_sub_days(Days::new(back)))
        .map(|date| DayTotal {
            date,
            amount: sum(filter_by_date(entries, date)),
        })
        .collect()
}

/// Sunday that begins the week containing `reference`, shifted back by
/// `weeks_back` whole weeks.
pub fn week_start(reference: NaiveDate, weeks_back: u64) -> NaiveDate {
    let days_into_week = reference.weekday().num_days_from_sunday() as u64;
    reference
        .checked_sub_days(Days::new(days_into_week + weeks_back * 7))
        .unwrap_or(reference)
}

/// Seven daily totals for the week starting at `start` (a Sunday), in
/// calendar order, zero-filled.
pub fn week_breakdown<E: Entry>(entries: &[E], start: NaiveDate) -> Vec<DayTotal> {
    (0..7)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| DayTotal {
            date,
            amount: sum(filter_by_date(entries, date)),
        })
        .collect()
}

/// Day with the highest total in a series; `None` for an empty series.
/// Ties go to the earliest day.
pub fn highest_day(series: &[DayTotal]) -> Option<&DayTotal> {
    series
        .iter()
        .reduce(|best, day| if day.amount > best.amount { day } else { best })
}

/// Total spend for a calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

/// Totals for the twelve calendar months ending with the month containing
/// `reference`, oldest first, zero-filled.
pub fn monthly_series<E: Entry>(entries: &[E], reference: NaiveDate) -> Vec<MonthTotal> {
    let anchor = reference.with_day(1).unwrap_or(reference);
    (0..12)
        .rev()
        .filter_map(|back| anchor.checked_sub_months(Months::new(back)))
        .map(|month_start| MonthTotal {
            year: month_start.year(),
            month: month_start.month(),
            amount: sum(filter_by_month(
                entries,
                month_start.year(),
                month_start.month(),
            )),
        })
        .collect()
}

/// Income, spend, and savings figures for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub income_total: f64,
    pub expense_total: f64,
    pub net: f64,
    /// Percentage of income kept; 0 when there is no income.
    pub savings_rate: f64,
}

pub fn month_summary<X: Entry, I: Entry>(
    expenses: &[X],
    income: &[I],
    year: i32,
    month: u32,
) -> MonthSummary {
    let expense_total = sum(filter_by_month(expenses, year, month));
    let income_total = sum(filter_by_month(income, year, month));
    let net = income_total - expense_total;
    let savings_rate = if income_total > 0.0 {
        net / income_total * 100.0
    } else {
        0.0
    };
    MonthSummary {
        income_total,
        expense_total,
        net,
        savings_rate,
    }
}
