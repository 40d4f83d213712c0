//! Demo records used to seed a first run when the store is configured with
//! `SeedPolicy::SampleData`.

use chrono::{Datelike, Duration, NaiveDate};

use super::{Expense, ExpenseCategory};

const SAMPLE_COUNT: usize = 50;
const SAMPLE_WINDOW_DAYS: u32 = 90;
const MIN_AMOUNT: u32 = 100;
const AMOUNT_SPREAD: u32 = 5000;

/// Generates the demo expense set: fifty records spread over the trailing
/// ninety days, sorted most-recent-first. Deterministic for a given `today`.
pub fn sample_expenses(today: NaiveDate) -> Vec<Expense> {
    let mut rng = SeedRng::new(today.num_days_from_ce() as u64);
    let mut expenses = Vec::with_capacity(SAMPLE_COUNT);
    for i in 0..SAMPLE_COUNT {
        let days_back = (rng.next_u32() % SAMPLE_WINDOW_DAYS) as i64;
        let category =
            ExpenseCategory::ALL[rng.next_u32() as usize % ExpenseCategory::ALL.len()];
        expenses.push(Expense {
            id: format!("exp_{i}"),
            amount: (MIN_AMOUNT + rng.next_u32() % AMOUNT_SPREAD) as f64,
            category,
            description: format!("Sample expense {}", i + 1),
            date: today - Duration::days(days_back),
        });
    }
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}

/// Small linear congruential generator; only used for demo data.
struct SeedRng {
    state: u64,
}

impl SeedRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 32) as u32
    }
}
