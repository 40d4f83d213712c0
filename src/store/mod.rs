//! In-memory mirror of the persisted record collections.
//!
//! The store exclusively owns both collections. Mutations apply to memory
//! immediately and schedule a background save of the full snapshot; views
//! re-derive aggregates from the in-memory state on every read.

mod write_queue;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::errors::Result;
use crate::records::{
    sample, Expense, ExpenseCategory, ExpensePatch, Income, IncomeCategory, IncomePatch,
    validate_amount,
};
use crate::storage::{Scope, Snapshot, StorageBackend};
use write_queue::WriteQueue;

/// Lifecycle of a store instance. A failed load still lands on `Ready` with
/// empty collections; persistence failures never take the store down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
}

/// Whether a scope that has never been saved starts with generated demo
/// records or with empty collections. An explicit choice, never inferred
/// from the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    #[default]
    Empty,
    SampleData,
}

pub struct ExpenseStore {
    storage: Arc<dyn StorageBackend>,
    scope: Scope,
    seed: SeedPolicy,
    state: StoreState,
    expenses: Vec<Expense>,
    income: Vec<Income>,
    queue: WriteQueue,
}

impl ExpenseStore {
    pub fn new(storage: Arc<dyn StorageBackend>, scope: Scope, seed: SeedPolicy) -> Self {
        let queue = WriteQueue::new(Arc::clone(&storage));
        Self {
            storage,
            scope,
            seed,
            state: StoreState::Uninitialized,
            expenses: Vec::new(),
            income: Vec::new(),
            queue,
        }
    }

    /// Issues the one load for the bound scope. Later calls are no-ops; the
    /// store never transitions back to `Loading` after a load completes.
    pub fn init(&mut self) {
        if self.state != StoreState::Uninitialized {
            return;
        }
        self.state = StoreState::Loading;
        let mut first_run = false;
        match self.storage.load(&self.scope) {
            Ok(report) => {
                for warning in &report.warnings {
                    tracing::warn!(%warning, "record repaired or dropped at load");
                }
                self.expenses = report.snapshot.expenses;
                self.income = report.snapshot.income;
                first_run = report.first_run;
            }
            Err(error) => {
                tracing::warn!(%error, "load failed; continuing with empty collections");
            }
        }
        // Only a never-saved scope gets demo records. A scope whose records
        // were all deleted stays empty.
        if first_run && self.seed == SeedPolicy::SampleData {
            self.expenses = sample::sample_expenses(Utc::now().date_naive());
            self.schedule_save();
        }
        self.state = StoreState::Ready;
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == StoreState::Loading
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn income(&self) -> &[Income] {
        &self.income
    }

    /// Prepends a new expense (most-recent-first convention) and schedules
    /// a save. Returns the created record with its generated id.
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<&Expense> {
        let expense = Expense::new(amount, category, description, date)?;
        self.expenses.insert(0, expense);
        self.schedule_save();
        Ok(&self.expenses[0])
    }

    pub fn add_income(
        &mut self,
        amount: f64,
        category: IncomeCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<&Income> {
        let income = Income::new(amount, category, description, date)?;
        self.income.insert(0, income);
        self.schedule_save();
        Ok(&self.income[0])
    }

    /// Removes the expense with this id. Deleting an unknown id is a no-op
    /// and does not schedule a save.
    pub fn delete_expense(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            self.schedule_save();
        }
        removed
    }

    pub fn delete_income(&mut self, id: &str) -> bool {
        let before = self.income.len();
        self.income.retain(|income| income.id != id);
        let removed = self.income.len() != before;
        if removed {
            self.schedule_save();
        }
        removed
    }

    /// Partial-field merge by id; other fields and records are untouched.
    /// Returns whether a record matched.
    pub fn update_expense(&mut self, id: &str, patch: ExpensePatch) -> Result<bool> {
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        match self.expenses.iter_mut().find(|expense| expense.id == id) {
            Some(expense) => {
                expense.apply(patch);
                self.schedule_save();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn update_income(&mut self, id: &str, patch: IncomePatch) -> Result<bool> {
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        match self.income.iter_mut().find(|income| income.id == id) {
            Some(income) => {
                income.apply(patch);
                self.schedule_save();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rebinds the store to a newly signed-in identity and issues that
    /// scope's single load.
    pub fn sign_in(&mut self, user_id: impl Into<String>) {
        self.rebind(Scope::User(user_id.into()));
    }

    /// Clears in-memory state on logout and falls back to the anonymous
    /// device scope. A save already queued keeps the scope it was taken
    /// under, so it can never land in the wrong document.
    pub fn sign_out(&mut self) {
        self.rebind(Scope::Local);
    }

    /// Blocks until pending background saves have been attempted. Useful
    /// for tests and graceful shutdown.
    pub fn flush(&self) {
        self.queue.flush();
    }

    fn rebind(&mut self, scope: Scope) {
        self.queue.flush();
        self.scope = scope;
        self.expenses.clear();
        self.income.clear();
        self.state = StoreState::Uninitialized;
        self.init();
    }

    fn schedule_save(&self) {
        self.queue.submit(
            self.scope.clone(),
            Snapshot {
                expenses: self.expenses.clone(),
                income: self.income.clone(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn ready_store() -> (ExpenseStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ExpenseStore::new(storage.clone(), Scope::Local, SeedPolicy::Empty);
        store.init();
        (store, storage)
    }

    #[test]
    fn init_transitions_to_ready_and_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ExpenseStore::new(storage, Scope::Local, SeedPolicy::Empty);
        assert_eq!(store.state(), StoreState::Uninitialized);
        store.init();
        assert_eq!(store.state(), StoreState::Ready);
        store.init();
        assert_eq!(store.state(), StoreState::Ready);
    }

    #[test]
    fn add_prepends_with_fresh_ids() {
        let (mut store, _) = ready_store();
        let first_id = store
            .add_expense(10.0, ExpenseCategory::Groceries, "Bread", march(1))
            .unwrap()
            .id
            .clone();
        let second_id = store
            .add_expense(20.0, ExpenseCategory::Travel, "Bus", march(2))
            .unwrap()
            .id
            .clone();
        assert_eq!(store.expenses()[0].id, second_id);
        assert_eq!(store.expenses()[1].id, first_id);
        assert_ne!(first_id, second_id);
        assert!(!second_id.is_empty());
    }

    #[test]
    fn delete_removes_exactly_one_and_ignores_unknown_ids() {
        let (mut store, _) = ready_store();
        let id = store
            .add_expense(10.0, ExpenseCategory::Other, "One", march(1))
            .unwrap()
            .id
            .clone();
        store
            .add_expense(20.0, ExpenseCategory::Other, "Two", march(2))
            .unwrap();

        assert!(store.delete_expense(&id));
        assert_eq!(store.expenses().len(), 1);
        assert!(store.expenses().iter().all(|e| e.id != id));

        assert!(!store.delete_expense("exp_missing"));
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn update_changes_only_the_patched_field() {
        let (mut store, _) = ready_store();
        let id = store
            .add_expense(100.0, ExpenseCategory::Shopping, "Shoes", march(3))
            .unwrap()
            .id
            .clone();
        store
            .add_expense(40.0, ExpenseCategory::Groceries, "Veg", march(4))
            .unwrap();

        let matched = store
            .update_expense(
                &id,
                ExpensePatch {
                    amount: Some(500.0),
                    ..ExpensePatch::default()
                },
            )
            .unwrap();
        assert!(matched);

        let updated = store.expenses().iter().find(|e| e.id == id).unwrap();
        assert_eq!(updated.amount, 500.0);
        assert_eq!(updated.description, "Shoes");
        assert_eq!(updated.category, ExpenseCategory::Shopping);
        assert_eq!(updated.date, march(3));
        let other = store.expenses().iter().find(|e| e.id != id).unwrap();
        assert_eq!(other.amount, 40.0);
    }

    #[test]
    fn update_rejects_invalid_amounts() {
        let (mut store, _) = ready_store();
        let id = store
            .add_expense(100.0, ExpenseCategory::Shopping, "Shoes", march(3))
            .unwrap()
            .id
            .clone();
        let err = store.update_expense(
            &id,
            ExpensePatch {
                amount: Some(f64::NAN),
                ..ExpensePatch::default()
            },
        );
        assert!(err.is_err());
        assert_eq!(store.expenses()[0].amount, 100.0);
    }

    #[test]
    fn update_unknown_id_matches_nothing() {
        let (mut store, _) = ready_store();
        let matched = store
            .update_income("inc_missing", IncomePatch::default())
            .unwrap();
        assert!(!matched);
    }

    #[test]
    fn mutations_are_persisted_for_a_fresh_instance() {
        let (mut store, storage) = ready_store();
        store
            .add_expense(10.0, ExpenseCategory::Groceries, "Bread", march(1))
            .unwrap();
        store
            .add_income(2500.0, IncomeCategory::Salary, "March", march(1))
            .unwrap();
        store.flush();

        let mut fresh = ExpenseStore::new(storage, Scope::Local, SeedPolicy::Empty);
        fresh.init();
        assert_eq!(fresh.expenses(), store.expenses());
        assert_eq!(fresh.income(), store.income());
    }

    #[test]
    fn sample_seeding_fills_and_persists_an_empty_scope() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store =
            ExpenseStore::new(storage.clone(), Scope::Local, SeedPolicy::SampleData);
        store.init();
        assert_eq!(store.expenses().len(), 50);
        assert!(store.income().is_empty());
        store.flush();
        let document = storage.document(&Scope::Local).expect("seed persisted");
        assert_eq!(document.expenses.len(), 50);
    }

    #[test]
    fn seeding_does_not_touch_a_populated_scope() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut first =
                ExpenseStore::new(storage.clone(), Scope::Local, SeedPolicy::Empty);
            first.init();
            first
                .add_expense(12.0, ExpenseCategory::Other, "Existing", march(1))
                .unwrap();
            first.flush();
        }
        let mut store =
            ExpenseStore::new(storage, Scope::Local, SeedPolicy::SampleData);
        store.init();
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].description, "Existing");
    }

    #[test]
    fn deleting_every_record_does_not_reseed_on_restart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store =
                ExpenseStore::new(storage.clone(), Scope::Local, SeedPolicy::SampleData);
            store.init();
            let ids: Vec<String> = store.expenses().iter().map(|e| e.id.clone()).collect();
            assert_eq!(ids.len(), 50);
            for id in ids {
                assert!(store.delete_expense(&id));
            }
            store.flush();
        }
        let mut reopened = ExpenseStore::new(storage, Scope::Local, SeedPolicy::SampleData);
        reopened.init();
        assert!(reopened.expenses().is_empty());
    }

    #[test]
    fn sign_in_loads_the_user_document_and_sign_out_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut alice = ExpenseStore::new(
                storage.clone(),
                Scope::User("alice".into()),
                SeedPolicy::Empty,
            );
            alice.init();
            alice
                .add_expense(75.0, ExpenseCategory::Travel, "Taxi", march(9))
                .unwrap();
            alice.flush();
        }

        let mut store = ExpenseStore::new(storage, Scope::Local, SeedPolicy::Empty);
        store.init();
        store
            .add_expense(5.0, ExpenseCategory::Other, "Device-local", march(1))
            .unwrap();
        store.flush();

        store.sign_in("alice");
        assert_eq!(store.scope(), &Scope::User("alice".into()));
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].description, "Taxi");

        store.sign_out();
        assert_eq!(store.scope(), &Scope::Local);
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].description, "Device-local");
    }

    #[test]
    fn failed_load_is_fail_open() {
        struct FailingStorage;
        impl StorageBackend for FailingStorage {
            fn load(&self, _scope: &Scope) -> crate::errors::Result<crate::storage::LoadReport> {
                Err(crate::errors::StoreError::Storage("backend down".into()))
            }
            fn save(&self, _scope: &Scope, _snapshot: &Snapshot) -> crate::errors::Result<()> {
                Err(crate::errors::StoreError::Storage("backend down".into()))
            }
        }

        let mut store =
            ExpenseStore::new(Arc::new(FailingStorage), Scope::Local, SeedPolicy::Empty);
        store.init();
        assert_eq!(store.state(), StoreState::Ready);
        assert!(store.expenses().is_empty());

        // Mutations still apply in memory; the failed save is swallowed.
        store
            .add_expense(10.0, ExpenseCategory::Other, "Offline", march(1))
            .unwrap();
        store.flush();
        assert_eq!(store.expenses().len(), 1);
    }
}
