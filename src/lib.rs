#![doc(test(attr(deny(warnings))))]

//! Expense Core provides the record store, persistence adapters, and
//! aggregation helpers behind a personal finance tracker.

pub mod aggregate;
pub mod errors;
pub mod records;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
