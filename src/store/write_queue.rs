//! Sequenced background writer for fire-and-forget saves.
//!
//! Mutations return immediately; the latest snapshot is handed to a single
//! worker thread together with the scope it was taken under. A newer
//! submission replaces a pending one, so the last write wins and saves are
//! never interleaved. Save failures are logged and swallowed; in-memory
//! state stays authoritative.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::storage::{Scope, Snapshot, StorageBackend};

struct QueueState {
    pending: Option<(Scope, Snapshot)>,
    in_flight: bool,
    shutdown: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    signal: Condvar,
}

pub(crate) struct WriteQueue {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl WriteQueue {
    pub(crate) fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                pending: None,
                in_flight: false,
                shutdown: false,
            }),
            signal: Condvar::new(),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || run_worker(worker_shared, storage));
        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queues a save, replacing any submission the worker has not started.
    pub(crate) fn submit(&self, scope: Scope, snapshot: Snapshot) {
        {
            let mut state = self.lock_state();
            state.pending = Some((scope, snapshot));
        }
        self.shared.signal.notify_all();
    }

    /// Blocks until every submitted save has been attempted.
    pub(crate) fn flush(&self) {
        let mut state = self.lock_state();
        while state.pending.is_some() || state.in_flight {
            state = self
                .shared
                .signal
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, QueueState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        {
            let mut state = self.lock_state();
            state.shutdown = true;
        }
        self.shared.signal.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(shared: Arc<Shared>, storage: Arc<dyn StorageBackend>) {
    loop {
        let job = {
            let mut state = shared
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            loop {
                // Drain any pending job before honoring shutdown.
                if let Some(job) = state.pending.take() {
                    state.in_flight = true;
                    break Some(job);
                }
                if state.shutdown {
                    break None;
                }
                state = shared
                    .signal
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };
        let Some((scope, snapshot)) = job else { return };
        if let Err(error) = storage.save(&scope, &snapshot) {
            tracing::warn!(%error, "background save failed; keeping in-memory state");
        }
        let mut state = shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.in_flight = false;
        shared.signal.notify_all();
    }
}
