//! In-memory backend used by tests and as a stand-in during development.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{LoadReport, Result, Scope, Snapshot, StorageBackend};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<Scope, Snapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot currently stored for a scope, if any. Test helper.
    pub fn document(&self, scope: &Scope) -> Option<Snapshot> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scope)
            .cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, scope: &Scope) -> Result<LoadReport> {
        let stored = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scope)
            .cloned();
        let first_run = stored.is_none();
        Ok(LoadReport {
            snapshot: stored.unwrap_or_default(),
            warnings: Vec::new(),
            first_run,
        })
    }

    fn save(&self, scope: &Scope, snapshot: &Snapshot) -> Result<()> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(scope.clone(), snapshot.clone());
        Ok(())
    }
}
