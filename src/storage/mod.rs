//! Persistence adapters: a device-local JSON backend, a remote per-user
//! document backend, and an in-memory backend for tests.

pub mod local;
pub mod memory;
pub mod remote;
mod validate;

use serde::{Deserialize, Serialize};

use crate::records::{Expense, Income};

pub use crate::errors::Result;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use remote::RemoteStorage;

/// Identity context under which record collections are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Anonymous device-local scope.
    Local,
    /// Authenticated user identity backing a remote per-user document.
    User(String),
}

impl Scope {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Scope::Local => None,
            Scope::User(id) => Some(id),
        }
    }
}

/// Full contents of a persisted scope. Saves overwrite the whole snapshot;
/// there is no partial-write protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub income: Vec<Income>,
}

/// Result of a load, including warnings for records that were repaired or
/// dropped at the persistence boundary.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub snapshot: Snapshot,
    pub warnings: Vec<String>,
    /// True when nothing has ever been saved under this scope. A saved
    /// empty snapshot is not a first run.
    pub first_run: bool,
}

/// Abstraction over persistence backends capable of storing per-scope
/// record collections. Last writer wins; no conflict resolution.
pub trait StorageBackend: Send + Sync {
    fn load(&self, scope: &Scope) -> Result<LoadReport>;
    fn save(&self, scope: &Scope, snapshot: &Snapshot) -> Result<()>;
}
