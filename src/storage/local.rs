//! Device-local JSON persistence.
//!
//! Both collections live as JSON arrays in two fixed files under the data
//! directory, mirroring a simple key-value layout. Scope identity is
//! ignored: local storage is per device, not per user.

use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use super::{validate, LoadReport, Result, Scope, Snapshot, StorageBackend};
use crate::errors::StoreError;

const EXPENSES_FILE: &str = "expenses.json";
const INCOME_FILE: &str = "income.json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "EXPENSE_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".expense_core";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Creates the data directory if needed. `None` resolves the default
    /// location (`$EXPENSE_CORE_HOME` or `~/.expense_core`).
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_array(&self, file: &str) -> Result<Vec<Value>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        match serde_json::from_str(&data)? {
            Value::Array(items) => Ok(items),
            _ => Err(StoreError::Storage(format!(
                "expected a JSON array in `{}`",
                path.display()
            ))),
        }
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.root.join(file);
        let json = serde_json::to_string_pretty(items)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl StorageBackend for LocalStorage {
    fn load(&self, _scope: &Scope) -> Result<LoadReport> {
        let first_run =
            !self.root.join(EXPENSES_FILE).exists() && !self.root.join(INCOME_FILE).exists();
        let raw_expenses = self.read_array(EXPENSES_FILE)?;
        let raw_income = self.read_array(INCOME_FILE)?;
        let (expenses, mut warnings) = validate::parse_expenses(&raw_expenses);
        let (income, income_warnings) = validate::parse_income(&raw_income);
        warnings.extend(income_warnings);
        Ok(LoadReport {
            snapshot: Snapshot { expenses, income },
            warnings,
            first_run,
        })
    }

    fn save(&self, _scope: &Scope, snapshot: &Snapshot) -> Result<()> {
        self.write_collection(EXPENSES_FILE, &snapshot.expenses)?;
        self.write_collection(INCOME_FILE, &snapshot.income)
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
