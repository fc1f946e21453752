use std::sync::Mutex;

use chrono::{DateTime, Utc};
use expense_core::core::SyncEngine;
use expense_core::domain::Expense;
use expense_core::errors::SyncError;
use expense_core::storage::{DocumentPath, FileCache, JsonDocumentStore, RemoteStore};
use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of
/// the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// File-backed cache and document store under a unique temp directory.
/// Both handles are `Clone`, so tests can keep one side to inspect what
/// the engine wrote.
pub fn file_backed_parts() -> (FileCache, JsonDocumentStore) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let cache = FileCache::new(base.join("cache")).expect("create file cache");
    let remote = JsonDocumentStore::new(base.join("documents")).expect("create document store");
    (cache, remote)
}

/// Engine over fresh file-backed storage.
pub fn file_backed_engine() -> SyncEngine {
    let (cache, remote) = file_backed_parts();
    SyncEngine::new(Box::new(cache), Box::new(remote))
}

/// Remote double that fails every call, for degraded-mode tests.
pub struct UnreachableStore;

impl RemoteStore for UnreachableStore {
    fn get(&self, _path: &DocumentPath) -> Result<Option<Value>, SyncError> {
        Err(SyncError::Remote("network unreachable".into()))
    }

    fn set(&self, _path: &DocumentPath, _data: &Value) -> Result<(), SyncError> {
        Err(SyncError::Remote("network unreachable".into()))
    }
}

pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn dated_expense(profile_id: &str, name: &str, amount: f64, date: &str) -> Expense {
    Expense::new(profile_id, name, amount, ts(date))
}
