pub mod local_cache;
pub mod remote;

use serde_json::Value;

use crate::errors::SyncError;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Cache key holding the current-shape snapshot document.
pub const SNAPSHOT_CACHE_KEY: &str = "expenseCalculator_appData";

/// Cache key the earliest releases used for the bare expense list.
pub const LEGACY_EXPENSES_KEY: &str = "expenseCalculator_expenses";

/// Synchronous key-value storage holding the last-known snapshot for
/// instant hydration.
pub trait LocalCache: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// One opaque JSON document per authenticated user at a fixed logical
/// path. The core needs nothing beyond single-document read and upsert;
/// querying, indexing, and transactions stay out of the contract.
pub trait RemoteStore: Send + Sync {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>>;
    fn set(&self, path: &DocumentPath, data: &Value) -> Result<()>;
}

/// Stable location of a user's snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// The fixed per-user document location.
    pub fn for_user(user_id: &str) -> Self {
        Self(format!("users/{}/appData/main", user_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub use local_cache::{FileCache, MemoryCache};
pub use remote::JsonDocumentStore;
