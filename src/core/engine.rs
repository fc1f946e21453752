//! Orchestration of the local cache and the remote document store.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::core::services::{
    ExpenseService, ProfileService, ServiceError, ServiceResult,
};
use crate::domain::{AppSnapshot, Expense, Profile};
use crate::errors::SyncError;
use crate::migration;
use crate::storage::{
    DocumentPath, LocalCache, RemoteStore, LEGACY_EXPENSES_KEY, SNAPSHOT_CACHE_KEY,
};

/// Which store ended up authoritative for a load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The remote document existed and won.
    Remote,
    /// Meaningful local data was uploaded to an empty remote and won.
    LocalMigrated,
    /// Only the local cache was available.
    LocalCache,
    /// Nothing was persisted anywhere; the starter snapshot was used.
    Default,
}

/// Outcome of a [`SyncEngine::load`] cycle.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub snapshot: AppSnapshot,
    pub source: LoadSource,
    /// Set when the remote store was unreachable and the engine fell
    /// back to cached data.
    pub degraded: bool,
}

/// Facade that reconciles the fast local cache with the authoritative
/// remote store and owns the in-memory snapshot for the session.
///
/// Writes are last-writer-wins over the whole document; overlapping
/// persists are not serialized. Everything remote goes through
/// [`persist`](SyncEngine::persist), so a versioned-write scheme could
/// slot in there without touching callers.
pub struct SyncEngine {
    cache: Box<dyn LocalCache>,
    remote: Box<dyn RemoteStore>,
    session: Option<String>,
    current: Option<AppSnapshot>,
}

impl SyncEngine {
    pub fn new(cache: Box<dyn LocalCache>, remote: Box<dyn RemoteStore>) -> Self {
        Self {
            cache,
            remote,
            session: None,
            current: None,
        }
    }

    /// Starts a session for the authenticated user id.
    pub fn begin_session(&mut self, user_id: impl Into<String>) {
        self.session = Some(user_id.into());
    }

    /// Ends the session, discarding the in-memory snapshot. The local
    /// cache is left in place for the next sign-in.
    pub fn end_session(&mut self) {
        self.session = None;
        self.current = None;
    }

    pub fn session_user(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// The snapshot currently owned by the engine, if any.
    pub fn current(&self) -> Option<&AppSnapshot> {
        self.current.as_ref()
    }

    /// Synchronous cache hydration, so a caller can render instantly
    /// while [`load`](SyncEngine::load) consults the remote store.
    pub fn hydrate_from_cache(&mut self) -> Option<AppSnapshot> {
        let mut snapshot = self.read_cache()?;
        snapshot.sort_expenses();
        self.current = Some(snapshot.clone());
        Some(snapshot)
    }

    /// Full load: remote first, then migrated local data, then the
    /// starter snapshot. Remote trouble never fails the load; it
    /// degrades to whatever the cache holds.
    pub fn load(&mut self) -> Result<LoadReport, SyncError> {
        let Some(path) = self.document_path() else {
            let (snapshot, source) = self.cache_or_default();
            return Ok(self.finish_load(snapshot, source, false));
        };

        match self.remote.get(&path) {
            Ok(Some(raw)) => match serde_json::from_value::<AppSnapshot>(raw) {
                Ok(snapshot) => {
                    if let Err(error) = self.refresh_cache(&snapshot) {
                        tracing::warn!(%error, "failed to refresh cache from remote snapshot");
                    }
                    tracing::info!("loaded snapshot from remote store");
                    Ok(self.finish_load(snapshot, LoadSource::Remote, false))
                }
                Err(error) => {
                    tracing::warn!(%error, "remote document malformed; treating as absent");
                    self.load_without_remote_data()
                }
            },
            Ok(None) => self.load_without_remote_data(),
            Err(error) => {
                tracing::warn!(%error, "remote fetch failed; falling back to local cache");
                let (snapshot, source) = self.cache_or_default();
                Ok(self.finish_load(snapshot, source, true))
            }
        }
    }

    /// Sorts and persists a snapshot: remote first (best effort), local
    /// cache always. The cache is the durable fallback, so its failures
    /// do surface.
    pub fn persist(&mut self, mut snapshot: AppSnapshot) -> Result<&AppSnapshot, SyncError> {
        snapshot.sort_expenses();
        let value = serde_json::to_value(&snapshot)?;
        if let Some(path) = self.document_path() {
            if let Err(error) = self.remote.set(&path, &value) {
                tracing::warn!(%error, "remote write failed; snapshot is durable locally only");
            }
        }
        self.cache.set_item(SNAPSHOT_CACHE_KEY, &value.to_string())?;
        Ok(self.current.insert(snapshot))
    }

    /// Adds an expense against a concrete profile and persists the
    /// result, returning the stored expense.
    ///
    /// The "all profiles" selector exists only in the view layer and
    /// cannot reach this call.
    pub fn add_expense(
        &mut self,
        profile_id: &str,
        name: &str,
        amount: f64,
        date: Option<DateTime<Utc>>,
    ) -> ServiceResult<Expense> {
        let date = date.unwrap_or_else(Utc::now);
        self.mutate(|snapshot| ExpenseService::add(snapshot, profile_id, name, amount, date))
    }

    /// Replaces an expense wholesale (the edit path, where the caller
    /// may have picked an explicit category) and persists.
    pub fn update_expense(&mut self, updated: Expense) -> ServiceResult<()> {
        self.mutate(|snapshot| ExpenseService::update(snapshot, updated))
    }

    /// Deletes an expense by id and persists.
    pub fn delete_expense(&mut self, id: &str) -> ServiceResult<Expense> {
        self.mutate(|snapshot| ExpenseService::remove(snapshot, id))
    }

    /// Creates a profile and persists.
    pub fn add_profile(&mut self, name: &str) -> ServiceResult<Profile> {
        self.mutate(|snapshot| ProfileService::add(snapshot, name))
    }

    /// Renames a profile and persists.
    pub fn rename_profile(&mut self, id: &str, new_name: &str) -> ServiceResult<()> {
        self.mutate(|snapshot| ProfileService::rename(snapshot, id, new_name))
    }

    /// Deletes a profile, reassigning its expenses to `fallback_id`,
    /// and persists.
    pub fn delete_profile(&mut self, id: &str, fallback_id: &str) -> ServiceResult<Profile> {
        self.mutate(|snapshot| ProfileService::remove(snapshot, id, fallback_id))
    }

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut AppSnapshot) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut snapshot = self
            .current
            .take()
            .ok_or(ServiceError::Sync(SyncError::NoSnapshot))?;
        match op(&mut snapshot) {
            Ok(outcome) => {
                self.persist(snapshot)?;
                Ok(outcome)
            }
            Err(error) => {
                self.current = Some(snapshot);
                Err(error)
            }
        }
    }

    fn document_path(&self) -> Option<DocumentPath> {
        self.session.as_deref().map(DocumentPath::for_user)
    }

    fn load_without_remote_data(&mut self) -> Result<LoadReport, SyncError> {
        if let Some(local) = self.read_cache() {
            if local.is_meaningful() {
                tracing::info!("uploading local snapshot to empty remote store");
                let snapshot = self.persist(local)?.clone();
                return Ok(self.finish_load(snapshot, LoadSource::LocalMigrated, false));
            }
        }
        Ok(self.finish_load(AppSnapshot::initial(), LoadSource::Default, false))
    }

    fn cache_or_default(&mut self) -> (AppSnapshot, LoadSource) {
        match self.read_cache() {
            Some(snapshot) => (snapshot, LoadSource::LocalCache),
            None => (AppSnapshot::initial(), LoadSource::Default),
        }
    }

    fn finish_load(
        &mut self,
        mut snapshot: AppSnapshot,
        source: LoadSource,
        degraded: bool,
    ) -> LoadReport {
        snapshot.sort_expenses();
        self.current = Some(snapshot.clone());
        LoadReport {
            snapshot,
            source,
            degraded,
        }
    }

    /// Reads and normalizes whatever the cache holds. Data found under
    /// the legacy key is rewritten to the current key and the legacy
    /// key cleared, so that migration runs at most once per source.
    fn read_cache(&self) -> Option<AppSnapshot> {
        if let Some(raw) = self.cache.get_item(SNAPSHOT_CACHE_KEY) {
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    if let Some(normalized) = migration::normalize(&value) {
                        if normalized.was_migrated() {
                            tracing::info!(
                                shape = ?normalized.shape,
                                "normalized cached snapshot from legacy shape"
                            );
                        }
                        return Some(normalized.snapshot);
                    }
                    tracing::warn!("cached snapshot matches no known shape; ignoring");
                }
                Err(error) => {
                    tracing::warn!(%error, "cached snapshot is not valid JSON; ignoring");
                }
            }
            return None;
        }

        let legacy = self.cache.get_item(LEGACY_EXPENSES_KEY)?;
        let value = match serde_json::from_str::<Value>(&legacy) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "legacy expense list is not valid JSON; ignoring");
                return None;
            }
        };
        let normalized = migration::normalize(&value)?;
        if let Ok(json) = serde_json::to_string(&normalized.snapshot) {
            if self.cache.set_item(SNAPSHOT_CACHE_KEY, &json).is_ok() {
                let _ = self.cache.remove_item(LEGACY_EXPENSES_KEY);
            }
        }
        tracing::info!("migrated legacy expense list to the current snapshot shape");
        Some(normalized.snapshot)
    }

    fn refresh_cache(&self, snapshot: &AppSnapshot) -> Result<(), SyncError> {
        let json = serde_json::to_string(snapshot)?;
        self.cache.set_item(SNAPSHOT_CACHE_KEY, &json)
    }
}
