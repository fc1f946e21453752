//! Bundled [`LocalCache`] backends.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::errors::SyncError;
use crate::storage::{LocalCache, Result};
use crate::utils::ensure_dir;

const CACHE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// In-memory cache for tests and for embedders that bridge their own
/// key-value storage (a browser, a mobile shell).
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SyncError::Storage("cache mutex poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SyncError::Storage("cache mutex poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory, staged through a `.tmp` sibling
/// and renamed into place.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Cache rooted in the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(crate::utils::app_data_dir().join("cache"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", sanitize_key(key), CACHE_EXTENSION))
    }
}

impl LocalCache for FileCache {
    fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn sanitize_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "cache".into()
    } else {
        sanitized
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn memory_cache_roundtrips() {
        let cache = MemoryCache::new();
        assert!(cache.get_item("k").is_none());
        cache.set_item("k", "v").expect("set item");
        assert_eq!(cache.get_item("k").as_deref(), Some("v"));
        cache.remove_item("k").expect("remove item");
        assert!(cache.get_item("k").is_none());
    }

    #[test]
    fn file_cache_roundtrips() {
        let temp = TempDir::new().expect("temp dir");
        let cache = FileCache::new(temp.path().join("cache")).expect("file cache");
        cache
            .set_item("expenseCalculator_appData", "{\"profiles\":[]}")
            .expect("set item");
        assert_eq!(
            cache.get_item("expenseCalculator_appData").as_deref(),
            Some("{\"profiles\":[]}")
        );
        cache
            .remove_item("expenseCalculator_appData")
            .expect("remove item");
        assert!(cache.get_item("expenseCalculator_appData").is_none());
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let temp = TempDir::new().expect("temp dir");
        let cache = FileCache::new(temp.path().join("cache")).expect("file cache");
        cache.remove_item("never-written").expect("remove item");
    }

    #[test]
    fn keys_are_sanitized_to_filenames() {
        assert_eq!(sanitize_key("expenseCalculator_appData"), "expenseCalculator_appData");
        assert_eq!(sanitize_key("a/b c"), "a_b_c");
        assert_eq!(sanitize_key("///"), "cache");
    }
}
