//! A filesystem-backed document store.
//!
//! Stands in for the managed cloud store in tests and offline setups;
//! production embedders adapt their cloud SDK to
//! [`RemoteStore`](crate::storage::RemoteStore) instead.

use std::{fs, path::PathBuf};

use serde_json::Value;

use crate::storage::local_cache::{tmp_path, write_atomic};
use crate::storage::{DocumentPath, RemoteStore, Result};
use crate::utils::ensure_dir;

/// One pretty-printed JSON file per logical document path.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Store rooted in the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(crate::utils::app_data_dir().join("documents"))
    }

    fn document_file(&self, path: &DocumentPath) -> PathBuf {
        // Logical paths use `/` separators; each segment becomes a
        // directory so sibling users never collide.
        let mut full = self.root.clone();
        for segment in path.as_str().split('/') {
            full.push(segment);
        }
        full.set_extension("json");
        full
    }
}

impl RemoteStore for JsonDocumentStore {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>> {
        let file = self.document_file(path);
        if !file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&file)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn set(&self, path: &DocumentPath, data: &Value) -> Result<()> {
        let file = self.document_file(path);
        let json = serde_json::to_string_pretty(data)?;
        let tmp = tmp_path(&file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn get_returns_none_until_a_document_is_written() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonDocumentStore::new(temp.path().join("documents")).expect("store");
        let path = DocumentPath::for_user("u1");
        assert!(store.get(&path).expect("get").is_none());

        let doc = json!({"profiles": [], "expenses": []});
        store.set(&path, &doc).expect("set");
        assert_eq!(store.get(&path).expect("get"), Some(doc));
    }

    #[test]
    fn documents_are_isolated_per_user() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonDocumentStore::new(temp.path().join("documents")).expect("store");
        store
            .set(&DocumentPath::for_user("u1"), &json!({"who": "u1"}))
            .expect("set u1");
        assert!(store
            .get(&DocumentPath::for_user("u2"))
            .expect("get u2")
            .is_none());
    }
}
