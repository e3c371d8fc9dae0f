// ============================================================================
// Portal Infrastructure - File-backed Local Store
// File: crates/portal-infrastructure/src/storage/file_store.rs
// ============================================================================
//! Key-value store persisted as a single JSON object on disk.
//!
//! Every write rewrites the whole file through a temporary sibling and a
//! rename, so a crash leaves either the old or the new content.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{info, warn};

use portal_core::error::DomainError;
use portal_core::repositories::LocalStore;

pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file yields an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        info!("Local store at {} holds {} entries", path.display(), entries.len());
        Self { path, entries: RwLock::new(entries) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read local store {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Local store {} is corrupt, starting empty: {}", path.display(), e);
            BTreeMap::new()
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error("create directory", e))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| storage_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error("rename", e))
    }
}

fn storage_error(action: &str, e: std::io::Error) -> DomainError {
    DomainError::StorageError(format!("Failed to {} local store: {}", action, e))
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path);
        store.set("menu_state:7", "{\"menuItems\":[]}").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("menu_state:7").unwrap().as_deref(), Some("{\"menuItems\":[]}"));
        assert_eq!(reopened.get("other").unwrap(), None);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("menu_state").unwrap(), None);

        store.set("menu_state", "v").unwrap();
        assert_eq!(FileStore::open(&path).get("menu_state").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path);

        store.remove("absent").unwrap();
        assert!(!path.exists());
    }
}
