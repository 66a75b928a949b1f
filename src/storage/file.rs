use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, atomic_write, validate_key};
use crate::app_dirs;

/// Stores each key as `<key>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Write {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Open the store inside the app root's `storage` directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self {
            root: app_dirs::storage_dir()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes()).map_err(|source| StorageError::Write { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopening() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("kv")).unwrap();
        store.set("maggilicious.recipes", "[]").unwrap();

        let reopened = FileStore::open(dir.path().join("kv")).unwrap();
        assert_eq!(
            reopened.get("maggilicious.recipes").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("kv").join("maggilicious.recipes.json").is_file());
    }

    #[test]
    fn missing_keys_read_as_none_and_remove_cleanly() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
        store.remove("absent").unwrap();

        store.set("present", "1").unwrap();
        store.remove("present").unwrap();
        assert_eq!(store.get("present").unwrap(), None);
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../outside", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
    }

    #[test]
    fn default_store_lives_under_app_root() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let store = FileStore::open_default().unwrap();
        assert_eq!(
            store.root(),
            dir.path().join(crate::app_dirs::APP_DIR_NAME).join("storage")
        );
    }
}
