//! Durable key-value storage for small JSON documents.
//!
//! The recipe lab persists its saved collection under one namespaced key.
//! [`FileStore`] keeps each key in its own file under the app root, while
//! [`MemoryStore`] backs tests and sessions where the disk is unavailable.

mod atomic;
mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub(crate) use atomic::atomic_write;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by key-value store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Keys become file names, so they are restricted to a safe alphabet.
    #[error("Invalid storage key {key:?}")]
    InvalidKey { key: String },
    #[error("Unable to prepare storage directory: {0}")]
    Dir(#[from] crate::app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// String-keyed, string-valued persistent storage.
///
/// Values are replaced wholesale on every `set`; there is no merge.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Open the on-disk store under the app root, falling back to memory.
///
/// The fallback keeps the session usable when the config directory cannot be
/// created; nothing saved in it survives the process.
pub fn open_default() -> Box<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "durable storage unavailable; using in-memory store");
            Box::new(MemoryStore::default())
        }
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}
