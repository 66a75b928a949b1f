//! Bounded, most-recent-first history of saved recipes.

use thiserror::Error;

use super::recipe::Recipe;
use crate::storage::{KeyValueStore, StorageError};

/// Maximum number of saved recipes kept by default.
pub const DEFAULT_SAVED_CAP: usize = 30;

/// Why the saved list could not be read or written.
#[derive(Debug, Error)]
pub enum SavedError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Saved recipes are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Saved recipes, newest first, never longer than `cap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCollection {
    entries: Vec<Recipe>,
    cap: usize,
}

impl SavedCollection {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Wrap existing entries, dropping the oldest beyond `cap`.
    pub fn from_entries(mut entries: Vec<Recipe>, cap: usize) -> Self {
        let cap = cap.max(1);
        entries.truncate(cap);
        Self { entries, cap }
    }

    pub fn entries(&self) -> &[Recipe] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&Recipe> {
        self.entries.first()
    }

    /// Prepend `recipe`, then drop entries past the cap.
    pub fn push_front(&mut self, recipe: Recipe) {
        self.entries.insert(0, recipe);
        self.entries.truncate(self.cap);
    }

    /// Remove the first entry created at `created_at`.
    pub fn remove_created_at(&mut self, created_at: i64) -> Option<Recipe> {
        let index = self
            .entries
            .iter()
            .position(|recipe| recipe.created_at == created_at)?;
        Some(self.entries.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Recipe> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read the list stored under `key`.
    pub fn try_load<S: KeyValueStore + ?Sized>(
        store: &S,
        key: &str,
        cap: usize,
    ) -> Result<Self, SavedError> {
        let entries = match store.get(key)? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };
        Ok(Self::from_entries(entries, cap))
    }

    /// Read the list stored under `key`, starting empty on any failure.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str, cap: usize) -> Self {
        match Self::try_load(store, key, cap) {
            Ok(saved) => {
                tracing::debug!(key, count = saved.len(), "loaded saved recipes");
                saved
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unreadable saved recipes");
                Self::new(cap)
            }
        }
    }

    /// Overwrite `key` with the full list as a JSON array.
    pub fn persist<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        key: &str,
    ) -> Result<(), SavedError> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(key, &json)?;
        Ok(())
    }
}
