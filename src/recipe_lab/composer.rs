//! The recipe composer: sole owner of the selection, the current recipe and
//! the saved collection.

use super::catalog::{Catalog, CatalogError, Category};
use super::picker::{self, Picker};
use super::recipe::{Clock, Recipe};
use super::saved::{DEFAULT_SAVED_CAP, SavedCollection};
use super::selection::{SelectError, Selection};
use crate::storage::KeyValueStore;

/// Storage key holding the saved collection.
pub const RECIPES_KEY: &str = "maggilicious.recipes";

/// Knobs that are not part of the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerOptions {
    pub max_saved: usize,
    pub storage_key: String,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            max_saved: DEFAULT_SAVED_CAP,
            storage_key: RECIPES_KEY.to_string(),
        }
    }
}

/// Holds the lab state and applies user actions to it.
///
/// Every mutation of the saved collection is written through to the store.
/// Write failures are logged and otherwise ignored; the in-memory list stays
/// authoritative for the rest of the session.
pub struct RecipeComposer<S, P, C> {
    catalog: Catalog,
    selection: Selection,
    recipe: Recipe,
    saved: SavedCollection,
    store: S,
    picker: P,
    clock: C,
    storage_key: String,
}

impl<S: KeyValueStore, P: Picker, C: Clock> RecipeComposer<S, P, C> {
    /// Validate `catalog`, load saved recipes and derive the starting recipe.
    pub fn new(
        catalog: Catalog,
        store: S,
        picker: P,
        clock: C,
        options: ComposerOptions,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let saved = SavedCollection::load(&store, &options.storage_key, options.max_saved);
        let selection = catalog.default_selection.clone();
        let recipe = Recipe::derive(&catalog, &selection, clock.now_millis());
        Ok(Self {
            catalog,
            selection,
            recipe,
            saved,
            store,
            picker,
            clock,
            storage_key: options.storage_key,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn saved(&self) -> &SavedCollection {
        &self.saved
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Set (single-select) or toggle (multi-select) `label` in `category`.
    pub fn select(&mut self, category: Category, label: &str) -> Result<(), SelectError> {
        if let Err(err) = self.selection.select(&self.catalog, category, label) {
            tracing::warn!(%category, label, error = %err, "ignoring invalid selection");
            return Err(err);
        }
        self.rederive();
        Ok(())
    }

    /// Replace the whole selection with random draws.
    pub fn randomize(&mut self) {
        self.selection = picker::randomize(&self.catalog, &mut self.picker);
        self.rederive();
    }

    /// Save the current recipe to the front of the collection.
    ///
    /// Each save is stamped with the clock, strictly later than the newest
    /// saved entry, so repeated saves of the same bowl stay distinguishable.
    /// Stamps saturate at `i64::MAX` when stored data already sits there.
    pub fn save(&mut self) -> Recipe {
        let now = self.clock.now_millis();
        let created_at = match self.saved.newest() {
            Some(newest) if newest.created_at >= now => newest.created_at.saturating_add(1),
            _ => now,
        };
        let recipe = self.recipe.clone().restamped(created_at);
        self.saved.push_front(recipe.clone());
        tracing::info!(title = %recipe.title, created_at, "saved recipe");
        self.persist();
        recipe
    }

    /// Remove the saved entry created at `created_at`, if any.
    pub fn remove(&mut self, created_at: i64) -> Option<Recipe> {
        let removed = self.saved.remove_created_at(created_at)?;
        self.persist();
        Some(removed)
    }

    /// Remove the saved entry at `index` (0 is the newest), if any.
    pub fn remove_at(&mut self, index: usize) -> Option<Recipe> {
        let removed = self.saved.remove_at(index)?;
        self.persist();
        Some(removed)
    }

    pub fn clear_saved(&mut self) {
        self.saved.clear();
        self.persist();
    }

    fn rederive(&mut self) {
        self.recipe = Recipe::derive(&self.catalog, &self.selection, self.clock.now_millis());
    }

    fn persist(&mut self) {
        if let Err(err) = self.saved.persist(&mut self.store, &self.storage_key) {
            tracing::warn!(
                key = %self.storage_key,
                error = %err,
                "failed to persist saved recipes; keeping them in memory"
            );
        }
    }
}
