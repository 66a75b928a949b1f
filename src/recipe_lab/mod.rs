//! Procedural noodle recipes with persisted favorites.
//!
//! A [`Catalog`] fixes the option sets and the text templates. The
//! [`RecipeComposer`] holds the current [`Selection`], derives a [`Recipe`]
//! from it after every change, and keeps a bounded [`SavedCollection`] in a
//! [`KeyValueStore`](crate::storage::KeyValueStore).

mod catalog;
mod composer;
pub mod export;
pub mod picker;
mod presets;
mod recipe;
mod saved;
mod selection;
pub mod template;

pub use catalog::{Catalog, CatalogError, Category, CategoryDef, MoodTable, NutritionRule};
pub use composer::{ComposerOptions, RECIPES_KEY, RecipeComposer};
pub use picker::{Picker, RngPicker};
pub use presets::Preset;
pub use recipe::{Clock, Nutrition, Recipe, SystemClock};
pub use saved::{DEFAULT_SAVED_CAP, SavedCollection, SavedError};
pub use selection::{Pick, SelectError, Selection};
