//! Bridges the recipe composer to the egui renderer.

use std::path::Path;

use rfd::FileDialog;

use crate::config::{self, LabSettings};
use crate::egui_app::state::{SavedRowView, StatusBarState, StatusTone, UiState};
use crate::recipe_lab::{
    CatalogError, Category, Picker, RecipeComposer, RngPicker, SystemClock, export,
};
use crate::storage::{self, KeyValueStore};

pub type LabComposer = RecipeComposer<Box<dyn KeyValueStore>, Box<dyn Picker>, SystemClock>;

/// Maintains app state and applies UI actions to the composer.
pub struct LabController {
    pub ui: UiState,
    composer: LabComposer,
    settings: LabSettings,
    persist_settings: bool,
}

impl LabController {
    /// Load settings and saved recipes from the app root.
    pub fn new() -> Result<Self, CatalogError> {
        let settings = config::load_or_warn();
        let mut controller = Self::with_parts(
            settings,
            storage::open_default(),
            Box::new(RngPicker::thread()),
        )?;
        controller.persist_settings = true;
        Ok(controller)
    }

    /// Build a controller over explicit parts; settings changes stay in memory.
    pub fn with_parts(
        settings: LabSettings,
        store: Box<dyn KeyValueStore>,
        picker: Box<dyn Picker>,
    ) -> Result<Self, CatalogError> {
        let composer = RecipeComposer::new(
            settings.catalog(),
            store,
            picker,
            SystemClock,
            settings.composer_options(),
        )?;
        let mut controller = Self {
            ui: UiState {
                dark_mode: settings.dark_mode,
                ..UiState::default()
            },
            composer,
            settings,
            persist_settings: false,
        };
        controller.refresh_saved_rows();
        Ok(controller)
    }

    pub fn composer(&self) -> &LabComposer {
        &self.composer
    }

    pub fn settings(&self) -> &LabSettings {
        &self.settings
    }

    /// Name shown above the pickers for the running preset.
    pub fn lab_heading(&self) -> &'static str {
        self.settings.preset.display_name()
    }

    pub fn select(&mut self, category: Category, label: &str) {
        if let Err(err) = self.composer.select(category, label) {
            self.set_status(err.to_string(), StatusTone::Warning);
        }
    }

    pub fn randomize(&mut self) {
        self.composer.randomize();
        let title = self.composer.recipe().title.clone();
        self.set_status(format!("Surprise: {title}"), StatusTone::Info);
    }

    pub fn save_current(&mut self) {
        let saved = self.composer.save();
        self.refresh_saved_rows();
        self.set_status(format!("Saved {}", saved.title), StatusTone::Info);
    }

    pub fn remove_saved(&mut self, created_at: i64) {
        if let Some(removed) = self.composer.remove(created_at) {
            self.refresh_saved_rows();
            self.set_status(format!("Removed {}", removed.title), StatusTone::Info);
        }
    }

    pub fn clear_saved(&mut self) {
        self.composer.clear_saved();
        self.refresh_saved_rows();
        self.set_status("Cleared saved creations", StatusTone::Info);
    }

    /// Queue the numbered steps for the clipboard.
    pub fn copy_steps(&mut self) {
        self.ui.pending_clipboard = Some(export::to_text(self.composer.recipe()));
        self.set_status("Steps copied to clipboard", StatusTone::Info);
    }

    /// Queue the full recipe JSON for the clipboard.
    pub fn copy_json(&mut self) {
        match export::to_json(self.composer.recipe()) {
            Ok(json) => {
                self.ui.pending_clipboard = Some(json);
                self.set_status("Recipe JSON copied to clipboard", StatusTone::Info);
            }
            Err(err) => tracing::warn!(error = %err, "recipe JSON copy skipped"),
        }
    }

    /// Ask for a destination and write the current recipe as JSON.
    ///
    /// A cancelled dialog or failed write is logged and otherwise ignored.
    pub fn export_json_via_dialog(&mut self) {
        let recipe = self.composer.recipe();
        let Some(path) = FileDialog::new()
            .set_file_name(export::file_name(recipe))
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        self.export_json_to(&path);
    }

    pub fn export_json_to(&mut self, path: &Path) {
        match export::write_json(self.composer.recipe(), path) {
            Ok(()) => self.set_status(format!("Exported {}", path.display()), StatusTone::Info),
            Err(err) => tracing::warn!(error = %err, "recipe export skipped"),
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.ui.dark_mode = self.settings.dark_mode;
        if self.persist_settings
            && let Err(err) = config::save(&self.settings)
        {
            tracing::warn!(error = %err, "failed to save theme preference");
        }
    }

    /// Hand over text queued for the clipboard, if any.
    pub fn take_clipboard_text(&mut self) -> Option<String> {
        self.ui.pending_clipboard.take()
    }

    fn refresh_saved_rows(&mut self) {
        let multi: Vec<Category> = self
            .composer
            .catalog()
            .categories
            .iter()
            .filter(|def| def.multi)
            .map(|def| def.category)
            .collect();
        self.ui.saved_rows = self
            .composer
            .saved()
            .entries()
            .iter()
            .map(|recipe| SavedRowView {
                created_at: recipe.created_at,
                title: recipe.title.clone(),
                saved_at: export::display_time(recipe.created_at),
                extras: multi
                    .iter()
                    .flat_map(|category| recipe.selection.many(*category))
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::with_tone(text, tone);
    }
}
