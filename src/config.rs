//! Persisted lab settings in `config.toml` under the app root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::recipe_lab::{Catalog, ComposerOptions, DEFAULT_SAVED_CAP, Preset, RECIPES_KEY};
use crate::storage::atomic_write;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User-tunable settings; every field has a serde default so older files load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSettings {
    #[serde(default)]
    pub preset: Preset,
    /// Cap on the saved collection.
    #[serde(default = "default_max_saved")]
    pub max_saved: usize,
    /// Distinct mix-ins drawn by "Surprise me".
    #[serde(default = "default_mix_in_draws")]
    pub mix_in_draws: usize,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            max_saved: default_max_saved(),
            mix_in_draws: default_mix_in_draws(),
            dark_mode: true,
        }
    }
}

impl LabSettings {
    /// Clamp counts to usable values.
    pub fn normalized(mut self) -> Self {
        self.max_saved = self.max_saved.max(1);
        self.mix_in_draws = self.mix_in_draws.max(1);
        self
    }

    /// Catalog for the configured preset with the draw count applied.
    ///
    /// The count only matters for presets with a multi-select category.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = self.preset.catalog();
        if catalog.categories.iter().any(|def| def.multi) {
            catalog.draw_count = self.mix_in_draws.max(1);
        }
        catalog
    }

    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions {
            max_saved: self.max_saved.max(1),
            storage_key: RECIPES_KEY.to_string(),
        }
    }
}

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory found: {0}")]
    Dir(#[from] app_dirs::AppDirError),
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
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app root, returning defaults if the file is missing.
pub fn load_or_default() -> Result<LabSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`, returning defaults if the file is missing.
pub fn load_from(path: &Path) -> Result<LabSettings, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LabSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let settings: LabSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(settings.normalized())
}

/// Load settings, logging and falling back to defaults on any error.
pub fn load_or_warn() -> LabSettings {
    load_or_default().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using default settings");
        LabSettings::default()
    })
}

/// Persist settings to the app root, overwriting any previous contents.
pub fn save(settings: &LabSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &LabSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn default_true() -> bool {
    true
}

fn default_max_saved() -> usize {
    DEFAULT_SAVED_CAP
}

fn default_mix_in_draws() -> usize {
    3
}
