//! Library exports for the desktop app, the lab CLI and the integration tests.
/// Per-user directory resolution.
pub mod app_dirs;
/// Persisted lab settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Rotating file logs.
pub mod logging;
/// Catalogs, selections, recipes and the saved collection.
pub mod recipe_lab;
/// Key-value persistence for saved recipes.
pub mod storage;
