//! Shared state types for the egui UI.

use egui::Color32;

use crate::egui_app::style;

/// Severity of the footer message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::with_tone("Pick a base or hit Surprise me", StatusTone::Idle)
    }

    pub fn with_tone(text: impl Into<String>, tone: StatusTone) -> Self {
        let (label, color) = style::status_badge(tone);
        Self {
            text: text.into(),
            badge_label: label.into(),
            badge_color: color,
        }
    }
}

/// One row of the saved creations list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedRowView {
    pub created_at: i64,
    pub title: String,
    pub saved_at: String,
    /// Comma-joined multi-select labels; empty for layouts without any.
    pub extras: String,
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub saved_rows: Vec<SavedRowView>,
    pub dark_mode: bool,
    /// Text queued for the system clipboard on the next frame.
    pub pending_clipboard: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            saved_rows: Vec::new(),
            dark_mode: true,
            pending_clipboard: None,
        }
    }
}
