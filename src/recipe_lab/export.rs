//! Text and JSON renderings of a single recipe for clipboard or file export.

use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

use super::recipe::Recipe;

const FILE_PREFIX: &str = "maggilicious-recipe";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize recipe: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Title, numbered steps and mood note, as copied by "Copy steps".
pub fn to_text(recipe: &Recipe) -> String {
    let steps = recipe
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {step}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n{steps}\n\n{}", recipe.title, recipe.mood)
}

/// Pretty-printed JSON of the full recipe.
pub fn to_json(recipe: &Recipe) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(recipe)?)
}

/// Download name such as `maggilicious-recipe-2023-11-14T22-13-20.000Z.json`.
pub fn file_name(recipe: &Recipe) -> String {
    const NAME_FORMAT: &[FormatItem<'_>] = format_description!(
        "[year]-[month]-[day]T[hour]-[minute]-[second].[subsecond digits:3]Z"
    );
    let stamp = utc_datetime(recipe.created_at)
        .and_then(|at| at.format(NAME_FORMAT).ok())
        .unwrap_or_else(|| recipe.created_at.to_string());
    format!("{FILE_PREFIX}-{stamp}.json")
}

/// Write the JSON rendering to `path`.
pub fn write_json(recipe: &Recipe, path: &Path) -> Result<(), ExportError> {
    let json = to_json(recipe)?;
    std::fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Local wall-clock time of `created_at` for list displays.
pub fn display_time(created_at: i64) -> String {
    const DISPLAY_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    utc_datetime(created_at)
        .and_then(|at| at.to_offset(offset).format(DISPLAY_FORMAT).ok())
        .unwrap_or_else(|| created_at.to_string())
}

fn utc_datetime(created_at_ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(created_at_ms) * 1_000_000).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_lab::Preset;
    use tempfile::tempdir;

    fn recipe() -> Recipe {
        let catalog = Preset::NoodleLab.catalog();
        Recipe::derive(&catalog, &catalog.default_selection, 1_700_000_000_123)
    }

    #[test]
    fn text_numbers_steps_between_title_and_mood() {
        let text = to_text(&recipe());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Wavy noodles · Classic salty · Medium");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("1. Boil 400ml water."));
        assert!(lines[5].starts_with("4. Finish with"));
        assert_eq!(lines[6], "");
        assert!(lines[7].starts_with("Mood: comfortably warm."));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn file_name_uses_utc_millis() {
        assert_eq!(
            file_name(&recipe()),
            "maggilicious-recipe-2023-11-14T22-13-20.123Z.json"
        );
    }

    #[test]
    fn json_export_parses_back() {
        let original = recipe();
        let dir = tempdir().unwrap();
        let path = dir.path().join(file_name(&original));
        write_json(&original, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"title\""));
        let back: Recipe = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn write_into_missing_directory_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("bowl.json");
        assert!(matches!(
            write_json(&recipe(), &path),
            Err(ExportError::Write { .. })
        ));
    }
}
