//! `{key}` / `{key:lower}` placeholder rendering over a selection.

use super::catalog::Category;
use super::selection::{Pick, Selection};

const LIST_SEPARATOR: &str = ", ";

/// Render `template`, replacing each placeholder with the selected label(s).
///
/// Multi-select values are joined with `", "`. Unknown placeholders are left
/// as written; catalog validation rejects them up front.
pub fn render(template: &str, selection: &Selection) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        match resolve(token, selection) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

/// One `{key}` or `{key:modifier}` token found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub key: String,
    pub modifier: Option<String>,
}

impl Placeholder {
    /// Whether [`render`] knows how to apply the modifier, if any.
    pub fn modifier_supported(&self) -> bool {
        self.modifier
            .as_deref()
            .is_none_or(|modifier| MODIFIERS.contains(&modifier))
    }
}

/// Modifiers accepted after a `:` in a placeholder.
pub const MODIFIERS: [&str; 1] = ["lower"];

/// Placeholders referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let (key, modifier) = split_token(&after[..close]);
        found.push(Placeholder {
            key: key.to_string(),
            modifier: modifier.map(str::to_string),
        });
        rest = &after[close + 1..];
    }
    found
}

fn split_token(token: &str) -> (&str, Option<&str>) {
    match token.split_once(':') {
        Some((key, modifier)) => (key, Some(modifier)),
        None => (token, None),
    }
}

fn resolve(token: &str, selection: &Selection) -> Option<String> {
    let (key, modifier) = split_token(token);
    let category = Category::from_key(key)?;
    let value = match selection.pick(category) {
        Some(Pick::One(label)) => label.clone(),
        Some(Pick::Many(labels)) => labels.join(LIST_SEPARATOR),
        None => String::new(),
    };
    match modifier {
        None => Some(value),
        Some("lower") => Some(value.to_lowercase()),
        Some(_) => None,
    }
}
