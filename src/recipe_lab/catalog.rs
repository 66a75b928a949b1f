//! Option sets and the presentation rules that turn a selection into a recipe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::selection::Selection;
use super::template;

/// Every recipe category either lab layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Base,
    Broth,
    Heat,
    Protein,
    Veggies,
    Topping,
    MixIns,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Base,
        Category::Broth,
        Category::Heat,
        Category::Protein,
        Category::Veggies,
        Category::Topping,
        Category::MixIns,
    ];

    /// Stable key used in templates and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::Base => "base",
            Category::Broth => "broth",
            Category::Heat => "heat",
            Category::Protein => "protein",
            Category::Veggies => "veggies",
            Category::Topping => "topping",
            Category::MixIns => "mix_ins",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One option set: the labels offered for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDef {
    pub category: Category,
    /// Heading shown next to the picker.
    pub label: String,
    /// Multi-select categories hold any number of distinct labels.
    pub multi: bool,
    pub options: Vec<String>,
}

impl CategoryDef {
    pub fn single(category: Category, label: &str, options: &[&str]) -> Self {
        Self::build(category, label, false, options)
    }

    pub fn multi(category: Category, label: &str, options: &[&str]) -> Self {
        Self::build(category, label, true, options)
    }

    fn build(category: Category, label: &str, multi: bool, options: &[&str]) -> Self {
        Self {
            category,
            label: label.to_string(),
            multi,
            options: options.iter().map(|option| option.to_string()).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|option| option == label)
    }
}

/// Closed lookup from every label of one single-select category to a phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodTable {
    pub category: Category,
    pub notes: BTreeMap<String, String>,
}

impl MoodTable {
    pub fn new(category: Category, notes: &[(&str, &str)]) -> Self {
        Self {
            category,
            notes: notes
                .iter()
                .map(|(label, note)| (label.to_string(), note.to_string()))
                .collect(),
        }
    }

    pub fn note_for(&self, label: &str) -> Option<&str> {
        self.notes.get(label).map(String::as_str)
    }
}

/// Additive, purely illustrative energy and protein estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionRule {
    pub base_energy: u32,
    /// Added once per label chosen in any multi-select category.
    pub energy_per_extra: u32,
    pub base_protein: u32,
    /// Added when the label is part of the selection, in any category.
    pub protein_bonuses: BTreeMap<String, u32>,
}

/// The full configuration of a recipe lab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<CategoryDef>,
    pub title_template: String,
    pub step_templates: Vec<String>,
    pub mood: MoodTable,
    pub nutrition: NutritionRule,
    pub default_selection: Selection,
    /// How many distinct labels a randomize draws for multi-select categories.
    pub draw_count: usize,
}

/// Reasons a catalog cannot drive the composer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no categories")]
    NoCategories,
    #[error("Category {0} is defined more than once")]
    DuplicateCategory(Category),
    #[error("Category {0} has no options")]
    EmptyOptions(Category),
    #[error("Category {category} lists {label:?} more than once")]
    DuplicateOption { category: Category, label: String },
    #[error("Mood table points at {0}, which is not a single-select category")]
    MoodCategory(Category),
    #[error("Mood table has no note for {category} option {label:?}")]
    MissingMoodNote { category: Category, label: String },
    #[error("Template placeholder {{{placeholder}}} does not name a catalog category")]
    UnknownPlaceholder { placeholder: String },
    #[error("Template placeholder {{{placeholder}:{modifier}}} uses an unsupported modifier")]
    UnknownModifier { placeholder: String, modifier: String },
    #[error("Default selection is invalid: {0}")]
    DefaultSelection(#[from] super::selection::SelectError),
}

impl Catalog {
    pub fn def(&self, category: Category) -> Option<&CategoryDef> {
        self.categories.iter().find(|def| def.category == category)
    }

    pub fn options(&self, category: Category) -> &[String] {
        self.def(category)
            .map(|def| def.options.as_slice())
            .unwrap_or_default()
    }

    /// Check every invariant the composer relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }
        let mut seen = BTreeSet::new();
        for def in &self.categories {
            if !seen.insert(def.category) {
                return Err(CatalogError::DuplicateCategory(def.category));
            }
            if def.options.is_empty() {
                return Err(CatalogError::EmptyOptions(def.category));
            }
            let mut labels = BTreeSet::new();
            if let Some(dup) = def.options.iter().find(|label| !labels.insert(label.as_str())) {
                return Err(CatalogError::DuplicateOption {
                    category: def.category,
                    label: dup.clone(),
                });
            }
        }

        let mood_def = self
            .def(self.mood.category)
            .filter(|def| !def.multi)
            .ok_or(CatalogError::MoodCategory(self.mood.category))?;
        if let Some(label) = mood_def
            .options
            .iter()
            .find(|label| self.mood.note_for(label).is_none())
        {
            return Err(CatalogError::MissingMoodNote {
                category: mood_def.category,
                label: label.clone(),
            });
        }

        for text in std::iter::once(&self.title_template).chain(&self.step_templates) {
            for placeholder in template::placeholders(text) {
                let known = Category::from_key(&placeholder.key)
                    .is_some_and(|category| self.def(category).is_some());
                if !known {
                    return Err(CatalogError::UnknownPlaceholder {
                        placeholder: placeholder.key,
                    });
                }
                if !placeholder.modifier_supported() {
                    return Err(CatalogError::UnknownModifier {
                        placeholder: placeholder.key,
                        modifier: placeholder.modifier.unwrap_or_default(),
                    });
                }
            }
        }

        self.default_selection.check(self)?;
        Ok(())
    }
}
