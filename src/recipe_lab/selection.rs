//! The current choice per category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{Catalog, Category};

/// Value held for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pick {
    One(String),
    /// Distinct labels in the order they were chosen.
    Many(Vec<String>),
}

/// Chosen label(s) per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    picks: BTreeMap<Category, Pick>,
}

/// A `select` call that names something outside the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("Category {0} is not part of this lab")]
    UnknownCategory(Category),
    #[error("{label:?} is not an option for {category}")]
    UnknownLabel { category: Category, label: String },
    #[error("{category} expects {expected} value")]
    WrongShape {
        category: Category,
        expected: &'static str,
    },
}

impl Selection {
    pub fn with_one(mut self, category: Category, label: &str) -> Self {
        self.picks.insert(category, Pick::One(label.to_string()));
        self
    }

    /// Set a multi-select value; repeated labels collapse to their first position.
    pub fn with_many(mut self, category: Category, labels: &[&str]) -> Self {
        let mut distinct: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !distinct.iter().any(|existing| existing == label) {
                distinct.push(label.to_string());
            }
        }
        self.picks.insert(category, Pick::Many(distinct));
        self
    }

    pub fn pick(&self, category: Category) -> Option<&Pick> {
        self.picks.get(&category)
    }

    pub fn one(&self, category: Category) -> Option<&str> {
        match self.picks.get(&category) {
            Some(Pick::One(label)) => Some(label),
            _ => None,
        }
    }

    /// Labels of a multi-select category; empty when nothing is chosen.
    pub fn many(&self, category: Category) -> &[String] {
        match self.picks.get(&category) {
            Some(Pick::Many(labels)) => labels,
            _ => &[],
        }
    }

    pub fn contains(&self, category: Category, label: &str) -> bool {
        match self.picks.get(&category) {
            Some(Pick::One(current)) => current == label,
            Some(Pick::Many(labels)) => labels.iter().any(|current| current == label),
            None => false,
        }
    }

    /// Every selected label across all categories.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.picks.values().flat_map(|pick| match pick {
            Pick::One(label) => std::slice::from_ref(label).iter(),
            Pick::Many(labels) => labels.iter(),
        })
        .map(String::as_str)
    }

    /// Replace a single-select label or toggle a multi-select one.
    ///
    /// Labels outside the category's option set leave the selection untouched.
    pub fn select(
        &mut self,
        catalog: &Catalog,
        category: Category,
        label: &str,
    ) -> Result<(), SelectError> {
        let def = catalog
            .def(category)
            .ok_or(SelectError::UnknownCategory(category))?;
        if !def.contains(label) {
            return Err(SelectError::UnknownLabel {
                category,
                label: label.to_string(),
            });
        }
        if !def.multi {
            self.picks.insert(category, Pick::One(label.to_string()));
            return Ok(());
        }
        match self.picks.get_mut(&category) {
            Some(Pick::Many(labels)) => match labels.iter().position(|current| current == label) {
                Some(index) => {
                    labels.remove(index);
                }
                None => labels.push(label.to_string()),
            },
            _ => {
                self.picks
                    .insert(category, Pick::Many(vec![label.to_string()]));
            }
        }
        Ok(())
    }

    /// Verify every category of `catalog` holds a value drawn from its options.
    pub fn check(&self, catalog: &Catalog) -> Result<(), SelectError> {
        for def in &catalog.categories {
            let labels: &[String] = match (self.picks.get(&def.category), def.multi) {
                (Some(Pick::One(label)), false) => std::slice::from_ref(label),
                (Some(Pick::Many(labels)), true) => labels,
                (None, true) => &[],
                (_, multi) => {
                    return Err(SelectError::WrongShape {
                        category: def.category,
                        expected: if multi { "a list" } else { "one" },
                    });
                }
            };
            if let Some(label) = labels.iter().find(|label| !def.contains(label)) {
                return Err(SelectError::UnknownLabel {
                    category: def.category,
                    label: label.clone(),
                });
            }
        }
        if let Some(category) = self
            .picks
            .keys()
            .find(|category| catalog.def(**category).is_none())
        {
            return Err(SelectError::UnknownCategory(*category));
        }
        Ok(())
    }
}
