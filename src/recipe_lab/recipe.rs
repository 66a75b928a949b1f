//! Deriving a recipe snapshot from a selection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::catalog::{Catalog, NutritionRule};
use super::selection::Selection;
use super::template;

const SERVING_NOTE: &str = "Serve in a warm bowl, put on lo-fi beats, and slurp.";

/// Rough energy and protein figures for a bowl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub energy_kcal: u32,
    pub protein_g: u32,
}

/// Immutable snapshot of a selection plus its generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub steps: Vec<String>,
    pub mood: String,
    pub nutrition: Nutrition,
    pub selection: Selection,
    /// Unix time in milliseconds.
    pub created_at: i64,
}

impl Recipe {
    /// Build the recipe for `selection`. Only `created_at` comes from outside
    /// the catalog and selection.
    pub fn derive(catalog: &Catalog, selection: &Selection, created_at: i64) -> Self {
        let mood_note = selection
            .one(catalog.mood.category)
            .and_then(|label| catalog.mood.note_for(label))
            .unwrap_or_default();
        Self {
            title: template::render(&catalog.title_template, selection),
            steps: catalog
                .step_templates
                .iter()
                .map(|step| template::render(step, selection))
                .collect(),
            mood: format!("Mood: {mood_note}. {SERVING_NOTE}"),
            nutrition: estimate(&catalog.nutrition, catalog, selection),
            selection: selection.clone(),
            created_at,
        }
    }

    pub(crate) fn restamped(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }
}

fn estimate(rule: &NutritionRule, catalog: &Catalog, selection: &Selection) -> Nutrition {
    let extras: usize = catalog
        .categories
        .iter()
        .filter(|def| def.multi)
        .map(|def| selection.many(def.category).len())
        .sum();
    let bonus: u32 = selection
        .labels()
        .filter_map(|label| rule.protein_bonuses.get(label))
        .sum();
    Nutrition {
        energy_kcal: rule.base_energy + rule.energy_per_extra * extras as u32,
        protein_g: rule.base_protein + bonus,
    }
}

/// Wall-clock source for recipe timestamps.
pub trait Clock {
    /// Current Unix time in milliseconds.
    fn now_millis(&self) -> i64;
}

/// [`Clock`] reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_lab::{Category, Preset};

    #[test]
    fn noodle_lab_default_recipe() {
        let catalog = Preset::NoodleLab.catalog();
        let recipe = Recipe::derive(&catalog, &catalog.default_selection, 1_700_000_000_000);

        assert_eq!(recipe.title, "Wavy noodles · Classic salty · Medium");
        assert_eq!(recipe.steps.len(), 4);
        assert_eq!(
            recipe.steps[0],
            "Boil 400ml water. Add wavy noodles; cook 2.5–3.5 min to your liking"
        );
        assert_eq!(recipe.steps[2], "Stir in Spring onion, Corn for the last 45–60s");
        assert_eq!(
            recipe.mood,
            "Mood: comfortably warm. Serve in a warm bowl, put on lo-fi beats, and slurp."
        );
        assert_eq!(
            recipe.nutrition,
            Nutrition {
                energy_kcal: 540,
                protein_g: 12
            }
        );
        assert_eq!(recipe.created_at, 1_700_000_000_000);
    }

    #[test]
    fn egg_adds_protein_bonus() {
        let catalog = Preset::NoodleLab.catalog();
        let selection = catalog
            .default_selection
            .clone()
            .with_many(Category::MixIns, &["Egg"]);
        let recipe = Recipe::derive(&catalog, &selection, 0);
        assert_eq!(recipe.nutrition.protein_g, 18);
        assert_eq!(recipe.nutrition.energy_kcal, 530);
    }

    #[test]
    fn derivation_is_deterministic_apart_from_timestamp() {
        let catalog = Preset::NoodleLab.catalog();
        let first = Recipe::derive(&catalog, &catalog.default_selection, 1);
        let second = Recipe::derive(&catalog, &catalog.default_selection, 2);
        assert_eq!(first.clone().restamped(2), second);
        assert_eq!(first, Recipe::derive(&catalog, &catalog.default_selection, 1));
    }

    #[test]
    fn ramen_bar_composes_one_sentence() {
        let catalog = Preset::RamenBar.catalog();
        let selection = catalog
            .default_selection
            .clone()
            .with_one(Category::Protein, "chicken")
            .with_one(Category::Topping, "soft-boiled egg");
        let recipe = Recipe::derive(&catalog, &selection, 0);
        assert_eq!(recipe.title, "miso ramen with chicken");
        assert_eq!(
            recipe.steps,
            ["miso broth with chicken, bok choy & soft-boiled egg"]
        );
        assert!(recipe.mood.starts_with("Mood: mellow & savory."));
        assert_eq!(recipe.nutrition.protein_g, 30);
        assert_eq!(recipe.nutrition.energy_kcal, 480);
    }

    #[test]
    fn recipe_round_trips_through_json() {
        let catalog = Preset::NoodleLab.catalog();
        let recipe = Recipe::derive(&catalog, &catalog.default_selection, 42);
        let json = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipe);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
