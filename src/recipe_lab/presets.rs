//! Built-in lab layouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, Category, CategoryDef, MoodTable, NutritionRule};
use super::selection::Selection;

/// Which built-in catalog a lab runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Base, broth, heat and up to three mix-ins.
    #[default]
    NoodleLab,
    /// Broth, protein, veggies and a topping, one each.
    RamenBar,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::NoodleLab, Preset::RamenBar];

    pub fn display_name(self) -> &'static str {
        match self {
            Preset::NoodleLab => "Noodle Lab",
            Preset::RamenBar => "Ramen Bar",
        }
    }

    /// Parse the short names accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "noodle" | "noodles" | "noodle_lab" => Some(Preset::NoodleLab),
            "ramen" | "ramen_bar" => Some(Preset::RamenBar),
            _ => None,
        }
    }

    pub fn catalog(self) -> Catalog {
        match self {
            Preset::NoodleLab => noodle_lab(),
            Preset::RamenBar => ramen_bar(),
        }
    }
}

const SERVING_STEPS: [&str; 4] = [
    "Boil 400ml water. Add {base:lower} noodles; cook 2.5–3.5 min to your liking",
    "Whisk broth: {broth} with a spoon of noodle water; add to pot",
    "Stir in {mix_ins} for the last 45–60s",
    "Finish with a knob of butter or a drizzle of sesame oil; sprinkle spring onion",
];

fn noodle_lab() -> Catalog {
    Catalog {
        categories: vec![
            CategoryDef::single(
                Category::Base,
                "Base",
                &["Wavy", "Flat", "Rice", "Soba", "Udon", "Glass"],
            ),
            CategoryDef::single(
                Category::Broth,
                "Broth",
                &[
                    "Classic salty",
                    "Tangy tomato",
                    "Cheesy butter",
                    "Ginger-garlic",
                    "Coconut curry",
                    "Miso + chilli",
                ],
            ),
            CategoryDef::single(Category::Heat, "Heat", &["Mild", "Medium", "Spicy", "Dragon"]),
            CategoryDef::multi(
                Category::MixIns,
                "Mix-ins",
                &[
                    "Corn",
                    "Peas",
                    "Bell pepper",
                    "Onion",
                    "Spring onion",
                    "Garlic chips",
                    "Paneer",
                    "Tofu",
                    "Egg",
                    "Chicken",
                    "Sausage",
                    "Mushroom",
                    "Spinach",
                ],
            ),
        ],
        title_template: "{base} noodles · {broth} · {heat}".into(),
        step_templates: SERVING_STEPS.iter().map(|step| step.to_string()).collect(),
        mood: MoodTable::new(
            Category::Heat,
            &[
                ("Mild", "gentle & cozy"),
                ("Medium", "comfortably warm"),
                ("Spicy", "sniffly good"),
                ("Dragon", "absolute chaos (you asked)"),
            ],
        ),
        nutrition: NutritionRule {
            base_energy: 520,
            energy_per_extra: 10,
            base_protein: 12,
            protein_bonuses: BTreeMap::from([("Egg".to_string(), 6)]),
        },
        default_selection: Selection::default()
            .with_one(Category::Base, "Wavy")
            .with_one(Category::Broth, "Classic salty")
            .with_one(Category::Heat, "Medium")
            .with_many(Category::MixIns, &["Spring onion", "Corn"]),
        draw_count: 3,
    }
}

fn ramen_bar() -> Catalog {
    Catalog {
        categories: vec![
            CategoryDef::single(
                Category::Broth,
                "Broth",
                &["miso", "spicy", "soy", "tonkotsu", "curry"],
            ),
            CategoryDef::single(
                Category::Protein,
                "Protein",
                &["tofu", "chicken", "pork belly", "mushrooms", "shrimp"],
            ),
            CategoryDef::single(
                Category::Veggies,
                "Veggies",
                &["bok choy", "corn", "bean sprouts", "seaweed", "spinach"],
            ),
            CategoryDef::single(
                Category::Topping,
                "Topping",
                &[
                    "soft-boiled egg",
                    "chili oil",
                    "sesame seeds",
                    "pickled ginger",
                    "nori",
                ],
            ),
        ],
        title_template: "{broth} ramen with {protein}".into(),
        step_templates: vec!["{broth} broth with {protein}, {veggies} & {topping}".into()],
        mood: MoodTable::new(
            Category::Broth,
            &[
                ("miso", "mellow & savory"),
                ("spicy", "sniffly good"),
                ("soy", "clean and classic"),
                ("tonkotsu", "rich enough to nap after"),
                ("curry", "warm and fragrant"),
            ],
        ),
        nutrition: NutritionRule {
            base_energy: 480,
            energy_per_extra: 0,
            base_protein: 10,
            protein_bonuses: BTreeMap::from([
                ("chicken".to_string(), 14),
                ("pork belly".to_string(), 12),
                ("shrimp".to_string(), 12),
                ("tofu".to_string(), 8),
                ("soft-boiled egg".to_string(), 6),
            ]),
        },
        default_selection: Selection::default()
            .with_one(Category::Broth, "miso")
            .with_one(Category::Protein, "tofu")
            .with_one(Category::Veggies, "bok choy")
            .with_one(Category::Topping, "nori"),
        draw_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Preset::from_name("Noodle"), Some(Preset::NoodleLab));
        assert_eq!(Preset::from_name(" ramen_bar "), Some(Preset::RamenBar));
        assert_eq!(Preset::from_name("sushi"), None);
    }

    #[test]
    fn noodle_lab_draws_three_mix_ins() {
        let catalog = Preset::NoodleLab.catalog();
        assert_eq!(catalog.draw_count, 3);
        assert_eq!(catalog.options(Category::MixIns).len(), 13);
    }

    #[test]
    fn ramen_bar_has_no_multi_select() {
        let catalog = Preset::RamenBar.catalog();
        assert!(catalog.categories.iter().all(|def| !def.multi));
    }
}
