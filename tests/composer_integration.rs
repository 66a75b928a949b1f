mod support;

use support::lab_env::{LabEnvGuard, TickingClock};

use maggilicious::{
    egui_app::controller::LabController,
    recipe_lab::{
        Catalog, Category, ComposerOptions, Preset, RECIPES_KEY, RecipeComposer, RngPicker,
        Selection,
    },
    storage::{FileStore, KeyValueStore},
};
use rand::{SeedableRng, rngs::StdRng};
use tempfile::TempDir;

type FileComposer = RecipeComposer<FileStore, RngPicker<StdRng>, TickingClock>;

fn composer_in(dir: &TempDir, catalog: Catalog, options: ComposerOptions) -> FileComposer {
    let store = FileStore::open(dir.path().join("storage")).expect("open file store");
    RecipeComposer::new(
        catalog,
        store,
        RngPicker::new(StdRng::seed_from_u64(42)),
        TickingClock::starting_at(1_700_000_000_000),
        options,
    )
    .expect("valid catalog")
}

/// Two bases, one broth and two heats over the stock mix-ins.
fn narrow_catalog() -> Catalog {
    let mut catalog = Preset::NoodleLab.catalog();
    for def in &mut catalog.categories {
        match def.category {
            Category::Base => def.options = vec!["Wavy".into(), "Flat".into()],
            Category::Broth => def.options = vec!["Classic salty".into()],
            Category::Heat => def.options = vec!["Mild".into(), "Dragon".into()],
            _ => {}
        }
    }
    catalog.default_selection = Selection::default()
        .with_one(Category::Base, "Flat")
        .with_one(Category::Broth, "Classic salty")
        .with_one(Category::Heat, "Mild")
        .with_many(Category::MixIns, &["Corn"]);
    catalog
}

#[test]
fn saved_recipes_survive_reopen() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut composer = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    composer.save();
    composer.randomize();
    composer.save();
    let expected = composer.saved().entries().to_vec();
    drop(composer);

    let reopened = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    assert_eq!(reopened.saved().entries(), expected.as_slice());
    assert!(expected[0].created_at > expected[1].created_at);
}

#[test]
fn saved_collection_keeps_thirty_newest() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut composer = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    let mut stamps = Vec::new();
    for _ in 0..35 {
        composer.randomize();
        stamps.push(composer.save().created_at);
    }
    assert_eq!(composer.saved().len(), 30);
    let kept: Vec<i64> = composer
        .saved()
        .entries()
        .iter()
        .map(|recipe| recipe.created_at)
        .collect();
    let expected: Vec<i64> = stamps.iter().rev().take(30).copied().collect();
    assert_eq!(kept, expected);

    let reopened = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    assert_eq!(reopened.saved().len(), 30);
}

#[test]
fn removing_unknown_entry_changes_nothing() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut composer = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    let saved = composer.save();
    let stored = composer.store().get(RECIPES_KEY).expect("read store");

    assert_eq!(composer.remove(saved.created_at + 7), None);
    assert_eq!(composer.saved().len(), 1);
    assert_eq!(composer.store().get(RECIPES_KEY).expect("read store"), stored);
}

#[test]
fn narrow_catalog_bowl_saves_and_removes_cleanly() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut composer = composer_in(&dir, narrow_catalog(), ComposerOptions::default());
    composer.save();
    let before = composer.saved().entries().to_vec();

    composer.select(Category::Base, "Wavy").expect("base");
    composer
        .select(Category::Broth, "Classic salty")
        .expect("broth");
    composer.select(Category::Heat, "Dragon").expect("heat");
    composer.select(Category::MixIns, "Corn").expect("untoggle corn");
    composer.select(Category::MixIns, "Egg").expect("egg");

    let recipe = composer.recipe().clone();
    assert_eq!(recipe.title, "Wavy noodles · Classic salty · Dragon");
    assert_eq!(recipe.selection.many(Category::MixIns), ["Egg".to_string()]);
    assert_eq!(recipe.nutrition.protein_g, 18);
    assert_eq!(recipe.nutrition.energy_kcal, 530);
    assert!(recipe.mood.contains("absolute chaos"));

    let saved = composer.save();
    assert_eq!(composer.saved().len(), 2);
    assert_eq!(composer.remove(saved.created_at), Some(saved));
    assert_eq!(composer.saved().entries(), before.as_slice());

    let reopened = composer_in(&dir, narrow_catalog(), ComposerOptions::default());
    assert_eq!(reopened.saved().entries(), before.as_slice());
}

#[test]
fn rejects_labels_outside_narrow_catalog() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut composer = composer_in(&dir, narrow_catalog(), ComposerOptions::default());
    let before = composer.recipe().clone();
    assert!(composer.select(Category::Heat, "Medium").is_err());
    assert_eq!(composer.recipe(), &before);
}

#[test]
fn corrupt_store_loads_empty_and_recovers() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut store = FileStore::open(dir.path().join("storage")).expect("open file store");
    store.set(RECIPES_KEY, "{ not json").expect("seed corrupt data");

    let mut composer = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    assert!(composer.saved().is_empty());
    composer.save();

    let reopened = composer_in(&dir, Preset::NoodleLab.catalog(), ComposerOptions::default());
    assert_eq!(reopened.saved().len(), 1);
}

#[test]
fn custom_cap_and_key_are_honored() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let options = ComposerOptions {
        max_saved: 2,
        storage_key: "ramen.favorites".into(),
    };
    let mut composer = composer_in(&dir, Preset::RamenBar.catalog(), options.clone());
    for _ in 0..3 {
        composer.randomize();
        composer.save();
    }
    assert_eq!(composer.saved().len(), 2);
    assert!(composer.store().get(RECIPES_KEY).expect("read").is_none());
    assert!(
        composer
            .store()
            .get("ramen.favorites")
            .expect("read")
            .is_some()
    );
}

#[test]
fn controller_persists_under_config_home() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let config_home = temp.path().join("config");
    std::fs::create_dir_all(&config_home).expect("create config dir");
    let _env = LabEnvGuard::set_config_home(config_home.clone());

    let mut controller = LabController::new().expect("controller");
    controller.save_current();
    assert_eq!(controller.ui.saved_rows.len(), 1);
    controller.toggle_dark_mode();
    drop(controller);

    let app_root = config_home.join(".maggilicious");
    assert!(app_root.join("storage").join("maggilicious.recipes.json").is_file());
    assert!(app_root.join("config.toml").is_file());

    let reopened = LabController::new().expect("controller");
    assert_eq!(reopened.ui.saved_rows.len(), 1);
    assert!(!reopened.ui.dark_mode);
}
