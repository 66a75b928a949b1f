//! Randomness as an injected capability.
//!
//! The composer never touches a global RNG; it asks a [`Picker`] for indices
//! so tests can script or seed every draw.

use rand::Rng;
use rand::rngs::ThreadRng;

use super::catalog::Catalog;
use super::selection::Selection;

/// Source of uniform choices.
pub trait Picker {
    /// Return an index drawn uniformly from `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<P: Picker + ?Sized> Picker for &mut P {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

impl<P: Picker + ?Sized> Picker for Box<P> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// [`Picker`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<ThreadRng> {
    /// Picker over the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> Picker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Draw up to `count` distinct labels uniformly without replacement.
///
/// Returns every option (in drawn order) when `count` exceeds the set size.
pub fn draw_distinct<P: Picker + ?Sized>(
    picker: &mut P,
    options: &[String],
    count: usize,
) -> Vec<String> {
    let mut pool: Vec<&String> = options.iter().collect();
    let mut drawn = Vec::with_capacity(count.min(pool.len()));
    while drawn.len() < count && !pool.is_empty() {
        let index = picker.pick(pool.len());
        drawn.push(pool.swap_remove(index).clone());
    }
    drawn
}

/// Build a fresh selection with every category drawn at random.
///
/// Single-select categories get one uniform draw each; multi-select
/// categories get `catalog.draw_count` distinct labels.
pub fn randomize<P: Picker + ?Sized>(catalog: &Catalog, picker: &mut P) -> Selection {
    catalog
        .categories
        .iter()
        .fold(Selection::default(), |selection, def| {
            if def.multi {
                let drawn = draw_distinct(&mut *picker, &def.options, catalog.draw_count);
                let labels: Vec<&str> = drawn.iter().map(String::as_str).collect();
                selection.with_many(def.category, &labels)
            } else {
                let index = picker.pick(def.options.len());
                selection.with_one(def.category, &def.options[index])
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_lab::{Category, Preset};
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::{BTreeSet, VecDeque};

    /// Replays scripted indices, wrapping each into range.
    struct Scripted(VecDeque<usize>);

    impl Picker for Scripted {
        fn pick(&mut self, len: usize) -> usize {
            self.0.pop_front().unwrap_or(0) % len
        }
    }

    #[test]
    fn randomize_stays_inside_option_sets() {
        let catalog = Preset::NoodleLab.catalog();
        let mut picker = RngPicker::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let selection = randomize(&catalog, &mut picker);
            assert_eq!(selection.check(&catalog), Ok(()));
            let mix_ins = selection.many(Category::MixIns);
            assert_eq!(mix_ins.len(), catalog.draw_count);
            let distinct: BTreeSet<&String> = mix_ins.iter().collect();
            assert_eq!(distinct.len(), mix_ins.len());
        }
    }

    #[test]
    fn scripted_picks_drive_every_category() {
        let catalog = Preset::NoodleLab.catalog();
        // base, broth, heat, then three mix-in draws from a shrinking pool.
        let mut picker = Scripted(VecDeque::from([1, 0, 3, 8, 0, 8]));
        let selection = randomize(&catalog, &mut picker);

        assert_eq!(selection.one(Category::Base), Some("Flat"));
        assert_eq!(selection.one(Category::Broth), Some("Classic salty"));
        assert_eq!(selection.one(Category::Heat), Some("Dragon"));
        // Removing "Egg" swaps "Spinach" into slot 8; removing "Corn" leaves it there.
        assert_eq!(selection.many(Category::MixIns), ["Egg", "Corn", "Spinach"]);
    }

    #[test]
    fn draw_count_is_clamped_to_pool_size() {
        let options: Vec<String> = ["Egg", "Corn"].iter().map(|s| s.to_string()).collect();
        let mut picker = RngPicker::new(StdRng::seed_from_u64(1));
        let drawn = draw_distinct(&mut picker, &options, 5);
        assert_eq!(drawn.len(), 2);
        let set: BTreeSet<&str> = drawn.iter().map(String::as_str).collect();
        assert_eq!(set, BTreeSet::from(["Corn", "Egg"]));
    }

    #[test]
    fn every_mix_in_can_be_drawn() {
        let catalog = Preset::NoodleLab.catalog();
        let mut picker = RngPicker::new(StdRng::seed_from_u64(42));
        let mut seen = BTreeSet::new();
        for _ in 0..500 {
            seen.extend(randomize(&catalog, &mut picker).many(Category::MixIns).to_vec());
        }
        assert_eq!(seen.len(), catalog.options(Category::MixIns).len());
    }
}
