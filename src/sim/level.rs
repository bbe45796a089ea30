//! Level generation: which colors appear and how many pins each gets
//!
//! Difficulty ramps smoothly with the level number: the chance of a
//! one-color disc shrinks while the chance of a four-color disc grows,
//! with no hard threshold table.

use rand::Rng;
use rand::seq::SliceRandom;

use super::partition::random_partition;
use crate::error::GenerationError;
use crate::tuning::{PaletteColor, Tuning};

/// Number of distinct colors for `level` given a uniform roll in [0, 1)
pub fn color_count_for_roll(level: u32, roll: f64) -> usize {
    let l = level.max(1) as f64;
    let denom = 16.0 * l;
    if roll < (l + 11.0) / denom {
        1
    } else if roll < (5.0 * l + 11.0) / denom {
        2
    } else if roll < (11.0 * l + 5.0) / denom {
        3
    } else {
        4
    }
}

/// Produces the pin color sequence for each level
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    palette: Vec<PaletteColor>,
    max_distinct_colors: usize,
    pin_cap: u32,
    pin_cap_discount: u32,
    resample_budget: u32,
}

impl LevelGenerator {
    /// Fails if the tuning could ask for more colors than the palette holds
    pub fn new(tuning: &Tuning) -> Result<Self, GenerationError> {
        tuning.validate()?;
        Ok(Self {
            palette: tuning.palette.clone(),
            max_distinct_colors: tuning.max_distinct_colors,
            pin_cap: tuning.pin_cap,
            pin_cap_discount: tuning.pin_cap_discount,
            resample_budget: tuning.resample_budget,
        })
    }

    /// Shuffled pin colors for `level`, one entry per pin.
    ///
    /// Pins are fired from the back of the sequence: the last entry is the
    /// first pin of the level.
    pub fn ordered_colors<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        level: u32,
    ) -> Result<Vec<PaletteColor>, GenerationError> {
        let count = color_count_for_roll(level, rng.random::<f64>()).min(self.max_distinct_colors);
        let colors = self.pick_colors(rng, count)?;

        let discount = rng.random_range(0..=self.pin_cap_discount);
        let pins = self.pin_cap.saturating_sub(discount);
        let per_color = random_partition(rng, count, pins, true, self.resample_budget)?;

        let mut sequence: Vec<PaletteColor> = colors
            .iter()
            .zip(&per_color)
            .flat_map(|(&color, &n)| std::iter::repeat_n(color, n as usize))
            .collect();
        sequence.shuffle(rng);

        log::debug!(
            "Level {}: {} colors {:?} split {:?}",
            level,
            count,
            colors,
            per_color
        );
        Ok(sequence)
    }

    /// `count` distinct palette colors in random order
    fn pick_colors<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<PaletteColor>, GenerationError> {
        if count > self.palette.len() {
            return Err(GenerationError::PaletteTooSmall {
                needed: count,
                available: self.palette.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, self.palette.len(), count)
            .iter()
            .map(|i| self.palette[i])
            .collect())
    }
}

/// Pins per color, in order of first appearance in `sequence`
pub fn pins_per_color(sequence: &[PaletteColor]) -> Vec<(PaletteColor, u32)> {
    let mut counts: Vec<(PaletteColor, u32)> = Vec::new();
    for &color in sequence {
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, n)) => *n += 1,
            None => counts.push((color, 1)),
        }
    }
    counts
}
