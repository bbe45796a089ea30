//! Random integer partitions and angular spacing helpers

use rand::Rng;

use crate::error::GenerationError;

/// Default cap on a single part: `round(total / n) + 2` (ties to even)
pub fn default_upper_bound(n: usize, total: u32) -> u32 {
    (total as f64 / n as f64).round_ties_even() as u32 + 2
}

/// Split `total` into `n` positive parts that sum to `total`.
///
/// Cut points are `n - 1` distinct values drawn from `[1, total)`; the parts are
/// the gaps between consecutive sorted cuts. With `enforce_upper_bound` the
/// draw is repeated until no part exceeds [`default_upper_bound`]. Requires
/// `total >= n`; a draw that keeps failing stops after `budget` attempts.
pub fn random_partition<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    total: u32,
    enforce_upper_bound: bool,
    budget: u32,
) -> Result<Vec<u32>, GenerationError> {
    let bound = enforce_upper_bound.then(|| default_upper_bound(n, total));
    random_partition_bounded(rng, n, total, bound, budget)
}

/// [`random_partition`] with an explicit cap on each part
pub fn random_partition_bounded<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    total: u32,
    max_part: Option<u32>,
    budget: u32,
) -> Result<Vec<u32>, GenerationError> {
    if n == 0 || (total as usize) < n {
        return Err(GenerationError::InvalidPartition { parts: n, total });
    }
    if let Some(max) = max_part
        && (max as u64) * (n as u64) < total as u64
    {
        return Err(GenerationError::InvalidPartition { parts: n, total });
    }

    for _ in 0..budget.max(1) {
        let parts = draw_partition(rng, n, total);
        let within = max_part.is_none_or(|max| parts.iter().all(|&p| p <= max));
        if within {
            return Ok(parts);
        }
    }

    Err(GenerationError::ResampleBudgetExhausted {
        what: "partition",
        attempts: budget,
    })
}

fn draw_partition<R: Rng + ?Sized>(rng: &mut R, n: usize, total: u32) -> Vec<u32> {
    let mut cuts: Vec<u32> = rand::seq::index::sample(rng, total as usize - 1, n - 1)
        .iter()
        .map(|i| i as u32 + 1)
        .collect();
    cuts.push(0);
    cuts.push(total);
    cuts.sort_unstable();
    cuts.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Split `total` into `n` parts that may be zero
pub fn random_composition<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    total: u32,
) -> Result<Vec<u32>, GenerationError> {
    // Stars and bars: shift a positive partition of total + n down by one
    let parts = random_partition_bounded(rng, n, total + n as u32, None, 1)?;
    Ok(parts.into_iter().map(|p| p - 1).collect())
}

/// Smallest difference between consecutive values after sorting.
///
/// Returns `f32::INFINITY` for fewer than two values.
pub fn min_pairwise_gap(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f32::INFINITY, f32::min)
}

/// Like [`min_pairwise_gap`] for angles in [0, 360), also counting the gap
/// that wraps past 360.
pub fn min_circular_gap(angles: &[f32]) -> f32 {
    if angles.len() < 2 {
        return f32::INFINITY;
    }
    let first = angles.iter().copied().fold(f32::INFINITY, f32::min);
    let last = angles.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    min_pairwise_gap(angles).min(first + 360.0 - last)
}
