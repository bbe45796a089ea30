//! The rotating disc: wedges plus everything riding on them
//!
//! Members are kept in collision order: obstacles, bonuses and embedded pins
//! first, wedges last. A thin member overlapping a wedge is therefore always
//! tested before the broad sector underneath it.

use glam::Vec2;
use rand::Rng;

use super::collision::{Needle, Shape, needle_contact};
use super::entities::{Bonus, BonusKind, Obstacle, Wedge};
use super::level::pins_per_color;
use super::partition::{min_circular_gap, random_composition};
use super::pin::Pin;
use crate::error::GenerationError;
use crate::tuning::{LevelSettings, PaletteColor, Tuning};
use crate::{angular_distance, plus_angle};

/// Anything that rotates with the disc
#[derive(Debug, Clone)]
pub enum DiscMember {
    Wedge(Wedge),
    Obstacle(Obstacle),
    Bonus(Bonus),
    /// A pin embedded after a correct hit
    Pin(Pin),
}

impl DiscMember {
    pub fn is_wedge(&self) -> bool {
        matches!(self, DiscMember::Wedge(_))
    }

    pub fn shape(&self, pin_half_width: f32) -> Shape {
        match self {
            DiscMember::Wedge(w) => w.shape(),
            DiscMember::Obstacle(o) => o.shape(),
            DiscMember::Bonus(b) => b.shape(),
            DiscMember::Pin(p) => Shape::Needle(p.needle(pin_half_width)),
        }
    }

    fn spin(&mut self, theta: f32, center: Vec2) {
        match self {
            DiscMember::Wedge(w) => w.mount.spin(theta, center),
            DiscMember::Obstacle(o) => o.mount.spin(theta, center),
            DiscMember::Bonus(b) => b.mount.spin(theta, center),
            DiscMember::Pin(p) => p.mount.spin(theta, center),
        }
    }
}

/// Rotating composite of wedges, obstacles, bonuses and embedded pins
#[derive(Debug, Clone)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    /// Total rotation applied since construction, degrees
    pub rotation: f32,
    pin_half_width: f32,
    members: Vec<DiscMember>,
}

impl Disc {
    /// An empty disc; members are added with [`Disc::push`]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            center: tuning.disc_center,
            radius: tuning.disc_radius,
            rotation: 0.0,
            pin_half_width: tuning.pin_hit_half_width,
            members: Vec::new(),
        }
    }

    /// One equal wedge per distinct color, consecutive from 0 degrees
    pub fn with_wedges(colors: &[PaletteColor], tuning: &Tuning) -> Self {
        let mut disc = Self::new(tuning);
        let span = 360.0 / colors.len().max(1) as f32;
        for (i, &color) in colors.iter().enumerate() {
            disc.push(DiscMember::Wedge(Wedge::new(
                color,
                i as f32 * span,
                span,
                disc.center,
                disc.radius,
            )));
        }
        disc
    }

    /// Build the disc for a level from its pin color sequence
    pub fn for_level<R: Rng + ?Sized>(
        sequence: &[PaletteColor],
        level: u32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let counts = pins_per_color(sequence);
        let colors: Vec<PaletteColor> = counts.iter().map(|&(c, _)| c).collect();
        let mut disc = Self::with_wedges(&colors, tuning);

        let per_wedge = obstacle_split(&counts, level, tuning, rng)?;
        let span = 360.0 / colors.len().max(1) as f32;
        let mut placed: Vec<f32> = Vec::new();
        for (i, &n) in per_wedge.iter().enumerate() {
            let angles = place_in_wedge(i as f32 * span, span, n, &placed, tuning, rng)?;
            for &angle in &angles {
                disc.push(DiscMember::Obstacle(Obstacle::new(angle, tuning)));
            }
            placed.extend(angles);
        }

        let bonus_count = rng.random_range(0..=tuning.max_bonuses);
        for _ in 0..bonus_count {
            let angle = place_bonus(&placed, tuning, rng)?;
            let kind = if rng.random_bool(tuning.heart_probability) {
                BonusKind::Heart
            } else {
                BonusKind::Star
            };
            disc.push(DiscMember::Bonus(Bonus::of_kind(kind, angle, tuning)));
            placed.push(angle);
        }

        log::debug!(
            "Level {} disc: {} wedges, obstacles {:?}, {} bonuses",
            level,
            colors.len(),
            per_wedge,
            bonus_count
        );
        Ok(disc)
    }

    /// Insert a member keeping wedges last
    pub fn push(&mut self, member: DiscMember) {
        if member.is_wedge() {
            self.members.push(member);
        } else {
            self.members.insert(0, member);
        }
    }

    /// Embed a correctly placed pin; it rotates with the disc from now on
    pub fn add(&mut self, mut pin: Pin) {
        pin.embed(self.center);
        self.push(DiscMember::Pin(pin));
    }

    /// Rotate every member by the same amount
    pub fn update(&mut self, dt: f32, settings: &LevelSettings) {
        let theta = settings.rotation_speed * dt;
        if theta == 0.0 {
            return;
        }
        self.rotation = plus_angle(self.rotation, theta);
        for member in &mut self.members {
            member.spin(theta, self.center);
        }
    }

    /// Members in collision order
    pub fn members(&self) -> &[DiscMember] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscMember> {
        self.members.iter()
    }

    /// Index of the first member (in collision order) the needle touches
    pub fn first_hit(&self, needle: &Needle) -> Option<usize> {
        self.members
            .iter()
            .position(|m| needle_contact(needle, &m.shape(self.pin_half_width)).is_some())
    }

    /// Remove and return the bonus at `index`; `None` if it is not a bonus
    pub fn take_bonus(&mut self, index: usize) -> Option<Bonus> {
        if !matches!(self.members.get(index), Some(DiscMember::Bonus(_))) {
            return None;
        }
        match self.members.remove(index) {
            DiscMember::Bonus(bonus) => Some(bonus),
            _ => None,
        }
    }

    pub fn wedges(&self) -> impl Iterator<Item = &Wedge> {
        self.members.iter().filter_map(|m| match m {
            DiscMember::Wedge(w) => Some(w),
            _ => None,
        })
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.members.iter().filter_map(|m| match m {
            DiscMember::Obstacle(o) => Some(o),
            _ => None,
        })
    }

    pub fn bonuses(&self) -> impl Iterator<Item = &Bonus> {
        self.members.iter().filter_map(|m| match m {
            DiscMember::Bonus(b) => Some(b),
            _ => None,
        })
    }

    pub fn embedded_pins(&self) -> impl Iterator<Item = &Pin> {
        self.members.iter().filter_map(|m| match m {
            DiscMember::Pin(p) => Some(p),
            _ => None,
        })
    }

    /// Sum of wedge spans; 360 for any populated disc
    pub fn total_span(&self) -> f32 {
        self.wedges().map(|w| w.span).sum()
    }

    /// True if no wedge precedes a non-wedge member
    pub fn is_collision_ordered(&self) -> bool {
        let first_wedge = self.members.iter().position(DiscMember::is_wedge);
        match first_wedge {
            Some(i) => self.members[i..].iter().all(DiscMember::is_wedge),
            None => true,
        }
    }
}

/// Obstacles per wedge (same order as `counts`), within the density bound
fn obstacle_split<R: Rng + ?Sized>(
    counts: &[(PaletteColor, u32)],
    level: u32,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<Vec<u32>, GenerationError> {
    let wedges = counts.len().max(1);
    let ceiling = tuning.obstacle_cap.min(level);
    let total = rng.random_range(ceiling / 2..=ceiling);

    let span = 360.0 / wedges as f32;
    let geometric = wedge_fit(span, tuning);
    let density = tuning.density_budget / wedges as u32;
    let capacity: Vec<u32> = counts
        .iter()
        .map(|&(_, pins)| density.saturating_sub(pins).min(geometric))
        .collect();

    let room: u32 = capacity.iter().sum();
    if total > room {
        return Err(GenerationError::DensityInfeasible {
            obstacles: total,
            capacity: room,
        });
    }

    for _ in 0..tuning.resample_budget.max(1) {
        let split = random_composition(rng, counts.len(), total)?;
        if split.iter().zip(&capacity).all(|(n, cap)| n <= cap) {
            return Ok(split);
        }
    }
    Err(GenerationError::ResampleBudgetExhausted {
        what: "obstacle split",
        attempts: tuning.resample_budget,
    })
}

/// Most obstacles that fit inside one wedge's inset interior at the minimum gap
///
/// A full-circle wedge wraps onto itself, so its first and last obstacles
/// must keep the gap across 0 degrees as well.
fn wedge_fit(span: f32, tuning: &Tuning) -> u32 {
    let interior = span - 2.0 * tuning.edge_inset;
    if interior < 0.0 {
        return 0;
    }
    let fit = (interior / tuning.min_gap).floor() as u32 + 1;
    if span >= 360.0 {
        fit.min((360.0 / tuning.min_gap).floor() as u32)
    } else {
        fit
    }
}

/// Sample `n` obstacle angles inside a wedge, spaced by at least the minimum
/// gap from each other and from everything already `placed`
fn place_in_wedge<R: Rng + ?Sized>(
    start: f32,
    span: f32,
    n: u32,
    placed: &[f32],
    tuning: &Tuning,
    rng: &mut R,
) -> Result<Vec<f32>, GenerationError> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let lo = start + tuning.edge_inset;
    let interior = span - 2.0 * tuning.edge_inset;
    // Drawing n points in the interior shrunk by the gaps and then spreading
    // them back out yields evenly distributed, gap-respecting layouts
    let slack = interior - (n - 1) as f32 * tuning.min_gap;
    if slack < 0.0 {
        return Err(GenerationError::DensityInfeasible {
            obstacles: n,
            capacity: wedge_fit(span, tuning),
        });
    }

    for _ in 0..tuning.resample_budget.max(1) {
        let mut offsets: Vec<f32> = (0..n).map(|_| rng.random::<f32>() * slack).collect();
        offsets.sort_by(|a, b| a.total_cmp(b));
        let angles: Vec<f32> = offsets
            .iter()
            .enumerate()
            .map(|(i, off)| plus_angle(lo + off, i as f32 * tuning.min_gap))
            .collect();
        let clear = min_circular_gap(&angles) >= tuning.min_gap
            && angles
                .iter()
                .all(|&a| placed.iter().all(|&p| angular_distance(a, p) >= tuning.min_gap));
        if clear {
            return Ok(angles);
        }
    }
    Err(GenerationError::ResampleBudgetExhausted {
        what: "obstacles",
        attempts: tuning.resample_budget,
    })
}

/// Sample one bonus angle anywhere on the disc, clear of everything `placed`
fn place_bonus<R: Rng + ?Sized>(
    placed: &[f32],
    tuning: &Tuning,
    rng: &mut R,
) -> Result<f32, GenerationError> {
    for _ in 0..tuning.resample_budget.max(1) {
        let angle = rng.random_range(0.0..360.0);
        if placed.iter().all(|&p| angular_distance(angle, p) >= tuning.min_gap) {
            return Ok(angle);
        }
    }
    Err(GenerationError::ResampleBudgetExhausted {
        what: "bonuses",
        attempts: tuning.resample_budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelGenerator;
    use crate::sim::partition::min_circular_gap;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn all_ring_angles(disc: &Disc) -> Vec<f32> {
        disc.obstacles()
            .map(|o| o.mount.screen_angle())
            .chain(disc.bonuses().map(|b| b.mount.screen_angle()))
            .collect()
    }

    #[test]
    fn test_wedge_spans_sum_to_full_turn() {
        let tuning = Tuning::default();
        for n in 1..=4 {
            let disc = Disc::with_wedges(&tuning.palette[..n], &tuning);
            assert_eq!(disc.wedges().count(), n);
            assert!((disc.total_span() - 360.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_generated_discs_keep_spacing_and_order() {
        let tuning = Tuning::default();
        let generator = LevelGenerator::new(&tuning).unwrap();
        let mut rng = Pcg32::seed_from_u64(2024);
        for level in 1..=60 {
            let seq = generator.ordered_colors(&mut rng, level).unwrap();
            let disc = Disc::for_level(&seq, level, &tuning, &mut rng).unwrap();

            assert!((disc.total_span() - 360.0).abs() < 1e-3);
            assert!(disc.is_collision_ordered());
            assert!(disc.bonuses().count() <= 3);
            assert!(disc.obstacles().count() as u32 <= tuning.obstacle_cap.min(level));

            let angles = all_ring_angles(&disc);
            assert!(min_circular_gap(&angles) >= tuning.min_gap - 1e-3);
        }
    }

    #[test]
    fn test_obstacles_respect_wedge_density() {
        let tuning = Tuning::default();
        let generator = LevelGenerator::new(&tuning).unwrap();
        let mut rng = Pcg32::seed_from_u64(31);
        for level in 8..=30 {
            let seq = generator.ordered_colors(&mut rng, level).unwrap();
            let counts = pins_per_color(&seq);
            let disc = Disc::for_level(&seq, level, &tuning, &mut rng).unwrap();
            let wedges: Vec<&Wedge> = disc.wedges().collect();
            let cap = tuning.density_budget / wedges.len() as u32;
            for wedge in wedges {
                let inside = disc
                    .obstacles()
                    .filter(|o| {
                        let rel = crate::normalize_angle(o.mount.screen_angle() - wedge.start);
                        rel >= tuning.edge_inset - 1e-3
                            && rel <= wedge.span - tuning.edge_inset + 1e-3
                    })
                    .count() as u32;
                let pins = counts.iter().find(|(c, _)| *c == wedge.color).unwrap().1;
                assert!(pins + inside <= cap);
            }
        }
    }

    #[test]
    fn test_single_color_discs_keep_gap_across_zero() {
        let tuning = Tuning::default();
        let seq = vec![PaletteColor::Red; 8];
        for seed in 0..3000 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let disc = Disc::for_level(&seq, 8, &tuning, &mut rng).unwrap();
            let obstacles: Vec<f32> = disc.obstacles().map(|o| o.mount.screen_angle()).collect();
            assert!(
                min_circular_gap(&obstacles) >= tuning.min_gap - 1e-3,
                "seed {seed}: {obstacles:?}"
            );
            assert!(min_circular_gap(&all_ring_angles(&disc)) >= tuning.min_gap - 1e-3);
        }
    }

    #[test]
    fn test_full_circle_fit_counts_the_wrap() {
        let tuning = Tuning::default();
        let wrap = (360.0 / tuning.min_gap).floor() as u32;
        assert!(wedge_fit(360.0, &tuning) <= wrap);
        let interior = 180.0 - 2.0 * tuning.edge_inset;
        assert_eq!(
            wedge_fit(180.0, &tuning),
            (interior / tuning.min_gap).floor() as u32 + 1
        );
    }

    #[test]
    fn test_first_level_has_at_most_one_obstacle() {
        let tuning = Tuning::default();
        let seq = vec![PaletteColor::Red; 8];
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let disc = Disc::for_level(&seq, 1, &tuning, &mut rng).unwrap();
            assert!(disc.obstacles().count() <= 1);
        }
    }

    #[test]
    fn test_add_pin_goes_before_wedges() {
        let tuning = Tuning::default();
        let mut disc = Disc::with_wedges(&[PaletteColor::Red, PaletteColor::Green], &tuning);
        disc.add(Pin::new(PaletteColor::Red, &tuning));
        assert!(matches!(disc.members()[0], DiscMember::Pin(_)));
        assert!(disc.is_collision_ordered());
        assert_eq!(disc.embedded_pins().count(), 1);
    }

    #[test]
    fn test_update_rotates_all_members_together() {
        let tuning = Tuning::default();
        let mut disc = Disc::with_wedges(&[PaletteColor::Red], &tuning);
        disc.push(DiscMember::Obstacle(Obstacle::new(30.0, &tuning)));
        disc.add(Pin::new(PaletteColor::Red, &tuning));
        let settings = tuning.level_settings(1);

        disc.update(0.5, &settings);
        assert!((disc.rotation - 30.0).abs() < 1e-3);
        let obstacle = disc.obstacles().next().unwrap();
        assert!((obstacle.mount.screen_angle() - 60.0).abs() < 1e-3);
        let pin = disc.embedded_pins().next().unwrap();
        assert!((pin.mount.screen_angle() - 120.0).abs() < 1e-3);
        let wedge = disc.wedges().next().unwrap();
        assert!((wedge.current_start() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let tuning = Tuning::default();
        let mut disc = Disc::with_wedges(&[PaletteColor::Red], &tuning);
        disc.update(0.0, &tuning.level_settings(3));
        assert_eq!(disc.rotation, 0.0);
    }

    #[test]
    fn test_take_bonus_only_removes_bonuses() {
        let tuning = Tuning::default();
        let mut disc = Disc::with_wedges(&[PaletteColor::Red], &tuning);
        disc.push(DiscMember::Bonus(Bonus::of_kind(BonusKind::Heart, 90.0, &tuning)));
        assert!(disc.take_bonus(1).is_none());
        let bonus = disc.take_bonus(0).unwrap();
        assert_eq!(bonus.kind, BonusKind::Heart);
        assert_eq!(disc.bonuses().count(), 0);
        assert!(disc.take_bonus(0).is_none());
    }

    #[test]
    fn test_first_hit_prefers_thin_members() {
        let tuning = Tuning::default();
        let mut disc = Disc::with_wedges(&[PaletteColor::Red], &tuning);
        // Obstacle straight below the center, straddling the rim
        disc.push(DiscMember::Obstacle(Obstacle::new(90.0, &tuning)));
        let x = tuning.disc_center.x;
        let tip_y = tuning.disc_center.y + tuning.disc_radius - 2.0;
        let needle = Needle {
            tip: Vec2::new(x, tip_y),
            tail: Vec2::new(x, tip_y + 80.0),
            half_width: tuning.pin_hit_half_width,
        };
        let index = disc.first_hit(&needle).unwrap();
        assert!(matches!(disc.members()[index], DiscMember::Obstacle(_)));
    }
}
