//! Game balance and layout tuning
//!
//! A single immutable value handed to the level generator, the disc, pins and
//! the tick. Loadable from JSON; any missing field keeps its default.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Pin / wedge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaletteColor {
    Red,
    Green,
    Orange,
    Purple,
    Blue,
    Yellow,
}

impl PaletteColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteColor::Red => "Red",
            PaletteColor::Green => "Green",
            PaletteColor::Orange => "Orange",
            PaletteColor::Purple => "Purple",
            PaletteColor::Blue => "Blue",
            PaletteColor::Yellow => "Yellow",
        }
    }


    /// 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            PaletteColor::Red => 0xF3_24_24,
            PaletteColor::Green => 0x6B_CB_77,
            PaletteColor::Orange => 0xFF_77_00,
            PaletteColor::Purple => 0x54_16_90,
            PaletteColor::Blue => 0x2F_80_ED,
            PaletteColor::Yellow => 0xF2_C9_4C,
        }
    }
}

impl FromStr for PaletteColor {
    type Err = GenerationError;

    /// Case-insensitive color name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(PaletteColor::Red),
            "green" => Ok(PaletteColor::Green),
            "orange" => Ok(PaletteColor::Orange),
            "purple" => Ok(PaletteColor::Purple),
            "blue" => Ok(PaletteColor::Blue),
            "yellow" => Ok(PaletteColor::Yellow),
            _ => Err(GenerationError::InvalidTuning(format!("unknown color '{s}'"))),
        }
    }
}

/// Per-level motion settings derived from [`Tuning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSettings {
    /// Disc rotation, degrees per second
    pub rotation_speed: f32,
    /// Pin flight speed, pixels per second (upward)
    pub shoot_speed: f32,
    /// Pin fall speed after a miss, pixels per second
    pub drop_speed: f32,
}

/// HUD placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// Bottom-most bullet bar top-left; further bars stack upward
    pub bullets_pos: Vec2,
    pub bullet_size: Vec2,
    /// First heart icon top-left; further hearts stack downward
    pub hearts_pos: Vec2,
    pub heart_size: Vec2,
    pub score_pos: Vec2,
    pub best_score_pos: Vec2,
    pub pause_pos: Vec2,
    pub pause_size: Vec2,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            bullets_pos: Vec2::new(50.0, 500.0),
            bullet_size: Vec2::new(20.0, 4.0),
            hearts_pos: Vec2::new(20.0, 20.0),
            heart_size: Vec2::new(24.0, 24.0),
            score_pos: Vec2::new(350.0, 40.0),
            best_score_pos: Vec2::new(350.0, 70.0),
            pause_pos: Vec2::new(640.0, 20.0),
            pause_size: Vec2::new(40.0, 40.0),
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub play_area: Vec2,
    pub disc_center: Vec2,
    pub disc_radius: f32,

    // === Pins ===
    pub pin_size: Vec2,
    /// How deep an embedded pin's tip sits inside the disc rim
    pub prick_depth: f32,
    /// Gap between the resting pin and the bottom of the play area
    pub pin_bottom_margin: f32,
    /// Half-width of the pin's needle used for collision
    pub pin_hit_half_width: f32,
    pub shoot_speed: f32,
    pub drop_speed: f32,

    // === Disc rotation (degrees per second) ===
    pub rotation_speed: f32,
    pub rotation_speed_per_level: f32,
    pub max_rotation_speed: f32,

    // === Level generation ===
    pub palette: Vec<PaletteColor>,
    pub max_distinct_colors: usize,
    /// Pins per level before the random discount
    pub pin_cap: u32,
    /// Pins per level are `pin_cap - rand(0..=pin_cap_discount)`
    pub pin_cap_discount: u32,
    /// Obstacles per disc never exceed `min(obstacle_cap, level)`
    pub obstacle_cap: u32,
    /// Each wedge keeps `pins + obstacles <= density_budget / wedges`
    pub density_budget: u32,
    /// Obstacles stay this many degrees away from their wedge's edges
    pub edge_inset: f32,
    /// Minimum angular separation among obstacles and bonuses
    pub min_gap: f32,
    pub obstacle_size: Vec2,
    /// Distance from disc center to the obstacle's near edge
    pub obstacle_radius: f32,
    pub bonus_size: Vec2,
    /// Distance from disc center to the bonus's near edge
    pub bonus_radius: f32,
    pub max_bonuses: u32,
    pub heart_probability: f64,
    pub star_bonus_score: u32,
    /// Attempts allowed for each rejection-sampling loop
    pub resample_budget: u32,

    // === Scoring / lives ===
    pub prick_score_min: u32,
    pub prick_score_max: u32,
    pub starting_lives: u8,
    pub max_lives: u8,

    pub hud: HudLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_area: Vec2::new(700.0, 700.0),
            disc_center: Vec2::new(350.0, 260.0),
            disc_radius: 100.0,

            pin_size: Vec2::new(20.0, 80.0),
            prick_depth: 30.0,
            pin_bottom_margin: 20.0,
            pin_hit_half_width: 3.0,
            shoot_speed: 1500.0,
            drop_speed: 300.0,

            rotation_speed: 60.0,
            rotation_speed_per_level: 6.0,
            max_rotation_speed: 150.0,

            palette: vec![
                PaletteColor::Red,
                PaletteColor::Green,
                PaletteColor::Orange,
                PaletteColor::Purple,
            ],
            max_distinct_colors: 4,
            pin_cap: 12,
            pin_cap_discount: 4,
            obstacle_cap: 8,
            density_budget: 24,
            edge_inset: 5.0,
            min_gap: 15.0,
            obstacle_size: Vec2::new(16.0, 16.0),
            obstacle_radius: 92.0,
            bonus_size: Vec2::new(24.0, 24.0),
            bonus_radius: 120.0,
            max_bonuses: 3,
            heart_probability: 0.25,
            star_bonus_score: 25,
            resample_budget: 10_000,

            prick_score_min: 10,
            prick_score_max: 15,
            starting_lives: 3,
            max_lives: 5,

            hud: HudLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse a tuning override; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        let tuning: Tuning = serde_json::from_str(json)
            .map_err(|e| GenerationError::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tuning that can never produce a playable level
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(1..=4).contains(&self.max_distinct_colors) {
            return Err(GenerationError::InvalidTuning(format!(
                "max_distinct_colors must be 1..=4, got {}",
                self.max_distinct_colors
            )));
        }
        if self.palette.len() < self.max_distinct_colors {
            return Err(GenerationError::PaletteTooSmall {
                needed: self.max_distinct_colors,
                available: self.palette.len(),
            });
        }
        let min_pins = self.pin_cap.saturating_sub(self.pin_cap_discount);
        if (min_pins as usize) < self.max_distinct_colors {
            return Err(GenerationError::InvalidTuning(format!(
                "at least {} pins per level required, pin budget can drop to {min_pins}",
                self.max_distinct_colors
            )));
        }
        if self.disc_radius <= 0.0 || self.shoot_speed <= 0.0 || self.drop_speed <= 0.0 {
            return Err(GenerationError::InvalidTuning(
                "radius and speeds must be positive".to_string(),
            ));
        }
        if self.min_gap <= 0.0 {
            return Err(GenerationError::InvalidTuning(
                "min_gap must be positive".to_string(),
            ));
        }
        if self.prick_score_min > self.prick_score_max {
            return Err(GenerationError::InvalidTuning(
                "prick score range is empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.heart_probability) {
            return Err(GenerationError::InvalidTuning(
                "heart_probability must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Motion settings for the given (1-based) level
    pub fn level_settings(&self, level: u32) -> LevelSettings {
        let ramp = self.rotation_speed_per_level * level.saturating_sub(1) as f32;
        LevelSettings {
            rotation_speed: (self.rotation_speed + ramp).min(self.max_rotation_speed),
            shoot_speed: self.shoot_speed,
            drop_speed: self.drop_speed,
        }
    }

    /// Where a fresh pin waits: horizontally centered, `pin_bottom_margin` above the floor
    pub fn pin_rest_center(&self) -> Vec2 {
        Vec2::new(
            self.play_area.x / 2.0,
            self.play_area.y - self.pin_bottom_margin - self.pin_size.y / 2.0,
        )
    }
}
