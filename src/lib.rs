//! Color Hit - fire colored pins into a rotating pie wheel
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (pins, disc, collisions, level generation)
//! - `render`: Narrow drawing surface consumed by the views
//! - `ui`: HUD widgets (pause button, bullets, lives, score labels)
//! - `platform`: Input event abstraction
//! - `persistence`: Best score storage
//! - `tuning`: Data-driven game balance
//! - `session`: Menu / playing / game-over flow around a single game
//!
//! Coordinates are screen pixels with y pointing down. Angles are degrees;
//! a positive rotation turns clockwise on screen.

pub mod error;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{GenerationError, PersistError};
pub use session::{Screen, Session};
pub use tuning::{LevelSettings, PaletteColor, Tuning};

use glam::Vec2;

/// Simulation constants that are not part of the balance tuning
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Screen angle (degrees, clockwise from +x) of a disc member whose own angle is 0.
    /// Every rotating sprite is authored hanging straight below the disc center.
    pub const REST_ANGLE: f32 = 90.0;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Add `theta` degrees to `angle`, wrapping the result
#[inline]
pub fn plus_angle(angle: f32, theta: f32) -> f32 {
    normalize_angle(angle + theta)
}

/// Convert polar (r, degrees) around `center` to screen coordinates
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    center + Vec2::new(r * rad.cos(), r * rad.sin())
}

/// Convert a screen point to polar (r, degrees in [0, 360)) around `center`
#[inline]
pub fn cartesian_to_polar(center: Vec2, pos: Vec2) -> (f32, f32) {
    let d = pos - center;
    (d.length(), normalize_angle(d.y.atan2(d.x).to_degrees()))
}

/// Shortest angular distance between two angles, in [0, 180]
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = normalize_angle(a - b);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_angle_basic() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-1e-7), 0.0);
    }

    #[test]
    fn test_polar_round_trip_quadrants() {
        let center = Vec2::new(350.0, 260.0);
        // 90 degrees points down the screen
        let below = polar_to_cartesian(center, 100.0, 90.0);
        assert!((below - Vec2::new(350.0, 360.0)).length() < 1e-3);
        let (r, theta) = cartesian_to_polar(center, below);
        assert!((r - 100.0).abs() < 1e-3);
        assert!((theta - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert!((angular_distance(355.0, 5.0) - 10.0).abs() < 1e-4);
        assert!((angular_distance(10.0, 190.0) - 180.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn normalize_angle_is_range_closed(x in -1.0e6f32..1.0e6f32) {
            let n = normalize_angle(x);
            prop_assert!((0.0..360.0).contains(&n));
        }

        #[test]
        fn normalize_angle_is_idempotent(x in -1.0e6f32..1.0e6f32) {
            let n = normalize_angle(x);
            prop_assert_eq!(normalize_angle(n), n);
        }
    }
}
