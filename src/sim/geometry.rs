//! Sprite placement on the rotating disc
//!
//! Every disc member is authored as an upright rectangle hanging at a fixed
//! offset from the disc center. Rotating the disc rotates that rectangle about
//! the disc center; [`rotate_about_pivot`] computes where it ends up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    pub fn from_center_half(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// A rectangle rotated about its own center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub center: Vec2,
    pub size: Vec2,
    /// Clockwise rotation in degrees
    pub angle: f32,
}

impl OrientedRect {
    pub fn axis_aligned(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            angle: 0.0,
        }
    }

    /// Map a point given relative to the unrotated rect's center into screen space
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.center + Vec2::from_angle(self.angle.to_radians()).rotate(local)
    }

    /// Smallest axis-aligned box containing the rotated rect
    pub fn aabb(&self) -> Aabb {
        let rot = Vec2::from_angle(self.angle.to_radians());
        let half = self.size * 0.5;
        let extent = Vec2::new(
            rot.x.abs() * half.x + rot.y.abs() * half.y,
            rot.y.abs() * half.x + rot.x.abs() * half.y,
        );
        Aabb::from_center_half(self.center, extent)
    }
}

/// Place a sprite of `size` rotated by `angle` about `world_pivot`.
///
/// Unrotated, the sprite's top-left corner sits at `world_pivot - local_pivot`,
/// so `local_pivot` is the pivot expressed in the sprite's own coordinates.
/// The pivot stays fixed while the sprite's center swings around it:
/// `offset = pivot - center`, `center' = pivot - rotate(offset, angle)`.
pub fn rotate_about_pivot(
    size: Vec2,
    angle: f32,
    world_pivot: Vec2,
    local_pivot: Vec2,
) -> (OrientedRect, Aabb) {
    let center = world_pivot - local_pivot + size * 0.5;
    let offset = world_pivot - center;
    let rotated_offset = Vec2::from_angle(angle.to_radians()).rotate(offset);
    let rect = OrientedRect {
        center: world_pivot - rotated_offset,
        size,
        angle,
    };
    (rect, rect.aabb())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_zero_rotation_keeps_authored_position() {
        let pivot = Vec2::new(350.0, 260.0);
        let (rect, bbox) =
            rotate_about_pivot(Vec2::new(20.0, 80.0), 0.0, pivot, Vec2::new(10.0, -70.0));
        assert!(approx(rect.center, Vec2::new(350.0, 370.0)));
        assert!((bbox.top() - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_quarter_turn_swings_clockwise() {
        let pivot = Vec2::new(350.0, 260.0);
        // Hanging below the pivot, a 90 degree clockwise turn moves it to the left
        let (rect, bbox) =
            rotate_about_pivot(Vec2::new(20.0, 80.0), 90.0, pivot, Vec2::new(10.0, -70.0));
        assert!(approx(rect.center, Vec2::new(240.0, 260.0)));
        // Bounding box is now wide and short
        assert!((bbox.size().x - 80.0).abs() < 1e-3);
        assert!((bbox.size().y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_centered_pivot_only_spins() {
        let pivot = Vec2::new(350.0, 260.0);
        let (rect, _) =
            rotate_about_pivot(Vec2::splat(200.0), 137.0, pivot, Vec2::splat(100.0));
        assert!(approx(rect.center, pivot));
        assert_eq!(rect.angle, 137.0);
    }

    #[test]
    fn test_local_to_world_follows_rotation() {
        let rect = OrientedRect {
            center: Vec2::ZERO,
            size: Vec2::new(20.0, 80.0),
            angle: 90.0,
        };
        // The top of an upright sprite points right after a clockwise quarter turn
        assert!(approx(rect.local_to_world(Vec2::new(0.0, -40.0)), Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_aabb_contains() {
        let b = Aabb::from_pos_size(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(b.contains(Vec2::new(12.0, 14.0)));
        assert!(!b.contains(Vec2::new(16.0, 12.0)));
        assert_eq!(b.center(), Vec2::new(12.5, 12.5));
    }
}
