//! Disc members: wedges, obstacles and bonus pickups
//!
//! All of them hang off the disc center through a [`Mount`] and rotate with
//! the disc. Only their angle changes after construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Shape;
use super::geometry::{Aabb, OrientedRect, rotate_about_pivot};
use crate::consts::REST_ANGLE;
use crate::tuning::{PaletteColor, Tuning};
use crate::{normalize_angle, plus_angle};

/// Rotating attachment of a sprite to the disc center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mount {
    /// Own rotation in degrees (clockwise)
    pub angle: f32,
    pub size: Vec2,
    /// Disc center expressed in the sprite's unrotated coordinates
    pub local_pivot: Vec2,
    /// Current placement
    pub rect: OrientedRect,
    pub bbox: Aabb,
}

impl Mount {
    pub fn new(size: Vec2, local_pivot: Vec2, angle: f32, pivot: Vec2) -> Self {
        let angle = normalize_angle(angle);
        let (rect, bbox) = rotate_about_pivot(size, angle, pivot, local_pivot);
        Self {
            angle,
            size,
            local_pivot,
            rect,
            bbox,
        }
    }

    /// Mount for a sprite whose near edge hangs `radius` below the pivot,
    /// rotated so its center lies at `screen_angle` around the pivot
    pub fn on_ring(size: Vec2, radius: f32, screen_angle: f32, pivot: Vec2) -> Self {
        let local_pivot = Vec2::new(size.x / 2.0, -radius);
        Self::new(size, local_pivot, screen_angle - REST_ANGLE, pivot)
    }

    /// Advance by `theta` degrees and recompute the placement
    pub fn spin(&mut self, theta: f32, pivot: Vec2) {
        self.angle = plus_angle(self.angle, theta);
        let (rect, bbox) = rotate_about_pivot(self.size, self.angle, pivot, self.local_pivot);
        self.rect = rect;
        self.bbox = bbox;
    }

    /// Direction of the sprite as seen from the pivot, degrees clockwise from +x
    pub fn screen_angle(&self) -> f32 {
        normalize_angle(REST_ANGLE + self.angle)
    }
}

/// Fixed-color sector of the disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wedge {
    pub color: PaletteColor,
    /// Sector start at zero rotation, degrees clockwise from +x
    pub start: f32,
    pub span: f32,
    pub radius: f32,
    pub mount: Mount,
}

impl Wedge {
    pub fn new(color: PaletteColor, start: f32, span: f32, center: Vec2, radius: f32) -> Self {
        // Square sprite centered on the disc; rotating it only spins it
        let size = Vec2::splat(radius * 2.0);
        Self {
            color,
            start: normalize_angle(start),
            span,
            radius,
            mount: Mount::new(size, Vec2::splat(radius), 0.0, center),
        }
    }

    /// Current sector start on screen
    pub fn current_start(&self) -> f32 {
        plus_angle(self.start, self.mount.angle)
    }

    pub fn shape(&self) -> Shape {
        Shape::Sector {
            center: self.mount.rect.center,
            radius: self.radius,
            start: self.current_start(),
            span: self.span,
        }
    }
}

/// Non-scoring blocker; any pin touching it misses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub mount: Mount,
}

impl Obstacle {
    pub fn new(screen_angle: f32, tuning: &Tuning) -> Self {
        Self {
            mount: Mount::on_ring(
                tuning.obstacle_size,
                tuning.obstacle_radius,
                screen_angle,
                tuning.disc_center,
            ),
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.mount.rect.center,
            radius: self.mount.size.min_element() / 2.0,
        }
    }
}

/// What a bonus grants when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    /// One extra life, up to the configured maximum
    GrantLife,
    GrantScore(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    Heart,
    Star,
}

/// One-shot pickup riding on the disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub reward: Reward,
    pub mount: Mount,
}

impl Bonus {
    pub fn new(kind: BonusKind, reward: Reward, screen_angle: f32, tuning: &Tuning) -> Self {
        Self {
            kind,
            reward,
            mount: Mount::on_ring(
                tuning.bonus_size,
                tuning.bonus_radius,
                screen_angle,
                tuning.disc_center,
            ),
        }
    }

    /// Heart grants a life, star grants the configured score
    pub fn of_kind(kind: BonusKind, screen_angle: f32, tuning: &Tuning) -> Self {
        let reward = match kind {
            BonusKind::Heart => Reward::GrantLife,
            BonusKind::Star => Reward::GrantScore(tuning.star_bonus_score),
        };
        Self::new(kind, reward, screen_angle, tuning)
    }

    pub fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.mount.rect.center,
            radius: self.mount.size.min_element() / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_mount_lands_at_screen_angle() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(0.0, &tuning);
        let center = obstacle.mount.rect.center;
        // 0 degrees is to the right of the disc center
        let expected_r = tuning.obstacle_radius + tuning.obstacle_size.y / 2.0;
        assert!((center - (tuning.disc_center + Vec2::new(expected_r, 0.0))).length() < 1e-3);
        assert!((obstacle.mount.screen_angle() - 0.0).abs() < 1e-3);
    }

    #[test]
    fn test_mount_spin_wraps() {
        let tuning = Tuning::default();
        let mut bonus = Bonus::of_kind(BonusKind::Star, 350.0, &tuning);
        bonus.mount.spin(20.0, tuning.disc_center);
        assert!((bonus.mount.screen_angle() - 10.0).abs() < 1e-3);
        assert_eq!(bonus.reward, Reward::GrantScore(tuning.star_bonus_score));
    }

    #[test]
    fn test_wedge_spins_in_place() {
        let tuning = Tuning::default();
        let mut wedge = Wedge::new(PaletteColor::Red, 90.0, 90.0, tuning.disc_center, 100.0);
        wedge.mount.spin(45.0, tuning.disc_center);
        assert!((wedge.mount.rect.center - tuning.disc_center).length() < 1e-3);
        assert_eq!(wedge.current_start(), 135.0);
    }

    #[test]
    fn test_heart_grants_life() {
        let heart = Bonus::of_kind(BonusKind::Heart, 0.0, &Tuning::default());
        assert_eq!(heart.reward, Reward::GrantLife);
    }
}
