//! The player's projectile

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Needle;
use super::entities::Mount;
use crate::tuning::{LevelSettings, PaletteColor, Tuning};

/// Pin motion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinMode {
    /// Waiting at the bottom of the play area
    Still,
    /// Flying up toward the disc
    Shoot,
    /// Embedded in the disc; moved only by the disc's rotation
    Prick,
    /// Falling away after a miss
    Drop,
}

/// A pin. Its color is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    color: PaletteColor,
    pub mode: PinMode,
    pub mount: Mount,
}

impl Pin {
    /// A still pin resting at the launch position
    pub fn new(color: PaletteColor, tuning: &Tuning) -> Self {
        // While embedded, the disc center sits `radius - prick_depth` above the pin's top
        let local_pivot = Vec2::new(
            tuning.pin_size.x / 2.0,
            tuning.prick_depth - tuning.disc_radius,
        );
        let rest = tuning.pin_rest_center();
        let top_left = rest - tuning.pin_size / 2.0;
        Self {
            color,
            mode: PinMode::Still,
            mount: Mount::new(tuning.pin_size, local_pivot, 0.0, top_left + local_pivot),
        }
    }

    pub fn color(&self) -> PaletteColor {
        self.color
    }

    /// Advance free motion. Embedded and resting pins do not move here.
    pub fn update(&mut self, dt: f32, settings: &LevelSettings) {
        match self.mode {
            PinMode::Still | PinMode::Prick => {}
            PinMode::Shoot => self.translate(Vec2::new(0.0, -settings.shoot_speed * dt)),
            PinMode::Drop => {
                let fall = settings.drop_speed * dt;
                self.translate(Vec2::new(fall / 2.0, fall));
            }
        }
    }

    /// Launch a resting pin. Returns false if the pin was not resting.
    pub fn fire(&mut self) -> bool {
        if self.mode == PinMode::Still {
            self.mode = PinMode::Shoot;
            true
        } else {
            false
        }
    }

    /// Snap into the disc at its rest angle, hanging below `disc_center`
    pub fn embed(&mut self, disc_center: Vec2) {
        self.mode = PinMode::Prick;
        self.mount.angle = 0.0;
        self.mount.spin(0.0, disc_center);
    }

    /// Segment from tip to tail used for collision
    pub fn needle(&self, half_width: f32) -> Needle {
        let half_len = self.mount.size.y / 2.0;
        Needle {
            tip: self.mount.rect.local_to_world(Vec2::new(0.0, -half_len)),
            tail: self.mount.rect.local_to_world(Vec2::new(0.0, half_len)),
            half_width,
        }
    }

    /// Top edge of the pin's bounding box
    pub fn top(&self) -> f32 {
        self.mount.bbox.top()
    }

    pub fn bottom(&self) -> f32 {
        self.mount.bbox.bottom()
    }

    fn translate(&mut self, delta: Vec2) {
        self.mount.rect.center += delta;
        self.mount.bbox.min += delta;
        self.mount.bbox.max += delta;
    }
}
