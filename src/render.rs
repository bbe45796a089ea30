//! Narrow drawing interface between the game and whatever paints pixels
//!
//! The game only decides what goes where. A [`RenderSurface`] implementation
//! owns images, fonts and the window; [`DrawList`] records commands for tests
//! and headless runs.

use glam::Vec2;

use crate::sim::disc::{Disc, DiscMember};
use crate::sim::entities::BonusKind;
use crate::sim::geometry::{Aabb, OrientedRect};
use crate::sim::pin::Pin;
use crate::tuning::PaletteColor;

/// Images the surface is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Pin,
    Obstacle,
    Heart,
    Star,
    /// Lives indicator icon
    Life,
    PauseIcon,
    ResumeIcon,
}

/// Something that can paint oriented images, sectors and text
pub trait RenderSurface {
    /// Filled circular sector, angles in degrees clockwise from +x
    fn draw_sector(&mut self, center: Vec2, radius: f32, start: f32, span: f32, color: PaletteColor);
    /// Image stretched over `rect`, optionally tinted
    fn draw_sprite(&mut self, kind: SpriteKind, rect: &OrientedRect, tint: Option<PaletteColor>);
    fn draw_rect(&mut self, rect: &Aabb, color: PaletteColor);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32);
}

/// A component that knows how to put itself on a surface
pub trait Drawable {
    fn draw(&self, surface: &mut dyn RenderSurface);
}

/// Recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sector {
        center: Vec2,
        radius: f32,
        start: f32,
        span: f32,
        color: PaletteColor,
    },
    Sprite {
        kind: SpriteKind,
        rect: OrientedRect,
        tint: Option<PaletteColor>,
    },
    Rect {
        rect: Aabb,
        color: PaletteColor,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
    },
}

/// Surface that records every call in order
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text of every label drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for DrawList {
    fn draw_sector(&mut self, center: Vec2, radius: f32, start: f32, span: f32, color: PaletteColor) {
        self.commands.push(DrawCommand::Sector {
            center,
            radius,
            start,
            span,
            color,
        });
    }

    fn draw_sprite(&mut self, kind: SpriteKind, rect: &OrientedRect, tint: Option<PaletteColor>) {
        self.commands.push(DrawCommand::Sprite {
            kind,
            rect: *rect,
            tint,
        });
    }

    fn draw_rect(&mut self, rect: &Aabb, color: PaletteColor) {
        self.commands.push(DrawCommand::Rect { rect: *rect, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
        });
    }
}

impl Drawable for Pin {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_sprite(SpriteKind::Pin, &self.mount.rect, Some(self.color()));
    }
}

impl Drawable for DiscMember {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        match self {
            DiscMember::Wedge(w) => {
                surface.draw_sector(w.mount.rect.center, w.radius, w.current_start(), w.span, w.color)
            }
            DiscMember::Obstacle(o) => surface.draw_sprite(SpriteKind::Obstacle, &o.mount.rect, None),
            DiscMember::Bonus(b) => {
                let kind = match b.kind {
                    BonusKind::Heart => SpriteKind::Heart,
                    BonusKind::Star => SpriteKind::Star,
                };
                surface.draw_sprite(kind, &b.mount.rect, None)
            }
            DiscMember::Pin(p) => p.draw(surface),
        }
    }
}

impl Drawable for Disc {
    /// Painter's order: wedges underneath, thin members on top of them
    fn draw(&self, surface: &mut dyn RenderSurface) {
        for member in self.members().iter().rev() {
            member.draw(surface);
        }
    }
}
