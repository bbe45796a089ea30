//! HUD widgets: pause button, labels, bullets and lives indicators

use glam::Vec2;

use crate::render::{Drawable, RenderSurface, SpriteKind};
use crate::sim::geometry::{Aabb, OrientedRect};
use crate::tuning::{HudLayout, PaletteColor};

/// Clickable rectangle with a hover state
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Aabb,
    pub icon: SpriteKind,
    pub hover: bool,
}

impl Button {
    pub fn new(pos: Vec2, size: Vec2, icon: SpriteKind) -> Self {
        Self {
            rect: Aabb::from_pos_size(pos, size),
            icon,
            hover: false,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    /// Recompute hover from the last known pointer position
    pub fn update_hover(&mut self, pointer: Option<Vec2>) {
        self.hover = pointer.is_some_and(|p| self.contains(p));
    }
}

impl Drawable for Button {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let rect = OrientedRect::axis_aligned(self.rect.center(), self.rect.size());
        surface.draw_sprite(self.icon, &rect, None);
    }
}

/// Single line of text
#[derive(Debug, Clone)]
pub struct Label {
    pub pos: Vec2,
    pub size: f32,
    pub text: String,
}

impl Label {
    pub fn new(pos: Vec2, size: f32, text: impl Into<String>) -> Self {
        Self {
            pos,
            size,
            text: text.into(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Drawable for Label {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_text(&self.text, self.pos, self.size);
    }
}

/// One colored bar per pin not yet fired; the top bar is the next shot
#[derive(Debug, Clone)]
pub struct BulletStack {
    origin: Vec2,
    bar_size: Vec2,
    colors: Vec<PaletteColor>,
}

impl BulletStack {
    pub fn new(origin: Vec2, bar_size: Vec2) -> Self {
        Self {
            origin,
            bar_size,
            colors: Vec::new(),
        }
    }

    /// Replace the stack with a level's sequence (last entry fires first)
    pub fn reset(&mut self, colors: &[PaletteColor]) {
        self.colors = colors.to_vec();
    }

    pub fn pop(&mut self) -> Option<PaletteColor> {
        self.colors.pop()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// Bar rectangles, bottom first; bars step upward by three bar heights
    pub fn bar_rects(&self) -> impl Iterator<Item = (Aabb, PaletteColor)> + '_ {
        self.colors.iter().enumerate().map(|(i, &color)| {
            let pos = Vec2::new(
                self.origin.x,
                self.origin.y - 3.0 * i as f32 * self.bar_size.y,
            );
            (Aabb::from_pos_size(pos, self.bar_size), color)
        })
    }
}

impl Drawable for BulletStack {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        for (rect, color) in self.bar_rects() {
            surface.draw_rect(&rect, color);
        }
    }
}

/// Column of heart icons, one per remaining life
#[derive(Debug, Clone)]
pub struct LifeRow {
    origin: Vec2,
    icon_size: Vec2,
    pub count: u8,
}

impl LifeRow {
    pub fn new(origin: Vec2, icon_size: Vec2, count: u8) -> Self {
        Self {
            origin,
            icon_size,
            count,
        }
    }
}

impl Drawable for LifeRow {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        for i in 0..self.count {
            let center = self.origin
                + Vec2::new(0.0, i as f32 * self.icon_size.x)
                + self.icon_size / 2.0;
            surface.draw_sprite(
                SpriteKind::Life,
                &OrientedRect::axis_aligned(center, self.icon_size),
                None,
            );
        }
    }
}

/// Everything drawn on top of the play field
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: Label,
    pub best: Label,
    pub bullets: BulletStack,
    pub lives: LifeRow,
    pub pause: Button,
}

impl Hud {
    pub fn new(layout: &HudLayout, lives: u8, best_score: u32) -> Self {
        Self {
            score: Label::new(layout.score_pos, 20.0, "0"),
            best: Label::new(layout.best_score_pos, 16.0, format!("Best {best_score}")),
            bullets: BulletStack::new(layout.bullets_pos, layout.bullet_size),
            lives: LifeRow::new(layout.hearts_pos, layout.heart_size, lives),
            pause: Button::new(layout.pause_pos, layout.pause_size, SpriteKind::PauseIcon),
        }
    }

    /// Refresh counters from the game state
    pub fn sync(&mut self, score: u32, lives: u8) {
        self.score.set_text(score.to_string());
        self.lives.count = lives;
    }

    /// Swap the pause icon to reflect the paused flag
    pub fn set_paused(&mut self, paused: bool) {
        self.pause.icon = if paused {
            SpriteKind::ResumeIcon
        } else {
            SpriteKind::PauseIcon
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};

    #[test]
    fn test_button_hover_tracks_pointer() {
        let mut button = Button::new(Vec2::new(10.0, 10.0), Vec2::splat(20.0), SpriteKind::PauseIcon);
        button.update_hover(Some(Vec2::new(15.0, 15.0)));
        assert!(button.hover);
        button.update_hover(Some(Vec2::new(50.0, 15.0)));
        assert!(!button.hover);
        button.update_hover(None);
        assert!(!button.hover);
    }

    #[test]
    fn test_bullet_stack_stacks_upward() {
        let mut stack = BulletStack::new(Vec2::new(50.0, 500.0), Vec2::new(20.0, 4.0));
        stack.reset(&[PaletteColor::Red, PaletteColor::Green, PaletteColor::Blue]);
        let rects: Vec<_> = stack.bar_rects().collect();
        assert_eq!(rects[0].0.top(), 500.0);
        assert_eq!(rects[2].0.top(), 476.0);
        assert_eq!(rects[2].1, PaletteColor::Blue);

        assert_eq!(stack.pop(), Some(PaletteColor::Blue));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_life_row_draws_one_icon_per_life() {
        let row = LifeRow::new(Vec2::ZERO, Vec2::splat(24.0), 3);
        let mut list = DrawList::new();
        row.draw(&mut list);
        assert_eq!(list.commands.len(), 3);
        assert!(list.commands.iter().all(|c| matches!(
            c,
            DrawCommand::Sprite {
                kind: SpriteKind::Life,
                ..
            }
        )));
    }

    #[test]
    fn test_hud_sync_and_pause_icon() {
        let mut hud = Hud::new(&HudLayout::default(), 3, 40);
        hud.sync(27, 2);
        assert_eq!(hud.score.text, "27");
        assert_eq!(hud.best.text, "Best 40");
        assert_eq!(hud.lives.count, 2);
        hud.set_paused(true);
        assert_eq!(hud.pause.icon, SpriteKind::ResumeIcon);
    }
}
