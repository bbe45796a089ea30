//! Input event folding
//!
//! Events arrive in any number per frame. [`InputState`] collects them and
//! hands the tick a single [`TickInput`].

use glam::Vec2;

use crate::sim::geometry::Aabb;
use crate::sim::tick::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw event from the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown { button: MouseButton, pos: Vec2 },
    MouseMove(Vec2),
    /// Window closed
    Quit,
}

/// Accumulates one frame of events
#[derive(Debug, Clone)]
pub struct InputState {
    pause_rect: Aabb,
    pointer: Option<Vec2>,
    fire: bool,
    toggle_pause: bool,
    quit: bool,
}

impl InputState {
    /// `pause_rect` is the on-screen pause control
    pub fn new(pause_rect: Aabb) -> Self {
        Self {
            pause_rect,
            pointer: None,
            fire: false,
            toggle_pause: false,
            quit: false,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Space) => self.fire = true,
            InputEvent::KeyDown(_) => {}
            InputEvent::MouseDown {
                button: MouseButton::Left,
                pos,
            } => {
                self.pointer = Some(pos);
                if self.pause_rect.contains(pos) {
                    self.toggle_pause = !self.toggle_pause;
                } else {
                    self.fire = true;
                }
            }
            InputEvent::MouseDown { pos, .. } | InputEvent::MouseMove(pos) => {
                self.pointer = Some(pos)
            }
            InputEvent::Quit => self.quit = true,
        }
    }

    /// Commands for the next tick. One-shot flags reset; the pointer persists.
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            fire: self.fire,
            toggle_pause: self.toggle_pause,
            pointer: self.pointer,
            quit: self.quit,
            autoplay: false,
        };
        self.fire = false;
        self.toggle_pause = false;
        self.quit = false;
        input
    }
}
