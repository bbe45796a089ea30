//! Platform abstraction layer
//!
//! Turns raw key and mouse events from whatever window toolkit drives the
//! game into per-tick commands.

pub mod input;

pub use input::{InputEvent, InputState, Key, MouseButton};
