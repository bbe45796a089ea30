//! Frame-stepped game simulation
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, owned by [`GameState`]
//! - Disc members kept in collision order (thin members before wedges)
//! - No platform dependencies; drawing goes through [`crate::render`]

pub mod collision;
pub mod disc;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod partition;
pub mod pin;
pub mod state;
pub mod tick;

pub use collision::{Needle, Shape, needle_contact};
pub use disc::{Disc, DiscMember};
pub use entities::{Bonus, BonusKind, Mount, Obstacle, Reward, Wedge};
pub use geometry::{Aabb, OrientedRect, rotate_about_pivot};
pub use level::{LevelGenerator, pins_per_color};
pub use partition::{min_pairwise_gap, random_partition};
pub use pin::{Pin, PinMode};
pub use state::{GameEvent, GamePhase, GameState, MissCause};
pub use tick::{TickInput, tick};
