//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One update per frame, fixed per-frame speeds
//! - Stable iteration order (bricks in layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use level::{LevelLayout, create_bricks, level_layout};
pub use state::{Color, GameObject, GamePhase, GameState};
pub use tick::{FrameEvents, Key, TickInput, move_paddle, next_level, restart, tick, update};
