//! Brick Breaker - a single-screen arcade brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (entities, collision, level layouts, per-frame update)
//! - `frame`: Per-frame driver (poll, tick, draw, present) against a `Frontend`
//! - `renderer`: wgpu rendering pipeline and bitmap text
//! - `platform`: Native (winit) and browser adapters
//! - `error`: Initialization failures of the presentation back end

pub mod error;
pub mod frame;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use error::InitError;
pub use frame::{Frontend, draw_scene, run_frame};

/// Game configuration constants
pub mod consts {
    pub const WINDOW_TITLE: &str = "Brick Breaker";
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Paddle defaults - sits just above the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Pixels per frame while a direction is held
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Horizontal speed at the very edge of the paddle
    pub const PADDLE_STEER_SPEED: f32 = 5.0;

    /// Ball is a square
    pub const BALL_SIZE: f32 = 15.0;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_GAP: f32 = 2.0;

    pub const MAX_LEVELS: u32 = 3;

    /// Scoring
    pub const BRICK_POINTS: u32 = 10;
    pub const BALL_LOST_PENALTY: u32 = 100;
}
