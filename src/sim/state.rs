//! Game state and core entity types
//!
//! `GameState` exclusively owns the paddle, the ball and the current brick set.
//! It is created once at startup and mutated in place by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::level_layout;
use crate::consts::*;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized [0, 1] channels for the GPU vertex format
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A paddle, ball or brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub rect: Rect,
    pub active: bool,
    pub color: Color,
}

impl GameObject {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            active: true,
            color: Color::default(),
        }
    }

    pub fn with_color(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            active: true,
            color,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick is gone; waiting for next level / restart / quit
    LevelCleared,
    /// Player quit, the loop should exit
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub paddle: GameObject,
    pub ball: GameObject,
    /// Bricks of the current level, in layout order
    pub bricks: Vec<GameObject>,
    /// Ball displacement per frame
    pub ball_vel: Vec2,
    pub score: u32,
    /// 1-based level number
    pub level: u32,
    /// Set once when the last brick of the level is destroyed
    pub won_current_level: bool,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game at level 1
    pub fn new() -> Self {
        Self::at_level(1)
    }

    /// A fresh game starting at the given level
    pub fn at_level(level: u32) -> Self {
        let mut state = Self {
            paddle: GameObject::new(Self::paddle_home()),
            ball: GameObject::new(Self::ball_home()),
            bricks: Vec::new(),
            ball_vel: Vec2::ZERO,
            score: 0,
            level,
            won_current_level: false,
            phase: GamePhase::Playing,
        };
        state.load_level();
        state
    }

    /// Paddle rectangle centered horizontally just above the bottom edge
    pub fn paddle_home() -> Rect {
        Rect::new(
            WINDOW_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            WINDOW_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    /// Ball rectangle centered in the window
    pub fn ball_home() -> Rect {
        Rect::new(
            WINDOW_WIDTH / 2.0 - BALL_SIZE / 2.0,
            WINDOW_HEIGHT / 2.0 - BALL_SIZE / 2.0,
            BALL_SIZE,
            BALL_SIZE,
        )
    }

    /// Replace the brick set with the current level's layout and serve the ball
    pub fn load_level(&mut self) {
        let layout = level_layout(self.level);
        self.bricks = layout.bricks;
        self.ball.rect = Self::ball_home();
        self.ball_vel = layout.ball_speed;
        self.won_current_level = false;
    }

    /// Put the ball back in the center at the current level's speed
    pub fn reset_ball(&mut self) {
        self.ball.rect = Self::ball_home();
        self.ball_vel = level_layout(self.level).ball_speed;
    }

    pub fn recenter_paddle(&mut self) {
        self.paddle.rect.x = Self::paddle_home().x;
    }

    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        !self.bricks.iter().any(|b| b.active)
    }

    pub fn is_last_level(&self) -> bool {
        self.level >= MAX_LEVELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert!(!state.won_current_level);
        assert_eq!(state.bricks.len(), 40);
        assert_eq!(state.active_bricks(), 40);
        assert_eq!(state.ball_vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_home_positions() {
        let state = GameState::new();
        assert_eq!(state.paddle.rect, Rect::new(350.0, 570.0, 100.0, 20.0));
        assert_eq!(state.ball.rect, Rect::new(392.5, 292.5, 15.0, 15.0));
        assert_eq!(state.paddle.color, Color::WHITE);
        assert_eq!(state.ball.color, Color::WHITE);
    }

    #[test]
    fn test_reset_ball_uses_level_speed() {
        let mut state = GameState::at_level(3);
        state.ball.rect.x = 10.0;
        state.ball.rect.y = 700.0;
        state.ball_vel = Vec2::new(-2.0, 3.0);

        state.reset_ball();
        assert_eq!(state.ball.rect, GameState::ball_home());
        assert_eq!(state.ball_vel, Vec2::new(7.0, -7.0));
    }

    #[test]
    fn test_all_bricks_destroyed() {
        let mut state = GameState::new();
        assert!(!state.all_bricks_destroyed());
        for brick in &mut state.bricks {
            brick.active = false;
        }
        assert!(state.all_bricks_destroyed());
        assert_eq!(state.active_bricks(), 0);
    }

    #[test]
    fn test_color_to_f32() {
        assert_eq!(Color::WHITE.to_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_f32(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_state_snapshot_serializes() {
        let mut state = GameState::at_level(2);
        state.score = 130;
        state.bricks[3].active = false;

        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.level, 2);
        assert_eq!(restored.score, 130);
        assert_eq!(restored.active_bricks(), 41);
        assert_eq!(restored.phase, GamePhase::Playing);
    }
}
