//! Per-frame simulation step
//!
//! Advances the game by exactly one frame: paddle movement, ball motion,
//! wall/paddle/brick collisions, scoring and level transitions.

use super::collision::overlaps;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// One-shot key presses the state machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space: advance to the next level
    NextLevel,
    /// R: start over from level 1
    Restart,
    /// Q: quit
    Quit,
}

/// Input for a single frame, as polled from the presentation back end
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window close / external quit signal
    pub quit: bool,
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Keys pressed since the last frame, oldest first
    pub keys: Vec<Key>,
}

/// What happened during a frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub bricks_destroyed: u32,
    pub points: u32,
    pub ball_lost: bool,
    pub paddle_hit: bool,
    pub level_cleared: bool,
    /// Level number that was just loaded via next level
    pub level_started: Option<u32>,
    pub restarted: bool,
    pub game_over: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameEvents {
    if state.phase == GamePhase::GameOver {
        return FrameEvents::default();
    }

    // External quit wins over everything else
    if input.quit {
        state.phase = GamePhase::GameOver;
        return FrameEvents {
            game_over: true,
            ..Default::default()
        };
    }

    match state.phase {
        GamePhase::Playing => {
            move_paddle(state, input.left, input.right);
            update(state)
        }
        GamePhase::LevelCleared => handle_level_cleared(state, &input.keys),
        GamePhase::GameOver => FrameEvents::default(),
    }
}

/// Apply replay-prompt keys; the first key that takes effect wins
fn handle_level_cleared(state: &mut GameState, keys: &[Key]) -> FrameEvents {
    let mut events = FrameEvents::default();
    for key in keys {
        match key {
            Key::NextLevel => {
                if next_level(state) {
                    events.level_started = Some(state.level);
                    break;
                }
            }
            Key::Restart => {
                restart(state);
                events.restarted = true;
                break;
            }
            Key::Quit => {
                state.phase = GamePhase::GameOver;
                events.game_over = true;
                break;
            }
        }
    }
    events
}

/// Slide the paddle, keeping it inside the window
pub fn move_paddle(state: &mut GameState, left: bool, right: bool) {
    let rect = &mut state.paddle.rect;
    let max_x = WINDOW_WIDTH - rect.w;
    if left {
        rect.x = (rect.x - PADDLE_SPEED).max(0.0);
    }
    if right {
        rect.x = (rect.x + PADDLE_SPEED).min(max_x);
    }
}

/// Physics step: ball motion, collisions, scoring and the win check
///
/// Only meaningful while `Playing`; `tick` guards the phase.
pub fn update(state: &mut GameState) -> FrameEvents {
    let mut events = FrameEvents::default();

    state.ball.rect.x += state.ball_vel.x;
    state.ball.rect.y += state.ball_vel.y;

    // Walls reflect without clamping; the ball may poke into a wall for a frame
    let ball = state.ball.rect;
    if ball.x <= 0.0 || ball.x >= WINDOW_WIDTH - ball.w {
        state.ball_vel.x = -state.ball_vel.x;
    }
    if ball.y <= 0.0 {
        state.ball_vel.y = -state.ball_vel.y;
    }

    if ball.y >= WINDOW_HEIGHT {
        state.reset_ball();
        state.score = state.score.saturating_sub(BALL_LOST_PENALTY);
        events.ball_lost = true;
    }

    let ball = state.ball.rect;
    let paddle = state.paddle.rect;
    if overlaps(&ball, &paddle) {
        state.ball_vel.y = -state.ball_vel.y;
        // Steer by impact point: center hit goes straight up, edges go wide
        let offset = paddle.center().x - ball.center().x;
        let normalized = offset / (paddle.w / 2.0);
        state.ball_vel.x = -normalized * PADDLE_STEER_SPEED;
        events.paddle_hit = true;
    }

    // Every overlapping brick counts, and each one flips vertical velocity
    for brick in state.bricks.iter_mut().filter(|b| b.active) {
        if overlaps(&ball, &brick.rect) {
            brick.active = false;
            state.ball_vel.y = -state.ball_vel.y;
            state.score += BRICK_POINTS;
            events.bricks_destroyed += 1;
            events.points += BRICK_POINTS;
        }
    }

    if state.all_bricks_destroyed() && !state.won_current_level {
        state.won_current_level = true;
        state.phase = GamePhase::LevelCleared;
        events.level_cleared = true;
    }

    events
}

/// Load the next level; no-op (returns false) on the last level
pub fn next_level(state: &mut GameState) -> bool {
    if state.is_last_level() {
        return false;
    }
    state.level += 1;
    state.load_level();
    state.phase = GamePhase::Playing;
    true
}

/// Back to level 1 with a zero score and a centered paddle
pub fn restart(state: &mut GameState) {
    state.score = 0;
    state.level = 1;
    state.load_level();
    state.recenter_paddle();
    state.phase = GamePhase::Playing;
}
