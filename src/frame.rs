//! Per-frame driver
//!
//! One iteration of the game loop: poll input, advance the simulation,
//! issue draw commands, present. The same loop serves every phase, the
//! level-cleared prompt included.

use crate::consts::*;
use crate::sim::{Color, FrameEvents, GamePhase, GameState, Rect, TickInput, tick};

/// Drawing and input back end the game runs against
pub trait Frontend {
    /// Input gathered since the previous frame
    fn poll_input(&mut self) -> TickInput;

    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);

    /// Show everything drawn since the last call; may block to pace frames
    fn present_frame(&mut self);
}

/// Run one frame against `frontend`
pub fn run_frame<F: Frontend + ?Sized>(state: &mut GameState, frontend: &mut F) -> FrameEvents {
    let input = frontend.poll_input();
    let events = tick(state, &input);
    draw_scene(state, frontend);
    frontend.present_frame();
    events
}

/// Issue the draw commands for the current state
pub fn draw_scene<F: Frontend + ?Sized>(state: &GameState, frontend: &mut F) {
    frontend.draw_rect(state.paddle.rect, state.paddle.color);
    frontend.draw_rect(state.ball.rect, state.ball.color);

    for brick in state.bricks.iter().filter(|b| b.active) {
        frontend.draw_rect(brick.rect, brick.color);
    }

    frontend.draw_text(&format!("Score: {}", state.score), 10.0, 10.0, Color::WHITE);
    frontend.draw_text(
        &format!("Level: {}", state.level),
        WINDOW_WIDTH - 150.0,
        10.0,
        Color::WHITE,
    );

    if state.phase == GamePhase::LevelCleared {
        let title_x = WINDOW_WIDTH / 2.0 - 150.0;
        let title_y = WINDOW_HEIGHT / 2.0 - 60.0;
        let prompt_x = WINDOW_WIDTH / 2.0 - 250.0;
        let prompt_y = WINDOW_HEIGHT / 2.0;

        if state.is_last_level() {
            frontend.draw_text("All levels cleared!", title_x, title_y, Color::WHITE);
            frontend.draw_text("R: Restart  Q: Quit", prompt_x, prompt_y, Color::WHITE);
        } else {
            frontend.draw_text(
                &format!("Level {} cleared!", state.level),
                title_x,
                title_y,
                Color::WHITE,
            );
            frontend.draw_text(
                "SPACE: Next level  R: Restart  Q: Quit",
                prompt_x,
                prompt_y,
                Color::WHITE,
            );
        }
    }
}
