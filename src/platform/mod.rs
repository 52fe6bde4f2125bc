//! Platform abstraction layer
//!
//! Native (winit) and browser (canvas + DOM events) adapters share the same
//! keyboard bookkeeping and the same `Frontend` implementation.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::frame::Frontend;
use crate::renderer::Canvas;
use crate::sim::{Color, FrameEvents, GameState, Key, Rect, TickInput};

/// A physical key the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Press(Key),
}

/// Map a DOM `KeyboardEvent.code` style name to a game control
pub fn map_code(code: &str) -> Option<Control> {
    match code {
        "ArrowLeft" => Some(Control::Left),
        "ArrowRight" => Some(Control::Right),
        "Space" => Some(Control::Press(Key::NextLevel)),
        "KeyR" => Some(Control::Press(Key::Restart)),
        "KeyQ" => Some(Control::Press(Key::Quit)),
        _ => None,
    }
}

/// Folds raw key events into the per-frame `TickInput`
#[derive(Debug, Default)]
pub struct InputTracker {
    left: bool,
    right: bool,
    quit: bool,
    pressed: Vec<Key>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down; auto-repeat does not produce extra one-shot presses
    pub fn key_down(&mut self, control: Control, repeat: bool) {
        match control {
            Control::Left => self.left = true,
            Control::Right => self.right = true,
            Control::Press(key) if !repeat => self.pressed.push(key),
            Control::Press(_) => {}
        }
    }

    pub fn key_up(&mut self, control: Control) {
        match control {
            Control::Left => self.left = false,
            Control::Right => self.right = false,
            Control::Press(_) => {}
        }
    }

    /// Window closed or page torn down
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// Input for the next frame; one-shot presses are drained, held keys persist
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            quit: self.quit,
            left: self.left,
            right: self.right,
            keys: std::mem::take(&mut self.pressed),
        }
    }
}

/// The `Frontend` both adapters hand to `run_frame`
pub struct Screen<'a> {
    pub canvas: &'a mut Canvas,
    pub input: &'a mut InputTracker,
}

impl Frontend for Screen<'_> {
    fn poll_input(&mut self) -> TickInput {
        self.input.take_input()
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.draw_rect(rect, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.canvas.draw_text(text, x, y, color);
    }

    fn present_frame(&mut self) {
        self.canvas.present();
    }
}

/// Log the interesting parts of a frame
pub fn log_events(state: &GameState, events: &FrameEvents) {
    if events.bricks_destroyed > 0 {
        log::debug!(
            "Destroyed {} brick(s), +{} (score {})",
            events.bricks_destroyed,
            events.points,
            state.score
        );
    }
    if events.ball_lost {
        log::debug!("Ball lost (score {})", state.score);
    }
    if events.level_cleared {
        log::info!("Level {} cleared with score {}", state.level, state.score);
    }
    if let Some(level) = events.level_started {
        log::info!("Starting level {}", level);
    }
    if events.restarted {
        log::info!("Restarting from level 1");
    }
    if events.game_over {
        log::info!("Game over, final score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_code() {
        assert_eq!(map_code("ArrowLeft"), Some(Control::Left));
        assert_eq!(map_code("ArrowRight"), Some(Control::Right));
        assert_eq!(map_code("Space"), Some(Control::Press(Key::NextLevel)));
        assert_eq!(map_code("KeyR"), Some(Control::Press(Key::Restart)));
        assert_eq!(map_code("KeyQ"), Some(Control::Press(Key::Quit)));
        assert_eq!(map_code("KeyA"), None);
        assert_eq!(map_code(""), None);
    }

    #[test]
    fn test_held_keys_persist_across_frames() {
        let mut input = InputTracker::new();
        input.key_down(Control::Left, false);
        assert!(input.take_input().left);
        assert!(input.take_input().left);
        input.key_up(Control::Left);
        assert!(!input.take_input().left);
    }

    #[test]
    fn test_presses_drain_in_order() {
        let mut input = InputTracker::new();
        input.key_down(Control::Press(Key::NextLevel), false);
        input.key_down(Control::Press(Key::Restart), false);
        assert_eq!(input.take_input().keys, vec![Key::NextLevel, Key::Restart]);
        assert!(input.take_input().keys.is_empty());
    }

    #[test]
    fn test_repeat_does_not_press_again() {
        let mut input = InputTracker::new();
        input.key_down(Control::Press(Key::NextLevel), false);
        input.key_down(Control::Press(Key::NextLevel), true);
        input.key_down(Control::Right, true);
        let tick = input.take_input();
        assert_eq!(tick.keys, vec![Key::NextLevel]);
        assert!(tick.right);
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut input = InputTracker::new();
        input.request_quit();
        assert!(input.take_input().quit);
        assert!(input.take_input().quit);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputTracker::new();
        input.key_down(Control::Left, false);
        input.key_down(Control::Right, false);
        input.release_all();
        let tick = input.take_input();
        assert!(!tick.left && !tick.right);
    }
}
