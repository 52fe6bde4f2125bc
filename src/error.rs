//! Presentation back end initialization failures
//!
//! The only failure surface of the game: any of these aborts startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    /// Windowing system unavailable (no display, no event loop)
    #[error("failed to initialize the windowing system: {0}")]
    EventLoop(String),

    #[error("failed to create the game window: {0}")]
    Window(String),

    /// Bundled bitmap font could not be parsed
    #[error("failed to load font asset: {0}")]
    FontAsset(String),

    #[error("failed to create a rendering surface: {0}")]
    Surface(String),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),

    #[error("failed to create the graphics device: {0}")]
    Device(String),

    /// Browser only: page has no usable `<canvas id="canvas">`
    #[error("canvas unavailable: {0}")]
    Canvas(String),

    /// Browser only: a keyboard or focus listener could not be attached
    #[error("failed to attach browser event listener: {0}")]
    Dom(String),
}
