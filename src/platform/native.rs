//! Desktop adapter: winit window, wgpu surface, vsync-paced redraw loop

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::{Control, InputTracker, Screen, log_events};
use crate::consts::*;
use crate::error::InitError;
use crate::frame::run_frame;
use crate::renderer::{BitmapFont, Canvas, RenderState};
use crate::sim::{GamePhase, GameState, Key};

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::ArrowLeft => Some(Control::Left),
        KeyCode::ArrowRight => Some(Control::Right),
        KeyCode::Space => Some(Control::Press(Key::NextLevel)),
        KeyCode::KeyR => Some(Control::Press(Key::Restart)),
        KeyCode::KeyQ => Some(Control::Press(Key::Quit)),
        _ => None,
    }
}

struct Game {
    state: GameState,
    input: InputTracker,
    window: Option<Arc<Window>>,
    canvas: Option<Canvas>,
    /// Set when startup fails inside the event loop
    error: Option<InitError>,
}

impl Game {
    fn new() -> Self {
        Self {
            state: GameState::new(),
            input: InputTracker::new(),
            window: None,
            canvas: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let font = BitmapFont::bundled().map_err(|e| InitError::FontAsset(e.to_string()))?;

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| InitError::Window(e.to_string()))?,
        );

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| InitError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state =
            pollster::block_on(RenderState::new(surface, &adapter, size.width, size.height))?;

        self.canvas = Some(Canvas::new(render_state, font));
        self.window = Some(window);
        Ok(())
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(control) = control_for(code) else {
            return;
        };
        match event.state {
            ElementState::Pressed => self.input.key_down(control, event.repeat),
            ElementState::Released => self.input.key_up(control),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let mut screen = Screen {
            canvas,
            input: &mut self.input,
        };
        let events = run_frame(&mut self.state, &mut screen);
        log_events(&self.state, &events);

        if self.state.phase == GamePhase::GameOver {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for Game {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing window and renderer...");
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
            return;
        }
        log::info!("Starting level {}", self.state.level);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.input.request_quit();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run until the game is over
pub fn run() -> Result<(), InitError> {
    let event_loop = EventLoop::new().map_err(|e| InitError::EventLoop(e.to_string()))?;
    let mut game = Game::new();
    event_loop
        .run_app(&mut game)
        .map_err(|e| InitError::EventLoop(e.to_string()))?;

    match game.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
