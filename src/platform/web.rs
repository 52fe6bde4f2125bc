//! Browser adapter: `<canvas id="canvas">`, DOM key events, requestAnimationFrame loop

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent};

use super::{InputTracker, Screen, log_events, map_code};
use crate::consts::*;
use crate::error::InitError;
use crate::frame::run_frame;
use crate::renderer::{BitmapFont, Canvas, RenderState};
use crate::sim::{GamePhase, GameState};

struct Game {
    state: GameState,
    input: InputTracker,
    canvas: Canvas,
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Set up the canvas and renderer, then hand control to the animation loop
pub async fn run() -> Result<(), InitError> {
    log::info!("{} starting...", WINDOW_TITLE);

    let font = BitmapFont::bundled().map_err(|e| InitError::FontAsset(e.to_string()))?;

    let window = web_sys::window().ok_or_else(|| InitError::Canvas("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| InitError::Canvas("no document".into()))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| InitError::Canvas("no element with id \"canvas\"".into()))?
        .dyn_into()
        .map_err(|_| InitError::Canvas("#canvas is not a <canvas>".into()))?;

    // Backing store follows the CSS size at device resolution
    let dpr = window.device_pixel_ratio();
    let (client_w, client_h) = match (canvas.client_width(), canvas.client_height()) {
        (w, h) if w > 0 && h > 0 => (w as f64, h as f64),
        _ => (WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
    };
    let width = (client_w * dpr) as u32;
    let height = (client_h * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| InitError::Surface(e.to_string()))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| InitError::Adapter(e.to_string()))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height).await?;

    let game = Rc::new(RefCell::new(Game {
        state: GameState::new(),
        input: InputTracker::new(),
        canvas: Canvas::new(render_state, font),
    }));

    setup_input_handlers(&document, game.clone())?;
    request_animation_frame(game);

    log::info!("Starting level 1");
    Ok(())
}

fn setup_input_handlers(
    document: &web_sys::Document,
    game: Rc<RefCell<Game>>,
) -> Result<(), InitError> {
    // Key down
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(control) = map_code(&event.code()) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                game.borrow_mut().input.key_down(control, event.repeat());
            }
        });
        document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| InitError::Dom(format!("keydown: {}", js_err(e))))?;
        closure.forget();
    }

    // Key up
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(control) = map_code(&event.code()) {
                game.borrow_mut().input.key_up(control);
            }
        });
        document
            .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
            .map_err(|e| InitError::Dom(format!("keyup: {}", js_err(e))))?;
        closure.forget();
    }

    // Held keys would stick if the page loses focus mid-press
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.release_all();
        });
        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(|e| InitError::Dom(format!("blur: {}", js_err(e))))?;
        }
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        game_loop(game);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>) {
    {
        let mut g = game.borrow_mut();
        let Game {
            state,
            input,
            canvas,
        } = &mut *g;
        let mut screen = Screen { canvas, input };
        let events = run_frame(state, &mut screen);
        log_events(state, &events);

        if state.phase == GamePhase::GameOver {
            log::info!("Stopped");
            return;
        }
    }

    request_animation_frame(game);
}
