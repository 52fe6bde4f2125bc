//! WebGPU rendering module
//!
//! Shapes are tessellated on the CPU in screen space and drawn with a single
//! flat-colored pipeline.

pub mod font;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use font::{BitmapFont, FontError};
pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::{Color, Rect};

/// Collects one frame of draw commands and submits them on `present`
pub struct Canvas {
    render_state: RenderState,
    font: BitmapFont,
    vertices: Vec<Vertex>,
}

impl Canvas {
    pub fn new(render_state: RenderState, font: BitmapFont) -> Self {
        Self {
            render_state,
            font,
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.vertices.extend_from_slice(&shapes::rect(rect, color));
    }

    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.vertices
            .extend(shapes::text(&self.font, text, x, y, color));
    }

    /// Submit the collected frame and start a new one
    pub fn present(&mut self) {
        match self.render_state.render(&self.vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.render_state.size;
                self.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.vertices.clear();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render_state.resize(width, height);
    }
}
