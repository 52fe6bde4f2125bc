//! WebGPU render pipeline setup

use wgpu::util::DeviceExt;

use super::vertex::Vertex;
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::InitError;

/// Where the 800x600 play field lands inside the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Letterbox {
    /// Largest uniform scale that fits the play field, centered
    pub fn fit(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let scale = (w / WINDOW_WIDTH).min(h / WINDOW_HEIGHT);
        Self {
            scale,
            offset_x: (w - WINDOW_WIDTH * scale) / 2.0,
            offset_y: (h - WINDOW_HEIGHT * scale) / 2.0,
        }
    }
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    /// Viewport size in pixels
    pub size: (u32, u32),
    letterbox: Letterbox,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, InitError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("brick-breaker-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| InitError::Device(e.to_string()))?;

        let surface_caps = surface.get_capabilities(adapter);
        // Colors are authored in sRGB; write them unconverted
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .ok_or_else(|| InitError::Surface("surface is not supported by the adapter".into()))?;

        let width = width.max(1);
        let height = height.max(1);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("Render pipeline ready ({:?}, {}x{})", surface_format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            size: (width, height),
            letterbox: Letterbox::fit(width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.letterbox = Letterbox::fit(new_width, new_height);
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Convert screen coordinates (800x600, y down) to normalized device coordinates
    pub fn screen_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        screen_to_ndc(self.size, self.letterbox, x, y)
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = self.screen_to_ndc(v.position[0], v.position[1]);
                v.moved_to(x, y)
            })
            .collect();

        // Recreate buffer each frame (a few hundred vertices at most)
        let vertex_buffer = (!ndc_vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                // Bricks that overhang the play field stay out of the letterbox bars
                let (x, y, w, h) = scissor(self.size, self.letterbox);
                render_pass.set_scissor_rect(x, y, w, h);
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..ndc_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn screen_to_ndc(size: (u32, u32), letterbox: Letterbox, x: f32, y: f32) -> (f32, f32) {
    let (w, h) = (size.0 as f32, size.1 as f32);
    let px = letterbox.offset_x + x * letterbox.scale;
    let py = letterbox.offset_y + y * letterbox.scale;
    (px / w * 2.0 - 1.0, 1.0 - py / h * 2.0)
}

/// Play-field rectangle in surface pixels, clamped to the surface
fn scissor(size: (u32, u32), letterbox: Letterbox) -> (u32, u32, u32, u32) {
    let x = (letterbox.offset_x.max(0.0) as u32).min(size.0.saturating_sub(1));
    let y = (letterbox.offset_y.max(0.0) as u32).min(size.1.saturating_sub(1));
    let w = ((WINDOW_WIDTH * letterbox.scale) as u32).clamp(1, size.0 - x);
    let h = ((WINDOW_HEIGHT * letterbox.scale) as u32).clamp(1, size.1 - y);
    (x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_exact_fit() {
        let lb = Letterbox::fit(800, 600);
        assert_eq!(lb, Letterbox { scale: 1.0, offset_x: 0.0, offset_y: 0.0 });
    }

    #[test]
    fn test_letterbox_wide_surface() {
        let lb = Letterbox::fit(1600, 600);
        assert_eq!(lb.scale, 1.0);
        assert_eq!(lb.offset_x, 400.0);
        assert_eq!(lb.offset_y, 0.0);
    }

    #[test]
    fn test_letterbox_tall_hidpi_surface() {
        let lb = Letterbox::fit(1600, 1600);
        assert_eq!(lb.scale, 2.0);
        assert_eq!(lb.offset_x, 0.0);
        assert_eq!(lb.offset_y, 200.0);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        let lb = Letterbox::fit(800, 600);
        assert_eq!(screen_to_ndc((800, 600), lb, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(screen_to_ndc((800, 600), lb, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(screen_to_ndc((800, 600), lb, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_screen_to_ndc_letterboxed() {
        let lb = Letterbox::fit(1600, 600);
        // Left edge of the play field sits a quarter of the way in
        assert_eq!(screen_to_ndc((1600, 600), lb, 0.0, 0.0), (-0.5, 1.0));
        assert_eq!(screen_to_ndc((1600, 600), lb, 800.0, 600.0), (0.5, -1.0));
    }

    #[test]
    fn test_scissor_stays_inside_surface() {
        assert_eq!(scissor((800, 600), Letterbox::fit(800, 600)), (0, 0, 800, 600));
        assert_eq!(scissor((1600, 600), Letterbox::fit(1600, 600)), (400, 0, 800, 600));
        let (x, y, w, h) = scissor((801, 599), Letterbox::fit(801, 599));
        assert!(x + w <= 801 && y + h <= 599);
    }
}
