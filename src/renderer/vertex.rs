//! Flat-colored vertex shared by every shape

use bytemuck::{Pod, Zeroable};

use crate::sim::Color;

/// Screen-space point while shapes are built, NDC once uploaded
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    /// Straight (non-premultiplied) rgba in 0..=1
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color: color.to_f32(),
        }
    }

    /// Same color, moved to `(x, y)`
    pub fn moved_to(self, x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            ..self
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_converts_color() {
        let v = Vertex::new(3.0, 4.0, Color::rgb(255, 0, 0));
        assert_eq!(v.position, [3.0, 4.0]);
        assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(3.0, 4.0, Color::BLUE).moved_to(-0.5, 0.25);
        assert_eq!(v.position, [-0.5, 0.25]);
        assert_eq!(v.color, Color::BLUE.to_f32());
    }

    #[test]
    fn test_layout_matches_shader_inputs() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }
}
