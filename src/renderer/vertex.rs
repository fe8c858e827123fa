//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// #081225
    pub const BACKGROUND: [f32; 4] = [0.031, 0.071, 0.145, 1.0];
    /// Faint wash over the play field
    pub const FIELD_TINT: [f32; 4] = [1.0, 1.0, 1.0, 0.02];
    /// #F8B500
    pub const BANANA: [f32; 4] = [0.973, 0.710, 0.0, 1.0];
    pub const BANANA_DETAIL: [f32; 4] = [0.0, 0.0, 0.0, 0.08];
    /// #FF6B6B
    pub const ROCK: [f32; 4] = [1.0, 0.420, 0.420, 1.0];
    /// #E6EEF6
    pub const BASKET: [f32; 4] = [0.902, 0.933, 0.965, 1.0];
    /// #081225
    pub const BASKET_HOLE: [f32; 4] = [0.031, 0.071, 0.145, 1.0];
}
