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

/// 8-bit RGBA to floats, still sRGB-encoded
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Decode sRGB color channels to linear; alpha is left as is
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    let decode = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [decode(color[0]), decode(color[1]), decode(color[2]), color[3]]
}

/// Colors for game elements
pub mod colors {
    use super::rgba8;

    pub const SKY_TOP: [f32; 4] = rgba8(158, 203, 227, 255);
    pub const SKY_BOTTOM: [f32; 4] = rgba8(209, 231, 240, 255);
    pub const CLOUD: [f32; 4] = rgba8(255, 255, 255, 220);

    pub const GROUND_TOP: [f32; 4] = rgba8(76, 115, 61, 255);
    pub const GROUND_BOTTOM: [f32; 4] = rgba8(52, 78, 42, 255);
    pub const GRASS: [f32; 4] = rgba8(60, 91, 48, 255);

    pub const TRUNK_DARK: [f32; 4] = rgba8(101, 67, 33, 255);
    pub const TRUNK_LIGHT: [f32; 4] = rgba8(139, 69, 19, 255);
    pub const CROWN: [f32; 4] = rgba8(47, 79, 47, 255);

    pub const GLIDER_BODY: [f32; 4] = rgba8(139, 69, 19, 255);
    pub const GLIDER_TAIL: [f32; 4] = rgba8(160, 82, 45, 255);
    pub const GLIDER_MEMBRANE: [f32; 4] = rgba8(169, 169, 169, 180);
    pub const GLIDER_EYE: [f32; 4] = rgba8(0, 0, 0, 255);
}
