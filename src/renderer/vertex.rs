//! Vertex type for the page strip

use bytemuck::{Pod, Zeroable};

/// Marks a quad showing the front texture
pub const FACE_FRONT: f32 = 1.0;
/// Marks a quad showing the back texture
pub const FACE_BACK: f32 = 0.0;

/// 32-bit slots per vertex in the flat buffer
pub const FLOATS_PER_VERTEX: usize = std::mem::size_of::<PageVertex>() / std::mem::size_of::<f32>();

/// Opaque white, RGBA8
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Page vertex: position, texture coordinate, packed tint and facing flag
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PageVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: u32,
    pub face: f32,
}

impl Default for PageVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 2],
            uv: [0.0; 2],
            color: WHITE,
            face: FACE_FRONT,
        }
    }
}

impl PageVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, face: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color: WHITE,
            face,
        }
    }

    pub fn is_front(&self) -> bool {
        self.face == FACE_FRONT
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PageVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
                wgpu::VertexAttribute {
                    offset: 20,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
