// Sprite quad vertices

use super::surface::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One corner of a sprite quad: screen position, sheet UV, tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    /// Multiplied with the sampled texel
    pub tint: Color,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };

    pub fn new(position: Vec2, tex_coords: Vec2, tint: Color) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            tint,
        }
    }
}
