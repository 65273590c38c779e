// Sprite batching and rendering

use super::surface::{Color, RenderSurface, WHITE};
use super::{TextureHandle, TextureManager, Vertex};
use crate::core::math::Rect;
use anyhow::Result;
use glam::{Affine2, Vec2};
use std::collections::HashMap;
use std::ops::Range;
use wgpu::util::DeviceExt;

/// One textured quad, already transformed into screen space
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteQuad {
    pub texture: TextureHandle,
    /// Screen-space corners matching `source.corners()` order
    pub corners: [Vec2; 4],
    /// Source rectangle in texture pixels
    pub source: Rect,
}

/// CPU-side recording of one frame's draw commands
#[derive(Debug, Clone)]
pub struct SpriteBatch {
    clear_color: Color,
    transform: Affine2,
    stack: Vec<Affine2>,
    quads: Vec<SpriteQuad>,
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self {
            clear_color: WHITE,
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Background color of the frame
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Quads queued this frame, in draw order
    pub fn quads(&self) -> &[SpriteQuad] {
        &self.quads
    }

    /// Forget all queued quads and reset the transform for the next frame
    pub fn reset(&mut self) {
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
        self.quads.clear();
    }
}

impl RenderSurface for SpriteBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.quads.clear();
    }

    fn push_transform(&mut self) {
        self.stack.push(self.transform);
    }

    fn pop_transform(&mut self) {
        self.transform = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    fn draw_image(&mut self, texture: TextureHandle, dest: Rect, source: Rect) {
        let corners = dest.corners().map(|c| self.transform.transform_point2(c));
        self.quads.push(SpriteQuad {
            texture,
            corners,
            source,
        });
    }
}

/// A run of indices drawn with one texture bound
#[derive(Debug, Clone, PartialEq)]
struct DrawCall {
    texture: TextureHandle,
    indices: Range<u32>,
}

/// Build vertices, indices and per-texture draw calls for a batch.
/// Quads whose texture is unknown are skipped.
fn build_geometry(
    batch: &SpriteBatch,
    dimensions: impl Fn(TextureHandle) -> Option<(u32, u32)>,
) -> (Vec<Vertex>, Vec<u32>, Vec<DrawCall>) {
    let mut vertices = Vec::with_capacity(batch.quads.len() * 4);
    let mut indices = Vec::with_capacity(batch.quads.len() * 6);
    let mut calls: Vec<DrawCall> = Vec::new();

    for quad in batch.quads() {
        let Some((width, height)) = dimensions(quad.texture) else {
            continue;
        };
        let texture_size = Vec2::new(width as f32, height as f32);

        let base = vertices.len() as u32;
        for (corner, uv_px) in quad.corners.iter().zip(quad.source.corners()) {
            vertices.push(Vertex::new(*corner, uv_px / texture_size, WHITE));
        }

        let start = indices.len() as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = indices.len() as u32;

        match calls.last_mut() {
            Some(call) if call.texture == quad.texture => call.indices.end = end,
            _ => calls.push(DrawCall {
                texture: quad.texture,
                indices: start..end,
            }),
        }
    }

    (vertices, indices, calls)
}

/// Sprite renderer drawing a `SpriteBatch` as textured quads
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_groups: HashMap<TextureHandle, wgpu::BindGroup>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    draw_calls: Vec<DrawCall>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mirrored sprites flip winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = super::CameraUniform {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            texture_bind_groups: HashMap::new(),
            vertex_buffer: None,
            index_buffer: None,
            draw_calls: Vec::new(),
        })
    }

    /// Upload the batch's geometry and make sure every texture it uses is bound
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        batch: &SpriteBatch,
        textures: &TextureManager,
    ) {
        let (vertices, indices, calls) = build_geometry(batch, |handle| textures.dimensions(handle));

        for call in &calls {
            if self.texture_bind_groups.contains_key(&call.texture) {
                continue;
            }
            let Some(texture) = textures.get(call.texture) else {
                continue;
            };
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Sprite Texture Bind Group"),
                layout: &self.texture_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });
            self.texture_bind_groups.insert(call.texture, bind_group);
        }

        if calls.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
        } else {
            self.vertex_buffer = Some(device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
            self.index_buffer = Some(device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Index Buffer"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            ));
        }
        self.draw_calls = calls;
    }

    /// Record draw commands for the last prepared batch
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for call in &self.draw_calls {
            if let Some(bind_group) = self.texture_bind_groups.get(&call.texture) {
                render_pass.set_bind_group(1, bind_group, &[]);
                render_pass.draw_indexed(call.indices.clone(), 0, 0..1);
            }
        }
    }

    /// Get the number of draw calls in the last prepared batch
    pub fn draw_call_count(&self) -> usize {
        self.draw_calls.len()
    }

    /// Get a reference to the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }
}
