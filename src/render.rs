// SPDX-License-Identifier: MPL-2.0
//! GPU presentation pipeline.
//!
//! One persistent texture sized exactly to the stream geometry is overwritten
//! each frame via `queue.write_texture` and drawn as a quad spanning
//! `[0,0]`–`[width,height]` in window pixel coordinates. The orthographic
//! projection is re-derived from the live surface size on every render, so a
//! window resize changes only the projection — never the texture.

use crate::error::{Error, Result};
use crate::stream::StreamGeometry;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Quad vertex: position in window pixel coordinates plus texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    tex_coord: [f32; 2],
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

/// Per-frame uniform: the viewport projection.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Projection {
    matrix: [[f32; 4]; 4],
}

/// Column-major orthographic projection mapping pixel coordinates with a
/// top-left origin onto normalized device coordinates, the same mapping as
/// `glOrtho(0, w, h, 0, -1, 1)`.
#[must_use]
pub fn orthographic(width: f32, height: f32) -> [[f32; 4]; 4] {
    [
        [2.0 / width, 0.0, 0.0, 0.0],
        [0.0, -2.0 / height, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0, 1.0],
    ]
}

/// Draws the current frame buffer into the window surface.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    texture: wgpu::Texture,
    texture_bind_group: wgpu::BindGroup,
    geometry: StreamGeometry,
}

impl Renderer {
    /// Sets up the surface, device, pipeline, and the persistent frame
    /// texture for the given window and stream geometry.
    pub fn new(window: Arc<Window>, geometry: StreamGeometry) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::GraphicsInit(format!("surface creation failed: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| Error::GraphicsInit(format!("no suitable GPU adapter: {e}")))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("cineview device"),
            ..Default::default()
        }))
        .map_err(|e| Error::GraphicsInit(format!("device request failed: {e}")))?;

        let size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| {
                Error::GraphicsInit("surface is not supported by the adapter".to_string())
            })?;
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("frame shader"),
            source: wgpu::ShaderSource::Wgsl(FRAME_SHADER.into()),
        });

        let projection_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("projection uniform"),
            size: std::mem::size_of::<Projection>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let projection_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("projection bind group layout"),
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

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection bind group"),
            layout: &projection_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame texture bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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

        // Rgba8Unorm rather than Srgb: decoded frames are already
        // gamma-corrected, and an sRGB view would darken them.
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame texture"),
            size: wgpu::Extent3d {
                width: geometry.width,
                height: geometry.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("frame sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame texture bind group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        // The quad covers the stream geometry in pixel space, texture mapped
        // unflipped corner-to-corner. Triangle strip: tl, tr, bl, br.
        let (w, h) = (geometry.width as f32, geometry.height as f32);
        let vertices = [
            Vertex { position: [0.0, 0.0], tex_coord: [0.0, 0.0] },
            Vertex { position: [w, 0.0], tex_coord: [1.0, 0.0] },
            Vertex { position: [0.0, h], tex_coord: [0.0, 1.0] },
            Vertex { position: [w, h], tex_coord: [1.0, 1.0] },
        ];
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame quad"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("frame pipeline layout"),
            bind_group_layouts: &[&projection_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("frame pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            projection_buffer,
            projection_bind_group,
            texture,
            texture_bind_group,
            geometry,
        })
    }

    /// Uploads `pixels` to the frame texture and draws it, then presents.
    ///
    /// `pixels` must be one tightly packed RGBA frame of the stream
    /// geometry. Transient surface loss reconfigures and skips this present.
    pub fn render(&mut self, pixels: &[u8]) -> Result<()> {
        debug_assert_eq!(pixels.len(), self.geometry.frame_bytes());

        let size = self.window.inner_size();
        if size.width > 0
            && size.height > 0
            && (size.width != self.config.width || size.height != self.config.height)
        {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => {
                return Err(Error::Render(format!("failed to acquire surface frame: {e}")))
            }
        };

        // Texture upload uses the stream geometry, never the window size.
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.geometry.width * 4),
                rows_per_image: Some(self.geometry.height),
            },
            wgpu::Extent3d {
                width: self.geometry.width,
                height: self.geometry.height,
                depth_or_array_layers: 1,
            },
        );

        let projection = Projection {
            matrix: orthographic(self.config.width as f32, self.config.height as f32),
        };
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::bytes_of(&projection));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame pass"),
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
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.projection_bind_group, &[]);
            pass.set_bind_group(1, &self.texture_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..4, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

/// WGSL shader: projected quad, sampled frame texture.
const FRAME_SHADER: &str = r#"
struct Globals {
    projection: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coord: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) tex_coord: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.position = globals.projection * vec4<f32>(input.position, 0.0, 1.0);
    output.tex_coord = input.tex_coord;
    return output;
}

@group(1) @binding(0)
var frame_texture: texture_2d<f32>;
@group(1) @binding(1)
var frame_sampler: sampler;

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(frame_texture, frame_sampler, input.tex_coord);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn project(matrix: [[f32; 4]; 4], x: f32, y: f32) -> (f32, f32) {
        // Column-major multiply of (x, y, 0, 1).
        (
            matrix[0][0] * x + matrix[1][0] * y + matrix[3][0],
            matrix[0][1] * x + matrix[1][1] * y + matrix[3][1],
        )
    }

    #[test]
    fn orthographic_maps_top_left_to_ndc_corner() {
        let m = orthographic(800.0, 600.0);
        let (x, y) = project(m, 0.0, 0.0);
        assert!((x - -1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_maps_bottom_right_to_ndc_corner() {
        let m = orthographic(800.0, 600.0);
        let (x, y) = project(m, 800.0, 600.0);
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - -1.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_center_is_origin() {
        let m = orthographic(1920.0, 1080.0);
        let (x, y) = project(m, 960.0, 540.0);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn resize_changes_projection_of_fixed_quad() {
        // A 640x480 quad fills a 640x480 viewport but only part of a larger
        // one; the quad itself never changes.
        let small = orthographic(640.0, 480.0);
        let large = orthographic(1280.0, 960.0);
        let (x_small, _) = project(small, 640.0, 480.0);
        let (x_large, _) = project(large, 640.0, 480.0);
        assert!((x_small - 1.0).abs() < 1e-6);
        assert!((x_large - 0.0).abs() < 1e-6);
    }
}
