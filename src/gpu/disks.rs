//! Instanced screen-facing disks.
//!
//! The one drawing primitive the particle simulation needs: a filled circle
//! billboard at a world position, sized in pixels. Instances are rewritten
//! from scratch every frame, so the emitter's unstable particle order never
//! shows.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::{GpuState, DEPTH_FORMAT};

pub const DISK_WGSL: &str = r#"
struct Uniforms {
    fullview: mat4x4<f32>,
    viewport: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    var clip = uniforms.fullview * vec4<f32>(position, 1.0);

    // size is a pixel radius; one pixel is 2/viewport in ndc
    clip.x += corner.x * size * (2.0 / uniforms.viewport.x) * clip.w;
    clip.y += corner.y * size * (2.0 / uniforms.viewport.y) * clip.w;

    var out: VertexOutput;
    out.clip_position = clip;
    out.color = color;
    out.uv = corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = 1.0 - smoothstep(0.8, 1.0, dist);
    return vec4<f32>(in.color, alpha);
}
"#;

/// One disk: world position, pixel radius, color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DiskInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl DiskInstance {
    pub fn new(position: Vec3, size: f32, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: color.to_array(),
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DiskUniforms {
    fullview: [[f32; 4]; 4],
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// Draws a batch of disks under one camera transform.
pub struct DiskRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: u32,
    count: u32,
}

impl DiskRenderer {
    /// Build the pipeline with room for `capacity` instances.
    ///
    /// `depth_test` false makes the disks overlay markers that draw on top
    /// of everything (widget handles, the light).
    pub fn new(gpu: &GpuState, capacity: u32, depth_test: bool) -> Self {
        let device = &gpu.device;

        let uniforms = DiskUniforms {
            fullview: Mat4::IDENTITY.to_cols_array_2d(),
            viewport: [1.0, 1.0],
            _pad: [0.0; 2],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Disk Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Disk Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Disk Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Disk Instance Buffer"),
            size: capacity as u64 * std::mem::size_of::<DiskInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Disk Shader"),
            source: wgpu::ShaderSource::Wgsl(DISK_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Disk Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Disk Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<DiskInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: depth_test,
                depth_compare: if depth_test {
                    wgpu::CompareFunction::Less
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instance_buffer,
            capacity,
            count: 0,
        }
    }

    /// Update the camera transform and viewport for this frame.
    pub fn set_view(&self, queue: &wgpu::Queue, fullview: Mat4, viewport: glam::Vec2) {
        let uniforms = DiskUniforms {
            fullview: fullview.to_cols_array_2d(),
            viewport: viewport.to_array(),
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Replace this frame's instances; anything past capacity is dropped.
    pub fn upload(&mut self, queue: &wgpu::Queue, instances: &[DiskInstance]) {
        let n = instances.len().min(self.capacity as usize);
        self.count = n as u32;
        if n > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances[..n]),
            );
        }
    }

    /// Issue the instanced draw. No-op when nothing was uploaded.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}
