//! Lit cylinder meshes, instanced from one canonical shape.
//!
//! A single 288-vertex unit cylinder (base at the origin, height 1,
//! radius 1) is uploaded once; each scene cylinder draws as an instance
//! carrying its own model matrix and color. Lighting is the two-sided
//! diffuse + specular model shared with the mesh renderer.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

use super::{GpuState, DEPTH_FORMAT};
use crate::cylinder::Cylinder;

/// 24 circumferential points, 4 triangles each.
const SEGMENTS: usize = 24;
const VERTEX_COUNT: usize = SEGMENTS * 4 * 3;

pub const CYLINDER_WGSL: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    persp: mat4x4<f32>,
    light: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) point: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) v_point: vec3<f32>,
    @location(1) v_normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

@vertex
fn vs_main(v: VertexInput, inst: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(inst.model_0, inst.model_1, inst.model_2, inst.model_3);
    let mv = uniforms.view * model;
    let p = mv * vec4<f32>(v.point, 1.0);

    var out: VertexOutput;
    out.v_point = p.xyz;
    out.clip_position = uniforms.persp * vec4<f32>(p.xyz, 1.0);
    out.v_normal = (mv * vec4<f32>(v.normal, 0.0)).xyz;
    out.color = inst.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.v_normal);
    let l = normalize(uniforms.light.xyz - in.v_point);
    let e = normalize(in.v_point);
    let r = reflect(l, n);
    let d = abs(dot(n, l));
    let s = abs(dot(r, e));
    let intensity = clamp(d + pow(s, 50.0), 0.0, 1.0);
    return vec4<f32>(intensity * in.color, 1.0);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CylinderVertex {
    point: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CylinderInstance {
    model: [[f32; 4]; 4],
    color: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CylinderUniforms {
    view: [[f32; 4]; 4],
    persp: [[f32; 4]; 4],
    light: [f32; 4],
}

/// Canonical cylinder: bottom and top wedge triangle plus two side
/// triangles per circumferential segment.
fn canonical_vertices() -> Vec<CylinderVertex> {
    let mut verts = Vec::with_capacity(VERTEX_COUNT);
    let p_bot = Vec3::ZERO;
    let p_top = Vec3::Y;
    let n_bot = -Vec3::Y;
    let n_top = Vec3::Y;
    let mut push = |p: Vec3, n: Vec3| {
        verts.push(CylinderVertex {
            point: p.to_array(),
            normal: n.to_array(),
        });
    };
    for i1 in 0..SEGMENTS {
        let i2 = (i1 + 1) % SEGMENTS;
        let a1 = TAU * i1 as f32 / SEGMENTS as f32;
        let a2 = TAU * i2 as f32 / SEGMENTS as f32;
        let n1 = Vec3::new(a1.cos(), 0.0, a1.sin());
        let n2 = Vec3::new(a2.cos(), 0.0, a2.sin());
        let (p1_bot, p1_top) = (p_bot + n1, p_top + n1);
        let (p2_bot, p2_top) = (p_bot + n2, p_top + n2);
        // bottom wedge
        push(p_bot, n_bot);
        push(p1_bot, n_bot);
        push(p2_bot, n_bot);
        // top wedge
        push(p_top, n_top);
        push(p1_top, n_top);
        push(p2_top, n_top);
        // side, split into two triangles
        push(p1_bot, n1);
        push(p1_top, n1);
        push(p2_top, n2);
        push(p2_top, n2);
        push(p2_bot, n2);
        push(p1_bot, n1);
    }
    verts
}

/// Per-instance transform: place the base, then stretch to size.
fn instance_model(cyl: &Cylinder) -> Mat4 {
    Mat4::from_translation(cyl.location)
        * Mat4::from_scale(Vec3::new(cyl.radius, cyl.height, cyl.radius))
}

/// Draws a fixed set of scene cylinders.
pub struct CylinderRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl CylinderRenderer {
    /// Upload the canonical shape and one instance per scene cylinder.
    pub fn new(gpu: &GpuState, cylinders: &[Cylinder]) -> Self {
        let device = &gpu.device;

        let vertices = canonical_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cylinder Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instances: Vec<CylinderInstance> = cylinders
            .iter()
            .map(|c| CylinderInstance {
                model: instance_model(c).to_cols_array_2d(),
                color: c.color.to_array(),
                _pad: 0.0,
            })
            .collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cylinder Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = CylinderUniforms {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            persp: Mat4::IDENTITY.to_cols_array_2d(),
            light: [0.0; 4],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cylinder Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cylinder Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cylinder Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cylinder Shader"),
            source: wgpu::ShaderSource::Wgsl(CYLINDER_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cylinder Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cylinder Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CylinderVertex>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[
                            wgpu::VertexAttribute {
                                offset: 0,
                                shader_location: 0,
                                format: wgpu::VertexFormat::Float32x3,
                            },
                            wgpu::VertexAttribute {
                                offset: 12,
                                shader_location: 1,
                                format: wgpu::VertexFormat::Float32x3,
                            },
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CylinderInstance>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[
                            wgpu::VertexAttribute {
                                offset: 0,
                                shader_location: 2,
                                format: wgpu::VertexFormat::Float32x4,
                            },
                            wgpu::VertexAttribute {
                                offset: 16,
                                shader_location: 3,
                                format: wgpu::VertexFormat::Float32x4,
                            },
                            wgpu::VertexAttribute {
                                offset: 32,
                                shader_location: 4,
                                format: wgpu::VertexFormat::Float32x4,
                            },
                            wgpu::VertexAttribute {
                                offset: 48,
                                shader_location: 5,
                                format: wgpu::VertexFormat::Float32x4,
                            },
                            wgpu::VertexAttribute {
                                offset: 64,
                                shader_location: 6,
                                format: wgpu::VertexFormat::Float32x3,
                            },
                        ],
                    },
                ],
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
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer,
            instance_buffer,
            uniform_buffer,
            bind_group,
            instance_count: cylinders.len() as u32,
        }
    }

    /// Update camera transforms and the world-space light position.
    pub fn set_view(&self, queue: &wgpu::Queue, modelview: Mat4, persp: Mat4, light: Vec3) {
        let light_cam = modelview * Vec4::new(light.x, light.y, light.z, 1.0);
        let uniforms = CylinderUniforms {
            view: modelview.to_cols_array_2d(),
            persp: persp.to_cols_array_2d(),
            light: light_cam.to_array(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw(0..VERTEX_COUNT as u32, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_shape_has_four_triangles_per_segment() {
        let verts = canonical_vertices();
        assert_eq!(verts.len(), 288);
    }

    #[test]
    fn side_normals_are_horizontal_unit_vectors() {
        let verts = canonical_vertices();
        for segment in verts.chunks(12) {
            for v in &segment[6..] {
                let n = Vec3::from(v.normal);
                assert_eq!(n.y, 0.0);
                assert!((n.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn instance_model_places_base_and_top() {
        let cyl = Cylinder::new(0.35, 0.5, Vec3::ONE, Vec3::new(0.3, 0.0, -0.2));
        let m = instance_model(&cyl);
        let base = m.transform_point3(Vec3::ZERO);
        let top = m.transform_point3(Vec3::Y);
        assert!((base - cyl.location).length() < 1e-6);
        assert!((top.y - 0.35).abs() < 1e-6);
        // radius scales the rim
        let rim = m.transform_point3(Vec3::X);
        assert!((rim.x - (0.3 + 0.5)).abs() < 1e-6);
    }
}
