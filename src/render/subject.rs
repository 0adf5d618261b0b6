use super::helpers;
use crate::constants::{SKIN_RESOLUTION, SKIN_SEED, SUBJECT_RINGS, SUBJECT_SEGMENTS};
use crate::core::{CausticUniforms, AMBIENT_INTENSITY, LIGHT_COLOR, LIGHT_DIR, LIGHT_INTENSITY};
use glam::Mat4;
use rand::prelude::*;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SubjectVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
    pub(crate) uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SubjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) light_color: [f32; 4],
    pub(crate) ambient: [f32; 4],
}

impl SubjectUniforms {
    pub(crate) fn new(model: Mat4) -> Self {
        let dir = LIGHT_DIR.normalize();
        Self {
            model: model.to_cols_array_2d(),
            light_dir: [dir.x, dir.y, dir.z, LIGHT_INTENSITY],
            light_color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], 1.0],
            ambient: [AMBIENT_INTENSITY, 0.0, 0.0, 0.0],
        }
    }
}

/// Stand-in subject body: a tapered ellipsoid of revolution. A real model
/// would arrive as external geometry and bind to the same two pipelines.
pub(crate) fn build_subject_mesh() -> (Vec<SubjectVertex>, Vec<u32>) {
    let rings = SUBJECT_RINGS;
    let segments = SUBJECT_SEGMENTS;
    let half_len = 3.0_f32;
    let girth = 1.1_f32;
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ri in 0..=rings {
        let v = ri as f32 / rings as f32;
        let phi = v * std::f32::consts::PI;
        // Fuller toward the head (v near 0), tapering into the tail.
        let taper = 0.65 + 0.35 * (phi.sin()).powf(0.8) - 0.25 * v * v;
        let z = phi.cos() * half_len;
        let r = phi.sin() * girth * taper;
        for si in 0..=segments {
            let u = si as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;
            let x = theta.cos() * r;
            let y = theta.sin() * r;
            // Normal of the surface of revolution, ignoring the slow taper
            // derivative; close enough for soft underwater lighting.
            let nr = phi.sin();
            let normal = glam::Vec3::new(theta.cos() * nr, theta.sin() * nr, phi.cos())
                .normalize_or_zero();
            vertices.push(SubjectVertex {
                position: [x, y, z],
                normal: normal.to_array(),
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    let stride = segments + 1;
    for ri in 0..rings {
        for si in 0..segments {
            let a = ri * stride + si;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Procedural mottled skin, standing in for the external base-color asset.
pub(crate) fn build_skin_raster(seed: u64) -> Vec<u8> {
    let res = SKIN_RESOLUTION as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut px = vec![0u8; res * res * 4];
    for y in 0..res {
        for x in 0..res {
            // Back darker than belly.
            let belly = (y as f32 / res as f32 - 0.5).abs() * 2.0;
            let base = [
                70.0 + 80.0 * belly,
                85.0 + 85.0 * belly,
                105.0 + 85.0 * belly,
            ];
            let i = (y * res + x) * 4;
            px[i] = base[0] as u8;
            px[i + 1] = base[1] as u8;
            px[i + 2] = base[2] as u8;
            px[i + 3] = 0xff;
        }
    }
    // Darker mottling spots.
    for _ in 0..140 {
        let cx = rng.gen_range(0..res) as i32;
        let cy = rng.gen_range(0..res) as i32;
        let r = rng.gen_range(2..9) as i32;
        let darken = rng.gen_range(0.55..0.85_f32);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                // Spots wrap horizontally so the seam stays invisible.
                let x = (cx + dx).rem_euclid(res as i32) as usize;
                let y = (cy + dy).clamp(0, res as i32 - 1) as usize;
                let i = (y * res + x) * 4;
                for c in 0..3 {
                    px[i + c] = (px[i + c] as f32 * darken) as u8;
                }
            }
        }
    }
    px
}

pub(crate) struct SubjectResources {
    pub(crate) vertex_buf: wgpu::Buffer,
    pub(crate) index_buf: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) base_pipeline: wgpu::RenderPipeline,
    pub(crate) caustic_pipeline: wgpu::RenderPipeline,
    pub(crate) base_uniform_buf: wgpu::Buffer,
    pub(crate) caustic_uniform_buf: wgpu::Buffer,
    pub(crate) base_bind_group: wgpu::BindGroup,
    pub(crate) caustic_bind_group: wgpu::BindGroup,
}

fn material_bgl(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<SubjectVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &VERTEX_ATTRS,
};

#[allow(clippy::too_many_arguments)]
pub(crate) fn create_subject_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    globals_bgl: &wgpu::BindGroupLayout,
    cookie_view: &wgpu::TextureView,
    repeat_sampler: &wgpu::Sampler,
    hdr_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> SubjectResources {
    let (vertices, indices) = build_subject_mesh();
    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("subject_vertices"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("subject_indices"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    // Base skin texture (stand-in for the external base-color asset).
    let (skin_tex, skin_view) =
        helpers::create_raster_texture(device, "skin_tex", SKIN_RESOLUTION);
    helpers::upload_raster(queue, &skin_tex, SKIN_RESOLUTION, &build_skin_raster(SKIN_SEED));

    let base_uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("subject_uniforms"),
        size: std::mem::size_of::<SubjectUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let caustic_uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("caustic_uniforms"),
        size: std::mem::size_of::<CausticUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let base_bgl = material_bgl(device, "subject_bgl");
    let caustic_bgl = material_bgl(device, "caustic_bgl");
    let base_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("subject_bg"),
        layout: &base_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: base_uniform_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&skin_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(repeat_sampler),
            },
        ],
    });
    // Layer B samples the live light-cookie as its caustic texture.
    let caustic_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("caustic_bg"),
        layout: &caustic_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: caustic_uniform_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(cookie_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(repeat_sampler),
            },
        ],
    });

    let subject_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("subject_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SUBJECT_WGSL.into()),
    });
    let caustic_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("caustic_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::CAUSTIC_WGSL.into()),
    });

    let base_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("subject_pl"),
        bind_group_layouts: &[globals_bgl, &base_bgl],
        push_constant_ranges: &[],
    });
    let caustic_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("caustic_pl"),
        bind_group_layouts: &[globals_bgl, &caustic_bgl],
        push_constant_ranges: &[],
    });

    let base_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("subject_pipeline"),
        layout: Some(&base_pl),
        vertex: wgpu::VertexState {
            module: &subject_shader,
            entry_point: Some("vs_subject"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &subject_shader,
            entry_point: Some("fs_subject"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    // Overlay layer: additive, depth-read only, so it adds light without
    // ever occluding the base layer.
    let caustic_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("caustic_pipeline"),
        layout: Some(&caustic_pl),
        vertex: wgpu::VertexState {
            module: &caustic_shader,
            entry_point: Some("vs_caustic"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &caustic_shader,
            entry_point: Some("fs_caustic"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(helpers::ADDITIVE_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SubjectResources {
        vertex_buf,
        index_buf,
        index_count: indices.len() as u32,
        base_pipeline,
        caustic_pipeline,
        base_uniform_buf,
        caustic_uniform_buf,
        base_bind_group,
        caustic_bind_group,
    }
}
