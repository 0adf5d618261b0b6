use crate::core::RayRig;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RaysUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) _pad: f32,
    /// Per ray: x = beam center in 0..1, y = half width, z = intensity,
    /// w = phase delay.
    pub(crate) rays: [[f32; 4]; 4],
    pub(crate) ray_colors: [[f32; 4]; 4],
}

impl RaysUniforms {
    /// Fold a rig's world-space sway into a screen-space beam description.
    /// The world x range roughly spans [-25, 25] at the backdrop's depth.
    pub(crate) fn from_rigs(rigs: &[RayRig; 4], time: f32, resolution: [f32; 2]) -> Self {
        let mut rays = [[0.0_f32; 4]; 4];
        let mut ray_colors = [[0.0_f32; 4]; 4];
        for (i, rig) in rigs.iter().enumerate() {
            let (sx, _) = crate::core::ray_sway(time as f64, rig.delay);
            let center = ((rig.position[0] + sx) + 25.0) / 50.0;
            rays[i] = [center, rig.size / 50.0, rig.intensity, rig.delay];
            ray_colors[i] = [rig.color[0], rig.color[1], rig.color[2], 1.0];
        }
        Self {
            resolution,
            time,
            _pad: 0.0,
            rays,
            ray_colors,
        }
    }
}

pub(crate) struct RaysResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buf: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_rays_resources(
    device: &wgpu::Device,
    cookie_view: &wgpu::TextureView,
    repeat_sampler: &wgpu::Sampler,
    hdr_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> RaysResources {
    let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("rays_uniforms"),
        size: std::mem::size_of::<RaysUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("rays_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
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
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("rays_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
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

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("rays_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::RAYS_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("rays_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("rays_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        // Backdrop never tests or writes depth; it just fills the frame.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_rays"),
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

    RaysResources {
        pipeline,
        uniform_buf,
        bind_group,
    }
}
