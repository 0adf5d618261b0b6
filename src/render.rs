use crate::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::core::{Camera, CausticUniforms, RayRig, FOG_COLOR, FOG_FAR, FOG_NEAR};
use glam::{Mat4, Quat, Vec3};
use web_sys as web;

mod helpers;
mod points;
mod post;
mod rays;
mod subject;
mod targets;

use targets::{RenderTargets, BLOOM_FORMAT, HDR_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    // xyz = camera eye, w = elapsed time
    eye_time: [f32; 4],
    // rgb = fog color, w = fog near
    fog_color_near: [f32; 4],
    // x = fog far
    fog_params: [f32; 4],
}

/// Everything the renderer needs for one frame, assembled by the frame loop
/// from the pure scene components.
pub struct SceneFrame<'f> {
    pub camera: Camera,
    pub time: f32,
    pub subject_model: Mat4,
    /// Caustic overlay uniform sets, one per shell segment.
    pub caustic_sets: &'f [CausticUniforms],
    pub field_rotation: Quat,
    pub rigs: [RayRig; 4],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buf: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    // Live light-cookie texture, re-uploaded whenever the synth redraws.
    cookie_tex: wgpu::Texture,
    cookie_side: u32,

    subject: subject::SubjectResources,
    points: points::PointsResources,
    rays: rays::RaysResources,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    bg_hdr: wgpu::BindGroup,
    bg_from_bloom_a: wgpu::BindGroup,
    bg_from_bloom_b: wgpu::BindGroup,
    bg_bloom_a_only: wgpu::BindGroup,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        field: &crate::core::ParticleField,
        cookie_side: u32,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits to avoid passing unknown fields to older
                    // WebGPU implementations
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::create(&device, width, height);
        let depth_format = wgpu::TextureFormat::Depth32Float;

        // Shared per-frame globals for the two subject layers.
        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let (cookie_tex, cookie_view) =
            helpers::create_raster_texture(&device, "cookie_tex", cookie_side);
        let repeat_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let subject = subject::create_subject_resources(
            &device,
            &queue,
            &globals_bgl,
            &cookie_view,
            &repeat_sampler,
            HDR_FORMAT,
            depth_format,
        );
        let points = points::create_points_resources(&device, &queue, field, HDR_FORMAT, depth_format);
        let rays =
            rays::create_rays_resources(&device, &cookie_view, &repeat_sampler, HDR_FORMAT, depth_format);

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, BLOOM_FORMAT, format);
        let (bg_hdr, bg_from_bloom_a, bg_from_bloom_b, bg_bloom_a_only) =
            post::rebuild_bind_groups(
                &device,
                &post,
                &linear_sampler,
                &targets.hdr_view,
                &targets.bloom_a_view,
                &targets.bloom_b_view,
            );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buf,
            globals_bind_group,
            cookie_tex,
            cookie_side,
            subject,
            points,
            rays,
            targets,
            linear_sampler,
            post,
            bg_hdr,
            bg_from_bloom_a,
            bg_from_bloom_b,
            bg_bloom_a_only,
            width,
            height,
            clear_color: wgpu::Color {
                r: FOG_COLOR[0] as f64,
                g: FOG_COLOR[1] as f64,
                b: FOG_COLOR[2] as f64,
                a: 1.0,
            },
        })
    }

    /// Push a fresh cookie raster. Called only on frames where the synth
    /// reports a dirty surface.
    pub fn upload_cookie(&self, pixels: &[u8]) {
        helpers::upload_raster(&self.queue, &self.cookie_tex, self.cookie_side, pixels);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            let (bg_hdr, bg_from_a, bg_from_b, bg_a_only) = post::rebuild_bind_groups(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets.hdr_view,
                &self.targets.bloom_a_view,
                &self.targets.bloom_b_view,
            );
            self.bg_hdr = bg_hdr;
            self.bg_from_bloom_a = bg_from_a;
            self.bg_from_bloom_b = bg_from_b;
            self.bg_bloom_a_only = bg_a_only;
        }
    }

    pub fn render(&mut self, scene: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let cam = &scene.camera;
        let view_mat = cam.view_matrix();
        let view_proj = cam.projection_matrix() * view_mat;
        let globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            eye_time: [cam.eye.x, cam.eye.y, cam.eye.z, scene.time],
            fog_color_near: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_NEAR],
            fog_params: [FOG_FAR, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        self.queue.write_buffer(
            &self.subject.base_uniform_buf,
            0,
            bytemuck::bytes_of(&subject::SubjectUniforms::new(scene.subject_model)),
        );
        if let Some(set) = scene.caustic_sets.first() {
            self.queue
                .write_buffer(&self.subject.caustic_uniform_buf, 0, bytemuck::bytes_of(set));
        }

        // Billboard axes come from the view matrix rows.
        let right = Vec3::new(view_mat.x_axis.x, view_mat.y_axis.x, view_mat.z_axis.x);
        let up = Vec3::new(view_mat.x_axis.y, view_mat.y_axis.y, view_mat.z_axis.y);
        let pu = points::PointsUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: Mat4::from_quat(scene.field_rotation).to_cols_array_2d(),
            cam_right: [right.x, right.y, right.z, 0.0],
            cam_up: [up.x, up.y, up.z, 0.0],
        };
        self.queue
            .write_buffer(&self.points.uniform_buf, 0, bytemuck::bytes_of(&pu));

        let resolution = [self.width as f32, self.height as f32];
        let ru = rays::RaysUniforms::from_rigs(&scene.rigs, scene.time, resolution);
        self.queue
            .write_buffer(&self.rays.uniform_buf, 0, bytemuck::bytes_of(&ru));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Backdrop first: water gradient and god rays.
            rpass.set_pipeline(&self.rays.pipeline);
            rpass.set_bind_group(0, &self.rays.bind_group, &[]);
            rpass.draw(0..3, 0..1);

            // Subject base layer, the only depth writer in the scene.
            rpass.set_pipeline(&self.subject.base_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_bind_group(1, &self.subject.base_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.subject.vertex_buf.slice(..));
            rpass.set_index_buffer(self.subject.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.subject.index_count, 0, 0..1);

            // Caustic shell on top, additive.
            if !scene.caustic_sets.is_empty() {
                rpass.set_pipeline(&self.subject.caustic_pipeline);
                rpass.set_bind_group(1, &self.subject.caustic_bind_group, &[]);
                rpass.draw_indexed(0..self.subject.index_count, 0, 0..1);
            }

            // Glow particles last, additive over everything.
            rpass.set_pipeline(&self.points.pipeline);
            rpass.set_bind_group(0, &self.points.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.points.instance_buf.slice(..));
            rpass.draw(0..6, 0..self.points.instance_count);
        }

        let half_res = [self.width as f32 / 2.0, self.height as f32 / 2.0];

        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            half_res,
            scene.time,
            [0.0, 0.0],
            BLOOM_STRENGTH,
            BLOOM_THRESHOLD,
        );
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.bg_hdr,
            None,
        );

        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            half_res,
            scene.time,
            [1.0, 0.0],
            BLOOM_STRENGTH,
            BLOOM_THRESHOLD,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bg_from_bloom_a,
            None,
        );

        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            half_res,
            scene.time,
            [0.0, 1.0],
            BLOOM_STRENGTH,
            BLOOM_THRESHOLD,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bg_from_bloom_b,
            None,
        );

        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            [self.width as f32, self.height as f32],
            scene.time,
            [0.0, 0.0],
            BLOOM_STRENGTH,
            BLOOM_THRESHOLD,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.bg_hdr,
            Some(&self.bg_bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
