use crate::constants::{
    BAUBLE_RADIUS, BAUBLE_SEGMENTS, BULB_RADIUS, BULB_SEGMENTS, GROUND_SIZE, STAR_DEPTH,
    STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS, TRUNK_SEGMENTS,
};
use crate::core::mesh;
use crate::core::palette::{self, hex_linear};
use crate::core::tree::CONE_SEGMENTS;
use crate::core::Scene;
use web_sys as web;

mod helpers;
mod meshes;
mod post;
mod snow;
mod targets;
use meshes::{GpuMesh, MeshPipeline, SceneUniforms};
use snow::SnowPass;
use targets::RenderTargets;

/// Every mesh the scene draws, one GPU buffer set each.
struct SceneMeshes {
    ground: GpuMesh,
    tiers: Vec<GpuMesh>,
    trunk: GpuMesh,
    star: GpuMesh,
    baubles: GpuMesh,
    bulbs: GpuMesh,
}

impl SceneMeshes {
    fn new(device: &wgpu::Device, scene: &Scene) -> Self {
        let tree = &scene.tree;
        let tiers = tree
            .tiers
            .iter()
            .enumerate()
            .map(|(i, t)| {
                GpuMesh::new(
                    device,
                    &format!("tier_{}", i),
                    &mesh::cone(t.radius, t.height, CONE_SEGMENTS),
                    1,
                )
            })
            .collect();
        Self {
            ground: GpuMesh::new(device, "ground", &mesh::plane(GROUND_SIZE, GROUND_SIZE), 1),
            tiers,
            trunk: GpuMesh::new(
                device,
                "trunk",
                &mesh::cylinder(
                    tree.params.trunk_radius,
                    tree.params.trunk_height,
                    TRUNK_SEGMENTS,
                ),
                1,
            ),
            star: GpuMesh::new(
                device,
                "star",
                &mesh::star_prism(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS, STAR_DEPTH),
                1,
            ),
            baubles: GpuMesh::new(
                device,
                "baubles",
                &mesh::sphere(BAUBLE_RADIUS, BAUBLE_SEGMENTS, BAUBLE_SEGMENTS),
                tree.baubles.len() as u32,
            ),
            bulbs: GpuMesh::new(
                device,
                "bulbs",
                &mesh::sphere(BULB_RADIUS, BULB_SEGMENTS, BULB_SEGMENTS),
                tree.lights.len() as u32,
            ),
        }
    }

    fn upload(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        self.ground.write_instances(queue, &[scene.ground_instance()]);
        let tiers = scene.tier_instances();
        for (gpu, inst) in self.tiers.iter_mut().zip(tiers.iter()) {
            gpu.write_instances(queue, std::slice::from_ref(inst));
        }
        self.trunk.write_instances(queue, &[scene.trunk_instance()]);
        self.star.write_instances(queue, &[scene.star_instance()]);
        self.baubles.write_instances(queue, &scene.bauble_instances());
        self.bulbs.write_instances(queue, &scene.bulb_instances());
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.ground.draw(pass);
        self.trunk.draw(pass);
        for t in &self.tiers {
            t.draw(pass);
        }
        self.baubles.draw(pass);
        self.bulbs.draw(pass);
        self.star.draw(pass);
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_pipeline: MeshPipeline,
    meshes: SceneMeshes,
    snow: SnowPass,
    // Post-processing resources
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
                    // Default limits keep older WebGPU implementations happy
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let mesh_pipeline = meshes::create_mesh_pipeline(&device);
        let meshes = SceneMeshes::new(&device, scene);
        let snow = SnowPass::new(&device, scene.snow.len());

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
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
        let post = post::create_post_resources(&device, &post_shader, helpers::HDR_FORMAT, format);
        let post_groups = post::rebuild_bind_groups(
            &device,
            &post,
            &linear_sampler,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );

        let sky = scene.lighting.sky;
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            meshes,
            snow,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: sky.x as f64,
                g: sky.y as f64,
                b: sky.z as f64,
                a: 1.0,
            },
            time_accum: 0.0,
        })
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

            // Recreate offscreen render targets and the bind groups that view them
            self.targets.recreate(&self.device, width, height);
            self.post_groups = post::rebuild_bind_groups(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets.hdr_view,
                &self.targets.bloom_a_view,
                &self.targets.bloom_b_view,
            );
        }
    }

    pub fn render(&mut self, scene: &Scene, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);

        let cam = &scene.camera;
        let view_proj = cam.view_proj();
        let lights = scene.point_lights();
        let uniforms = SceneUniforms::pack(
            view_proj,
            cam.eye,
            self.time_accum,
            &scene.lighting,
            &lights,
        );
        self.queue.write_buffer(
            &self.mesh_pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );
        self.meshes.upload(&self.queue, scene);
        self.snow.write(
            &self.queue,
            cam.view_matrix(),
            view_proj,
            hex_linear(palette::SNOW),
            scene.snow_positions(),
        );
        post::write_post_uniforms(
            &self.queue,
            &self.post,
            [self.width as f32, self.height as f32],
            self.time_accum,
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            // Pass 1: lit meshes then snow into HDR
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
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.mesh_pipeline.pipeline);
            rpass.set_bind_group(0, &self.mesh_pipeline.bind_group, &[]);
            self.meshes.draw(&mut rpass);
            self.snow.draw(&mut rpass);
        }

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite,
            Some(&self.post_groups.bloom_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
