use super::helpers;
use crate::constants::MAX_POINT_LIGHTS;
use crate::core::mesh::{MeshData, Vertex};
use crate::core::{DrawInstance, Lighting, PointLight};
use glam::{Mat4, Vec3};
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    albedo: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

impl From<&DrawInstance> for InstanceRaw {
    fn from(d: &DrawInstance) -> Self {
        let m = &d.material;
        Self {
            model: d.model.to_cols_array_2d(),
            albedo: [m.albedo.x, m.albedo.y, m.albedo.z, m.roughness],
            emissive: [m.emissive.x, m.emissive.y, m.emissive.z, m.emissive_intensity],
            params: [m.metalness, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    sky: [f32; 4],
    ambient: [f32; 4],
    moon_dir: [f32; 4],
    moon_color: [f32; 4],
    spot_pos: [f32; 4],
    spot_dir: [f32; 4],
    spot_color: [f32; 4],
    light_count: [u32; 4],
    point_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    point_color: [[f32; 4]; MAX_POINT_LIGHTS],
}

fn rgb_scaled(c: Vec3, k: f32) -> [f32; 4] {
    [c.x * k, c.y * k, c.z * k, 0.0]
}

impl SceneUniforms {
    pub(crate) fn pack(
        view_proj: Mat4,
        eye: Vec3,
        time: f32,
        lighting: &Lighting,
        lights: &[PointLight],
    ) -> Self {
        let l = lighting;
        let spot_dir = (l.spot_target - l.spot_position).normalize_or_zero();
        let inner = l.spot_angle * (1.0 - l.spot_penumbra);
        let mut u = Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, l.fog_density],
            sky: [l.sky.x, l.sky.y, l.sky.z, time],
            ambient: rgb_scaled(l.ambient, l.ambient_intensity),
            moon_dir: l.moon_position.normalize_or_zero().extend(0.0).to_array(),
            moon_color: rgb_scaled(l.moon_color, l.moon_intensity),
            spot_pos: l.spot_position.extend(l.spot_angle.cos()).to_array(),
            spot_dir: spot_dir.extend(inner.cos()).to_array(),
            spot_color: rgb_scaled(l.spot_color, l.spot_intensity),
            light_count: [0; 4],
            point_pos: [[0.0; 4]; MAX_POINT_LIGHTS],
            point_color: [[0.0; 4]; MAX_POINT_LIGHTS],
        };
        let n = lights.len().min(MAX_POINT_LIGHTS);
        for (i, pl) in lights.iter().take(n).enumerate() {
            u.point_pos[i] = pl.position.extend(pl.range).to_array();
            u.point_color[i] = rgb_scaled(pl.color, pl.intensity);
        }
        u.light_count[0] = n as u32;
        u
    }
}

/// A mesh on the GPU plus a per-frame instance buffer.
pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    capacity: u32,
    instance_count: u32,
}

impl GpuMesh {
    pub(crate) fn new(device: &wgpu::Device, label: &str, mesh: &MeshData, capacity: u32) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let capacity = capacity.max(1);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<InstanceRaw>() as u64) * capacity as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            instance_buffer,
            capacity,
            instance_count: 0,
        }
    }

    /// Upload this frame's instances; extras beyond capacity are dropped.
    pub(crate) fn write_instances(&mut self, queue: &wgpu::Queue, instances: &[DrawInstance]) {
        let raw: Vec<InstanceRaw> = instances
            .iter()
            .take(self.capacity as usize)
            .map(InstanceRaw::from)
            .collect();
        self.instance_count = raw.len() as u32;
        if !raw.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
        }
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4, 8 => Float32x4
];

pub(crate) struct MeshPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_mesh_pipeline(device: &wgpu::Device) -> MeshPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRS,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    MeshPipeline {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
