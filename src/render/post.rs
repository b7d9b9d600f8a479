use super::helpers;
use crate::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD, EXPOSURE};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    exposure: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

/// Post passes in execution order. Each owns its uniform buffer so the
/// per-pass blur direction survives until submit.
#[derive(Clone, Copy)]
pub(crate) enum PostPass {
    Bright = 0,
    BlurH = 1,
    BlurV = 2,
    Composite = 3,
}

impl PostPass {
    fn blur_dir(self) -> [f32; 2] {
        match self {
            PostPass::BlurH => [1.0, 0.0],
            PostPass::BlurV => [0.0, 1.0],
            _ => [0.0, 0.0],
        }
    }

    /// Size of the target the pass renders into. Bloom runs at half size.
    fn resolution(self, full_res: [f32; 2]) -> [f32; 2] {
        match self {
            PostPass::Composite => full_res,
            _ => [full_res[0] * 0.5, full_res[1] * 0.5],
        }
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) uniforms: [wgpu::Buffer; 4],
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the offscreen targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) bright: wgpu::BindGroup,
    pub(crate) blur_h: wgpu::BindGroup,
    pub(crate) blur_v: wgpu::BindGroup,
    pub(crate) composite: wgpu::BindGroup,
    pub(crate) bloom_only: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let make_uniform = |label: &str| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    };
    let uniforms = [
        make_uniform("post_bright_uniforms"),
        make_uniform("post_blur_h_uniforms"),
        make_uniform("post_blur_v_uniforms"),
        make_uniform("post_composite_uniforms"),
    ];
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        bloom_format,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        bloom_format,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

pub(crate) fn rebuild_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    hdr_view: &wgpu::TextureView,
    bloom_a_view: &wgpu::TextureView,
    bloom_b_view: &wgpu::TextureView,
) -> PostBindGroups {
    let source = |label: &str, view: &wgpu::TextureView, pass: PostPass| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &post.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: post.uniforms[pass as usize].as_entire_binding(),
                },
            ],
        })
    };
    let bloom_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_a_only"),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    PostBindGroups {
        bright: source("bg_bright", hdr_view, PostPass::Bright),
        blur_h: source("bg_blur_h", bloom_a_view, PostPass::BlurH),
        blur_v: source("bg_blur_v", bloom_b_view, PostPass::BlurV),
        composite: source("bg_composite", hdr_view, PostPass::Composite),
        bloom_only,
    }
}

/// Refresh every pass' uniforms for this frame.
pub(crate) fn write_post_uniforms(
    queue: &wgpu::Queue,
    post: &PostResources,
    full_res: [f32; 2],
    time: f32,
) {
    for pass in [
        PostPass::Bright,
        PostPass::BlurH,
        PostPass::BlurV,
        PostPass::Composite,
    ] {
        let u = PostUniforms {
            resolution: pass.resolution(full_res),
            time,
            exposure: EXPOSURE,
            blur_dir: pass.blur_dir(),
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };
        queue.write_buffer(&post.uniforms[pass as usize], 0, bytemuck::bytes_of(&u));
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}
