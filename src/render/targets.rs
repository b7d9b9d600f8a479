use super::helpers;
use wgpu;

/// Offscreen targets for the render pipeline.
///
/// - `hdr_*` hold the lit scene in Rgba16Float for post-processing.
/// - `depth_*` is the scene depth buffer, same size as the HDR target.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, helpers::HDR_FORMAT, usage);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, helpers::HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, helpers::HDR_FORMAT, usage);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for tex in [&self.hdr_tex, &self.depth_tex, &self.bloom_a, &self.bloom_b] {
            tex.destroy();
        }
        *self = Self::new(device, width, height);
    }
}
