use glam::Vec3;

// Scene colors as authored (sRGB hex)
pub const SKY: u32 = 0x0a192f;
pub const AMBIENT: u32 = 0x404040;
pub const MOONLIGHT: u32 = 0xb0c4de;
pub const WARM_SPOT: u32 = 0xffaa00;
pub const ICE: u32 = 0xe0f7fa;
pub const FOLIAGE: u32 = 0x2d5a27;
pub const BARK: u32 = 0x4a3728;
pub const GOLD: u32 = 0xffd700;
pub const BULB: u32 = 0xffffcc;
pub const BULB_GLOW: u32 = 0xffaa00;
pub const SNOW: u32 = 0xffffff;

/// Bauble colors: red, gold, silver, white.
pub const BAUBLE_COLORS: [u32; 4] = [0xd32f2f, 0xffd700, 0xc0c0c0, 0xffffff];

/// Decode a 0xRRGGBB value into linear RGB.
pub fn hex_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
