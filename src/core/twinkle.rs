use glam::Vec3;
use rand::Rng;

/// Lower bound and width of the random per-light phase speed (rad/s).
pub const SPEED_MIN: f32 = 1.0;
pub const SPEED_SPAN: f32 = 2.0;

/// Intensity of a twinkling light at `time_sec`.
#[inline]
pub fn twinkle_intensity(time_sec: f32, speed: f32) -> f32 {
    0.5 + 0.5 * (time_sec * speed).sin()
}

/// A decoration bulb paired with its point light.
///
/// `position` is tier-local; the bulb's emissive strength and the point light
/// intensity always carry the same value.
#[derive(Clone, Debug)]
pub struct TwinkleLight {
    pub position: Vec3,
    pub speed: f32,
    pub base_intensity: f32,
    pub intensity: f32,
}

impl TwinkleLight {
    pub fn new<R: Rng>(position: Vec3, rng: &mut R) -> Self {
        Self {
            position,
            speed: rng.gen::<f32>() * SPEED_SPAN + SPEED_MIN,
            base_intensity: 1.0,
            intensity: 0.6,
        }
    }

    #[inline]
    pub fn update(&mut self, time_sec: f32) {
        self.intensity = twinkle_intensity(time_sec, self.speed);
    }

    /// Emissive strength of the bulb mesh.
    #[inline]
    pub fn emissive(&self) -> f32 {
        self.intensity * self.base_intensity
    }
}
