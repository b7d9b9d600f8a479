use super::palette::BAUBLE_COLORS;
use super::twinkle::TwinkleLight;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

/// One foliage cone. `y` is the height of the cone centre above the ground.
#[derive(Clone, Copy, Debug)]
pub struct Tier {
    pub radius: f32,
    pub height: f32,
    pub y: f32,
}

/// Foliage cones from the bottom up.
pub const TIERS: [Tier; 4] = [
    Tier {
        radius: 6.0,
        height: 8.0,
        y: 4.0,
    },
    Tier {
        radius: 5.0,
        height: 7.0,
        y: 8.0,
    },
    Tier {
        radius: 4.0,
        height: 6.0,
        y: 11.5,
    },
    Tier {
        radius: 3.0,
        height: 5.0,
        y: 14.5,
    },
];

pub const CONE_SEGMENTS: u32 = 16;

/// Decoration density and placement.
#[derive(Clone, Debug)]
pub struct TreeParams {
    pub baubles_per_tier: usize,
    pub lights_per_tier: usize,
    /// Fraction of the tier height decorations are spread over.
    pub bauble_spread: f32,
    pub light_spread: f32,
    /// Distance decorations sit off the cone surface.
    pub bauble_lift: f32,
    pub light_lift: f32,
    pub trunk_radius: f32,
    pub trunk_height: f32,
    pub star_y: f32,
    pub star_tilt: f32,
    /// Star point light offset in star-local space.
    pub star_light_offset: Vec3,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            baubles_per_tier: 18,
            lights_per_tier: 12,
            bauble_spread: 0.9,
            light_spread: 0.8,
            bauble_lift: 0.15,
            light_lift: 0.1,
            trunk_radius: 1.5,
            trunk_height: 6.0,
            star_y: 17.8,
            star_tilt: PI / 10.0,
            star_light_offset: Vec3::new(0.0, 0.0, 0.5),
        }
    }
}

/// Point on (or `lift` above) a cone surface, in cone-local coordinates.
///
/// `y_offset` is measured from the cone centre; the radius shrinks linearly
/// from `radius` at the base (`-height/2`) to zero at the apex.
pub fn cone_surface_point(radius: f32, height: f32, angle: f32, y_offset: f32, lift: f32) -> Vec3 {
    let ratio = (height * 0.5 - y_offset) / height;
    let r = radius * ratio + lift;
    Vec3::new(angle.cos() * r, y_offset, angle.sin() * r)
}

#[derive(Clone, Debug)]
pub struct Bauble {
    pub tier: usize,
    pub position: Vec3,
    pub color: u32,
}

#[derive(Clone, Debug)]
pub struct TreeLight {
    pub tier: usize,
    pub light: TwinkleLight,
}

/// The decorated tree: tiers, ornaments and the current spin angle.
pub struct Tree {
    pub params: TreeParams,
    pub tiers: Vec<Tier>,
    pub baubles: Vec<Bauble>,
    pub lights: Vec<TreeLight>,
    pub rotation_y: f32,
}

impl Tree {
    /// Lay out ornaments on every tier at random angles and heights.
    pub fn decorate<R: Rng>(params: TreeParams, rng: &mut R) -> Self {
        let tiers = TIERS.to_vec();
        let mut baubles = Vec::with_capacity(tiers.len() * params.baubles_per_tier);
        let mut lights = Vec::with_capacity(tiers.len() * params.lights_per_tier);
        for (ti, tier) in tiers.iter().enumerate() {
            for _ in 0..params.baubles_per_tier {
                let color = *BAUBLE_COLORS.choose(rng).unwrap_or(&BAUBLE_COLORS[0]);
                let angle = rng.gen::<f32>() * TAU;
                let y = (rng.gen::<f32>() - 0.5) * tier.height * params.bauble_spread;
                baubles.push(Bauble {
                    tier: ti,
                    position: cone_surface_point(
                        tier.radius,
                        tier.height,
                        angle,
                        y,
                        params.bauble_lift,
                    ),
                    color,
                });
            }
            for _ in 0..params.lights_per_tier {
                let angle = rng.gen::<f32>() * TAU;
                let y = (rng.gen::<f32>() - 0.5) * tier.height * params.light_spread;
                let position =
                    cone_surface_point(tier.radius, tier.height, angle, y, params.light_lift);
                lights.push(TreeLight {
                    tier: ti,
                    light: TwinkleLight::new(position, rng),
                });
            }
        }
        Self {
            params,
            tiers,
            baubles,
            lights,
            rotation_y: 0.0,
        }
    }

    #[inline]
    pub fn rotate(&mut self, step: f32) {
        self.rotation_y += step;
    }

    /// Tree-to-world transform (spin about the trunk axis).
    #[inline]
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    /// Tier-local to world transform.
    pub fn tier_model(&self, tier: usize) -> Mat4 {
        let y = self.tiers.get(tier).map(|t| t.y).unwrap_or(0.0);
        self.model() * Mat4::from_translation(Vec3::new(0.0, y, 0.0))
    }

    pub fn trunk_model(&self) -> Mat4 {
        self.model() * Mat4::from_translation(Vec3::new(0.0, self.params.trunk_height * 0.5, 0.0))
    }

    pub fn star_model(&self) -> Mat4 {
        self.model()
            * Mat4::from_translation(Vec3::new(0.0, self.params.star_y, 0.0))
            * Mat4::from_rotation_z(self.params.star_tilt)
    }

    #[inline]
    pub fn tier_to_world(&self, tier: usize, local: Vec3) -> Vec3 {
        self.tier_model(tier).transform_point3(local)
    }

    pub fn star_light_position(&self) -> Vec3 {
        self.star_model()
            .transform_point3(self.params.star_light_offset)
    }

    /// Update every light for the elapsed time.
    pub fn twinkle(&mut self, time_sec: f32) {
        for l in &mut self.lights {
            l.light.update(time_sec);
        }
    }
}
