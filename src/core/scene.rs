// Scene state and the per-frame animator.
//
// `Scene` owns everything that moves (tree spin, twinkling lights, snow,
// camera) and exposes draw lists in world space. It has no knowledge of the
// GPU, so a frame can be advanced and inspected on the host.

use super::camera::{CameraParams, CameraRig};
use super::palette::{self, hex_linear};
use super::snow::{SnowField, SnowParams};
use super::tree::{Tree, TreeParams};
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Spin added to the tree every frame (radians).
pub const TREE_SPIN_PER_FRAME: f32 = 0.002;

/// Surface response of a drawn mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub albedo: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

impl Material {
    pub fn matte(hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            albedo: hex_linear(hex),
            roughness,
            metalness,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
        }
    }

    pub fn glowing(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = hex_linear(hex);
        self.emissive_intensity = intensity;
        self
    }
}

/// One mesh instance to draw.
#[derive(Clone, Copy, Debug)]
pub struct DrawInstance {
    pub model: Mat4,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
}

/// Fixed, non-animated lighting.
#[derive(Clone, Debug)]
pub struct Lighting {
    pub sky: Vec3,
    pub fog_density: f32,
    pub ambient: Vec3,
    pub ambient_intensity: f32,
    pub moon_color: Vec3,
    pub moon_intensity: f32,
    pub moon_position: Vec3,
    pub spot_color: Vec3,
    pub spot_intensity: f32,
    pub spot_position: Vec3,
    pub spot_target: Vec3,
    pub spot_angle: f32,
    pub spot_penumbra: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            sky: hex_linear(palette::SKY),
            fog_density: 0.002,
            ambient: hex_linear(palette::AMBIENT),
            ambient_intensity: 0.5,
            moon_color: hex_linear(palette::MOONLIGHT),
            moon_intensity: 0.6,
            moon_position: Vec3::new(10.0, 20.0, 10.0),
            spot_color: hex_linear(palette::WARM_SPOT),
            spot_intensity: 0.8,
            spot_position: Vec3::new(0.0, 30.0, 20.0),
            spot_target: Vec3::new(0.0, 5.0, 0.0),
            spot_angle: std::f32::consts::FRAC_PI_4,
            spot_penumbra: 0.5,
        }
    }
}

// Point light falloff ranges
pub const BULB_LIGHT_RANGE: f32 = 2.5;
pub const STAR_LIGHT_RANGE: f32 = 12.0;
pub const STAR_LIGHT_INTENSITY: f32 = 2.0;

/// Everything the animator mutates, plus its construction-time constants.
pub struct Scene {
    pub tree: Tree,
    pub snow: SnowField,
    pub camera: CameraRig,
    pub lighting: Lighting,
    pub foliage: Material,
    pub bark: Material,
    pub ground: Material,
    pub star: Material,
    pub bulb: Material,
    frames: u64,
    elapsed_sec: f32,
}

impl Scene {
    pub fn new<R: Rng>(aspect: f32, rng: &mut R) -> Self {
        Self::with_params(
            TreeParams::default(),
            SnowParams::default(),
            CameraParams::default(),
            aspect,
            rng,
        )
    }

    pub fn with_params<R: Rng>(
        tree: TreeParams,
        snow: SnowParams,
        camera: CameraParams,
        aspect: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            tree: Tree::decorate(tree, rng),
            snow: SnowField::new(snow, rng),
            camera: CameraRig::new(camera, aspect),
            lighting: Lighting::default(),
            foliage: Material::matte(palette::FOLIAGE, 0.8, 0.0),
            bark: Material::matte(palette::BARK, 1.0, 0.0),
            ground: Material::matte(palette::ICE, 0.8, 0.1),
            star: Material::matte(palette::GOLD, 0.1, 0.8).glowing(palette::GOLD, 0.6),
            bulb: Material::matte(palette::BULB, 1.0, 0.0).glowing(palette::BULB_GLOW, 1.0),
            frames: 0,
            elapsed_sec: 0.0,
        }
    }

    /// Advance one display frame.
    ///
    /// `elapsed_sec` is time since the scene started and drives the twinkle;
    /// spin, snow and camera drift move a fixed amount per call.
    pub fn advance<R: Rng>(&mut self, elapsed_sec: f32, pointer: Vec2, rng: &mut R) {
        self.elapsed_sec = elapsed_sec;
        self.frames += 1;
        self.tree.rotate(TREE_SPIN_PER_FRAME);
        self.tree.twinkle(elapsed_sec);
        self.snow.step(rng);
        self.camera.drift(pointer);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    pub fn ground_instance(&self) -> DrawInstance {
        DrawInstance {
            model: Mat4::IDENTITY,
            material: self.ground,
        }
    }

    /// One instance per foliage tier, bottom first.
    pub fn tier_instances(&self) -> Vec<DrawInstance> {
        (0..self.tree.tiers.len())
            .map(|i| DrawInstance {
                model: self.tree.tier_model(i),
                material: self.foliage,
            })
            .collect()
    }

    pub fn trunk_instance(&self) -> DrawInstance {
        DrawInstance {
            model: self.tree.trunk_model(),
            material: self.bark,
        }
    }

    pub fn star_instance(&self) -> DrawInstance {
        DrawInstance {
            model: self.tree.star_model(),
            material: self.star,
        }
    }

    pub fn bauble_instances(&self) -> Vec<DrawInstance> {
        self.tree
            .baubles
            .iter()
            .map(|b| DrawInstance {
                model: self.tree.tier_model(b.tier) * Mat4::from_translation(b.position),
                material: Material::matte(b.color, 0.1, 0.9),
            })
            .collect()
    }

    /// Bulb meshes; their glow follows the paired point light.
    pub fn bulb_instances(&self) -> Vec<DrawInstance> {
        self.tree
            .lights
            .iter()
            .map(|l| {
                let mut material = self.bulb;
                material.emissive_intensity = l.light.emissive();
                DrawInstance {
                    model: self.tree.tier_model(l.tier)
                        * Mat4::from_translation(l.light.position),
                    material,
                }
            })
            .collect()
    }

    /// Dynamic point lights in world space: every bulb, then the star.
    pub fn point_lights(&self) -> Vec<PointLight> {
        let bulb_color = hex_linear(palette::BULB_GLOW);
        let mut out: Vec<PointLight> = self
            .tree
            .lights
            .iter()
            .map(|l| PointLight {
                position: self.tree.tier_to_world(l.tier, l.light.position),
                color: bulb_color,
                intensity: l.light.intensity,
                range: BULB_LIGHT_RANGE,
            })
            .collect();
        out.push(PointLight {
            position: self.tree.star_light_position(),
            color: hex_linear(palette::GOLD),
            intensity: STAR_LIGHT_INTENSITY,
            range: STAR_LIGHT_RANGE,
        });
        out
    }

    /// Flake positions, in pool order.
    pub fn snow_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.snow.particles().iter().map(|p| p.position)
    }
}
