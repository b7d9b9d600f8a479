// Host-side tests for the scene animator: snow, twinkle, tree and camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod palette {
        include!("../src/core/palette.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod snow {
        include!("../src/core/snow.rs");
    }
    pub mod tree {
        include!("../src/core/tree.rs");
    }
    pub mod twinkle {
        include!("../src/core/twinkle.rs");
    }
}

use self::core::camera::*;
use self::core::scene::*;
use self::core::snow::*;
use self::core::tree::*;
use self::core::twinkle::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn snow_initial_fill_is_inside_the_volume() {
    let mut r = rng();
    let field = SnowField::new(SnowParams::default(), &mut r);
    assert_eq!(field.len(), 1500);
    for p in field.particles() {
        assert!(p.position.x >= -50.0 && p.position.x < 50.0);
        assert!(p.position.z >= -50.0 && p.position.z < 50.0);
        assert!(p.position.y >= 0.0 && p.position.y < 60.0);
        assert!(p.velocity.x.abs() <= 0.025);
        assert!(p.velocity.z.abs() <= 0.025);
        assert!(p.velocity.y <= -0.05 && p.velocity.y > -0.1 - 1e-6);
    }
}

#[test]
fn snow_heights_stay_bounded_over_long_runs() {
    let mut r = rng();
    let mut field = SnowField::new(SnowParams::default(), &mut r);
    for _ in 0..5000 {
        field.step(&mut r);
        for p in field.particles() {
            assert!(p.position.y >= 0.0 && p.position.y <= 60.0);
        }
    }
    assert_eq!(field.len(), 1500);
    // 5000 frames at ≥0.05/frame moves every flake ≥250 units, so all recycled
    assert!(field.respawned() >= 1500);
}

#[test]
fn recycled_flake_returns_to_ceiling_with_same_velocity() {
    let mut r = rng();
    let params = SnowParams {
        count: 1,
        ..SnowParams::default()
    };
    let mut field = SnowField::new(params, &mut r);
    let v = field.particles()[0].velocity;
    let mut recycled = 0;
    while recycled == 0 {
        recycled = field.step(&mut r);
    }
    let p = field.particles()[0];
    assert_eq!(p.position.y, 60.0);
    assert_eq!(p.velocity, v);
    assert!(p.position.x >= -50.0 && p.position.x < 50.0);
}

#[test]
fn twinkle_matches_sine_formula() {
    let mut r = rng();
    let mut l = TwinkleLight::new(Vec3::ZERO, &mut r);
    assert!(l.speed >= SPEED_MIN && l.speed < SPEED_MIN + SPEED_SPAN);
    for &t in &[0.0f32, 0.4, 1.0, 2.5, 10.0, 123.4] {
        l.update(t);
        let expected = 0.5 + 0.5 * (t * l.speed).sin();
        assert!((l.intensity - expected).abs() < 1e-6);
        assert!(l.intensity >= 0.0 && l.intensity <= 1.0);
        assert_eq!(l.emissive(), l.intensity);
    }
}

#[test]
fn decorated_tree_has_expected_ornaments() {
    let mut r = rng();
    let tree = Tree::decorate(TreeParams::default(), &mut r);
    assert_eq!(tree.tiers.len(), 4);
    assert_eq!(tree.baubles.len(), 4 * 18);
    assert_eq!(tree.lights.len(), 4 * 12);
    for b in &tree.baubles {
        let tier = tree.tiers[b.tier];
        assert!(b.position.y.abs() <= tier.height * 0.45 + 1e-4);
        let radial = Vec2::new(b.position.x, b.position.z).length();
        assert!(radial <= tier.radius + 0.15 + 1e-4);
        assert!(radial >= 0.15 - 1e-4);
    }
}

#[test]
fn cone_surface_point_shrinks_toward_apex() {
    let base = cone_surface_point(6.0, 8.0, 0.0, -4.0, 0.0);
    assert!((base - Vec3::new(6.0, -4.0, 0.0)).length() < 1e-5);
    let apex = cone_surface_point(6.0, 8.0, 0.0, 4.0, 0.0);
    assert!(apex.x.abs() < 1e-5);
    let mid = cone_surface_point(6.0, 8.0, std::f32::consts::FRAC_PI_2, 0.0, 0.15);
    assert!((mid.z - 3.15).abs() < 1e-5);
}

#[test]
fn advance_spins_tree_and_counts_frames() {
    let mut r = rng();
    let mut scene = Scene::new(16.0 / 9.0, &mut r);
    for i in 1..=100 {
        scene.advance(i as f32 / 60.0, Vec2::ZERO, &mut r);
    }
    assert_eq!(scene.frames(), 100);
    assert!((scene.tree.rotation_y - 100.0 * TREE_SPIN_PER_FRAME).abs() < 1e-5);
}

#[test]
fn bulb_glow_mirrors_its_light() {
    let mut r = rng();
    let mut scene = Scene::new(1.0, &mut r);
    scene.advance(3.3, Vec2::ZERO, &mut r);
    let bulbs = scene.bulb_instances();
    let lights = scene.point_lights();
    assert_eq!(bulbs.len(), scene.tree.lights.len());
    for (i, b) in bulbs.iter().enumerate() {
        assert!((b.material.emissive_intensity - lights[i].intensity).abs() < 1e-6);
        // Bulb mesh sits where its point light is
        let pos = b.model.transform_point3(Vec3::ZERO);
        assert!((pos - lights[i].position).length() < 1e-4);
    }
}

#[test]
fn point_lights_are_bulbs_then_star() {
    let mut r = rng();
    let scene = Scene::new(1.0, &mut r);
    let lights = scene.point_lights();
    assert_eq!(lights.len(), 4 * 12 + 1);
    let star = lights[lights.len() - 1];
    assert_eq!(star.range, STAR_LIGHT_RANGE);
    assert_eq!(star.intensity, STAR_LIGHT_INTENSITY);
    assert!(star.position.y > 17.0);
    assert!(lights[..48].iter().all(|l| l.range == BULB_LIGHT_RANGE));
}

#[test]
fn draw_lists_cover_the_whole_tree() {
    let mut r = rng();
    let scene = Scene::new(1.0, &mut r);
    assert_eq!(scene.tier_instances().len(), 4);
    assert_eq!(scene.bauble_instances().len(), 72);
    assert_eq!(scene.snow_positions().count(), 1500);
    let trunk = scene.trunk_instance().model.transform_point3(Vec3::ZERO);
    assert!((trunk.y - 3.0).abs() < 1e-5);
    let top = scene.tier_instances()[3].model.transform_point3(Vec3::ZERO);
    assert!((top.y - 14.5).abs() < 1e-5);
}

#[test]
fn camera_drift_converges_to_pointer_target() {
    let mut cam = CameraRig::new(CameraParams::default(), 1.0);
    let pointer = Vec2::new(1.0, -1.0);
    let target = cam.drift_target(pointer);
    assert_eq!(target, Vec2::new(2.0, 14.0));
    let z = cam.eye.z;
    let mut prev = (Vec2::new(cam.eye.x, cam.eye.y) - target).length();
    for _ in 0..300 {
        cam.drift(pointer);
        let d = (Vec2::new(cam.eye.x, cam.eye.y) - target).length();
        assert!(d <= prev);
        prev = d;
    }
    assert!(prev < 1e-3);
    assert_eq!(cam.eye.z, z);
}

#[test]
fn camera_single_step_covers_five_percent() {
    let mut cam = CameraRig::new(CameraParams::default(), 1.0);
    cam.drift(Vec2::new(1.0, 0.0));
    // From x = 0 toward 2 by 5%
    assert!((cam.eye.x - 0.1).abs() < 1e-6);
    assert!((cam.eye.y - 15.0).abs() < 1e-6);
}

#[test]
fn camera_aspect_follows_resize() {
    let mut cam = CameraRig::new(CameraParams::default(), 1.0);
    cam.resize(1920, 1080);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    cam.resize(0, 500);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    let bad = CameraRig::new(CameraParams::default(), f32::NAN);
    assert_eq!(bad.aspect, 1.0);
}

#[test]
fn look_at_projects_to_screen_centre() {
    let cam = CameraRig::new(CameraParams::default(), 1.5);
    let clip = cam.view_proj() * cam.target().extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
