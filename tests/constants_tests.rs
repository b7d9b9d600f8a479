// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod palette {
        include!("../src/core/palette.rs");
    }
    pub mod scheduler {
        include!("../src/core/scheduler.rs");
    }
    pub mod melody {
        include!("../src/core/melody.rs");
    }
}

use self::core::palette::*;
use self::core::scheduler::*;
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn envelope_fits_inside_the_note_slot() {
    // Attack peak before decay end, decay end before stop, stop at the advance
    assert!(ATTACK_SEC > 0.0);
    assert!(DECAY_SCALE < STOP_SCALE);
    assert_eq!(STOP_SCALE, ADVANCE_SCALE);
    assert!(FLOOR_GAIN > 0.0 && FLOOR_GAIN < PEAK_GAIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lights_fit_the_shader_array() {
    // 4 tiers × 12 bulbs + the star
    assert!(4 * 12 + 1 <= MAX_POINT_LIGHTS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn star_and_ornament_sizes_are_sane() {
    assert!(STAR_INNER_RADIUS < STAR_OUTER_RADIUS);
    assert!(STAR_POINTS >= 3);
    assert!(BULB_RADIUS < BAUBLE_RADIUS);
    assert!(SNOW_OPACITY > 0.0 && SNOW_OPACITY <= 1.0);
    assert!(PIXEL_RATIO_MAX >= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn reverse_is_faster_than_forward() {
    assert!(REVEAL_CLOSE_SCALE > REVEAL_OPEN_SCALE);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_CONTAINER_ID,
        OPEN_BUTTON_ID,
        CLOSE_BUTTON_ID,
        WISHES_OVERLAY_ID,
        AUDIO_TOGGLE_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty() && !a.starts_with('#'));
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(ICON_VOLUME_ON.starts_with('.') && ICON_VOLUME_OFF.starts_with('.'));
}

#[test]
fn palette_decodes_to_linear() {
    assert_eq!(hex_linear(0xffffff), glam::Vec3::ONE);
    assert_eq!(hex_linear(0x000000), glam::Vec3::ZERO);
    let sky = hex_linear(SKY);
    assert!(sky.z > sky.y && sky.y > sky.x);
    // sRGB mid-grey is darker in linear space
    assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
}
