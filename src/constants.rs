// Rendering and page-wiring constants.
//
// Scene content (tree layout, melody, snow volume) lives with the pure
// modules under `core`; this file only holds what the web frontend needs.

// Device pixel ratio cap for the canvas backing store
pub const PIXEL_RATIO_MAX: f64 = 2.0;

// Dynamic point lights uploaded per frame (48 bulbs + star fit comfortably)
pub const MAX_POINT_LIGHTS: usize = 64;

// Snow sprites
pub const SNOW_SIZE: f32 = 0.3;
pub const SNOW_OPACITY: f32 = 0.8;

// Mesh tessellation
pub const BAUBLE_RADIUS: f32 = 0.28;
pub const BAUBLE_SEGMENTS: u32 = 16;
pub const BULB_RADIUS: f32 = 0.12;
pub const BULB_SEGMENTS: u32 = 8;
pub const TRUNK_SEGMENTS: u32 = 8;
pub const GROUND_SIZE: f32 = 200.0;

// Star topper
pub const STAR_POINTS: u32 = 5;
pub const STAR_OUTER_RADIUS: f32 = 1.8;
pub const STAR_INNER_RADIUS: f32 = 0.9;
pub const STAR_DEPTH: f32 = 0.5;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_THRESHOLD: f32 = 0.9;
pub const EXPOSURE: f32 = 1.0;

// Reveal playback speeds
pub const REVEAL_OPEN_SCALE: f32 = 1.0;
pub const REVEAL_CLOSE_SCALE: f32 = 1.5;

// Host page element ids
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const OPEN_BUTTON_ID: &str = "open-wishes-btn";
pub const CLOSE_BUTTON_ID: &str = "close-wishes-btn";
pub const WISHES_OVERLAY_ID: &str = "wishes-overlay";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const ICON_VOLUME_ON: &str = ".icon-volume-on";
pub const ICON_VOLUME_OFF: &str = ".icon-volume-off";
