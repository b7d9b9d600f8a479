#![cfg(target_arch = "wasm32")]
use crate::core::{Melody, PlayerParams, Scene};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod reveal;
mod timer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("holiday-greeting starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::mount_canvas(&document, constants::CANVAS_CONTAINER_ID)?;
    events::wire_canvas_resize(&canvas);

    // UI first so the buttons work even if WebGPU is unavailable.
    let melody = Melody::jingle_bells();
    log::info!(
        "[audio] melody notes={} beats={:.1}",
        melody.len(),
        melody.total_beats()
    );
    let controls = events::Controls {
        document: document.clone(),
        player: Rc::new(RefCell::new(audio::MelodyPlayer::new(
            melody,
            PlayerParams::default(),
        ))),
        reveal: reveal::Reveal::new(&document),
        audio_enabled: Rc::new(Cell::new(false)),
    };
    events::wire_controls(&controls);
    events::wire_global_keydown(controls);

    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    events::wire_pointermove(pointer.clone());

    let mut rng = StdRng::from_entropy();
    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let scene = Scene::new(aspect, &mut rng);
    log::info!(
        "[scene] baubles={} lights={} flakes={}",
        scene.tree.baubles.len(),
        scene.tree.lights.len(),
        scene.snow.len()
    );

    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas, &scene).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable; scene will not be drawn");
    }

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu,
        canvas,
        pointer,
        rng,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
