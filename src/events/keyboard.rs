use super::controls::Controls;
use crate::input::{ui_action_for_key, UiAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, controls: &Controls) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = ui_action_for_key(&ev.key()) else {
        return;
    };
    // Escape only matters while the letter is up.
    if action == UiAction::CloseReveal && !controls.reveal.is_open() {
        return;
    }
    controls.dispatch(action);
    ev.prevent_default();
}

pub fn wire_global_keydown(controls: Controls) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &controls);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
