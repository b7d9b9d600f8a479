use crate::audio::MelodyPlayer;
use crate::constants::{AUDIO_TOGGLE_ID, CLOSE_BUTTON_ID, OPEN_BUTTON_ID, WISHES_OVERLAY_ID};
use crate::dom;
use crate::input::UiAction;
use crate::overlay;
use crate::reveal::Reveal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared handles every UI handler acts on.
#[derive(Clone)]
pub struct Controls {
    pub document: web::Document,
    pub player: Rc<RefCell<MelodyPlayer>>,
    pub reveal: Reveal,
    /// User's audio preference; off until the toggle is pressed.
    pub audio_enabled: Rc<Cell<bool>>,
}

impl Controls {
    pub fn dispatch(&self, action: UiAction) {
        match action {
            UiAction::OpenReveal => {
                self.reveal.open();
                if self.audio_enabled.get() {
                    let mut player = self.player.borrow_mut();
                    if !player.is_active() {
                        player.start();
                    }
                }
            }
            UiAction::CloseReveal => self.reveal.close(),
            UiAction::ToggleAudio => {
                let enabled = !self.audio_enabled.get();
                self.audio_enabled.set(enabled);
                overlay::set_audio_icons(&self.document, enabled);
                let mut player = self.player.borrow_mut();
                let playing = if player.is_active() != enabled {
                    player.toggle()
                } else {
                    player.is_active()
                };
                log::info!("[ui] audio enabled={} playing={}", enabled, playing);
            }
        }
    }
}

pub fn wire_controls(controls: &Controls) {
    let doc = &controls.document;

    let c = controls.clone();
    dom::add_click_listener(doc, OPEN_BUTTON_ID, move |_| c.dispatch(UiAction::OpenReveal));

    let c = controls.clone();
    dom::add_click_listener(doc, CLOSE_BUTTON_ID, move |_| {
        c.dispatch(UiAction::CloseReveal)
    });

    // Backdrop clicks close; clicks that land on the letter do not.
    let c = controls.clone();
    dom::add_click_listener(doc, WISHES_OVERLAY_ID, move |ev| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.id() == WISHES_OVERLAY_ID)
            .unwrap_or(false);
        if on_backdrop {
            c.dispatch(UiAction::CloseReveal);
        }
    });

    let c = controls.clone();
    dom::add_click_listener(doc, AUDIO_TOGGLE_ID, move |_| {
        c.dispatch(UiAction::ToggleAudio)
    });

    overlay::set_audio_icons(doc, controls.audio_enabled.get());
}
