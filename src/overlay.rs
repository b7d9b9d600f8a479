use crate::constants::{AUDIO_TOGGLE_ID, ICON_VOLUME_OFF, ICON_VOLUME_ON, WISHES_OVERLAY_ID};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(WISHES_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(WISHES_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(WISHES_OVERLAY_ID)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

/// Swap the speaker icons inside the audio toggle.
pub fn set_audio_icons(document: &web::Document, enabled: bool) {
    let Some(toggle) = document.get_element_by_id(AUDIO_TOGGLE_ID) else {
        return;
    };
    let icon = |selector: &str| toggle.query_selector(selector).ok().flatten();
    if let Some(on) = icon(ICON_VOLUME_ON) {
        _ = on.class_list().toggle_with_force("hidden", !enabled);
    }
    if let Some(off) = icon(ICON_VOLUME_OFF) {
        _ = off.class_list().toggle_with_force("hidden", enabled);
    }
}
