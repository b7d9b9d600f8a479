use glam::Vec2;

/// Last known pointer position in normalized device coordinates
/// (`[-1, 1]` on both axes, y up).
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
}

/// Map client pixel coordinates to `[-1, 1]²` with +Y up.
///
/// A degenerate viewport maps everything to the centre.
#[inline]
pub fn normalized_pointer(client_x: f32, client_y: f32, view_w: f32, view_h: f32) -> Vec2 {
    if view_w <= 0.0 || view_h <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / view_w) * 2.0 - 1.0,
        -(client_y / view_h) * 2.0 + 1.0,
    )
}

/// Parameterless UI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    OpenReveal,
    CloseReveal,
    ToggleAudio,
}

#[inline]
pub fn ui_action_for_key(key: &str) -> Option<UiAction> {
    match key {
        "Escape" => Some(UiAction::CloseReveal),
        "m" | "M" => Some(UiAction::ToggleAudio),
        _ => None,
    }
}

/// Canvas backing-store size for a CSS size and device pixel ratio, with the
/// ratio capped at `max_ratio`. Never returns a zero dimension.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64, max_ratio: f64) -> (u32, u32) {
    let ratio = dpr.clamp(1.0, max_ratio.max(1.0));
    let w = (css_w * ratio).max(0.0) as u32;
    let h = (css_h * ratio).max(0.0) as u32;
    (w.max(1), h.max(1))
}
