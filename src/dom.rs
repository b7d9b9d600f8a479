use crate::constants::PIXEL_RATIO_MAX;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(_)>,
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("missing #{}", element_id);
    }
}

#[inline]
pub fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    web::window()
        .map(|w| {
            let iw = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            let ih = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            (iw, ih)
        })
        .unwrap_or((1.0, 1.0))
}

/// Create a full-size canvas inside the host mount point.
pub fn mount_canvas(
    document: &web::Document,
    container_id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let (css_w, css_h) = if rect.width() > 0.0 && rect.height() > 0.0 {
            (rect.width(), rect.height())
        } else {
            viewport_size()
        };
        let (w_px, h_px) = input::backing_size(css_w, css_h, dpr, PIXEL_RATIO_MAX);
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}
