use crate::dom;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over the whole window in normalized coordinates.
pub fn wire_pointermove(pointer: Rc<RefCell<PointerState>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (w, h) = dom::viewport_size();
        pointer.borrow_mut().ndc = input::normalized_pointer(
            ev.client_x() as f32,
            ev.client_y() as f32,
            w as f32,
            h as f32,
        );
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep the canvas backing store matched to its CSS size.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
