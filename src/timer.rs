use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A `setInterval` registration that owns its callback.
///
/// The interval is cleared when the timer is cancelled or dropped, so a
/// stopped owner can never receive a late tick.
pub struct RepeatingTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl RepeatingTimer {
    pub fn start(interval_ms: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval_ms.max(1),
        ) {
            Ok(handle) => Some(Self {
                handle,
                _callback: callback,
            }),
            Err(e) => {
                log::error!("setInterval error: {:?}", e);
                None
            }
        }
    }

    #[inline]
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}
