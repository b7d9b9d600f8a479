mod controls;
mod keyboard;
mod pointer;

pub use controls::{wire_controls, Controls};
pub use keyboard::wire_global_keydown;
pub use pointer::{wire_canvas_resize, wire_pointermove};
