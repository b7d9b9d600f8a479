use crate::constants::{REVEAL_CLOSE_SCALE, REVEAL_OPEN_SCALE};
use crate::core::timeline::{self, Direction, Playhead, PlayheadEvent, Target, Timeline};
use crate::dom;
use crate::overlay;
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct RevealCore {
    document: web::Document,
    timeline: Timeline,
    playhead: Playhead,
    elements: Vec<(Target, web::HtmlElement)>,
    last_instant: Instant,
    animating: bool,
}

impl RevealCore {
    fn apply(&self) {
        let t = self.playhead.time;
        for (target, el) in &self.elements {
            let style = el.style();
            for (prop, value) in self.timeline.sample(*target, t).css() {
                _ = style.set_property(prop, &value);
            }
        }
    }

    /// Advance by wall time and restyle. Returns whether another frame is needed.
    fn step(&mut self) -> bool {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let event = self.playhead.advance(dt);
        self.apply();
        match event {
            PlayheadEvent::Completed => log::info!("[reveal] opened"),
            PlayheadEvent::ReverseCompleted => {
                overlay::hide(&self.document);
                log::info!("[reveal] closed");
            }
            PlayheadEvent::Idle | PlayheadEvent::Running => {}
        }
        self.animating = self.playhead.playing;
        self.animating
    }
}

/// Envelope reveal bound to the page's elements and driven by
/// `requestAnimationFrame` only while the playhead moves.
#[derive(Clone)]
pub struct Reveal {
    core: Rc<RefCell<RevealCore>>,
    tick: TickSlot,
}

fn request_frame(tick: &TickSlot) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

impl Reveal {
    pub fn new(document: &web::Document) -> Self {
        let timeline = timeline::envelope_reveal();
        let elements: Vec<(Target, web::HtmlElement)> = Target::ALL
            .iter()
            .filter_map(|&t| match dom::query_html(document, t.selector()) {
                Some(el) => Some((t, el)),
                None => {
                    log::warn!("[reveal] missing {}", t.selector());
                    None
                }
            })
            .collect();
        let core = RevealCore {
            document: document.clone(),
            playhead: Playhead::new(timeline.duration()),
            timeline,
            elements,
            last_instant: Instant::now(),
            animating: false,
        };
        // Initial state is the timeline at t = 0.
        core.apply();

        let core = Rc::new(RefCell::new(core));
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let weak_core: Weak<RefCell<RevealCore>> = Rc::downgrade(&core);
        let weak_tick = Rc::downgrade(&tick);
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let (Some(core), Some(tick)) = (weak_core.upgrade(), weak_tick.upgrade()) else {
                return;
            };
            let more = core.borrow_mut().step();
            if more {
                request_frame(&tick);
            }
        }) as Box<dyn FnMut()>));
        Self { core, tick }
    }

    fn kick(&self) {
        {
            let mut core = self.core.borrow_mut();
            if core.animating {
                return;
            }
            core.animating = true;
            core.last_instant = Instant::now();
        }
        request_frame(&self.tick);
    }

    /// Unhide the overlay and play forward from the current position.
    pub fn open(&self) {
        {
            let mut core = self.core.borrow_mut();
            overlay::show(&core.document);
            core.playhead.play(REVEAL_OPEN_SCALE);
        }
        self.kick();
    }

    /// Play backwards; the overlay is hidden once time reaches zero.
    pub fn close(&self) {
        {
            let mut core = self.core.borrow_mut();
            let at_rest = !core.playhead.playing && core.playhead.time <= 0.0;
            if at_rest || overlay::is_hidden(&core.document) {
                return;
            }
            core.playhead.reverse(REVEAL_CLOSE_SCALE);
        }
        self.kick();
    }

    /// Open, or opening.
    pub fn is_open(&self) -> bool {
        let core = self.core.borrow();
        core.playhead.direction == Direction::Forward
            && (core.playhead.playing || core.playhead.time > 0.0)
    }
}
