use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::dom;
use crate::frame::FrameLoop;

/// Share of the remaining distance the ring covers each frame.
pub const LAG_FACTOR: f64 = 0.12;

const HOVER_TARGETS: &str = "a, button, .show-card, .testimonial-card, .video-placeholder";
const HOVER_CLASS: &str = "cursor-hover";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Exponentially smoothed follower of the raw pointer position.
#[derive(Debug, Default)]
pub struct Trail {
    raw: Point,
    shown: Point,
}

impl Trail {
    pub fn point_at(&mut self, raw: Point) {
        self.raw = raw;
    }

    /// Advances one frame and returns the position to display.
    pub fn step(&mut self) -> Point {
        self.shown.x += (self.raw.x - self.shown.x) * LAG_FACTOR;
        self.shown.y += (self.raw.y - self.shown.y) * LAG_FACTOR;
        self.shown
    }
}

/// Custom cursor: a dot pinned to the pointer and a ring lagging behind it.
pub struct PointerIndicator {
    _on_move: EventListener,
    _hover: Vec<EventListener>,
    _ring_frames: FrameLoop,
}

impl PointerIndicator {
    pub fn install() -> Option<Self> {
        let dot: HtmlElement = dom::by_id("cursorDot")?;
        let ring: HtmlElement = dom::by_id("cursorRing")?;

        if dom::pointer_is_coarse() {
            dom::set_style(&dot, "display", "none");
            dom::set_style(&ring, "display", "none");
            return None;
        }

        let document = dom::document()?;
        let trail = Rc::new(RefCell::new(Trail::default()));

        let on_move = {
            let dot = dot.clone();
            let trail = Rc::clone(&trail);
            EventListener::new(&document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let raw = Point {
                    x: event.client_x() as f64,
                    y: event.client_y() as f64,
                };
                trail.borrow_mut().point_at(raw);
                place(&dot, raw);
            })
        };

        let ring_frames = {
            let ring = ring.clone();
            FrameLoop::start(move |_| {
                let shown = trail.borrow_mut().step();
                place(&ring, shown);
            })
        };

        let hover = dom::query_all(HOVER_TARGETS)
            .into_iter()
            .flat_map(|target| {
                let enter = {
                    let (dot, ring) = (dot.clone(), ring.clone());
                    EventListener::new(&target, "mouseenter", move |_| {
                        dom::add_class(&dot, HOVER_CLASS);
                        dom::add_class(&ring, HOVER_CLASS);
                    })
                };
                let leave = {
                    let (dot, ring) = (dot.clone(), ring.clone());
                    EventListener::new(&target, "mouseleave", move |_| {
                        dom::remove_class(&dot, HOVER_CLASS);
                        dom::remove_class(&ring, HOVER_CLASS);
                    })
                };
                [enter, leave]
            })
            .collect();

        Some(PointerIndicator {
            _on_move: on_move,
            _hover: hover,
            _ring_frames: ring_frames,
        })
    }
}

fn place(el: &HtmlElement, at: Point) {
    dom::set_style(el, "left", &dom::px(at.x));
    dom::set_style(el, "top", &dom::px(at.y));
}
