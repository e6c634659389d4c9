use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use super::cursor::Point;
use crate::dom;
use crate::frame::CoalescedFrames;

pub const BALL_SPEED: f64 = 10.0;
pub const RING_SPEED: f64 = 15.0;

/// Pointer offset from the viewport center, about `[-1, 1]` on each axis.
pub fn normalized_offset(pointer: Point, viewport: (f64, f64)) -> Point {
    let (center_x, center_y) = (viewport.0 / 2.0, viewport.1 / 2.0);
    let axis = |value: f64, center: f64| {
        if center > 0.0 {
            (value - center) / center
        } else {
            0.0
        }
    };
    Point {
        x: axis(pointer.x, center_x),
        y: axis(pointer.y, center_y),
    }
}

/// Deeper elements of a group travel further.
pub fn displacement(offset: Point, index: usize, speed: f64) -> Point {
    let reach = (index + 1) as f64 * speed;
    Point {
        x: offset.x * reach,
        y: offset.y * reach,
    }
}

/// Drifts the floating juggling props against the pointer.
///
/// Writes the standalone CSS `translate` property so the float keyframes,
/// which animate `transform`, keep running underneath.
pub struct Parallax {
    _on_move: EventListener,
}

impl Parallax {
    pub fn install() -> Option<Self> {
        if dom::pointer_is_coarse() {
            return None;
        }
        let groups: Vec<(Vec<HtmlElement>, f64)> = vec![
            (dom::query_all(".ball"), BALL_SPEED),
            (dom::query_all(".juggling-ring"), RING_SPEED),
        ];
        if groups.iter().all(|(elements, _)| elements.is_empty()) {
            return None;
        }
        let document = dom::document()?;

        let frames = CoalescedFrames::new(move |pointer: Point| {
            let offset = normalized_offset(pointer, dom::viewport_size());
            for (elements, speed) in &groups {
                for (index, el) in elements.iter().enumerate() {
                    let shift = displacement(offset, index, *speed);
                    dom::set_style(el, "translate", &format!("{}px {}px", shift.x, shift.y));
                }
            }
        });

        let on_move = EventListener::new(&document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            frames.push(Point {
                x: event.client_x() as f64,
                y: event.client_y() as f64,
            });
        });

        Some(Parallax { _on_move: on_move })
    }
}
