use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::dom;

/// Content travels this much further than the pointer.
pub const DRAG_FACTOR: f64 = 1.2;

const GRABBING_CLASS: &str = "grabbing";

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Anchor {
    x: f64,
    scroll_left: f64,
}

/// Drag-to-scroll state: idle, or dragging from an anchor.
#[derive(Debug, Default)]
pub struct DragState {
    anchor: Option<Anchor>,
}

impl DragState {
    pub fn press(&mut self, x: f64, scroll_left: f64) {
        self.anchor = Some(Anchor { x, scroll_left });
    }

    /// Scroll offset for the pointer at `x`, if a drag is in progress.
    /// Dragging right scrolls the content left.
    pub fn drag_to(&self, x: f64) -> Option<f64> {
        let anchor = self.anchor?;
        Some(anchor.scroll_left - (x - anchor.x) * DRAG_FACTOR)
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }
}

pub struct GalleryDrag {
    _listeners: Vec<EventListener>,
}

impl GalleryDrag {
    pub fn install() -> Option<Self> {
        let reel: HtmlElement = dom::by_id("galleryReel")?;
        if dom::pointer_is_coarse() {
            return None;
        }
        let drag = Rc::new(RefCell::new(DragState::default()));
        let mut listeners = Vec::new();

        {
            let (drag, gallery) = (Rc::clone(&drag), reel.clone());
            listeners.push(EventListener::new(&reel, "mousedown", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                drag.borrow_mut()
                    .press(pointer_x(&gallery, event), gallery.scroll_left() as f64);
                dom::add_class(&gallery, GRABBING_CLASS);
            }));
        }

        for name in ["mouseup", "mouseleave"] {
            let (drag, gallery) = (Rc::clone(&drag), reel.clone());
            listeners.push(EventListener::new(&reel, name, move |_| {
                drag.borrow_mut().release();
                dom::remove_class(&gallery, GRABBING_CLASS);
            }));
        }

        {
            let gallery = reel.clone();
            listeners.push(EventListener::new_with_options(
                &reel,
                "mousemove",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let Some(scroll_left) = drag.borrow().drag_to(pointer_x(&gallery, event)) else {
                        return;
                    };
                    // Keep the browser from starting a text selection or image drag.
                    event.prevent_default();
                    gallery.set_scroll_left(scroll_left.round() as i32);
                },
            ));
        }

        Some(GalleryDrag {
            _listeners: listeners,
        })
    }
}

fn pointer_x(gallery: &HtmlElement, event: &MouseEvent) -> f64 {
    (event.page_x() - gallery.offset_left()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_reel_ignores_movement() {
        let drag = DragState::default();
        assert_eq!(drag.drag_to(300.0), None);
    }

    #[test]
    fn drag_moves_scroll_by_amplified_delta() {
        let mut drag = DragState::default();
        drag.press(200.0, 500.0);
        // Right by 100px scrolls back 120px.
        assert_eq!(drag.drag_to(300.0), Some(380.0));
        // Left by 50px scrolls forward 60px.
        assert_eq!(drag.drag_to(150.0), Some(560.0));
        assert_eq!(drag.drag_to(200.0), Some(500.0));
    }

    #[test]
    fn delta_is_measured_from_the_anchor() {
        let mut drag = DragState::default();
        drag.press(10.0, 0.0);
        for x in [20.0, 40.0, 35.0] {
            let scroll = drag.drag_to(x).unwrap();
            assert!((scroll - (-1.2 * (x - 10.0))).abs() < 1e-9);
        }
    }

    #[test]
    fn release_ends_the_drag() {
        let mut drag = DragState::default();
        drag.press(0.0, 0.0);
        drag.release();
        assert_eq!(drag.drag_to(50.0), None);
    }

    #[test]
    fn new_press_replaces_the_anchor() {
        let mut drag = DragState::default();
        drag.press(0.0, 100.0);
        drag.press(400.0, 900.0);
        assert_eq!(drag.drag_to(410.0), Some(888.0));
    }
}
