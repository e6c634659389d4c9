use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::cursor::Point;
use crate::dom;

/// Fraction of the pointer's distance from center the button follows.
pub const PULL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn magnetic_offset(pointer: Point, bounds: Bounds) -> Point {
    let center_x = bounds.left + bounds.width / 2.0;
    let center_y = bounds.top + bounds.height / 2.0;
    Point {
        x: (pointer.x - center_x) * PULL,
        y: (pointer.y - center_y) * PULL,
    }
}

pub struct MagneticButtons {
    _listeners: Vec<EventListener>,
}

impl MagneticButtons {
    pub fn install() -> Option<Self> {
        let buttons = dom::query_all(".btn, .form-submit");
        if buttons.is_empty() {
            return None;
        }

        let listeners = buttons
            .iter()
            .flat_map(|target| {
                let on_move = {
                    let button = target.clone();
                    EventListener::new(target, "mousemove", move |event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let rect = button.get_bounding_client_rect();
                        let pointer = Point {
                            x: event.client_x() as f64,
                            y: event.client_y() as f64,
                        };
                        let shift = magnetic_offset(
                            pointer,
                            Bounds {
                                left: rect.left(),
                                top: rect.top(),
                                width: rect.width(),
                                height: rect.height(),
                            },
                        );
                        dom::set_style(
                            &button,
                            "transform",
                            &format!("translate({}px, {}px)", shift.x, shift.y),
                        );
                    })
                };
                let on_leave = {
                    let button = target.clone();
                    EventListener::new(target, "mouseleave", move |_| {
                        dom::clear_style(&button, "transform");
                    })
                };
                [on_move, on_leave]
            })
            .collect();

        Some(MagneticButtons {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 40.0,
    };

    #[test]
    fn pointer_on_center_leaves_button_in_place() {
        let shift = magnetic_offset(Point { x: 200.0, y: 70.0 }, BUTTON);
        assert_eq!(shift, Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn follows_a_tenth_of_the_distance() {
        let shift = magnetic_offset(Point { x: 300.0, y: 50.0 }, BUTTON);
        assert!((shift.x - 10.0).abs() < 1e-9);
        assert!((shift.y + 2.0).abs() < 1e-9);
    }
}
