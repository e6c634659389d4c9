//! One-shot viewport watching for the reveal and counter controllers.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;

// Browsers report intersection ratios with subpixel rounding.
const RATIO_SLACK: f64 = 0.001;

/// Per-element latch: each index flips to seen once and stays there.
#[derive(Debug, Clone)]
pub struct Sightings {
    seen: Vec<bool>,
}

impl Sightings {
    pub fn new(len: usize) -> Self {
        Sightings {
            seen: vec![false; len],
        }
    }

    /// True only on the first call for `index`.
    pub fn mark(&mut self, index: usize) -> bool {
        match self.seen.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_seen(&self, index: usize) -> bool {
        self.seen.get(index).copied().unwrap_or(false)
    }

    pub fn all_seen(&self) -> bool {
        self.seen.iter().all(|seen| *seen)
    }
}

pub fn entry_is_visible(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_SLACK >= threshold
}

/// Share of an element's height inside `[0, viewport_height]`.
pub fn visible_fraction(top: f64, bottom: f64, viewport_height: f64) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return if top >= 0.0 && top < viewport_height { 1.0 } else { 0.0 };
    }
    let visible = bottom.min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

struct Watched {
    elements: Vec<HtmlElement>,
    sightings: Sightings,
    on_visible: Box<dyn FnMut(usize, &HtmlElement)>,
}

impl Watched {
    fn fire(&mut self, index: usize) {
        let Watched {
            elements,
            sightings,
            on_visible,
        } = self;
        if sightings.mark(index) {
            on_visible(index, &elements[index]);
        }
    }

    fn fire_for(&mut self, target: &Element) {
        if let Some(index) = self
            .elements
            .iter()
            .position(|el| el.unchecked_ref::<Element>() == target)
        {
            self.fire(index);
        }
    }
}

enum Mechanism {
    Observer {
        observer: IntersectionObserver,
        _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    },
    Scroll {
        _listener: EventListener,
    },
}

/// Calls back the first time each element reaches `threshold` visibility,
/// then stops watching that element.
pub struct OneShotWatcher {
    mechanism: Mechanism,
}

impl OneShotWatcher {
    pub fn new<F>(elements: Vec<HtmlElement>, threshold: f64, on_visible: F) -> Option<Self>
    where
        F: FnMut(usize, &HtmlElement) + 'static,
    {
        let watched = Rc::new(RefCell::new(Watched {
            sightings: Sightings::new(elements.len()),
            elements,
            on_visible: Box::new(on_visible),
        }));

        let mechanism = match observe(Rc::clone(&watched), threshold) {
            Ok(mechanism) => mechanism,
            Err(err) => {
                warn!("IntersectionObserver unavailable ({:?}), watching scroll instead", err);
                scroll_fallback(watched, threshold)?
            }
        };
        Some(OneShotWatcher { mechanism })
    }
}

impl Drop for OneShotWatcher {
    fn drop(&mut self) {
        if let Mechanism::Observer { observer, .. } = &self.mechanism {
            observer.disconnect();
        }
    }
}

fn observe(watched: Rc<RefCell<Watched>>, threshold: f64) -> Result<Mechanism, JsValue> {
    let callback = {
        let watched = Rc::clone(&watched);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry_is_visible(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    watched.borrow_mut().fire_for(&target);
                }
                if watched.borrow().sightings.all_seen() {
                    observer.disconnect();
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for el in watched.borrow().elements.iter() {
        observer.observe(el);
    }

    Ok(Mechanism::Observer {
        observer,
        _callback: callback,
    })
}

fn scroll_fallback(watched: Rc<RefCell<Watched>>, threshold: f64) -> Option<Mechanism> {
    let window = dom::window()?;
    let check = move || {
        let (_, viewport_height) = dom::viewport_size();
        let mut watched = watched.borrow_mut();
        for index in 0..watched.elements.len() {
            if watched.sightings.is_seen(index) {
                continue;
            }
            let rect = watched.elements[index].get_bounding_client_rect();
            let fraction = visible_fraction(rect.top(), rect.bottom(), viewport_height);
            if fraction + RATIO_SLACK >= threshold {
                watched.fire(index);
            }
        }
    };
    check();
    let listener = EventListener::new(&window, "scroll", move |_| check());
    Some(Mechanism::Scroll {
        _listener: listener,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sighting_latches_once() {
        let mut sightings = Sightings::new(3);
        assert!(sightings.mark(1));
        assert!(!sightings.mark(1));
        assert!(sightings.is_seen(1));
        assert!(!sightings.is_seen(0));
        assert!(!sightings.all_seen());
        assert!(sightings.mark(0));
        assert!(sightings.mark(2));
        assert!(sightings.all_seen());
    }

    #[test]
    fn out_of_range_index_never_fires() {
        let mut sightings = Sightings::new(1);
        assert!(!sightings.mark(5));
        assert!(!sightings.is_seen(5));
    }

    #[test]
    fn entry_needs_intersection_and_ratio() {
        assert!(entry_is_visible(true, 0.1, 0.1));
        assert!(entry_is_visible(true, 0.0995, 0.1));
        assert!(entry_is_visible(true, 0.75, 0.5));
        assert!(!entry_is_visible(true, 0.05, 0.1));
        assert!(!entry_is_visible(false, 1.0, 0.1));
    }

    #[test]
    fn fraction_of_partially_visible_element() {
        // 200px tall element with its top 50px above the fold.
        assert_eq!(visible_fraction(-50.0, 150.0, 800.0), 0.75);
        // Hanging off the bottom edge.
        assert_eq!(visible_fraction(700.0, 900.0, 800.0), 0.5);
        assert_eq!(visible_fraction(100.0, 300.0, 800.0), 1.0);
    }

    #[test]
    fn fraction_outside_viewport_is_zero() {
        assert_eq!(visible_fraction(900.0, 1000.0, 800.0), 0.0);
        assert_eq!(visible_fraction(-300.0, -100.0, 800.0), 0.0);
    }

    #[test]
    fn zero_height_element_counts_when_on_screen() {
        assert_eq!(visible_fraction(10.0, 10.0, 800.0), 1.0);
        assert_eq!(visible_fraction(810.0, 810.0, 800.0), 0.0);
    }

    #[test]
    fn element_taller_than_viewport() {
        let fraction = visible_fraction(0.0, 4000.0, 800.0);
        assert!((fraction - 0.2).abs() < 1e-9);
    }
}
