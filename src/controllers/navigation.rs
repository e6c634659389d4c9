use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom;

/// Scroll depth past which the nav bar switches to its compact look.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
/// Height of the fixed nav bar; anchor targets land just below it.
pub const ANCHOR_OFFSET: f64 = 80.0;

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub menu_open: bool,
}

impl NavState {
    /// Re-evaluates the scrolled flag; true when it changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLLED_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

/// The selector to look up for an in-page link, if it names a fragment.
pub fn fragment_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

pub fn anchor_scroll_top(target_offset_top: f64) -> f64 {
    target_offset_top - ANCHOR_OFFSET
}

pub struct Navigation {
    _listeners: Vec<EventListener>,
}

impl Navigation {
    pub fn install() -> Option<Self> {
        let window = dom::window()?;
        let state = Rc::new(RefCell::new(NavState::default()));
        let mut listeners = Vec::new();

        if let Some(nav) = dom::query::<HtmlElement>(".nav") {
            let state = Rc::clone(&state);
            let apply = move |force: bool| {
                let mut state = state.borrow_mut();
                if state.on_scroll(dom::scroll_y()) || force {
                    set_class(&nav, SCROLLED_CLASS, state.scrolled);
                }
            };
            apply(true);
            listeners.push(EventListener::new(&window, "scroll", move |_| apply(false)));
        }

        let toggle = dom::query::<HtmlElement>(".menu-toggle");
        let menu = dom::query::<HtmlElement>(".mobile-menu");
        if let (Some(toggle), Some(menu)) = (toggle, menu) {
            {
                let state = Rc::clone(&state);
                let (button, menu) = (toggle.clone(), menu.clone());
                listeners.push(EventListener::new(&toggle, "click", move |_| {
                    let open = state.borrow_mut().toggle_menu();
                    show_menu(&button, &menu, open);
                }));
            }
            for link in dom::query_all(".mobile-link") {
                let state = Rc::clone(&state);
                let (button, menu) = (toggle.clone(), menu.clone());
                listeners.push(EventListener::new(&link, "click", move |_| {
                    state.borrow_mut().close_menu();
                    show_menu(&button, &menu, false);
                }));
            }
        }

        for anchor in dom::query_all("a[href^=\"#\"]") {
            let link = anchor.clone();
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(href) = link.get_attribute("href") else {
                        return;
                    };
                    scroll_to_fragment(&href);
                },
            ));
        }

        if listeners.is_empty() {
            return None;
        }
        Some(Navigation {
            _listeners: listeners,
        })
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    if on {
        dom::add_class(el, class);
    } else {
        dom::remove_class(el, class);
    }
}

fn show_menu(button: &HtmlElement, menu: &HtmlElement, open: bool) {
    set_class(button, ACTIVE_CLASS, open);
    set_class(menu, ACTIVE_CLASS, open);
    // Lock page scroll behind the open menu.
    if let Some(body) = dom::document().and_then(|d| d.body()) {
        if open {
            dom::set_style(&body, "overflow", "hidden");
        } else {
            dom::clear_style(&body, "overflow");
        }
    }
}

fn scroll_to_fragment(href: &str) {
    let Some(selector) = fragment_selector(href) else {
        return;
    };
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        return;
    };
    // Malformed fragments make query_selector throw; treat like a miss.
    let Ok(Some(target)) = document.query_selector(selector) else {
        return;
    };
    let Ok(target) = target.dyn_into::<HtmlElement>() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(target.offset_top() as f64));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
