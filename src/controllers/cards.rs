use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::HtmlElement;

use crate::dom;

const RECEDED_OPACITY: &str = "0.6";
const RECEDED_TRANSFORM: &str = "scale(0.98)";

/// Cards that step back while `hovered` is under the pointer.
pub fn receding(hovered: usize, count: usize) -> Vec<usize> {
    (0..count).filter(|index| *index != hovered).collect()
}

pub struct CardEmphasis {
    _listeners: Vec<EventListener>,
}

impl CardEmphasis {
    pub fn install() -> Option<Self> {
        let cards = Rc::new(dom::query_all(".show-card"));
        if cards.is_empty() {
            return None;
        }

        let mut listeners = Vec::with_capacity(cards.len() * 2);
        for (index, card) in cards.iter().enumerate() {
            let siblings = Rc::clone(&cards);
            listeners.push(EventListener::new(card, "mouseenter", move |_| {
                for other in receding(index, siblings.len()) {
                    recede(&siblings[other]);
                }
            }));
            let siblings = Rc::clone(&cards);
            listeners.push(EventListener::new(card, "mouseleave", move |_| {
                siblings.iter().for_each(settle);
            }));
        }

        Some(CardEmphasis {
            _listeners: listeners,
        })
    }
}

fn recede(card: &HtmlElement) {
    dom::set_style(card, "opacity", RECEDED_OPACITY);
    dom::set_style(card, "transform", RECEDED_TRANSFORM);
}

fn settle(card: &HtmlElement) {
    dom::set_style(card, "opacity", "1");
    dom::clear_style(card, "transform");
}
