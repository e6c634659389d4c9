use gloo_events::EventListener;

use crate::dom;

pub const BASE_DELAY: f64 = 0.4;
pub const CHAR_STEP: f64 = 0.05;

pub fn char_delay(index: usize) -> f64 {
    BASE_DELAY + index as f64 * CHAR_STEP
}

fn stagger_chars() {
    for (index, el) in dom::query_all(".char").iter().enumerate() {
        dom::set_style(el, "animation-delay", &dom::css_seconds(char_delay(index)));
    }
}

/// Cascades the hero title letters in once the page has fully loaded.
pub struct HeroIntro {
    _on_load: Option<EventListener>,
}

impl HeroIntro {
    pub fn install() -> Option<Self> {
        let document = dom::document()?;
        if dom::query_all(".char").is_empty() {
            return None;
        }
        if document.ready_state() == "complete" {
            stagger_chars();
            return Some(HeroIntro { _on_load: None });
        }
        let window = dom::window()?;
        Some(HeroIntro {
            _on_load: Some(EventListener::once(&window, "load", |_| stagger_chars())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_waits_for_the_title() {
        assert_eq!(dom::css_seconds(char_delay(0)), "0.4s");
    }

    #[test]
    fn letters_follow_fifty_ms_apart() {
        let delays: Vec<String> = (1..4).map(|i| dom::css_seconds(char_delay(i))).collect();
        assert_eq!(delays, ["0.45s", "0.5s", "0.55s"]);
    }
}
