use crate::dom;
use crate::visibility::OneShotWatcher;

const REVEAL_TARGETS: &str = ".about-content, .about-visual, .show-card, .contact-info, \
     .contact-form-wrapper, .testimonial-card, .showreel-label, .showreel-video";

pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Seconds between consecutive elements of the cascade.
pub const STAGGER_STEP: f64 = 0.1;

pub fn stagger_delay(index: usize) -> f64 {
    index as f64 * STAGGER_STEP
}

/// Fades content in the first time it scrolls into view. Never fades back out.
pub struct RevealOnScroll {
    _watcher: OneShotWatcher,
}

impl RevealOnScroll {
    pub fn install() -> Option<Self> {
        let elements = dom::query_all(REVEAL_TARGETS);
        if elements.is_empty() {
            return None;
        }

        for (index, el) in elements.iter().enumerate() {
            dom::add_class(el, "fade-in");
            dom::set_style(el, "transition-delay", &dom::css_seconds(stagger_delay(index)));
        }

        let watcher = OneShotWatcher::new(elements, REVEAL_THRESHOLD, |_, el| {
            dom::add_class(el, "visible");
        })?;
        Some(RevealOnScroll { _watcher: watcher })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_steps_by_a_tenth_of_a_second() {
        let delays: Vec<String> = (0..4).map(|i| dom::css_seconds(stagger_delay(i))).collect();
        assert_eq!(delays, ["0s", "0.1s", "0.2s", "0.3s"]);
    }

    #[test]
    fn delay_grows_with_position() {
        assert!(stagger_delay(12) > stagger_delay(11));
        assert!((stagger_delay(12) - 1.2).abs() < 1e-9);
    }
}
