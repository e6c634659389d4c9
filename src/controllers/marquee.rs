use gloo_events::EventListener;
use web_sys::HtmlElement;

use crate::dom;

/// Pixels of scroll between two events that count as fast scrolling.
pub const FAST_SCROLL_DELTA: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Fast,
    Slow,
}

impl Pace {
    /// Length of one marquee cycle, in seconds.
    pub fn cycle_seconds(self) -> f64 {
        match self {
            Pace::Fast => 10.0,
            Pace::Slow => 20.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScrollSpeed {
    previous_y: f64,
}

impl ScrollSpeed {
    pub fn observe(&mut self, scroll_y: f64) -> Pace {
        let delta = (scroll_y - self.previous_y).abs();
        self.previous_y = scroll_y;
        if delta > FAST_SCROLL_DELTA {
            Pace::Fast
        } else {
            Pace::Slow
        }
    }
}

/// Speeds the marquee up while the page is scrolled quickly.
pub struct MarqueeSpeed {
    _on_scroll: EventListener,
}

impl MarqueeSpeed {
    pub fn install() -> Option<Self> {
        let track: HtmlElement = dom::query(".marquee-track")?;
        let window = dom::window()?;
        let mut speed = ScrollSpeed::default();

        let on_scroll = EventListener::new(&window, "scroll", move |_| {
            let pace = speed.observe(dom::scroll_y());
            dom::set_style(&track, "animation-duration", &dom::css_seconds(pace.cycle_seconds()));
        });
        Some(MarqueeSpeed {
            _on_scroll: on_scroll,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_jumps_are_fast() {
        let mut speed = ScrollSpeed::default();
        assert_eq!(speed.observe(120.0), Pace::Fast);
        assert_eq!(speed.observe(140.0), Pace::Slow);
        assert_eq!(speed.observe(60.0), Pace::Fast);
    }

    #[test]
    fn exactly_fifty_is_still_slow() {
        let mut speed = ScrollSpeed::default();
        assert_eq!(speed.observe(50.0), Pace::Slow);
        assert_eq!(speed.observe(100.0), Pace::Slow);
    }

    #[test]
    fn cycle_lengths() {
        assert_eq!(dom::css_seconds(Pace::Fast.cycle_seconds()), "10s");
        assert_eq!(dom::css_seconds(Pace::Slow.cycle_seconds()), "20s");
    }
}
