use gloo_events::EventListener;
use web_sys::HtmlElement;

use crate::dom;

/// Percentage of the page scrolled, always within `[0, 100]`.
///
/// Pages no taller than the viewport report 0 instead of dividing by zero.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }
    let progress = scroll_top / scrollable * 100.0;
    if progress.is_finite() {
        progress.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub struct ScrollProgress {
    _on_scroll: EventListener,
}

impl ScrollProgress {
    pub fn install() -> Option<Self> {
        let bar: HtmlElement = dom::by_id("scrollProgressBar")?;
        let window = dom::window()?;
        let document = dom::document()?;

        let update = move || {
            let scroll_height = document
                .document_element()
                .map(|root| root.scroll_height() as f64)
                .unwrap_or(0.0);
            let (_, viewport_height) = dom::viewport_size();
            let progress = scroll_progress(dom::scroll_y(), scroll_height, viewport_height);
            dom::set_style(&bar, "width", &format!("{}%", progress));
        };
        update();

        Some(ScrollProgress {
            _on_scroll: EventListener::new(&window, "scroll", move |_| update()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_down() {
        assert_eq!(scroll_progress(1000.0, 2800.0, 800.0), 50.0);
    }

    #[test]
    fn bottom_of_page_is_full() {
        assert_eq!(scroll_progress(2000.0, 2800.0, 800.0), 100.0);
    }

    #[test]
    fn short_page_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(30.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_stays_in_range() {
        // Elastic scrolling can report offsets past either end.
        assert_eq!(scroll_progress(-40.0, 2800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(2100.0, 2800.0, 800.0), 100.0);
    }

    #[test]
    fn never_nan() {
        assert_eq!(scroll_progress(f64::NAN, 2800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, f64::NAN, 800.0), 0.0);
        let p = scroll_progress(f64::INFINITY, 2800.0, 800.0);
        assert_eq!(p, 0.0);
    }
}
