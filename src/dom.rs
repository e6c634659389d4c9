//! Thin lookups over `web_sys` shared by the controllers.
//!
//! Every lookup returns `Option` (or an empty `Vec`) so a page missing some
//! element only disables the controller that needed it.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn media_matches(query: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Touch-style primary input. Read once per controller at install.
pub fn pointer_is_coarse() -> bool {
    media_matches("(pointer: coarse)")
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn viewport_size() -> (f64, f64) {
    let Some(window) = window() else {
        return (0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Seconds for CSS timing properties, rounded to the millisecond.
pub fn css_seconds(seconds: f64) -> String {
    let rounded = (seconds * 1000.0).round() / 1000.0;
    format!("{}s", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_seconds_hides_float_noise() {
        assert_eq!(css_seconds(3.0 * 0.1), "0.3s");
        assert_eq!(css_seconds(0.4 + 3.0 * 0.05), "0.55s");
        assert_eq!(css_seconds(0.0), "0s");
        assert_eq!(css_seconds(20.0), "20s");
    }

    #[test]
    fn px_keeps_fractions() {
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-3.0), "-3px");
    }
}
