use crate::dom;

const DECORATIONS: &str = ".ball, .juggling-ring, .marquee-track, .star-burst";

/// Stops the decorative keyframe animations. Returns how many were stilled.
pub fn still_decorations() -> usize {
    let decorations = dom::query_all(DECORATIONS);
    for el in &decorations {
        dom::set_style(el, "animation", "none");
    }
    decorations.len()
}
