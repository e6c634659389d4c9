use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use log::warn;
use web_sys::HtmlElement;

use crate::dom;
use crate::visibility::OneShotWatcher;

pub const COUNT_DURATION_MS: f64 = 2000.0;
/// Nominal frame length the per-frame increment is derived from. The count
/// advances per rendered frame, so real duration follows the frame rate.
pub const FRAME_MS: f64 = 16.0;
pub const COUNTER_THRESHOLD: f64 = 0.5;

pub fn final_label(target: i64) -> String {
    if target >= 100 {
        format!("{}+", target)
    } else {
        target.to_string()
    }
}

/// Leading integer of a `data-count` value, the way `parseInt` reads it.
pub fn parse_target(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountFrame {
    Running(i64),
    Finished(String),
}

#[derive(Debug, Clone)]
pub struct CountUp {
    target: i64,
    step: f64,
    current: f64,
}

impl CountUp {
    pub fn new(target: i64) -> Self {
        CountUp {
            target,
            step: target as f64 / (COUNT_DURATION_MS / FRAME_MS),
            current: 0.0,
        }
    }

    pub fn advance(&mut self) -> CountFrame {
        self.current += self.step;
        if self.current < self.target as f64 {
            CountFrame::Running(self.current.floor() as i64)
        } else {
            CountFrame::Finished(final_label(self.target))
        }
    }
}

type FrameSlots = RefCell<Vec<Option<AnimationFrame>>>;

/// Counts each `.stat-number` up to its `data-count` once it is half visible.
pub struct CounterAnimation {
    _watcher: OneShotWatcher,
    _frames: Rc<FrameSlots>,
}

impl CounterAnimation {
    pub fn install() -> Option<Self> {
        let mut elements = Vec::new();
        let mut targets = Vec::new();
        for el in dom::query_all(".stat-number") {
            let raw = el.get_attribute("data-count").unwrap_or_default();
            match parse_target(&raw) {
                Some(target) => {
                    elements.push(el);
                    targets.push(target);
                }
                None => warn!("Skipping counter with data-count {:?}", raw),
            }
        }
        if elements.is_empty() {
            return None;
        }

        let frames: Rc<FrameSlots> = Rc::new(RefCell::new(elements.iter().map(|_| None).collect()));
        let watcher = {
            let frames = Rc::downgrade(&frames);
            OneShotWatcher::new(elements, COUNTER_THRESHOLD, move |index, el| {
                run(el.clone(), CountUp::new(targets[index]), index, frames.clone());
            })?
        };

        Some(CounterAnimation {
            _watcher: watcher,
            _frames: frames,
        })
    }
}

fn run(el: HtmlElement, mut count: CountUp, index: usize, frames: Weak<FrameSlots>) {
    let Some(slots) = frames.upgrade() else {
        return;
    };
    match count.advance() {
        CountFrame::Running(value) => {
            el.set_text_content(Some(&value.to_string()));
            let frame = request_animation_frame(move |_| run(el, count, index, frames));
            slots.borrow_mut()[index] = Some(frame);
        }
        CountFrame::Finished(label) => {
            el.set_text_content(Some(&label));
            slots.borrow_mut()[index] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: i64) -> (Vec<i64>, String) {
        let mut count = CountUp::new(target);
        let mut shown = Vec::new();
        loop {
            match count.advance() {
                CountFrame::Running(value) => shown.push(value),
                CountFrame::Finished(label) => return (shown, label),
            }
        }
    }

    #[test]
    fn large_targets_get_a_plus() {
        let (_, label) = run_to_end(150);
        assert_eq!(label, "150+");
        assert_eq!(final_label(100), "100+");
    }

    #[test]
    fn small_targets_end_exactly() {
        let (_, label) = run_to_end(42);
        assert_eq!(label, "42");
        assert_eq!(final_label(99), "99");
    }

    #[test]
    fn intermediate_values_climb_below_target() {
        let (shown, _) = run_to_end(1200);
        assert!(!shown.is_empty());
        assert!(shown.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(shown.iter().all(|value| (0..1200).contains(value)));
    }

    #[test]
    fn takes_about_a_hundred_and_twenty_five_frames() {
        let (shown, _) = run_to_end(500);
        // 2000ms / 16ms per frame, give or take float accumulation.
        assert!((123..=126).contains(&shown.len()), "ran {} frames", shown.len());
    }

    #[test]
    fn zero_finishes_on_first_frame() {
        let mut count = CountUp::new(0);
        assert_eq!(count.advance(), CountFrame::Finished("0".to_string()));
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_target("250"), Some(250));
        assert_eq!(parse_target(" 15 "), Some(15));
        assert_eq!(parse_target("1200+"), Some(1200));
        assert_eq!(parse_target("-3"), Some(-3));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("many"), None);
    }
}
