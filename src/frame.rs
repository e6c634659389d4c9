//! Work bound to the rendering clock.
//!
//! `FrameLoop` runs a task on every animation frame until dropped.
//! `CoalescedFrames` collapses any number of updates pushed between two
//! frames into a single call on the next frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};

type FrameSlot = RefCell<Option<AnimationFrame>>;
type Tick = Rc<RefCell<dyn FnMut(f64)>>;

/// A recurring per-frame task. At most one frame is pending at a time and
/// dropping the loop cancels it.
pub struct FrameLoop {
    _slot: Rc<FrameSlot>,
}

impl FrameLoop {
    pub fn start<F>(tick: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        let slot = Rc::new(RefCell::new(None));
        let tick: Tick = Rc::new(RefCell::new(tick));
        schedule(Rc::downgrade(&slot), tick);
        FrameLoop { _slot: slot }
    }
}

fn schedule(slot: Weak<FrameSlot>, tick: Tick) {
    let Some(strong) = slot.upgrade() else {
        return;
    };
    let frame = request_animation_frame(move |timestamp| {
        (tick.borrow_mut())(timestamp);
        // Frame N+1 is only requested once frame N has run.
        schedule(slot, tick);
    });
    *strong.borrow_mut() = Some(frame);
}

/// Single-slot gate: `request` succeeds only while no frame is pending.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn release(&mut self) {
        self.pending = false;
    }
}

/// Latest-value-wins buffer in front of a `FrameGate`.
#[derive(Debug)]
pub struct Coalescer<T> {
    gate: FrameGate,
    latest: Option<T>,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Coalescer {
            gate: FrameGate::default(),
            latest: None,
        }
    }
}

impl<T> Coalescer<T> {
    /// Stores `value`; true when the caller must schedule a frame.
    pub fn offer(&mut self, value: T) -> bool {
        self.latest = Some(value);
        self.gate.request()
    }

    /// Called from the frame: reopens the gate and hands back the newest value.
    pub fn take(&mut self) -> Option<T> {
        self.gate.release();
        self.latest.take()
    }
}

pub struct CoalescedFrames<T: 'static> {
    state: Rc<RefCell<Coalescer<T>>>,
    frame: RefCell<Option<AnimationFrame>>,
    apply: Rc<dyn Fn(T)>,
}

impl<T: 'static> CoalescedFrames<T> {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        CoalescedFrames {
            state: Rc::new(RefCell::new(Coalescer::default())),
            frame: RefCell::new(None),
            apply: Rc::new(apply),
        }
    }

    pub fn push(&self, value: T) {
        if !self.state.borrow_mut().offer(value) {
            return;
        }
        let state = Rc::clone(&self.state);
        let apply = Rc::clone(&self.apply);
        let handle = request_animation_frame(move |_| {
            let latest = state.borrow_mut().take();
            if let Some(value) = latest {
                apply(value);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}
