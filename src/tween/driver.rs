//! Animation driver - the time seam tweens play on
//!
//! The core owns no clock. A host installs an [`AnimationDriver`] on the
//! runtime; tweens schedule playback on it and receive [`Frame`]s back.
//!
//! [`SteppedDriver`] is the deterministic driver: the host frame loop (or a
//! test) calls `advance(dt)` and every scheduled playback moves forward by
//! `dt`.
//!
//! # Example
//!
//! ```ignore
//! let driver = SteppedDriver::new();
//! let mut runtime = MotionRuntime::new().with_driver(driver.clone());
//!
//! tween.start(&mut runtime)?;
//! loop {
//!     driver.advance(Duration::from_millis(16));
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::observable::Disconnector;

// =============================================================================
// SEAM
// =============================================================================

/// Timing of one playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub delay: Duration,
    pub duration: Duration,
}

/// Report from a driver to a scheduled playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Linear fraction of the duration elapsed, in `0.0..=1.0`.
    Progress(f32),
    /// Playback is over. Always preceded by `Progress(1.0)`.
    Finished,
}

pub type FrameCallback = Box<dyn Fn(Frame)>;

/// External time source that advances playbacks.
pub trait AnimationDriver {
    /// Start a playback. The returned disconnector cancels it; no frames are
    /// delivered after it runs.
    fn schedule(&self, timing: Timing, on_frame: FrameCallback) -> Disconnector;
}

// =============================================================================
// STEPPED DRIVER
// =============================================================================

struct Playback {
    id: usize,
    timing: Timing,
    elapsed: Duration,
    on_frame: Rc<dyn Fn(Frame)>,
}

#[derive(Default)]
struct DriverState {
    playbacks: RefCell<Vec<Playback>>,
    next_id: Cell<usize>,
}

impl DriverState {
    fn remove(&self, id: usize) -> Option<Playback> {
        let mut playbacks = self.playbacks.borrow_mut();
        let index = playbacks.iter().position(|p| p.id == id)?;
        Some(playbacks.remove(index))
    }

    /// Move one playback forward. Returns its frame and callback, or None if
    /// it is gone or still inside its delay.
    fn step(&self, id: usize, dt: Duration) -> Option<(f32, Rc<dyn Fn(Frame)>)> {
        let mut playbacks = self.playbacks.borrow_mut();
        let playback = playbacks.iter_mut().find(|p| p.id == id)?;
        playback.elapsed += dt;

        let Timing { delay, duration } = playback.timing;
        if playback.elapsed < delay {
            return None;
        }
        let running = playback.elapsed - delay;
        let fraction = if duration.is_zero() {
            1.0
        } else {
            (running.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };
        Some((fraction, Rc::clone(&playback.on_frame)))
    }
}

/// Deterministic driver stepped by its owner.
///
/// Cloning shares the same set of playbacks.
#[derive(Clone, Default)]
pub struct SteppedDriver {
    state: Rc<DriverState>,
}

impl SteppedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every scheduled playback by `dt`.
    ///
    /// Playbacks scheduled or cancelled from inside a frame callback take
    /// effect for the next `advance`.
    pub fn advance(&self, dt: Duration) {
        let ids: Vec<usize> = self.state.playbacks.borrow().iter().map(|p| p.id).collect();

        for id in ids {
            let Some((fraction, on_frame)) = self.state.step(id, dt) else {
                continue;
            };
            on_frame(Frame::Progress(fraction));

            if fraction >= 1.0 && self.state.remove(id).is_some() {
                on_frame(Frame::Finished);
            }
        }
    }

    /// Number of playbacks still scheduled.
    pub fn active_count(&self) -> usize {
        self.state.playbacks.borrow().len()
    }
}

impl AnimationDriver for SteppedDriver {
    fn schedule(&self, timing: Timing, on_frame: FrameCallback) -> Disconnector {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.playbacks.borrow_mut().push(Playback {
            id,
            timing,
            elapsed: Duration::ZERO,
            on_frame: Rc::from(on_frame),
        });

        let state = Rc::clone(&self.state);
        Box::new(move || {
            // Dropped outside the borrow: the callback may own the caller.
            let removed = state.remove(id);
            drop(removed);
        })
    }
}
