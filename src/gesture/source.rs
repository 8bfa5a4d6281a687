//! GestureSource - recognizer reports in, phase-tagged motion stream out

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use super::{GestureEvent, GesturePhase};
use crate::observable::{MotionObservable, MotionSource};
use crate::types::MotionState;

/// Adapter a host recognizer reports into.
///
/// Emission order per report:
/// - Began: `state(Active)`, then the event
/// - Changed: the event
/// - Ended / Cancelled: the event, then `state(AtRest)`
///
/// Subscribers connecting mid-gesture get `state(Active)` on connect.
/// Out-of-order reports are tolerated: a Changed/Ended/Cancelled without a
/// preceding Began is treated as an implicit Began.
///
/// # Example
///
/// ```ignore
/// let pinch = GestureSource::new();
/// let _sub = pinch
///     .stream()
///     .on_recognition_state(GesturePhase::Changed)
///     .centroid()
///     .subscribe_next(|p| println!("{p:?}"));
///
/// // From the host recognizer:
/// pinch.began(PinchSample { centroid, scale: 1.0 });
/// pinch.changed(PinchSample { centroid, scale: 1.4 });
/// pinch.ended(PinchSample { centroid, scale: 1.4 });
/// ```
pub struct GestureSource<P> {
    source: MotionSource<GestureEvent<P>>,
    phase: Rc<Cell<GesturePhase>>,
}

impl<P> Clone for GestureSource<P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            phase: Rc::clone(&self.phase),
        }
    }
}

impl<P: Clone + 'static> Default for GestureSource<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + 'static> GestureSource<P> {
    pub fn new() -> Self {
        Self {
            source: MotionSource::new(),
            phase: Rc::new(Cell::new(GesturePhase::Possible)),
        }
    }

    /// Current recognizer phase (Possible between gestures).
    pub fn phase(&self) -> GesturePhase {
        self.phase.get()
    }

    /// Number of connected observers.
    pub fn observer_count(&self) -> usize {
        self.source.observer_count()
    }

    /// The gesture as a motion stream.
    pub fn stream(&self) -> MotionObservable<GestureEvent<P>> {
        let inner = self.source.observable();
        let phase = Rc::clone(&self.phase);
        MotionObservable::new(move |observer| {
            if phase.get().is_in_progress() {
                observer.state(MotionState::Active);
            }
            inner.connect(observer)
        })
    }

    /// Report a phase transition with its payload.
    pub fn report(&self, phase: GesturePhase, payload: P) {
        let current = self.phase.get();
        match phase {
            GesturePhase::Possible => {
                if current.is_in_progress() {
                    warn!(?current, "gesture reset to Possible while in progress");
                    self.source.state(MotionState::AtRest);
                }
                self.phase.set(GesturePhase::Possible);
            }
            GesturePhase::Began => {
                if current.is_in_progress() {
                    warn!(?current, "gesture began twice without ending");
                } else {
                    self.source.state(MotionState::Active);
                }
                self.phase.set(GesturePhase::Began);
                self.source.next(GestureEvent::new(phase, payload));
            }
            GesturePhase::Changed => {
                if !current.is_in_progress() {
                    warn!(?current, "gesture changed without began; treating as began");
                    self.source.state(MotionState::Active);
                }
                self.phase.set(GesturePhase::Changed);
                self.source.next(GestureEvent::new(phase, payload));
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                if !current.is_in_progress() {
                    warn!(?current, ?phase, "gesture finished without began; treating as began");
                    self.source.state(MotionState::Active);
                }
                self.phase.set(phase);
                self.source.next(GestureEvent::new(phase, payload));
                self.phase.set(GesturePhase::Possible);
                self.source.state(MotionState::AtRest);
            }
        }
    }

    pub fn began(&self, payload: P) {
        self.report(GesturePhase::Began, payload);
    }

    pub fn changed(&self, payload: P) {
        self.report(GesturePhase::Changed, payload);
    }

    pub fn ended(&self, payload: P) {
        self.report(GesturePhase::Ended, payload);
    }

    pub fn cancelled(&self, payload: P) {
        self.report(GesturePhase::Cancelled, payload);
    }
}

// =============================================================================
// TESTS
// =============================================================================
