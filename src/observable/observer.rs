//! Observers - the value/state dual channel
//!
//! Every motion stream delivers two kinds of calls to its observer:
//! `next(value)` for each value and `state(MotionState)` for activity
//! transitions. [`MotionObserver`] is that two-method interface; operators,
//! sinks and host callbacks are just different implementations of it.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::MotionState;

// =============================================================================
// TYPES
// =============================================================================

/// Receiver of a motion stream's values and activity transitions.
pub trait MotionObserver<T> {
    /// Called for every value the stream emits.
    fn next(&self, value: T);

    /// Called when the stream's activity changes.
    fn state(&self, state: MotionState);
}

/// Shared, type-erased observer as handed to connectors.
pub type Observer<T> = Rc<dyn MotionObserver<T>>;

// =============================================================================
// CLOSURE OBSERVER
// =============================================================================

/// Observer built from closures.
///
/// ```ignore
/// let observer = FnObserver::new(|value: f32| println!("{value}"))
///     .on_state(|state| println!("{state:?}"));
/// ```
pub struct FnObserver<T> {
    on_next: Box<dyn Fn(T)>,
    on_state: Box<dyn Fn(MotionState)>,
}

impl<T> FnObserver<T> {
    /// Observer that handles values and ignores state.
    pub fn new<F>(on_next: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            on_next: Box::new(on_next),
            on_state: Box::new(|_| {}),
        }
    }

    /// Observer that only reacts to state transitions.
    pub fn state_only<F>(on_state: F) -> Self
    where
        F: Fn(MotionState) + 'static,
    {
        Self {
            on_next: Box::new(|_| {}),
            on_state: Box::new(on_state),
        }
    }

    /// Attach a state handler.
    pub fn on_state<F>(mut self, on_state: F) -> Self
    where
        F: Fn(MotionState) + 'static,
    {
        self.on_state = Box::new(on_state);
        self
    }
}

impl<T> MotionObserver<T> for FnObserver<T> {
    fn next(&self, value: T) {
        (self.on_next)(value);
    }

    fn state(&self, state: MotionState) {
        (self.on_state)(state);
    }
}

/// Observer that ignores everything. Used by [`MotionObservable::run`](crate::MotionObservable::run).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T> MotionObserver<T> for NoopObserver {
    fn next(&self, _value: T) {}
    fn state(&self, _state: MotionState) {}
}

// =============================================================================
// GATE
// =============================================================================

/// Forwards to `inner` only while `open` is set.
///
/// Every connection made by `subscribe` or `compose` is gated, so closing the
/// gates during disconnect silences the whole chain immediately, including
/// emissions a producer is still iterating over.
struct GatedObserver<T> {
    open: Rc<Cell<bool>>,
    inner: Observer<T>,
}

impl<T> MotionObserver<T> for GatedObserver<T> {
    fn next(&self, value: T) {
        if self.open.get() {
            self.inner.next(value);
        }
    }

    fn state(&self, state: MotionState) {
        if self.open.get() {
            self.inner.state(state);
        }
    }
}

pub(crate) fn gate<T: 'static>(inner: Observer<T>, open: Rc<Cell<bool>>) -> Observer<T> {
    Rc::new(GatedObserver { open, inner })
}

// =============================================================================
// TESTS
// =============================================================================
