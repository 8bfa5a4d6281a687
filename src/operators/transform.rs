//! map / filter

use std::rc::Rc;

use super::Operator;
use crate::observable::{MotionObservable, MotionObserver, Observer};
use crate::types::MotionState;

// =============================================================================
// MAP
// =============================================================================

/// Emits `transform(value)` for every value. State passes through.
pub struct Map<F> {
    transform: Rc<F>,
}

pub fn map<F>(transform: F) -> Map<F> {
    Map {
        transform: Rc::new(transform),
    }
}

impl<In, Out, F> Operator<In, Out> for Map<F>
where
    In: 'static,
    Out: 'static,
    F: Fn(In) -> Out + 'static,
{
    fn connect(&self, downstream: Observer<Out>) -> Observer<In> {
        Rc::new(MapObserver {
            transform: Rc::clone(&self.transform),
            downstream,
        })
    }
}

struct MapObserver<F, Out> {
    transform: Rc<F>,
    downstream: Observer<Out>,
}

impl<In, Out, F> MotionObserver<In> for MapObserver<F, Out>
where
    F: Fn(In) -> Out,
{
    fn next(&self, value: In) {
        self.downstream.next((self.transform)(value));
    }

    fn state(&self, state: MotionState) {
        self.downstream.state(state);
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Forwards values for which `predicate` holds.
///
/// State transitions are forwarded unconditionally: they describe the
/// activity of the source, not whether individual values pass.
pub struct Filter<P> {
    predicate: Rc<P>,
}

pub fn filter<P>(predicate: P) -> Filter<P> {
    Filter {
        predicate: Rc::new(predicate),
    }
}

impl<T, P> Operator<T, T> for Filter<P>
where
    T: 'static,
    P: Fn(&T) -> bool + 'static,
{
    fn connect(&self, downstream: Observer<T>) -> Observer<T> {
        Rc::new(FilterObserver {
            predicate: Rc::clone(&self.predicate),
            downstream,
        })
    }
}

struct FilterObserver<P, T> {
    predicate: Rc<P>,
    downstream: Observer<T>,
}

impl<T, P> MotionObserver<T> for FilterObserver<P, T>
where
    P: Fn(&T) -> bool,
{
    fn next(&self, value: T) {
        if (self.predicate)(&value) {
            self.downstream.next(value);
        }
    }

    fn state(&self, state: MotionState) {
        self.downstream.state(state);
    }
}

// =============================================================================
// CHAINING
// =============================================================================

impl<T: 'static> MotionObservable<T> {
    /// `compose(map(transform))`.
    pub fn map<U, F>(&self, transform: F) -> MotionObservable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.compose(map(transform))
    }

    /// `compose(filter(predicate))`.
    pub fn filter<P>(&self, predicate: P) -> MotionObservable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.compose(filter(predicate))
    }
}

// =============================================================================
// TESTS
// =============================================================================
