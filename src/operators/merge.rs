//! merge - several upstreams into one stream
//!
//! Values interleave in emission order. Downstream state is `Active` iff at
//! least one upstream is active, and only transitions of that aggregate are
//! forwarded.

use std::rc::Rc;

use crate::observable::activity::ActivityAggregate;
use crate::observable::{Disconnector, MotionObservable, MotionObserver, Observer};
use crate::types::MotionState;

/// Merge `sources` into one stream with OR-aggregated state.
pub fn merge<T: 'static>(sources: Vec<MotionObservable<T>>) -> MotionObservable<T> {
    MotionObservable::new(move |observer: Observer<T>| {
        let aggregate = Rc::new(ActivityAggregate::new());
        let slots: Vec<usize> = sources.iter().map(|_| aggregate.register()).collect();

        let disconnectors: Vec<Disconnector> = sources
            .iter()
            .zip(slots)
            .map(|(source, slot)| {
                source.connect(Rc::new(MergeObserver {
                    slot,
                    aggregate: Rc::clone(&aggregate),
                    downstream: Rc::clone(&observer),
                }))
            })
            .collect();

        Box::new(move || {
            for disconnect in disconnectors {
                disconnect();
            }
        })
    })
}

struct MergeObserver<T> {
    slot: usize,
    aggregate: Rc<ActivityAggregate>,
    downstream: Observer<T>,
}

impl<T> MotionObserver<T> for MergeObserver<T> {
    fn next(&self, value: T) {
        self.downstream.next(value);
    }

    fn state(&self, state: MotionState) {
        if let Some(aggregate) = self.aggregate.update(self.slot, state) {
            self.downstream.state(aggregate);
        }
    }
}

impl<T: 'static> MotionObservable<T> {
    /// `merge(vec![self, other])`.
    pub fn merge_with(&self, other: &MotionObservable<T>) -> MotionObservable<T> {
        merge(vec![self.clone(), other.clone()])
    }
}
