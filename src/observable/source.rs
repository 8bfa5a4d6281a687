//! MotionSource - host-driven producer handle
//!
//! The bridge between host callbacks (button clicks, timers, recognizers) and
//! the stream world. Each subscriber to [`MotionSource::observable`] is
//! registered until its subscription disconnects; `next`/`state` fan out to a
//! snapshot of the current registrations, so observers may unsubscribe (or
//! subscribe) while an emission is in flight.
//!
//! # Example
//!
//! ```ignore
//! let clicks = MotionSource::new();
//! let sub = clicks.observable().subscribe_next(|label: &str| println!("{label}"));
//!
//! // In the host's click handler:
//! clicks.state(MotionState::Active);
//! clicks.next("foo");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::stream::MotionObservable;
use super::observer::Observer;
use crate::types::MotionState;

struct SourceRegistry<T> {
    observers: Vec<(usize, Observer<T>)>,
    next_id: usize,
}

impl<T> SourceRegistry<T> {
    fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Producer handle that pushes values into every connected observer.
pub struct MotionSource<T> {
    registry: Rc<RefCell<SourceRegistry<T>>>,
}

impl<T> Clone for MotionSource<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: Clone + 'static> Default for MotionSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> MotionSource<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(SourceRegistry::new())),
        }
    }

    /// Observable whose connector registers the observer with this source.
    pub fn observable(&self) -> MotionObservable<T> {
        let registry = Rc::clone(&self.registry);
        MotionObservable::new(move |observer| {
            let id = {
                let mut reg = registry.borrow_mut();
                let id = reg.next_id();
                reg.observers.push((id, observer));
                id
            };

            let registry = Rc::clone(&registry);
            Box::new(move || {
                let removed = {
                    let mut reg = registry.borrow_mut();
                    let index = reg.observers.iter().position(|(oid, _)| *oid == id);
                    index.map(|i| reg.observers.remove(i))
                };
                drop(removed);
            })
        })
    }

    /// Emit a value to every connected observer.
    pub fn next(&self, value: T) {
        for observer in self.snapshot() {
            observer.next(value.clone());
        }
    }

    /// Emit a state transition to every connected observer.
    pub fn state(&self, state: MotionState) {
        for observer in self.snapshot() {
            observer.state(state);
        }
    }

    /// Number of currently connected observers.
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    fn snapshot(&self) -> Vec<Observer<T>> {
        self.registry
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
