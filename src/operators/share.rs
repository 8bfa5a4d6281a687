//! share - explicit multicast point
//!
//! The shared observable keeps at most ONE connection to its upstream. The
//! first downstream subscriber connects it, the last one to leave disconnects
//! it. Producers with side effects at connect time (registering a platform
//! listener, for example) therefore run them once for any number of writes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::observable::{Disconnector, MotionObservable, MotionObserver, Observer};
use crate::types::MotionState;

struct SharedInner<T> {
    observers: RefCell<Vec<(usize, Observer<T>)>>,
    next_id: Cell<usize>,
    upstream: RefCell<Option<Disconnector>>,
    connecting: Cell<bool>,
    /// Last state seen from upstream, replayed to late subscribers.
    state: Cell<MotionState>,
}

impl<T> SharedInner<T> {
    fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            upstream: RefCell::new(None),
            connecting: Cell::new(false),
            state: Cell::new(MotionState::AtRest),
        }
    }

    fn add(&self, observer: Observer<T>) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    fn remove(&self, id: usize) {
        let removed = {
            let mut observers = self.observers.borrow_mut();
            let index = observers.iter().position(|(oid, _)| *oid == id);
            index.map(|i| observers.remove(i))
        };
        drop(removed);
    }

    fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    fn is_connected(&self) -> bool {
        self.connecting.get() || self.upstream.borrow().is_some()
    }

    fn snapshot(&self) -> Vec<Observer<T>> {
        self.observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }

    fn disconnect_upstream(&self) {
        let upstream = self.upstream.borrow_mut().take();
        self.state.set(MotionState::AtRest);
        if let Some(disconnect) = upstream {
            disconnect();
        }
    }
}

/// The single observer connected upstream.
struct SharedForwarder<T> {
    inner: Weak<SharedInner<T>>,
}

impl<T: Clone> MotionObserver<T> for SharedForwarder<T> {
    fn next(&self, value: T) {
        if let Some(inner) = self.inner.upgrade() {
            for observer in inner.snapshot() {
                observer.next(value.clone());
            }
        }
    }

    fn state(&self, state: MotionState) {
        if let Some(inner) = self.inner.upgrade() {
            inner.state.set(state);
            for observer in inner.snapshot() {
                observer.state(state);
            }
        }
    }
}

impl<T: Clone + 'static> MotionObservable<T> {
    /// Multicast this stream through one ref-counted upstream connection.
    ///
    /// Subscribers joining while upstream is active receive `state(Active)`
    /// immediately.
    pub fn share(&self) -> MotionObservable<T> {
        let source = self.clone();
        let inner = Rc::new(SharedInner::<T>::new());

        MotionObservable::new(move |observer: Observer<T>| {
            let id = inner.add(Rc::clone(&observer));

            if !inner.is_connected() {
                inner.connecting.set(true);
                let forwarder: Observer<T> = Rc::new(SharedForwarder {
                    inner: Rc::downgrade(&inner),
                });
                let disconnect = source.connect(forwarder);
                inner.connecting.set(false);

                if inner.observer_count() == 0 {
                    // Everyone left while upstream was still connecting.
                    disconnect();
                } else {
                    *inner.upstream.borrow_mut() = Some(disconnect);
                }
            } else if inner.state.get().is_active() {
                observer.state(MotionState::Active);
            }

            let inner = Rc::clone(&inner);
            Box::new(move || {
                inner.remove(id);
                if inner.observer_count() == 0 {
                    inner.disconnect_upstream();
                }
            })
        })
    }
}
