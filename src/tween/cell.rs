//! ReactiveCell - single-slot observable value
//!
//! A current value plus the list of its current watchers. `set` stores the
//! value and pushes it to every watcher in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::observable::{MotionObservable, MotionSource, Subscription};

pub struct ReactiveCell<T> {
    value: Rc<RefCell<T>>,
    watchers: MotionSource<T>,
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            watchers: self.watchers.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReactiveCell").field(&self.value.borrow()).finish()
    }
}

impl<T: Clone + 'static> ReactiveCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            watchers: MotionSource::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Read without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Store `value` and notify watchers. Last write wins.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        self.watchers.next(value);
    }

    /// Call `f` on every later `set`.
    pub fn watch<F>(&self, f: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        self.changes().subscribe_next(f)
    }

    /// Stream of later `set`s.
    pub fn changes(&self) -> MotionObservable<T> {
        self.watchers.observable()
    }

    /// Stream of the current value on connect, then every later `set`.
    pub fn observe(&self) -> MotionObservable<T> {
        let value = Rc::clone(&self.value);
        let changes = self.changes();
        MotionObservable::new(move |observer| {
            let current = value.borrow().clone();
            observer.next(current);
            changes.connect(observer)
        })
    }

    /// Number of connected watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.observer_count()
    }
}

impl<T: Clone + Default + 'static> Default for ReactiveCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
