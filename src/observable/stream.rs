//! MotionObservable - cold, push-based stream defined by its connect function

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::observer::{gate, FnObserver, MotionObserver, NoopObserver, Observer};
use super::subscription::{Disconnector, Subscription};
use crate::operators::Operator;

type Connector<T> = dyn Fn(Observer<T>) -> Disconnector;

/// A cold stream of values of type `T` plus a [`MotionState`](crate::MotionState) channel.
///
/// The observable is nothing but its connector. Creating one has no side
/// effects; the connector runs synchronously on every `subscribe`, so each
/// subscription gets its own independent lifecycle.
///
/// # Example
///
/// ```ignore
/// let source = MotionSource::new();
/// let sub = source
///     .observable()
///     .filter(|s: &&str| *s != "skip")
///     .map(|s: &str| s.to_uppercase())
///     .subscribe_next(|s| println!("{s}"));
///
/// source.next("foo");
/// sub.unsubscribe();
/// ```
pub struct MotionObservable<T> {
    connector: Rc<Connector<T>>,
}

impl<T> Clone for MotionObservable<T> {
    fn clone(&self) -> Self {
        Self {
            connector: Rc::clone(&self.connector),
        }
    }
}

impl<T> fmt::Debug for MotionObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionObservable").finish_non_exhaustive()
    }
}

impl<T: 'static> MotionObservable<T> {
    /// Wrap a connect function. Nothing runs until `subscribe`.
    pub fn new<F>(connector: F) -> Self
    where
        F: Fn(Observer<T>) -> Disconnector + 'static,
    {
        Self {
            connector: Rc::new(connector),
        }
    }

    /// Observable that never emits.
    pub fn empty() -> Self {
        Self::new(|_observer| Box::new(|| {}))
    }

    /// Run the connector against `observer` and wrap the result.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: MotionObserver<T> + 'static,
    {
        self.subscribe_observer(Rc::new(observer))
    }

    /// `subscribe` for an already shared observer.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        let open = Rc::new(Cell::new(true));
        let disconnect = self.connect(gate(observer, open.clone()));
        Subscription::new(open, disconnect)
    }

    /// Subscribe with a value callback only.
    pub fn subscribe_next<F>(&self, on_next: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        self.subscribe(FnObserver::new(on_next))
    }

    /// Subscribe without an observer, for chains that end in a `write`.
    pub fn run(&self) -> Subscription {
        self.subscribe(NoopObserver)
    }

    /// Build a derived observable by threading observers through `operator`.
    ///
    /// Lazy and non-mutating: `self` is untouched and no upstream work happens
    /// until the returned observable is subscribed.
    pub fn compose<U, Op>(&self, operator: Op) -> MotionObservable<U>
    where
        U: 'static,
        Op: Operator<T, U>,
    {
        let source = self.clone();
        let operator = Rc::new(operator);
        MotionObservable::new(move |observer: Observer<U>| {
            let open = Rc::new(Cell::new(true));
            let upstream = gate(operator.connect(observer), open.clone());
            let disconnect = source.connect(upstream);
            Box::new(move || {
                open.set(false);
                disconnect();
            })
        })
    }

    /// Raw connect, without a subscription wrapper.
    pub(crate) fn connect(&self, observer: Observer<T>) -> Disconnector {
        (self.connector)(observer)
    }
}

// =============================================================================
// TESTS
// =============================================================================
