//! write - terminal side effects that still compose
//!
//! `write(sink)` applies every value to a [`Writable`] and re-emits it, so
//! state observers or further writes can hang off the same chain.
//!
//! Each subscription to a `write` chain is an independent connection to the
//! root producer. To have several writes share ONE producer connection, put
//! [`share`](crate::MotionObservable::share) upstream of the writes.

use std::rc::Rc;

use super::Operator;
use crate::observable::{MotionObservable, MotionObserver, Observer};
use crate::property::PropertyRef;
use crate::types::MotionState;

/// Destination for written values.
pub trait Writable<T> {
    fn write(&self, value: T);
}

impl<T, F> Writable<T> for F
where
    F: Fn(T),
{
    fn write(&self, value: T) {
        self(value);
    }
}

struct WriteTap<W> {
    sink: Rc<W>,
}

impl<T, W> Operator<T, T> for WriteTap<W>
where
    T: Clone + 'static,
    W: Writable<T> + 'static,
{
    fn connect(&self, downstream: Observer<T>) -> Observer<T> {
        Rc::new(WriteObserver {
            sink: Rc::clone(&self.sink),
            downstream,
        })
    }
}

struct WriteObserver<W, T> {
    sink: Rc<W>,
    downstream: Observer<T>,
}

impl<T, W> MotionObserver<T> for WriteObserver<W, T>
where
    T: Clone,
    W: Writable<T>,
{
    fn next(&self, value: T) {
        self.sink.write(value.clone());
        self.downstream.next(value);
    }

    fn state(&self, state: MotionState) {
        self.downstream.state(state);
    }
}

impl<T: Clone + 'static> MotionObservable<T> {
    /// Apply each value to `sink`, then re-emit it.
    pub fn write<W>(&self, sink: W) -> MotionObservable<T>
    where
        W: Writable<T> + 'static,
    {
        self.compose(WriteTap { sink: Rc::new(sink) })
    }

    /// `write` through a property of `target`.
    pub fn write_property<O>(&self, target: O, property: PropertyRef<O, T>) -> MotionObservable<T>
    where
        O: 'static,
    {
        self.write(property.bind(target))
    }
}
