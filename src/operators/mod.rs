//! Operators - typed observer transforms used by `compose`
//!
//! An [`Operator<In, Out>`] turns the downstream `Observer<Out>` into the
//! `Observer<In>` that gets connected upstream. Every operator forwards the
//! `state` channel unless its contract says otherwise.
//!
//! - **transform** - [`map`], [`filter`]
//! - **write** - [`Writable`] sinks, `write`/`write_property` side-effect taps
//! - **share** - explicit multicast point with a ref-counted upstream connection
//! - **merge** - several upstreams, state is the OR of upstream activity

mod merge;
mod share;
mod transform;
mod write;

pub use merge::merge;
pub use transform::{filter, map, Filter, Map};
pub use write::Writable;

use crate::observable::Observer;

/// Transform from a downstream observer to an upstream observer.
pub trait Operator<In, Out>: 'static {
    fn connect(&self, downstream: Observer<Out>) -> Observer<In>;
}

/// Closures of the right shape are operators.
impl<In: 'static, Out: 'static, F> Operator<In, Out> for F
where
    F: Fn(Observer<Out>) -> Observer<In> + 'static,
{
    fn connect(&self, downstream: Observer<Out>) -> Observer<In> {
        self(downstream)
    }
}

