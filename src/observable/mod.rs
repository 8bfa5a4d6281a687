//! Observable Core - push streams with explicit connect/disconnect
//!
//! - **observer** - [`MotionObserver`] two-channel interface (`next` + `state`)
//! - **stream** - [`MotionObservable`], the connector wrapper with `subscribe`/`compose`
//! - **subscription** - [`Subscription`], idempotent re-entrant-safe disconnect
//! - **source** - [`MotionSource`], host-driven producer with snapshot fan-out

pub(crate) mod activity;
mod stream;
mod observer;
mod source;
mod subscription;

pub use stream::MotionObservable;
pub use observer::{FnObserver, MotionObserver, NoopObserver, Observer};
pub use source::MotionSource;
pub use subscription::{Disconnector, Subscription};
