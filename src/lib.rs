//! # spark-motion
//!
//! Reactive motion streams for Rust UIs.
//!
//! Behavior (gesture-driven or time-driven mutation of object properties) is
//! described as composable push streams with an explicit connect/disconnect
//! lifecycle, then applied to host objects through one write sink.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals): hosts
//! can expose properties as signals and watch runtime activity as a signal.
//!
//! ## Architecture
//!
//! ```text
//! producer (GestureSource / Tween / MotionSource)
//!     → MotionObservable::compose(operator)*
//!     → MotionRuntime::write(stream, target, property)
//!     → PropertyRef::set(target, value)
//! ```
//!
//! Every stream carries two channels: values (`next`) and activity
//! (`state(Active | AtRest)`). The runtime ORs the activity of everything it
//! owns.
//!
//! Everything is single-threaded and synchronous: a producer's emission runs
//! through the whole chain before returning.
//!
//! ## Modules
//!
//! - [`observable`] - MotionObservable, observers, subscriptions, sources
//! - [`operators`] - map, filter, write, share, merge
//! - [`gesture`] - recognizer seam, phase filters, centroid/anchor geometry
//! - [`interaction`] - Interaction trait, Draggable/Pinchable/Rotatable, AdjustsAnchorPoint
//! - [`runtime`] - MotionRuntime, the owner of every write
//! - [`tween`] - reactive tween parameters and the animation driver seam

pub mod config;
pub mod error;
pub mod gesture;
pub mod interaction;
pub mod observable;
pub mod operators;
pub mod property;
pub mod runtime;
pub mod tween;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{RuntimeConfig, DEFAULT_DURATION};
pub use error::{MotionError, Result};

pub use observable::{
    Disconnector, FnObserver, MotionObservable, MotionObserver, MotionSource, NoopObserver,
    Observer, Subscription,
};

pub use operators::{filter, map, merge, Operator, Writable};

pub use property::{BoundProperty, PropertyRef};

pub use gesture::{
    Centroid, DragSample, GestureEvent, GesturePhase, GestureSource, PinchSample,
    RecognitionStates, RotateSample,
};

pub use interaction::{
    AdjustsAnchorPoint, AnchorProperties, ConstraintApplicator, Draggable, Interaction,
    Pinchable, Rotatable,
};

pub use runtime::MotionRuntime;

pub use tween::{AnimationDriver, Easing, Frame, ReactiveCell, SteppedDriver, Timing, Tween};
