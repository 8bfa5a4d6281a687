//! Errors reported by the runtime.
//!
//! The stream core itself is infallible: panics raised by user closures in a
//! connector, operator or sink propagate synchronously to whoever triggered
//! the emission. Only tween start can fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// The runtime has no animation driver installed.
    #[error("no animation driver installed on the runtime (use MotionRuntime::with_driver)")]
    NoAnimationDriver,

    /// A tween was started without any keyframe values.
    #[error("tween for property `{property}` has no keyframe values")]
    MissingKeyframes { property: String },
}

pub type Result<T> = std::result::Result<T, MotionError>;
