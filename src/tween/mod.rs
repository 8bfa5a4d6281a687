//! Tween - time-driven motion through the same write sink as gestures
//!
//! - **cell** - [`ReactiveCell`], the single-slot observable every tween parameter lives in
//! - **driver** - [`AnimationDriver`] seam and the deterministic [`SteppedDriver`]
//! - **animation** - [`Tween`] parameters, keyframe evaluation, playback streams

mod animation;
mod cell;
mod driver;

pub use animation::{Easing, Evaluator, Tween};
pub use cell::ReactiveCell;
pub use driver::{AnimationDriver, Frame, FrameCallback, SteppedDriver, Timing};
