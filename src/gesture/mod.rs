//! Gesture Seam - phase-tagged streams from external recognizers
//!
//! Concrete recognizers (pointer state machines) live in the host. They report
//! phase transitions into a [`GestureSource`], which turns them into a motion
//! stream of [`GestureEvent`]s:
//!
//! ```text
//! Possible → Began → Changed* → (Ended | Cancelled) → Possible
//!            │                   │
//!            state(Active)       state(AtRest)
//! ```
//!
//! # API
//!
//! - `GestureSource::began/changed/ended/cancelled` - report transitions
//! - `stream.on_recognition_state(phase)` - keep events of one phase
//! - `stream.on_recognition_states(flags)` - keep events of several phases
//! - `stream.centroid()` - map to the gesture centroid
//! - `stream.anchored(target, transform)` - compensating translation for a pivot move

use bitflags::bitflags;

use crate::types::Point;

mod operators;
mod source;

pub use operators::{anchored, centroid, on_recognition_state, on_recognition_states, Anchored};
pub use source::GestureSource;

// =============================================================================
// PHASES
// =============================================================================

/// Recognition phase reported by a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// The flag for this phase.
    pub fn flag(self) -> RecognitionStates {
        match self {
            Self::Possible => RecognitionStates::POSSIBLE,
            Self::Began => RecognitionStates::BEGAN,
            Self::Changed => RecognitionStates::CHANGED,
            Self::Ended => RecognitionStates::ENDED,
            Self::Cancelled => RecognitionStates::CANCELLED,
        }
    }

    /// Began or Changed.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// Ended or Cancelled.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

bitflags! {
    /// Set of recognition phases, for filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RecognitionStates: u8 {
        const POSSIBLE  = 1 << 0;
        const BEGAN     = 1 << 1;
        const CHANGED   = 1 << 2;
        const ENDED     = 1 << 3;
        const CANCELLED = 1 << 4;
        const IN_PROGRESS = Self::BEGAN.bits() | Self::CHANGED.bits();
        const FINISHED = Self::ENDED.bits() | Self::CANCELLED.bits();
    }
}

// =============================================================================
// EVENTS & PAYLOADS
// =============================================================================

/// One recognizer report: the phase plus a phase-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent<P> {
    pub phase: GesturePhase,
    pub payload: P,
}

impl<P> GestureEvent<P> {
    pub fn new(phase: GesturePhase, payload: P) -> Self {
        Self { phase, payload }
    }
}

/// Payloads that carry a centroid in target-local coordinates.
pub trait Centroid {
    fn centroid(&self) -> Point;
}

/// Single-pointer drag. `translation` is cumulative since Began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    pub centroid: Point,
    pub translation: Point,
}

/// Two-pointer pinch. `scale` is cumulative since Began (1.0 = unchanged).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSample {
    pub centroid: Point,
    pub scale: f32,
}

/// Two-pointer rotation. `rotation` is cumulative since Began, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateSample {
    pub centroid: Point,
    pub rotation: f32,
}

impl Centroid for DragSample {
    fn centroid(&self) -> Point {
        self.centroid
    }
}

impl Centroid for PinchSample {
    fn centroid(&self) -> Point {
        self.centroid
    }
}

impl Centroid for RotateSample {
    fn centroid(&self) -> Point {
        self.centroid
    }
}

impl Centroid for Point {
    fn centroid(&self) -> Point {
        *self
    }
}
