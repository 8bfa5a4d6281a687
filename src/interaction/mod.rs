//! Interactions - reusable bundles of writes
//!
//! An [`Interaction`] is anything that, given a runtime, a target and
//! optional constraints, registers writes on the runtime. It owns no
//! subscriptions itself; everything it connects is owned by the runtime.
//!
//! # API
//!
//! - `Draggable` / `Pinchable` / `Rotatable` - gesture-driven transforms
//! - `AdjustsAnchorPoint` - keeps a target fixed while pinch/rotate move its pivot
//! - `ConstraintApplicator` - stream-to-stream stages an interaction threads
//!   its output through before writing
//!
//! # Example
//!
//! ```ignore
//! let pinch = GestureSource::new();
//! let pinchable = Pinchable::new(pinch.stream(), scale_property);
//!
//! let clamp = ConstraintApplicator::new(|s: MotionObservable<f32>| s.map(|v| v.clamp(0.5, 4.0)));
//! runtime.add_interaction_with(&pinchable, &view, &clamp);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::observable::MotionObservable;
use crate::runtime::MotionRuntime;

mod anchor;
mod gestures;

pub use anchor::{AdjustsAnchorPoint, AnchorProperties};
pub use gestures::{Draggable, Pinchable, Rotatable};

// =============================================================================
// INTERACTION
// =============================================================================

/// Behavior that registers writes on a runtime for one target.
///
/// `C` is the value type constraints operate on (`()` when the interaction
/// takes none).
pub trait Interaction<O, C = ()> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<C>);
}

// =============================================================================
// CONSTRAINTS
// =============================================================================

type Constraint<C> = Rc<dyn Fn(MotionObservable<C>) -> MotionObservable<C>>;

/// Ordered chain of stream stages applied before a write.
pub struct ConstraintApplicator<C> {
    stages: Vec<Constraint<C>>,
}

impl<C> Clone for ConstraintApplicator<C> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<C> fmt::Debug for ConstraintApplicator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintApplicator")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<C: 'static> Default for ConstraintApplicator<C> {
    fn default() -> Self {
        Self::none()
    }
}

impl<C: 'static> ConstraintApplicator<C> {
    /// No stages; `apply` returns the stream unchanged.
    pub fn none() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn new<F>(stage: F) -> Self
    where
        F: Fn(MotionObservable<C>) -> MotionObservable<C> + 'static,
    {
        Self::none().then(stage)
    }

    /// Append a stage after the existing ones.
    pub fn then<F>(mut self, stage: F) -> Self
    where
        F: Fn(MotionObservable<C>) -> MotionObservable<C> + 'static,
    {
        self.stages.push(Rc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Thread `stream` through every stage in order.
    pub fn apply(&self, stream: MotionObservable<C>) -> MotionObservable<C> {
        self.stages.iter().fold(stream, |stream, stage| stage(stream))
    }
}
