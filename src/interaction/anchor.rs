//! AdjustsAnchorPoint - pinch/rotate around the fingers, not the pivot
//!
//! For each of the pinch and rotate gestures, on every CHANGED event:
//!
//! 1. write the compensating translation (`anchored`) to `anchor_adjustment`
//! 2. write the event centroid to `pivot`
//!
//! Both writes are fed by one `share()`d stream per gesture, so the
//! recognizer is connected once and the two writes see each event in
//! subscription order. The adjustment is computed against the pivot as it
//! was before this event's centroid lands.

use super::{ConstraintApplicator, Interaction, Pinchable, Rotatable};
use crate::gesture::{Centroid, GestureEvent, GesturePhase, PinchSample, RotateSample};
use crate::observable::MotionObservable;
use crate::property::PropertyRef;
use crate::runtime::MotionRuntime;
use crate::types::{Point, TransformState};

/// The target properties `AdjustsAnchorPoint` reads and writes.
///
/// `anchor_adjustment` receives a delta per event; the host setter is
/// expected to accumulate it into the target's translation.
pub struct AnchorProperties<O> {
    pub pivot: PropertyRef<O, Point>,
    pub anchor_adjustment: PropertyRef<O, Point>,
    pub transform: PropertyRef<O, TransformState>,
}

impl<O> Clone for AnchorProperties<O> {
    fn clone(&self) -> Self {
        Self {
            pivot: self.pivot.clone(),
            anchor_adjustment: self.anchor_adjustment.clone(),
            transform: self.transform.clone(),
        }
    }
}

/// Composite interaction over a pinch and a rotate gesture.
pub struct AdjustsAnchorPoint<O> {
    pinch: MotionObservable<GestureEvent<PinchSample>>,
    rotate: MotionObservable<GestureEvent<RotateSample>>,
    properties: AnchorProperties<O>,
}

impl<O> AdjustsAnchorPoint<O> {
    pub fn new(
        pinch: MotionObservable<GestureEvent<PinchSample>>,
        rotate: MotionObservable<GestureEvent<RotateSample>>,
        properties: AnchorProperties<O>,
    ) -> Self {
        Self {
            pinch,
            rotate,
            properties,
        }
    }

    /// Build from the gesture streams of existing interactions.
    pub fn from_interactions<T>(
        pinchable: &Pinchable<T>,
        rotatable: &Rotatable<T>,
        properties: AnchorProperties<O>,
    ) -> Self {
        Self::new(
            pinchable.gesture_stream().clone(),
            rotatable.gesture_stream().clone(),
            properties,
        )
    }
}

impl<O: Clone + 'static> AdjustsAnchorPoint<O> {
    fn adjust_on_changed<P>(
        &self,
        runtime: &mut MotionRuntime,
        target: &O,
        stream: &MotionObservable<GestureEvent<P>>,
    ) where
        P: Centroid + Clone + 'static,
    {
        let changed = stream.on_recognition_state(GesturePhase::Changed).share();

        // Adjustment first: it reads the pivot the second write replaces.
        let adjustment = changed.anchored(target.clone(), self.properties.transform.clone());
        runtime.write(&adjustment, target, &self.properties.anchor_adjustment);
        runtime.write(&changed.centroid(), target, &self.properties.pivot);
    }
}

impl<O: Clone + 'static> Interaction<O> for AdjustsAnchorPoint<O> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, _constraints: &ConstraintApplicator<()>) {
        self.adjust_on_changed(runtime, target, &self.pinch);
        self.adjust_on_changed(runtime, target, &self.rotate);
    }
}
