//! Draggable / Pinchable / Rotatable
//!
//! Recognizers report values cumulative since Began. Each interaction reads
//! the target's property when the gesture begins and writes
//! `combine(initial, payload)` for every Began/Changed event afterwards, so a
//! second gesture continues from where the first one left off.

use std::cell::RefCell;
use std::rc::Rc;

use super::{ConstraintApplicator, Interaction};
use crate::gesture::{DragSample, GestureEvent, GesturePhase, PinchSample, RotateSample};
use crate::observable::{MotionObservable, MotionObserver, Observer};
use crate::operators::Operator;
use crate::property::PropertyRef;
use crate::runtime::MotionRuntime;
use crate::types::{MotionState, Point};

// =============================================================================
// INTERACTIONS
// =============================================================================

/// Translate a target by the drag translation.
pub struct Draggable<O> {
    gesture_stream: MotionObservable<GestureEvent<DragSample>>,
    translation: PropertyRef<O, Point>,
}

impl<O> Draggable<O> {
    pub fn new(
        gesture_stream: MotionObservable<GestureEvent<DragSample>>,
        translation: PropertyRef<O, Point>,
    ) -> Self {
        Self {
            gesture_stream,
            translation,
        }
    }

    pub fn gesture_stream(&self) -> &MotionObservable<GestureEvent<DragSample>> {
        &self.gesture_stream
    }
}

impl<O: Clone + 'static> Interaction<O, Point> for Draggable<O> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<Point>) {
        let stream = relative_to_began(
            &self.gesture_stream,
            target,
            &self.translation,
            |initial, sample: &DragSample| initial + sample.translation,
        );
        runtime.write(&constraints.apply(stream), target, &self.translation);
    }
}

/// Scale a target by the pinch scale.
pub struct Pinchable<O> {
    gesture_stream: MotionObservable<GestureEvent<PinchSample>>,
    scale: PropertyRef<O, f32>,
}

impl<O> Pinchable<O> {
    pub fn new(
        gesture_stream: MotionObservable<GestureEvent<PinchSample>>,
        scale: PropertyRef<O, f32>,
    ) -> Self {
        Self {
            gesture_stream,
            scale,
        }
    }

    pub fn gesture_stream(&self) -> &MotionObservable<GestureEvent<PinchSample>> {
        &self.gesture_stream
    }
}

impl<O: Clone + 'static> Interaction<O, f32> for Pinchable<O> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<f32>) {
        let stream = relative_to_began(
            &self.gesture_stream,
            target,
            &self.scale,
            |initial, sample: &PinchSample| initial * sample.scale,
        );
        runtime.write(&constraints.apply(stream), target, &self.scale);
    }
}

/// Rotate a target by the rotation gesture's angle.
pub struct Rotatable<O> {
    gesture_stream: MotionObservable<GestureEvent<RotateSample>>,
    rotation: PropertyRef<O, f32>,
}

impl<O> Rotatable<O> {
    pub fn new(
        gesture_stream: MotionObservable<GestureEvent<RotateSample>>,
        rotation: PropertyRef<O, f32>,
    ) -> Self {
        Self {
            gesture_stream,
            rotation,
        }
    }

    pub fn gesture_stream(&self) -> &MotionObservable<GestureEvent<RotateSample>> {
        &self.gesture_stream
    }
}

impl<O: Clone + 'static> Interaction<O, f32> for Rotatable<O> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<f32>) {
        let stream = relative_to_began(
            &self.gesture_stream,
            target,
            &self.rotation,
            |initial, sample: &RotateSample| initial + sample.rotation,
        );
        runtime.write(&constraints.apply(stream), target, &self.rotation);
    }
}

// =============================================================================
// RELATIVE-TO-BEGAN
// =============================================================================

fn relative_to_began<O, P, V, F>(
    stream: &MotionObservable<GestureEvent<P>>,
    target: &O,
    property: &PropertyRef<O, V>,
    combine: F,
) -> MotionObservable<V>
where
    O: Clone + 'static,
    P: 'static,
    V: Clone + 'static,
    F: Fn(V, &P) -> V + 'static,
{
    stream.compose(RelativeToBegan {
        target: target.clone(),
        property: property.clone(),
        combine: Rc::new(combine),
    })
}

struct RelativeToBegan<O, V, F> {
    target: O,
    property: PropertyRef<O, V>,
    combine: Rc<F>,
}

impl<O, P, V, F> Operator<GestureEvent<P>, V> for RelativeToBegan<O, V, F>
where
    O: Clone + 'static,
    P: 'static,
    V: Clone + 'static,
    F: Fn(V, &P) -> V + 'static,
{
    fn connect(&self, downstream: Observer<V>) -> Observer<GestureEvent<P>> {
        Rc::new(RelativeObserver {
            target: self.target.clone(),
            property: self.property.clone(),
            combine: Rc::clone(&self.combine),
            initial: RefCell::new(None),
            downstream,
        })
    }
}

struct RelativeObserver<O, V, F> {
    target: O,
    property: PropertyRef<O, V>,
    combine: Rc<F>,
    initial: RefCell<Option<V>>,
    downstream: Observer<V>,
}

impl<O, P, V, F> MotionObserver<GestureEvent<P>> for RelativeObserver<O, V, F>
where
    O: 'static,
    V: Clone + 'static,
    F: Fn(V, &P) -> V,
{
    fn next(&self, event: GestureEvent<P>) {
        match event.phase {
            GesturePhase::Began | GesturePhase::Changed => {
                // Connected mid-gesture: capture on the first Changed.
                if event.phase == GesturePhase::Began || self.initial.borrow().is_none() {
                    let current = self.property.get(&self.target);
                    *self.initial.borrow_mut() = Some(current);
                }
                let initial = self.initial.borrow().clone();
                if let Some(initial) = initial {
                    self.downstream.next((self.combine)(initial, &event.payload));
                }
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.initial.borrow_mut().take();
            }
            GesturePhase::Possible => {}
        }
    }

    fn state(&self, state: MotionState) {
        self.downstream.state(state);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureSource;
    use std::cell::Cell;

    #[derive(Clone, Default)]
    struct View {
        translation: Rc<Cell<Point>>,
        scale: Rc<Cell<f32>>,
        rotation: Rc<Cell<f32>>,
    }

    fn translation() -> PropertyRef<View, Point> {
        PropertyRef::new("translation", |v: &View| v.translation.get(), |v: &View, p| v.translation.set(p))
    }

    fn scale() -> PropertyRef<View, f32> {
        PropertyRef::new("scale", |v: &View| v.scale.get(), |v: &View, s| v.scale.set(s))
    }

    fn rotation() -> PropertyRef<View, f32> {
        PropertyRef::new("rotation", |v: &View| v.rotation.get(), |v: &View, r| v.rotation.set(r))
    }

    fn pinch(scale: f32) -> PinchSample {
        PinchSample {
            centroid: Point::ZERO,
            scale,
        }
    }

    #[test]
    fn test_pinch_scales_relative_to_began() {
        let view = View::default();
        view.scale.set(2.0);
        let gesture = GestureSource::new();
        let mut runtime = MotionRuntime::new();
        runtime.add_interaction(&Pinchable::new(gesture.stream(), scale()), &view);

        gesture.began(pinch(1.0));
        assert_eq!(view.scale.get(), 2.0);
        gesture.changed(pinch(1.5));
        assert_eq!(view.scale.get(), 3.0);
        gesture.ended(pinch(1.5));

        // Second gesture continues from 3.0.
        gesture.began(pinch(1.0));
        gesture.changed(pinch(0.5));
        assert_eq!(view.scale.get(), 1.5);
    }

    #[test]
    fn test_drag_translates_and_tracks_activity() {
        let view = View::default();
        let gesture = GestureSource::new();
        let mut runtime = MotionRuntime::new();
        runtime.add_interaction(&Draggable::new(gesture.stream(), translation()), &view);

        gesture.began(DragSample::default());
        assert!(runtime.state().is_active());
        gesture.changed(DragSample {
            centroid: Point::new(5.0, 5.0),
            translation: Point::new(3.0, -1.0),
        });
        assert_eq!(view.translation.get(), Point::new(3.0, -1.0));

        gesture.ended(DragSample::default());
        assert!(!runtime.state().is_active());
        assert_eq!(view.translation.get(), Point::new(3.0, -1.0));
    }

    #[test]
    fn test_rotate_with_constraints() {
        let view = View::default();
        let gesture = GestureSource::new();
        let mut runtime = MotionRuntime::new();
        let clamp = ConstraintApplicator::new(|s: MotionObservable<f32>| s.map(|r: f32| r.min(1.0)));
        runtime.add_interaction_with(&Rotatable::new(gesture.stream(), rotation()), &view, &clamp);

        gesture.began(RotateSample {
            centroid: Point::ZERO,
            rotation: 0.0,
        });
        gesture.changed(RotateSample {
            centroid: Point::ZERO,
            rotation: 0.25,
        });
        assert_eq!(view.rotation.get(), 0.25);
        gesture.changed(RotateSample {
            centroid: Point::ZERO,
            rotation: 3.0,
        });
        assert_eq!(view.rotation.get(), 1.0);
    }

    #[test]
    fn test_mid_gesture_connection_captures_on_first_change() {
        let view = View::default();
        view.scale.set(1.0);
        let gesture = GestureSource::new();
        gesture.began(pinch(1.0));

        let mut runtime = MotionRuntime::new();
        runtime.add_interaction(&Pinchable::new(gesture.stream(), scale()), &view);
        gesture.changed(pinch(2.0));
        assert_eq!(view.scale.get(), 2.0);
    }
}
