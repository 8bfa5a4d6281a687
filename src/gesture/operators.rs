//! Gesture operators - phase filtering and pivot geometry

use std::rc::Rc;

use super::{Centroid, GestureEvent, GesturePhase, RecognitionStates};
use crate::observable::{MotionObservable, MotionObserver, Observer};
use crate::operators::{filter, map, Filter, Map, Operator};
use crate::property::PropertyRef;
use crate::types::{MotionState, Point, TransformState};

// =============================================================================
// PHASE FILTERS
// =============================================================================

/// Keep only events reported in `phase`. State passes through.
pub fn on_recognition_state<P>(phase: GesturePhase) -> Filter<impl Fn(&GestureEvent<P>) -> bool> {
    on_recognition_states(phase.flag())
}

/// Keep only events whose phase is in `states`. State passes through.
pub fn on_recognition_states<P>(
    states: RecognitionStates,
) -> Filter<impl Fn(&GestureEvent<P>) -> bool> {
    filter(move |event: &GestureEvent<P>| states.contains(event.phase.flag()))
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Map each event to its payload's centroid.
pub fn centroid<P: Centroid>() -> Map<impl Fn(GestureEvent<P>) -> Point> {
    map(|event: GestureEvent<P>| event.payload.centroid())
}

/// Translation that keeps a target visually fixed when its pivot moves to
/// the event centroid.
///
/// With `p` the current pivot, `p'` the new one and `R·S` the target's
/// rotation and scale, the emitted adjustment is `(I - R·S)(p - p')`.
///
/// The current pivot is read from the target on every event, so this must
/// observe an event BEFORE anything writes that event's centroid to the
/// pivot. `AdjustsAnchorPoint` subscribes its anchor write first for that
/// reason.
pub struct Anchored<O> {
    target: O,
    transform: PropertyRef<O, TransformState>,
}

pub fn anchored<O>(target: O, transform: PropertyRef<O, TransformState>) -> Anchored<O> {
    Anchored { target, transform }
}

impl<O, P> Operator<GestureEvent<P>, Point> for Anchored<O>
where
    O: Clone + 'static,
    P: Centroid + 'static,
{
    fn connect(&self, downstream: Observer<Point>) -> Observer<GestureEvent<P>> {
        Rc::new(AnchoredObserver {
            target: self.target.clone(),
            transform: self.transform.clone(),
            downstream,
        })
    }
}

struct AnchoredObserver<O> {
    target: O,
    transform: PropertyRef<O, TransformState>,
    downstream: Observer<Point>,
}

impl<O: 'static, P: Centroid> MotionObserver<GestureEvent<P>> for AnchoredObserver<O> {
    fn next(&self, event: GestureEvent<P>) {
        let current = self.transform.get(&self.target);
        let delta = current.pivot - event.payload.centroid();
        self.downstream.next(delta - current.apply_linear(delta));
    }

    fn state(&self, state: MotionState) {
        self.downstream.state(state);
    }
}

// =============================================================================
// CHAINING
// =============================================================================

impl<P: Clone + 'static> MotionObservable<GestureEvent<P>> {
    pub fn on_recognition_state(&self, phase: GesturePhase) -> Self {
        self.compose(on_recognition_state::<P>(phase))
    }

    pub fn on_recognition_states(&self, states: RecognitionStates) -> Self {
        self.compose(on_recognition_states::<P>(states))
    }
}

impl<P: Centroid + 'static> MotionObservable<GestureEvent<P>> {
    pub fn centroid(&self) -> MotionObservable<Point> {
        self.compose(centroid::<P>())
    }

    pub fn anchored<O>(&self, target: O, transform: PropertyRef<O, TransformState>) -> MotionObservable<Point>
    where
        O: Clone + 'static,
    {
        self.compose(anchored(target, transform))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureSource, PinchSample};
    use crate::observable::FnObserver;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Next(Point),
        State(MotionState),
    }

    #[test]
    fn test_changed_filter_brackets_centroids() {
        let gesture = GestureSource::<Point>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let values = log.clone();
        let states = log.clone();
        let _sub = gesture
            .stream()
            .on_recognition_state(GesturePhase::Changed)
            .centroid()
            .subscribe(
                FnObserver::new(move |p| values.borrow_mut().push(Seen::Next(p)))
                    .on_state(move |s| states.borrow_mut().push(Seen::State(s))),
            );

        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        gesture.began(p0);
        gesture.changed(p1);
        gesture.changed(p2);
        gesture.ended(p2);

        assert_eq!(
            *log.borrow(),
            vec![
                Seen::State(MotionState::Active),
                Seen::Next(p1),
                Seen::Next(p2),
                Seen::State(MotionState::AtRest),
            ]
        );
    }

    #[test]
    fn test_multiple_recognition_states() {
        let gesture = GestureSource::<i32>::new();
        let phases = Rc::new(RefCell::new(Vec::new()));
        let p = phases.clone();
        let _sub = gesture
            .stream()
            .on_recognition_states(RecognitionStates::BEGAN | RecognitionStates::ENDED)
            .subscribe_next(move |e: GestureEvent<i32>| p.borrow_mut().push(e.phase));

        gesture.began(0);
        gesture.changed(1);
        gesture.ended(2);

        assert_eq!(*phases.borrow(), vec![GesturePhase::Began, GesturePhase::Ended]);
    }

    #[derive(Clone)]
    struct Layer(Rc<RefCell<TransformState>>);

    fn transform_property() -> PropertyRef<Layer, TransformState> {
        PropertyRef::new(
            "transform",
            |layer: &Layer| *layer.0.borrow(),
            |layer: &Layer, value| *layer.0.borrow_mut() = value,
        )
    }

    #[test]
    fn test_anchored_adjustment_keeps_mapping_fixed() {
        let layer = Layer(Rc::new(RefCell::new(TransformState {
            pivot: Point::ZERO,
            scale: 2.0,
            rotation: 0.5,
        })));
        let gesture = GestureSource::<PinchSample>::new();
        let adjustments = Rc::new(RefCell::new(Vec::new()));
        let a = adjustments.clone();
        let _sub = gesture
            .stream()
            .anchored(layer.clone(), transform_property())
            .subscribe_next(move |adj| a.borrow_mut().push(adj));

        let new_pivot = Point::new(10.0, 4.0);
        gesture.changed(PinchSample {
            centroid: new_pivot,
            scale: 2.0,
        });

        let adjustment = adjustments.borrow()[0];
        let before = *layer.0.borrow();
        let after = TransformState {
            pivot: new_pivot,
            ..before
        };

        // Any sample point maps to the same place before and after the move.
        for sample in [Point::new(3.0, -7.0), Point::new(25.0, 1.5), Point::ZERO] {
            let old = before.map_point(Point::ZERO, sample);
            let new = after.map_point(adjustment, sample);
            assert!(old.approx_eq(new, 1e-3), "{old:?} != {new:?}");
        }
    }

    #[test]
    fn test_identity_transform_needs_no_adjustment() {
        let layer = Layer(Rc::new(RefCell::new(TransformState::default())));
        let gesture = GestureSource::<Point>::new();
        let adjustments = Rc::new(RefCell::new(Vec::new()));
        let a = adjustments.clone();
        let _sub = gesture
            .stream()
            .anchored(layer, transform_property())
            .subscribe_next(move |adj| a.borrow_mut().push(adj));

        gesture.changed(Point::new(50.0, 50.0));
        assert!(adjustments.borrow()[0].approx_eq(Point::ZERO, 1e-6));
    }
}
