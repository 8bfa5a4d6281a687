//! End-to-end scenarios: streams, interactions and tweens through one runtime.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use spark_motion::{
    AdjustsAnchorPoint, AnchorProperties, ConstraintApplicator, FnObserver, GestureSource,
    MotionObservable, MotionRuntime, MotionSource, MotionState, PinchSample, Pinchable, Point,
    PropertyRef, RotateSample, Rotatable, RuntimeConfig, SteppedDriver, TransformState, Tween,
};
use spark_signals::{effect, signal, Signal};

// =============================================================================
// Hosts
// =============================================================================

#[derive(Clone, Default)]
struct Button {
    text: Rc<RefCell<String>>,
    highlighted: Rc<Cell<bool>>,
}

fn text() -> PropertyRef<Button, String> {
    PropertyRef::new(
        "text",
        |b: &Button| b.text.borrow().clone(),
        |b: &Button, v: String| *b.text.borrow_mut() = v,
    )
}

fn highlighted() -> PropertyRef<Button, bool> {
    PropertyRef::new(
        "highlighted",
        |b: &Button| b.highlighted.get(),
        |b: &Button, v| b.highlighted.set(v),
    )
}

#[derive(Clone)]
struct Card {
    transform: Rc<RefCell<TransformState>>,
    translation: Rc<Cell<Point>>,
    opacity: Signal<f32>,
}

impl Card {
    fn new() -> Self {
        Self {
            transform: Rc::new(RefCell::new(TransformState::default())),
            translation: Rc::new(Cell::new(Point::ZERO)),
            opacity: signal(1.0),
        }
    }

    fn map(&self, x: Point) -> Point {
        self.transform.borrow().map_point(self.translation.get(), x)
    }
}

fn scale() -> PropertyRef<Card, f32> {
    PropertyRef::new(
        "scale",
        |c: &Card| c.transform.borrow().scale,
        |c: &Card, s| c.transform.borrow_mut().scale = s,
    )
}

fn rotation() -> PropertyRef<Card, f32> {
    PropertyRef::new(
        "rotation",
        |c: &Card| c.transform.borrow().rotation,
        |c: &Card, r| c.transform.borrow_mut().rotation = r,
    )
}

fn anchor_properties() -> AnchorProperties<Card> {
    AnchorProperties {
        pivot: PropertyRef::new(
            "pivot",
            |c: &Card| c.transform.borrow().pivot,
            |c: &Card, p| c.transform.borrow_mut().pivot = p,
        ),
        anchor_adjustment: PropertyRef::new(
            "anchor_adjustment",
            |c: &Card| c.translation.get(),
            |c: &Card, delta| c.translation.set(c.translation.get() + delta),
        ),
        transform: PropertyRef::new(
            "transform",
            |c: &Card| *c.transform.borrow(),
            |c: &Card, t| *c.transform.borrow_mut() = t,
        ),
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn button_text_pipeline_with_state_restyle() {
    let mut runtime = MotionRuntime::new();
    let button = Button::default();
    let source = MotionSource::new();
    let stream = source.observable();

    let text_stream = stream
        .filter(|s: &String| s != "skip")
        .map(|s: String| s.to_uppercase());
    runtime.write(&text_stream, &button, &text());

    let restyle = Rc::new(Cell::new(false));
    let r = restyle.clone();
    let _state_sub = stream.subscribe(FnObserver::state_only(move |s: MotionState| r.set(s.is_active())));

    source.state(MotionState::Active);
    source.next("foo".to_string());
    source.next("skip".to_string());
    source.next("bar".to_string());
    assert!(restyle.get());
    source.state(MotionState::AtRest);

    assert_eq!(*button.text.borrow(), "BAR");
    assert!(!restyle.get());
    assert_eq!(runtime.state(), MotionState::AtRest);
}

#[test]
fn activity_writes_to_second_property() {
    let mut runtime = MotionRuntime::new();
    let button = Button::default();
    let source = MotionSource::<String>::new();
    runtime.write(&source.observable(), &button, &text());

    // Host-side: reflect runtime activity onto the button through spark-signals.
    let activity = runtime.activity();
    let target = button.clone();
    let _stop = effect(move || {
        highlighted().set(&target, activity.get().is_active());
    });

    source.state(MotionState::Active);
    assert!(button.highlighted.get());
    source.state(MotionState::AtRest);
    assert!(!button.highlighted.get());
}

#[test]
fn pinch_and_rotate_anchor_on_disjoint_properties() {
    let card = Card::new();
    *card.transform.borrow_mut() = TransformState {
        pivot: Point::new(50.0, 50.0),
        scale: 1.0,
        rotation: 0.0,
    };
    let pinch = GestureSource::new();
    let rotate = GestureSource::new();
    let pinchable = Pinchable::new(pinch.stream(), scale());
    let rotatable = Rotatable::new(rotate.stream(), rotation());

    let mut runtime = MotionRuntime::new();
    runtime.add_interaction(
        &AdjustsAnchorPoint::from_interactions(&pinchable, &rotatable, anchor_properties()),
        &card,
    );
    runtime.add_interaction(&pinchable, &card);
    runtime.add_interaction(&rotatable, &card);
    assert_eq!(runtime.subscription_count(), 6);

    let fingers = Point::new(10.0, 20.0);
    pinch.began(PinchSample {
        centroid: fingers,
        scale: 1.0,
    });
    rotate.began(RotateSample {
        centroid: fingers,
        rotation: 0.0,
    });

    // First CHANGED moves the pivot under the fingers without a jump.
    let probe = Point::new(30.0, 40.0);
    let before = card.map(probe);
    pinch.changed(PinchSample {
        centroid: fingers,
        scale: 1.0,
    });
    assert_eq!(card.transform.borrow().pivot, fingers);
    assert!(before.approx_eq(card.map(probe), 1e-3));

    // Scaling now happens around the fingers: they stay put.
    let under_fingers = card.map(fingers);
    pinch.changed(PinchSample {
        centroid: fingers,
        scale: 2.0,
    });
    rotate.changed(RotateSample {
        centroid: fingers,
        rotation: 0.5,
    });
    assert_eq!(card.transform.borrow().scale, 2.0);
    assert_eq!(card.transform.borrow().rotation, 0.5);
    assert!(under_fingers.approx_eq(card.map(fingers), 1e-3));
    assert!(runtime.state().is_active());

    pinch.ended(PinchSample {
        centroid: fingers,
        scale: 2.0,
    });
    assert!(runtime.state().is_active());
    rotate.ended(RotateSample {
        centroid: fingers,
        rotation: 0.5,
    });
    assert!(!runtime.state().is_active());
}

#[test]
fn constrained_pinch_clamps_scale() {
    let card = Card::new();
    let pinch = GestureSource::new();
    let mut runtime = MotionRuntime::new();
    let clamp = ConstraintApplicator::new(|s: MotionObservable<f32>| s.map(|v: f32| v.clamp(0.5, 3.0)));
    runtime.add_interaction_with(&Pinchable::new(pinch.stream(), scale()), &card, &clamp);

    pinch.began(PinchSample {
        centroid: Point::ZERO,
        scale: 1.0,
    });
    pinch.changed(PinchSample {
        centroid: Point::ZERO,
        scale: 10.0,
    });
    assert_eq!(card.transform.borrow().scale, 3.0);
}

#[test]
fn tween_reconfigured_before_playback() {
    let driver = SteppedDriver::new();
    let mut runtime = MotionRuntime::new().with_driver(driver.clone());
    let card = Card::new();
    let opacity = PropertyRef::from_signal("opacity", |c: &Card| c.opacity.clone());

    let fade = Tween::of_float(card.clone(), opacity, &[0.0, 100.0]);
    fade.set_duration(ms(300));
    fade.set_float_values(&[0.0, 50.0]);
    fade.start(&mut runtime).unwrap();

    let transitions = Rc::new(RefCell::new(Vec::new()));
    let t = transitions.clone();
    let activity = runtime.activity();
    let _stop = effect(move || t.borrow_mut().push(activity.get()));

    driver.advance(ms(150));
    assert_eq!(card.opacity.get(), 25.0);
    driver.advance(ms(150));
    assert_eq!(card.opacity.get(), 50.0);

    assert_eq!(
        *transitions.borrow(),
        vec![MotionState::Active, MotionState::AtRest]
    );
}

#[test]
fn tween_and_gesture_share_the_write_sink() {
    let driver = SteppedDriver::new();
    let config = RuntimeConfig::default().with_trace_writes(true);
    let mut runtime = MotionRuntime::with_config(config).with_driver(driver.clone());
    let card = Card::new();

    let settle = Tween::of_float(card.clone(), scale(), &[1.5]);
    settle.set_duration(ms(100));
    runtime.add_interaction(&settle, &card);

    let pinch = GestureSource::new();
    runtime.add_interaction(&Pinchable::new(pinch.stream(), scale()), &card);

    driver.advance(ms(50));
    assert_eq!(card.transform.borrow().scale, 1.25);

    pinch.began(PinchSample {
        centroid: Point::ZERO,
        scale: 1.0,
    });
    pinch.changed(PinchSample {
        centroid: Point::ZERO,
        scale: 2.0,
    });
    assert_eq!(card.transform.borrow().scale, 2.5);

    // Last write wins: the tween overwrites on its next frame.
    driver.advance(ms(50));
    assert_eq!(card.transform.borrow().scale, 1.5);
}

#[test]
fn runtime_teardown_detaches_everything() {
    let driver = SteppedDriver::new();
    let pinch = GestureSource::new();
    let card = Card::new();
    {
        let mut runtime = MotionRuntime::new().with_driver(driver.clone());
        runtime.add_interaction(&Pinchable::new(pinch.stream(), scale()), &card);
        Tween::of_float(card.clone(), rotation(), &[0.0, 1.0])
            .start(&mut runtime)
            .unwrap();
        assert_eq!(pinch.observer_count(), 1);
        assert_eq!(driver.active_count(), 1);
    }

    assert_eq!(pinch.observer_count(), 0);
    assert_eq!(driver.active_count(), 0);
    pinch.changed(PinchSample {
        centroid: Point::ZERO,
        scale: 4.0,
    });
    assert_eq!(card.transform.borrow().scale, 1.0);
}
