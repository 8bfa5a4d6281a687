//! Property-based tests for the stream core.
//!
//! Uses proptest to verify:
//! 1. map/filter preserve emission order and content
//! 2. no value reaches an observer after unsubscribe
//! 3. gesture values are always bracketed by Active/AtRest
//! 4. merge state is the OR of upstream activity

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use spark_motion::{
    merge, FnObserver, GestureSource, MotionSource, MotionState, Subscription,
};

// ============================================================================
// Ordering
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: map/filter output equals the iterator equivalent, in order.
    #[test]
    fn test_map_filter_matches_iterator(values in prop::collection::vec(-1000i32..1000, 0..64)) {
        let source = MotionSource::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = source
            .observable()
            .filter(|v: &i32| v % 3 != 0)
            .map(|v: i32| v * 2)
            .subscribe_next(move |v| s.borrow_mut().push(v));

        for v in &values {
            source.next(*v);
        }

        let expected: Vec<i32> = values.iter().filter(|v| *v % 3 != 0).map(|v| v * 2).collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }
}

// ============================================================================
// Unsubscribe silence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: unsubscribing at emission `cut` (from inside the callback)
    /// delivers exactly `cut + 1` values through any chain depth.
    #[test]
    fn test_unsubscribe_inside_callback_is_final(
        count in 1usize..32,
        cut_seed in any::<usize>(),
        depth in 0usize..4,
    ) {
        let cut = cut_seed % count;
        let source = MotionSource::new();
        let mut stream = source.observable();
        for _ in 0..depth {
            stream = stream.map(|v: usize| v);
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let handle = slot.clone();
        let sub = stream.subscribe_next(move |v: usize| {
            s.borrow_mut().push(v);
            if v == cut {
                let current = handle.borrow().clone();
                if let Some(sub) = current {
                    sub.unsubscribe();
                }
            }
        });
        *slot.borrow_mut() = Some(sub.clone());

        for v in 0..count {
            source.next(v);
        }

        prop_assert_eq!(seen.borrow().len(), cut + 1);
        prop_assert!(!sub.is_active());
        prop_assert_eq!(source.observer_count(), 0);
    }
}

// ============================================================================
// State bracketing
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Report {
    Began,
    Changed,
    Ended,
    Cancelled,
}

fn report() -> impl Strategy<Value = Report> {
    prop_oneof![
        Just(Report::Began),
        Just(Report::Changed),
        Just(Report::Ended),
        Just(Report::Cancelled),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: for any report sequence, even out of order, every value is
    /// delivered strictly inside an Active..AtRest bracket.
    #[test]
    fn test_gesture_values_are_bracketed(reports in prop::collection::vec(report(), 0..40)) {
        let gesture = GestureSource::<u32>::new();
        let active = Rc::new(RefCell::new(false));
        let violations = Rc::new(RefCell::new(0usize));

        let a = active.clone();
        let v = violations.clone();
        let states = active.clone();
        let _sub = gesture
            .stream()
            .map(|event| event.payload)
            .subscribe(
                FnObserver::new(move |_: u32| {
                    if !*a.borrow() {
                        *v.borrow_mut() += 1;
                    }
                })
                .on_state(move |s| *states.borrow_mut() = s.is_active()),
            );

        for (i, r) in reports.iter().enumerate() {
            let payload = i as u32;
            match r {
                Report::Began => gesture.began(payload),
                Report::Changed => gesture.changed(payload),
                Report::Ended => gesture.ended(payload),
                Report::Cancelled => gesture.cancelled(payload),
            }
        }

        prop_assert_eq!(*violations.borrow(), 0);
        prop_assert_eq!(*active.borrow(), gesture.phase().is_in_progress());
    }
}

// ============================================================================
// Merge activity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: merged state always equals the OR of upstream states, and
    /// only transitions are forwarded.
    #[test]
    fn test_merge_state_is_or(steps in prop::collection::vec((0usize..3, any::<bool>()), 0..48)) {
        let sources: Vec<MotionSource<u8>> = (0..3).map(|_| MotionSource::new()).collect();
        let merged = merge(sources.iter().map(|s| s.observable()).collect());

        let transitions = Rc::new(RefCell::new(Vec::new()));
        let t = transitions.clone();
        let _sub = merged.subscribe(FnObserver::state_only(move |s| t.borrow_mut().push(s)));

        let mut upstream = [false; 3];
        let mut expected = Vec::new();
        let mut current = false;
        for (index, active) in steps {
            upstream[index] = active;
            sources[index].state(if active { MotionState::Active } else { MotionState::AtRest });

            let or = upstream.iter().any(|a| *a);
            if or != current {
                current = or;
                expected.push(if or { MotionState::Active } else { MotionState::AtRest });
            }
        }

        prop_assert_eq!(&*transitions.borrow(), &expected);
    }
}
