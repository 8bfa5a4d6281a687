//! Tween - declarative animation parameters over reactive cells
//!
//! A tween binds a target and a property to keyframe values, an evaluator,
//! and timing. Every parameter lives in a [`ReactiveCell`], so a setter call
//! is visible to a running playback on its next frame:
//!
//! - `values` / `evaluator` / `easing` are read on every frame
//! - `duration` / `delay` changes restart playback with the new timing
//!
//! Playback values go through `MotionRuntime::write`, the same sink gesture
//! streams use. A tween plays at most once per runtime write: starting it
//! again replaces the running playback, and a finished playback disconnects
//! its write.
//!
//! # Keyframes
//!
//! - one value: animate from the property's value at start to that value
//! - N values: N-1 evenly spaced segments
//!
//! # Example
//!
//! ```ignore
//! let fade = Tween::of_float(view.clone(), alpha, &[0.0, 1.0]);
//! fade.set_duration(Duration::from_millis(250));
//! fade.start(&mut runtime)?;
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use super::cell::ReactiveCell;
use super::driver::{AnimationDriver, Frame, Timing};
use crate::error::{MotionError, Result};
use crate::interaction::{ConstraintApplicator, Interaction};
use crate::observable::{Disconnector, MotionObservable, Observer, Subscription};
use crate::property::PropertyRef;
use crate::runtime::MotionRuntime;
use crate::types::MotionState;

/// Interpolates `from → to` at a fraction in `0.0..=1.0`.
pub type Evaluator<V> = Rc<dyn Fn(f32, &V, &V) -> V>;

// =============================================================================
// EASING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map a linear fraction to an eased one. Input is clamped to `0..=1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
                }
            }
        }
    }
}

// =============================================================================
// TWEEN
// =============================================================================

struct TweenParams<V> {
    evaluator: ReactiveCell<Evaluator<V>>,
    values: ReactiveCell<Vec<V>>,
    duration: ReactiveCell<Option<Duration>>,
    delay: ReactiveCell<Duration>,
    easing: ReactiveCell<Easing>,
}

impl<V> Clone for TweenParams<V> {
    fn clone(&self) -> Self {
        Self {
            evaluator: self.evaluator.clone(),
            values: self.values.clone(),
            duration: self.duration.clone(),
            delay: self.delay.clone(),
            easing: self.easing.clone(),
        }
    }
}

/// The runtime write of the current playback, if any.
type PlayingSlot = Rc<RefCell<Option<Subscription>>>;

pub struct Tween<O, V> {
    target: O,
    property: PropertyRef<O, V>,
    params: TweenParams<V>,
    playing: PlayingSlot,
}

impl<O: 'static, V: 'static> fmt::Debug for Tween<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("property", &self.property.name())
            .field("playing", &self.playing.borrow().as_ref().is_some_and(Subscription::is_active))
            .finish_non_exhaustive()
    }
}

impl<O: Clone + 'static> Tween<O, f32> {
    /// Linear float tween.
    pub fn of_float(target: O, property: PropertyRef<O, f32>, values: &[f32]) -> Self {
        Self::of_object(
            target,
            property,
            |t, from: &f32, to: &f32| from + (to - from) * t,
            values.to_vec(),
        )
    }

    pub fn set_float_values(&self, values: &[f32]) {
        self.params.values.set(values.to_vec());
    }
}

impl<O: Clone + 'static, V: Clone + 'static> Tween<O, V> {
    /// Tween over any value type, interpolated by `evaluator`.
    pub fn of_object<F>(target: O, property: PropertyRef<O, V>, evaluator: F, values: Vec<V>) -> Self
    where
        F: Fn(f32, &V, &V) -> V + 'static,
    {
        let evaluator: Evaluator<V> = Rc::new(evaluator);
        Self {
            target,
            property,
            params: TweenParams {
                evaluator: ReactiveCell::new(evaluator),
                values: ReactiveCell::new(values),
                duration: ReactiveCell::new(None),
                delay: ReactiveCell::new(Duration::ZERO),
                easing: ReactiveCell::new(Easing::default()),
            },
            playing: Rc::new(RefCell::new(None)),
        }
    }

    pub fn target(&self) -> &O {
        &self.target
    }

    pub fn property(&self) -> &PropertyRef<O, V> {
        &self.property
    }

    /// Whether a playback started through a runtime is still running.
    pub fn is_playing(&self) -> bool {
        self.playing
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    pub fn evaluator(&self) -> &ReactiveCell<Evaluator<V>> {
        &self.params.evaluator
    }

    pub fn values(&self) -> &ReactiveCell<Vec<V>> {
        &self.params.values
    }

    /// `None` until set; playback then uses the runtime's default duration.
    pub fn duration(&self) -> &ReactiveCell<Option<Duration>> {
        &self.params.duration
    }

    pub fn delay(&self) -> &ReactiveCell<Duration> {
        &self.params.delay
    }

    pub fn easing(&self) -> &ReactiveCell<Easing> {
        &self.params.easing
    }

    // -------------------------------------------------------------------------
    // Setters (last write wins, valid at any time)
    // -------------------------------------------------------------------------

    pub fn set_evaluator<F>(&self, evaluator: F)
    where
        F: Fn(f32, &V, &V) -> V + 'static,
    {
        self.params.evaluator.set(Rc::new(evaluator));
    }

    pub fn set_values(&self, values: Vec<V>) {
        self.params.values.set(values);
    }

    pub fn set_object_values(&self, values: &[V]) {
        self.params.values.set(values.to_vec());
    }

    pub fn set_duration(&self, duration: Duration) {
        self.params.duration.set(Some(duration));
    }

    pub fn set_delay(&self, delay: Duration) {
        self.params.delay.set(delay);
    }

    pub fn set_easing(&self, easing: Easing) {
        self.params.easing.set(easing);
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Cold playback stream on `driver`: every subscription schedules its own
    /// playback. `Active` on connect, `AtRest` when the driver finishes.
    pub fn stream(&self, driver: Rc<dyn AnimationDriver>, default_duration: Duration) -> MotionObservable<V> {
        self.stream_on(self.target.clone(), driver, default_duration, None)
    }

    /// Play this tween through `runtime.write` on its own target.
    ///
    /// A playback already running from an earlier `start` is replaced.
    pub fn start(&self, runtime: &mut MotionRuntime) -> Result<()> {
        self.play(runtime, &self.target, &ConstraintApplicator::none())
    }

    /// Cancel the running playback. The property keeps its current value.
    pub fn stop(&self) {
        let playing = self.playing.borrow_mut().take();
        if let Some(write) = playing {
            write.unsubscribe();
        }
    }

    fn play(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<V>) -> Result<()> {
        let driver = runtime.driver().ok_or(MotionError::NoAnimationDriver)?;
        if self.params.values.with(|values| values.is_empty()) {
            return Err(MotionError::MissingKeyframes {
                property: self.property.name().to_string(),
            });
        }
        let stream = self.stream_on(
            target.clone(),
            driver,
            runtime.config().default_duration,
            Some(Rc::clone(&self.playing)),
        );

        // The new write registers before the old one releases its activity.
        let write = runtime.write(&constraints.apply(stream), target, &self.property);
        let replaced = self.playing.borrow_mut().replace(write);
        if let Some(previous) = replaced {
            if previous.is_active() {
                debug!(property = self.property.name(), "tween replaced");
            }
            previous.unsubscribe();
        }
        debug!(property = self.property.name(), "tween started");
        Ok(())
    }

    fn stream_on(
        &self,
        target: O,
        driver: Rc<dyn AnimationDriver>,
        default_duration: Duration,
        owner: Option<PlayingSlot>,
    ) -> MotionObservable<V> {
        let params = self.params.clone();
        let property = self.property.clone();
        MotionObservable::new(move |observer: Observer<V>| {
            let playback = Rc::new(Playback {
                label: property.name().to_string(),
                params: params.clone(),
                from: property.get(&target),
                default_duration,
                driver: Rc::clone(&driver),
                observer,
                owner: owner.clone(),
                cancel: RefCell::new(None),
                watchers: RefCell::new(Vec::new()),
            });

            playback.observer.state(MotionState::Active);
            playback.watch_timing();
            playback.schedule();

            Box::new(move || playback.stop())
        })
    }
}

impl<O: Clone + 'static, V: Clone + 'static> Interaction<O, V> for Tween<O, V> {
    fn apply(&self, runtime: &mut MotionRuntime, target: &O, constraints: &ConstraintApplicator<V>) {
        if let Err(err) = self.play(runtime, target, constraints) {
            warn!(%err, "tween not applied");
        }
    }
}

// =============================================================================
// PLAYBACK
// =============================================================================

/// One subscription's playback.
///
/// While scheduled, the driver's frame callback owns the playback. The
/// driver drops that callback when playback finishes or is cancelled.
struct Playback<V> {
    label: String,
    params: TweenParams<V>,
    /// Property value at connect; the start of a single-keyframe tween.
    from: V,
    default_duration: Duration,
    driver: Rc<dyn AnimationDriver>,
    observer: Observer<V>,
    /// Runtime write to close once finished, for playbacks started by a tween.
    owner: Option<PlayingSlot>,
    cancel: RefCell<Option<Disconnector>>,
    watchers: RefCell<Vec<Subscription>>,
}

impl<V: Clone + 'static> Playback<V> {
    fn timing(&self) -> Timing {
        Timing {
            delay: self.params.delay.get(),
            duration: self.params.duration.get().unwrap_or(self.default_duration),
        }
    }

    fn schedule(self: &Rc<Self>) {
        let timing = self.timing();
        let playback = Rc::clone(self);
        let cancel = self.driver.schedule(timing, Box::new(move |frame: Frame| playback.on_frame(frame)));
        *self.cancel.borrow_mut() = Some(cancel);
        debug!(
            property = %self.label,
            delay_ms = timing.delay.as_millis() as u64,
            duration_ms = timing.duration.as_millis() as u64,
            "tween scheduled"
        );
    }

    fn watch_timing(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let on_duration = self.params.duration.watch(move |_| {
            if let Some(playback) = weak.upgrade() {
                playback.restart();
            }
        });
        let weak = Rc::downgrade(self);
        let on_delay = self.params.delay.watch(move |_| {
            if let Some(playback) = weak.upgrade() {
                playback.restart();
            }
        });
        self.watchers.borrow_mut().extend([on_duration, on_delay]);
    }

    /// Reschedule with the current timing if still playing.
    fn restart(self: &Rc<Self>) {
        let running = self.cancel.borrow_mut().take();
        if let Some(cancel) = running {
            debug!(property = %self.label, "tween timing changed, restarting");
            cancel();
            self.schedule();
        }
    }

    fn on_frame(&self, frame: Frame) {
        match frame {
            Frame::Progress(fraction) => {
                if let Some(value) = self.value_at(fraction) {
                    self.observer.next(value);
                }
            }
            Frame::Finished => {
                let finished = self.cancel.borrow_mut().take();
                drop(finished);
                self.release_watchers();
                debug!(property = %self.label, "tween finished");

                // Taken before AtRest: a restart triggered by it owns the slot.
                let write = self.owner.as_ref().and_then(|slot| slot.borrow_mut().take());
                self.observer.state(MotionState::AtRest);
                if let Some(write) = write {
                    write.unsubscribe();
                }
            }
        }
    }

    fn value_at(&self, fraction: f32) -> Option<V> {
        let eased = self.params.easing.get().apply(fraction);
        let evaluator = self.params.evaluator.get();
        self.params.values.with(|values| match values.len() {
            0 => None,
            1 => Some(evaluator(eased, &self.from, &values[0])),
            n => {
                let segments = (n - 1) as f32;
                let scaled = eased * segments;
                let index = (scaled.floor() as usize).min(n - 2);
                let local = scaled - index as f32;
                Some(evaluator(local, &values[index], &values[index + 1]))
            }
        })
    }

    fn release_watchers(&self) {
        let watchers = std::mem::take(&mut *self.watchers.borrow_mut());
        for watcher in watchers {
            watcher.unsubscribe();
        }
    }

    fn stop(&self) {
        let running = self.cancel.borrow_mut().take();
        if let Some(cancel) = running {
            cancel();
        }
        self.release_watchers();
    }
}

// =============================================================================
// TESTS
// =============================================================================
