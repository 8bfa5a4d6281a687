//! MotionRuntime - owner of every write subscription
//!
//! The runtime is the single place behavior gets applied to targets:
//!
//! - `write(stream, target, property)` subscribes `stream` and applies every
//!   value through `property.set(target, value)`
//! - `add_interaction(interaction, target)` lets an [`Interaction`] register
//!   as many writes as it needs
//!
//! All subscriptions created this way are owned by the runtime instance and
//! torn down together by [`MotionRuntime::disconnect_all`] (or on drop). A
//! write that is disconnected earlier (its handle unsubscribed, or a finished
//! tween) releases its activity slot at once and is forgotten on the next
//! `write`.
//!
//! # Write conflicts
//!
//! Nothing stops two writes from targeting the same property of the same
//! target. Keeping writes disjoint is the interaction author's job; the
//! runtime applies values in the order producers emit them.
//!
//! # Activity
//!
//! [`MotionRuntime::activity`] is a spark-signals `Signal<MotionState>` that
//! is `Active` iff at least one owned write's upstream is active.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use crate::config::RuntimeConfig;
use crate::interaction::{ConstraintApplicator, Interaction};
use crate::observable::activity::ActivityAggregate;
use crate::observable::{MotionObservable, MotionObserver, Subscription};
use crate::property::PropertyRef;
use crate::tween::AnimationDriver;
use crate::types::MotionState;

// =============================================================================
// RUNTIME
// =============================================================================

pub struct MotionRuntime {
    config: RuntimeConfig,
    subscriptions: Vec<Subscription>,
    activity: Rc<ActivityAggregate>,
    activity_signal: Signal<MotionState>,
    driver: Option<Rc<dyn AnimationDriver>>,
}

impl Default for MotionRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MotionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionRuntime")
            .field("config", &self.config)
            .field("subscriptions", &self.subscription_count())
            .field("activity_slots", &self.activity.len())
            .field("state", &self.state())
            .field("has_driver", &self.driver.is_some())
            .finish()
    }
}

impl MotionRuntime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            subscriptions: Vec::new(),
            activity: Rc::new(ActivityAggregate::new()),
            activity_signal: signal(MotionState::AtRest),
            driver: None,
        }
    }

    /// Install the animation driver tweens are played on.
    pub fn with_driver<D>(mut self, driver: D) -> Self
    where
        D: AnimationDriver + 'static,
    {
        self.driver = Some(Rc::new(driver));
        self
    }

    /// Install (or replace) a shared animation driver.
    pub fn set_driver(&mut self, driver: Rc<dyn AnimationDriver>) {
        self.driver = Some(driver);
    }

    pub fn driver(&self) -> Option<Rc<dyn AnimationDriver>> {
        self.driver.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Subscribe `stream` and apply each value to `property` of `target`.
    ///
    /// The write stays connected until the runtime tears down or the returned
    /// handle is unsubscribed. Unsubscribing releases the write's activity.
    pub fn write<O, V>(
        &mut self,
        stream: &MotionObservable<V>,
        target: &O,
        property: &PropertyRef<O, V>,
    ) -> Subscription
    where
        O: Clone + 'static,
        V: 'static,
    {
        let slot = self.activity.register();
        let writer = PropertyWriter {
            target: target.clone(),
            property: property.clone(),
            slot,
            activity: Rc::clone(&self.activity),
            activity_signal: self.activity_signal.clone(),
            trace_writes: self.config.trace_writes,
        };

        let upstream = stream.subscribe(writer);
        let activity = Rc::clone(&self.activity);
        let activity_signal = self.activity_signal.clone();
        let subscription = Subscription::new(
            Rc::new(Cell::new(true)),
            Box::new(move || {
                upstream.unsubscribe();
                if let Some(aggregate) = activity.release(slot) {
                    activity_signal.set(aggregate);
                }
            }),
        );

        self.subscriptions.push(subscription.clone());
        self.subscriptions.retain(Subscription::is_active);
        debug!(
            property = property.name(),
            writes = self.subscriptions.len(),
            "write registered"
        );
        subscription
    }

    /// Apply `interaction` to `target` without constraints.
    pub fn add_interaction<O, C, I>(&mut self, interaction: &I, target: &O)
    where
        C: 'static,
        I: Interaction<O, C> + ?Sized,
    {
        self.add_interaction_with(interaction, target, &ConstraintApplicator::none());
    }

    /// Apply `interaction` to `target`, passing `constraints` to it.
    pub fn add_interaction_with<O, C, I>(
        &mut self,
        interaction: &I,
        target: &O,
        constraints: &ConstraintApplicator<C>,
    ) where
        C: 'static,
        I: Interaction<O, C> + ?Sized,
    {
        interaction.apply(self, target, constraints);
        debug!(
            interaction = std::any::type_name::<I>(),
            constraints = constraints.len(),
            writes = self.subscriptions.len(),
            "interaction applied"
        );
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Number of subscriptions the runtime currently owns.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.iter().filter(|s| s.is_active()).count()
    }

    /// OR of every owned write's upstream activity.
    pub fn state(&self) -> MotionState {
        self.activity.aggregate()
    }

    /// Reactive view of [`MotionRuntime::state`].
    pub fn activity(&self) -> Signal<MotionState> {
        self.activity_signal.clone()
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Disconnect every owned subscription.
    pub fn disconnect_all(&mut self) {
        let subscriptions = std::mem::take(&mut self.subscriptions);
        if subscriptions.is_empty() {
            return;
        }

        debug!(count = subscriptions.len(), "disconnecting runtime writes");
        for subscription in subscriptions {
            subscription.unsubscribe();
        }

        self.activity.clear();
        if self.activity_signal.get() != MotionState::AtRest {
            self.activity_signal.set(MotionState::AtRest);
        }
    }
}

impl Drop for MotionRuntime {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}

// =============================================================================
// WRITER
// =============================================================================

/// Terminal observer behind `MotionRuntime::write`.
struct PropertyWriter<O, V> {
    target: O,
    property: PropertyRef<O, V>,
    slot: usize,
    activity: Rc<ActivityAggregate>,
    activity_signal: Signal<MotionState>,
    trace_writes: bool,
}

impl<O: 'static, V: 'static> MotionObserver<V> for PropertyWriter<O, V> {
    fn next(&self, value: V) {
        if self.trace_writes {
            trace!(property = self.property.name(), "write");
        }
        self.property.set(&self.target, value);
    }

    fn state(&self, state: MotionState) {
        if let Some(aggregate) = self.activity.update(self.slot, state) {
            self.activity_signal.set(aggregate);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
