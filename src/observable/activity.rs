//! Activity aggregation across several upstream sources.
//!
//! Downstream state is `Active` iff at least one registered slot is active.
//! Callers only forward a transition when the aggregate actually changes.

use std::cell::{Cell, RefCell};

use crate::types::MotionState;

#[derive(Debug, Default)]
pub(crate) struct ActivityAggregate {
    slots: RefCell<Vec<(usize, MotionState)>>,
    next_id: Cell<usize>,
}

impl ActivityAggregate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register an upstream, initially at rest.
    pub(crate) fn register(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push((id, MotionState::AtRest));
        id
    }

    pub(crate) fn aggregate(&self) -> MotionState {
        self.slots
            .borrow()
            .iter()
            .fold(MotionState::AtRest, |acc, (_, state)| acc.or(*state))
    }

    /// Record a slot's state. Returns the new aggregate if it changed.
    pub(crate) fn update(&self, slot: usize, state: MotionState) -> Option<MotionState> {
        let before = self.aggregate();
        if let Some(entry) = self.slots.borrow_mut().iter_mut().find(|(id, _)| *id == slot) {
            entry.1 = state;
        }
        let after = self.aggregate();
        (before != after).then_some(after)
    }

    /// Drop a slot. Returns the new aggregate if it changed.
    pub(crate) fn release(&self, slot: usize) -> Option<MotionState> {
        let before = self.aggregate();
        self.slots.borrow_mut().retain(|(id, _)| *id != slot);
        let after = self.aggregate();
        (before != after).then_some(after)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Forget every slot.
    pub(crate) fn clear(&self) {
        self.slots.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MotionState::*;

    #[test]
    fn test_or_aggregation() {
        let agg = ActivityAggregate::new();
        let a = agg.register();
        let b = agg.register();

        assert_eq!(agg.update(a, Active), Some(Active));
        assert_eq!(agg.update(b, Active), None);
        assert_eq!(agg.update(a, AtRest), None);
        assert_eq!(agg.aggregate(), Active);
        assert_eq!(agg.update(b, AtRest), Some(AtRest));
    }

    #[test]
    fn test_release_drops_slot_activity() {
        let agg = ActivityAggregate::new();
        let a = agg.register();
        let b = agg.register();
        agg.update(a, Active);
        agg.update(b, Active);

        assert_eq!(agg.release(a), None);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.release(b), Some(AtRest));
        assert_eq!(agg.len(), 0);

        // Ids are never reused
        let c = agg.register();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(agg.update(a, Active), None);
    }

    #[test]
    fn test_clear_forgets_slots() {
        let agg = ActivityAggregate::new();
        let a = agg.register();
        agg.update(a, Active);
        agg.clear();
        assert_eq!(agg.aggregate(), AtRest);
        // Stale slot ids are ignored
        assert_eq!(agg.update(a, Active), None);
    }
}
