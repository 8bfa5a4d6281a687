//! Subscriptions - the handle returned by `subscribe`

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Stops a producer's association with one observer.
pub type Disconnector = Box<dyn FnOnce()>;

/// Handle owning exactly one [`Disconnector`].
///
/// Clones share the same connection. `unsubscribe` is idempotent and may be
/// called from inside a `next`/`state` callback of the very subscription it
/// stops: once it returns, no further calls reach the observer.
///
/// Dropping a subscription does NOT disconnect it. Teardown is explicit,
/// either through `unsubscribe` or through the owning runtime.
#[derive(Clone)]
pub struct Subscription {
    inner: Rc<SubscriptionInner>,
}

struct SubscriptionInner {
    open: Rc<Cell<bool>>,
    disconnector: RefCell<Option<Disconnector>>,
}

impl Subscription {
    pub(crate) fn new(open: Rc<Cell<bool>>, disconnector: Disconnector) -> Self {
        Self {
            inner: Rc::new(SubscriptionInner {
                open,
                disconnector: RefCell::new(Some(disconnector)),
            }),
        }
    }

    /// Disconnect. Subsequent calls are no-ops.
    pub fn unsubscribe(&self) {
        self.inner.open.set(false);
        // Take before calling so a re-entrant unsubscribe finds nothing to do.
        let disconnector = self.inner.disconnector.borrow_mut().take();
        if let Some(disconnect) = disconnector {
            disconnect();
        }
    }

    /// Whether the subscription is still connected.
    pub fn is_active(&self) -> bool {
        self.inner.open.get()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
