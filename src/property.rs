//! PropertyRef - the seam between streams and host objects
//!
//! A property is a named `get`/`set` pair over a target type. Targets are
//! handles (`Clone` types with interior mutability, typically `Rc<...>`), so
//! `set` takes `&O`.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Clone)]
//! struct View(Rc<RefCell<ViewState>>);
//!
//! let alpha = PropertyRef::new(
//!     "alpha",
//!     |view: &View| view.0.borrow().alpha,
//!     |view: &View, value: f32| view.0.borrow_mut().alpha = value,
//! );
//!
//! runtime.write(stream, &view, &alpha);
//! ```
//!
//! Hosts built on spark-signals can expose a signal per property instead:
//!
//! ```ignore
//! let x = PropertyRef::from_signal("x", |node: &Node| node.x.clone());
//! ```

use std::fmt;
use std::rc::Rc;

use spark_signals::Signal;

use crate::operators::Writable;

type Getter<O, V> = dyn Fn(&O) -> V;
type Setter<O, V> = dyn Fn(&O, V);

/// Named getter/setter pair for a mutable slot on `O`.
pub struct PropertyRef<O, V> {
    name: Rc<str>,
    getter: Rc<Getter<O, V>>,
    setter: Rc<Setter<O, V>>,
}

impl<O, V> Clone for PropertyRef<O, V> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<O, V> fmt::Debug for PropertyRef<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRef").field("name", &self.name).finish()
    }
}

impl<O: 'static, V: 'static> PropertyRef<O, V> {
    pub fn new<G, S>(name: &str, get: G, set: S) -> Self
    where
        G: Fn(&O) -> V + 'static,
        S: Fn(&O, V) + 'static,
    {
        Self {
            name: Rc::from(name),
            getter: Rc::new(get),
            setter: Rc::new(set),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, target: &O) -> V {
        (self.getter)(target)
    }

    pub fn set(&self, target: &O, value: V) {
        (self.setter)(target, value);
    }

    /// Fix the target, yielding a [`Writable`] sink.
    pub fn bind(&self, target: O) -> BoundProperty<O, V> {
        BoundProperty {
            target,
            property: self.clone(),
        }
    }
}

impl<O: 'static, V: Clone + PartialEq + 'static> PropertyRef<O, V> {
    /// Property backed by a spark-signals `Signal` the target exposes.
    ///
    /// Writes go through `Signal::set`, so effects reading the signal re-run.
    pub fn from_signal<A>(name: &str, accessor: A) -> Self
    where
        A: Fn(&O) -> Signal<V> + 'static,
    {
        let accessor = Rc::new(accessor);
        let read = Rc::clone(&accessor);
        Self::new(
            name,
            move |target: &O| read(target).get(),
            move |target: &O, value: V| {
                accessor(target).set(value);
            },
        )
    }
}

/// A property fixed to one target.
pub struct BoundProperty<O, V> {
    target: O,
    property: PropertyRef<O, V>,
}

impl<O: Clone, V> Clone for BoundProperty<O, V> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            property: self.property.clone(),
        }
    }
}

impl<O: 'static, V: 'static> BoundProperty<O, V> {
    pub fn get(&self) -> V {
        self.property.get(&self.target)
    }

    pub fn target(&self) -> &O {
        &self.target
    }

    pub fn property(&self) -> &PropertyRef<O, V> {
        &self.property
    }
}

impl<O: 'static, V: 'static> Writable<V> for BoundProperty<O, V> {
    fn write(&self, value: V) {
        self.property.set(&self.target, value);
    }
}
