//! Change notification dispatch.
//!
//! Every observable entity owns a [`Subscribers`] registry and hands out
//! [`Subscription`] guards from its `subscribe` method. Dispatch is
//! synchronous and single-threaded; the registry is shared through `Rc` so a
//! subscription can outlive borrows of the entity that issued it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// What changed on the entity that raised a notification.
///
/// This is the closed set of properties the engine notifies about. A listener
/// interested only in a recomputed value can ignore the discriminant and
/// simply re-read; composite values use [`Change::Initial`] and
/// [`Change::Modifiers`] to let listeners tell "the base moved" apart from
/// "the modifier set moved".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    /// The stored or computed value itself changed.
    Value,
    /// A modifier's enabled flag flipped.
    Enabled,
    /// A modifier's context value changed.
    Context,
    /// A composite value's initial (base) value changed.
    Initial,
    /// A composite value's modifier collection changed.
    Modifiers,
}

/// A boxed change listener.
pub type Listener = Box<dyn FnMut(Change)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Rc<RefCell<Listener>>)>,
}

/// A clonable handle to a listener registry.
///
/// Cloning is cheap (an `Rc` bump) and every clone notifies the same set of
/// listeners. This is how one entity republishes another's change as its own:
/// it subscribes to the source with a closure that calls `notify` on a clone
/// of its own `Subscribers`.
#[derive(Clone, Default)]
pub struct Subscribers {
    registry: Rc<RefCell<Registry>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns the guard that keeps it registered.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(RefCell::new(listener))));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Invokes every registered listener with `change`.
    ///
    /// Dispatch iterates a snapshot of the listener list taken before the
    /// first call, so a listener may subscribe or unsubscribe (even itself)
    /// mid-dispatch without invalidating the iteration. Re-entering a
    /// listener that is currently executing is not supported.
    pub fn notify(&self, change: Change) {
        let snapshot: Vec<Rc<RefCell<Listener>>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::trace!(?change, listeners = snapshot.len(), "dispatching change");
        for listener in snapshot {
            (listener.borrow_mut())(change);
        }
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII unsubscribe handle returned by `subscribe`.
///
/// Dropping the subscription removes the listener. The handle holds only a
/// `Weak` reference to the registry, so keeping a subscription alive never
/// keeps the publisher alive; if the publisher is gone the drop is a no-op.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Explicit teardown, for call sites where a plain `drop` reads poorly.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
