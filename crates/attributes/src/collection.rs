//! The priority-ordered modifier collection.
//!
//! Modifiers are keyed by `(priority, sequence)`: priority is caller-chosen
//! (default 0, lower applies earlier) and sequence is a collection-local
//! strictly increasing counter, so entries with equal priority keep insertion
//! order and the sort key is always unique. Operator order matters (`*2`
//! before or after `+10` yields different results), so enumeration order is
//! part of the contract, not an implementation detail.
//!
//! The collection listens to each distinct member and republishes any member
//! change as a single "modifiers changed" signal on itself. Structural
//! operations (`add`, `remove`, `clear`) raise exactly one such signal each.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use observable_value::{Change, Listener, Subscribers, Subscription};

use crate::modifier::Modifier;
use crate::num::Num;

struct Entry<T: Num> {
    priority: i32,
    seq: u64,
    modifier: Rc<Modifier<T>>,
}

// One live republishing subscription per distinct modifier instance,
// regardless of how many positions the instance occupies.
struct Link<T: Num> {
    modifier: Rc<Modifier<T>>,
    _sub: Subscription,
}

/// An ordered collection of modifiers, sorted by `(priority, insertion
/// sequence)`.
pub struct Modifiers<T: Num> {
    entries: RefCell<Vec<Entry<T>>>,
    next_seq: Cell<u64>,
    links: RefCell<Vec<Link<T>>>,
    changed: Subscribers,
}

impl<T: Num> Modifiers<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
            links: RefCell::new(Vec::new()),
            changed: Subscribers::new(),
        }
    }

    /// Adds `modifier` at the default priority 0.
    pub fn add(&self, modifier: Rc<Modifier<T>>) {
        self.add_with_priority(0, modifier);
    }

    /// Adds `modifier` at `priority`, after any existing entry with the same
    /// priority. Raises exactly one change notification.
    pub fn add_with_priority(&self, priority: i32, modifier: Rc<Modifier<T>>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);

        {
            let mut entries = self.entries.borrow_mut();
            let at = entries.partition_point(|e| (e.priority, e.seq) <= (priority, seq));
            entries.insert(
                at,
                Entry {
                    priority,
                    seq,
                    modifier: Rc::clone(&modifier),
                },
            );
        }

        let already_linked = self
            .links
            .borrow()
            .iter()
            .any(|link| Rc::ptr_eq(&link.modifier, &modifier));
        if !already_linked {
            let republish = self.changed.clone();
            let sub = modifier.subscribe(Box::new(move |_| republish.notify(Change::Modifiers)));
            self.links.borrow_mut().push(Link {
                modifier,
                _sub: sub,
            });
        }

        tracing::trace!(priority, seq, total = self.len(), "modifier added");
        self.changed.notify(Change::Modifiers);
    }

    /// Removes the first occurrence of `modifier`, matched by instance
    /// identity. Returns `false` (and stays silent) when it is not a member.
    pub fn remove(&self, modifier: &Rc<Modifier<T>>) -> bool {
        let last_occurrence;
        {
            let mut entries = self.entries.borrow_mut();
            let Some(at) = entries
                .iter()
                .position(|e| Rc::ptr_eq(&e.modifier, modifier))
            else {
                return false;
            };
            entries.remove(at);
            last_occurrence = !entries.iter().any(|e| Rc::ptr_eq(&e.modifier, modifier));
        }

        if last_occurrence {
            self.links
                .borrow_mut()
                .retain(|link| !Rc::ptr_eq(&link.modifier, modifier));
        }

        tracing::trace!(total = self.len(), "modifier removed");
        self.changed.notify(Change::Modifiers);
        true
    }

    /// Removes everything. Raises one change notification; a no-op (and
    /// silent) when already empty.
    pub fn clear(&self) {
        if self.entries.borrow().is_empty() {
            return;
        }
        self.entries.borrow_mut().clear();
        self.links.borrow_mut().clear();
        tracing::trace!("modifiers cleared");
        self.changed.notify(Change::Modifiers);
    }

    /// Identity-based membership test.
    pub fn contains(&self, modifier: &Rc<Modifier<T>>) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| Rc::ptr_eq(&e.modifier, modifier))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// The modifiers in ascending `(priority, sequence)` order, as a stable
    /// snapshot.
    ///
    /// Every fold iterates a snapshot rather than a live view, so a listener
    /// that mutates the collection mid-notification cannot invalidate an
    /// in-progress read.
    pub fn snapshot(&self) -> Vec<Rc<Modifier<T>>> {
        self.entries
            .borrow()
            .iter()
            .map(|e| Rc::clone(&e.modifier))
            .collect()
    }

    /// `(priority, modifier)` pairs in enumeration order, for collaborators
    /// that persist or display the chain.
    pub fn entries(&self) -> Vec<(i32, Rc<Modifier<T>>)> {
        self.entries
            .borrow()
            .iter()
            .map(|e| (e.priority, Rc::clone(&e.modifier)))
            .collect()
    }

    /// Registers a listener for the coalesced "modifiers changed" signal.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.changed.subscribe(listener)
    }
}

impl<T: Num> Default for Modifiers<T> {
    fn default() -> Self {
        Self::new()
    }
}
