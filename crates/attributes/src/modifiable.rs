//! The modifiable value engine.
//!
//! [`ModifiableValue`] composes an initial observable value with a
//! [`Modifiers`] collection. The value is deliberately uncached: each read
//! folds the enabled modifiers, in ascending `(priority, insertion order)`,
//! over the initial value, so the result is a pure function of the initial
//! value and the chain's `(enabled, context)` state at read time.
//!
//! Two distinct notification kinds flow out of a modifiable value, the base
//! changed ([`Change::Initial`]) and the modifier set changed
//! ([`Change::Modifiers`]), so a listener can tell them apart; a listener
//! interested only in the result treats either as "re-read".

use std::fmt;
use std::rc::Rc;

use observable_value::{Change, Listener, ReadValue, Subscribers, Subscription};

use crate::collection::Modifiers;
use crate::error::AttributeError;
use crate::modifier::Modifier;
use crate::num::Num;
use crate::reference::ValueRef;

/// A reactive attribute: an initial value plus an ordered modifier chain.
pub struct ModifiableValue<T: Num> {
    initial: ValueRef<T>,
    modifiers: Modifiers<T>,
    subscribers: Subscribers,
    _initial_sub: Subscription,
    _modifiers_sub: Subscription,
}

impl<T: Num> ModifiableValue<T> {
    /// Builds a modifiable value whose initial value is an owned mutable
    /// holder created from `initial`.
    pub fn new(initial: T) -> Rc<Self> {
        Self::with_initial(ValueRef::owned(initial))
    }

    /// Builds a modifiable value over an existing observable value.
    ///
    /// Use `ValueRef::reading` to wrap a value owned elsewhere, including
    /// another `ModifiableValue`, which is how derived attributes chain.
    pub fn with_initial(initial: ValueRef<T>) -> Rc<Self> {
        let subscribers = Subscribers::new();
        let modifiers = Modifiers::new();

        let republish = subscribers.clone();
        let initial_sub = initial.subscribe(Box::new(move |_| republish.notify(Change::Initial)));
        let republish = subscribers.clone();
        let modifiers_sub =
            modifiers.subscribe(Box::new(move |_| republish.notify(Change::Modifiers)));

        Rc::new(Self {
            initial,
            modifiers,
            subscribers,
            _initial_sub: initial_sub,
            _modifiers_sub: modifiers_sub,
        })
    }

    /// The current value: the left-fold of enabled modifiers over the
    /// initial value. Recomputed on every call over a stable snapshot of the
    /// chain.
    pub fn value(&self) -> T {
        let mut acc = self.initial.get();
        for modifier in self.modifiers.snapshot() {
            if modifier.enabled() {
                acc = modifier.modify(acc);
            }
        }
        acc
    }

    /// The initial (base) value reference.
    pub fn initial(&self) -> &ValueRef<T> {
        &self.initial
    }

    /// Writes the initial value.
    ///
    /// # Errors
    ///
    /// [`AttributeError::ReadOnlyContext`] when the initial slot borrows an
    /// external read-only value.
    pub fn set_initial(&self, value: T) -> Result<(), AttributeError> {
        self.initial.set(value)
    }

    /// The modifier collection. Collaborators add, remove, and enumerate
    /// through this; there is no hidden state beside it and `initial`.
    pub fn modifiers(&self) -> &Modifiers<T> {
        &self.modifiers
    }

    /// Reports the isolated effect of `target` inside the chain.
    ///
    /// Replays the same fold as [`value`](Self::value) and yields a
    /// `(before, after)` pair at every position occupied by `target`
    /// (matched by instance identity). A disabled occurrence yields
    /// `before == after`: visible to the probe, but it does not move the
    /// accumulator. Mutates nothing; call it as often as needed.
    pub fn probe_affects(&self, target: &Rc<Modifier<T>>) -> Vec<(T, T)> {
        let mut effects = Vec::new();
        let mut before = self.initial.get();
        for modifier in self.modifiers.snapshot() {
            let after = if modifier.enabled() {
                modifier.modify(before)
            } else {
                before
            };
            if Rc::ptr_eq(&modifier, target) {
                effects.push((before, after));
            }
            before = after;
        }
        effects
    }

    /// Renders the value; the verbose form spells out the whole chain as
    /// `"base" {initial} {modifier...} -> {value}`.
    pub fn render(&self, show_modifiers: bool) -> String {
        if !show_modifiers {
            return self.value().to_string();
        }
        let mut out = format!("\"base\" {} ", self.initial.get());
        for modifier in self.modifiers.snapshot() {
            out.push_str(&modifier.to_string());
            out.push(' ');
        }
        out.push_str(&format!("-> {}", self.value()));
        out
    }

    /// Registers a listener for this value's change notifications
    /// ([`Change::Initial`] and [`Change::Modifiers`]).
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

/// A modifiable value is itself an observable value, so it can serve as
/// another value's initial or as a modifier's context.
impl<T: Num> ReadValue<T> for ModifiableValue<T> {
    fn get(&self) -> T {
        self.value()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

impl<T: Num> fmt::Display for ModifiableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
