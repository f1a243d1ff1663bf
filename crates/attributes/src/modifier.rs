//! Toggleable unary transforms over an accumulating value.
//!
//! A [`Modifier`] pairs an operator symbol with a context value: `+10` adds
//! ten, `*1.1` scales by ten percent, `=0` substitutes zero. Modifiers are
//! always handled as `Rc<Modifier<T>>` because their identity matters: the
//! collection removes and probes by instance, and the same instance may be
//! added at several positions.
//!
//! A modifier republishes its context's change notifications as its own, so
//! an effect whose magnitude lives in an external observable value (another
//! attribute, a config slider) propagates without polling. The subscription
//! backing that link is owned by the modifier and released when the modifier
//! is dropped.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use observable_value::{Change, Listener, ReadValue, Subscribers, Subscription};

use crate::error::AttributeError;
use crate::num::Num;
use crate::reference::ValueRef;

/// Operator applied by a modifier against the accumulated value and its
/// context value.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    Plus,
    Minus,
    Times,
    Divide,
    /// Ignores the accumulated value and returns the context value.
    Substitute,
}

impl Op {
    /// The single-character rendering used by the verbose display form.
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
            Self::Substitute => '=',
        }
    }

    /// Applies the operator: `given <op> context`.
    pub fn apply<T: Num>(self, given: T, context: T) -> T {
        match self {
            Self::Plus => given.sum(context),
            Self::Minus => given.sum(context.negate()),
            Self::Times => given.times(context),
            Self::Divide => given.divide(context),
            Self::Substitute => context,
        }
    }
}

/// A named, toggleable transform in a modifier chain.
pub struct Modifier<T: Num> {
    name: RefCell<Option<String>>,
    op: Op,
    context: ValueRef<T>,
    enabled: Cell<bool>,
    subscribers: Subscribers,
    // Republishes context changes as this modifier's own; dropped with the
    // modifier, which is what unhooks it from an external context.
    _context_sub: Subscription,
}

impl<T: Num> Modifier<T> {
    /// Builds a modifier from an operator and an explicitly tagged context
    /// reference. The factory methods below cover the two common tags; use
    /// this with [`ValueRef::writing`] for a write-through external context.
    pub fn new(op: Op, context: ValueRef<T>) -> Rc<Self> {
        let subscribers = Subscribers::new();
        let republish = subscribers.clone();
        let context_sub = context.subscribe(Box::new(move |_| republish.notify(Change::Context)));
        Rc::new(Self {
            name: RefCell::new(None),
            op,
            context,
            enabled: Cell::new(true),
            subscribers,
            _context_sub: context_sub,
        })
    }

    /// `given + value`, with an owned mutable context.
    pub fn plus(value: T) -> Rc<Self> {
        Self::new(Op::Plus, ValueRef::owned(value))
    }

    /// `given + source`, following an external observable value.
    pub fn plus_of(source: Rc<dyn ReadValue<T>>) -> Rc<Self> {
        Self::new(Op::Plus, ValueRef::reading(source))
    }

    /// `given - value`, with an owned mutable context.
    pub fn minus(value: T) -> Rc<Self> {
        Self::new(Op::Minus, ValueRef::owned(value))
    }

    /// `given - source`, following an external observable value.
    pub fn minus_of(source: Rc<dyn ReadValue<T>>) -> Rc<Self> {
        Self::new(Op::Minus, ValueRef::reading(source))
    }

    /// `given * value`, with an owned mutable context.
    pub fn times(value: T) -> Rc<Self> {
        Self::new(Op::Times, ValueRef::owned(value))
    }

    /// `given * source`, following an external observable value.
    pub fn times_of(source: Rc<dyn ReadValue<T>>) -> Rc<Self> {
        Self::new(Op::Times, ValueRef::reading(source))
    }

    /// `given / value`, with an owned mutable context.
    pub fn divide(value: T) -> Rc<Self> {
        Self::new(Op::Divide, ValueRef::owned(value))
    }

    /// `given / source`, following an external observable value.
    pub fn divide_of(source: Rc<dyn ReadValue<T>>) -> Rc<Self> {
        Self::new(Op::Divide, ValueRef::reading(source))
    }

    /// Replaces the accumulated value with `value` outright.
    pub fn substitute(value: T) -> Rc<Self> {
        Self::new(Op::Substitute, ValueRef::owned(value))
    }

    /// Replaces the accumulated value with an external observable value.
    pub fn substitute_of(source: Rc<dyn ReadValue<T>>) -> Rc<Self> {
        Self::new(Op::Substitute, ValueRef::reading(source))
    }

    /// Attaches a display name; returns the same handle for chaining.
    pub fn named(self: Rc<Self>, name: impl Into<String>) -> Rc<Self> {
        *self.name.borrow_mut() = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Flips the enabled flag. Notifies only when the flag actually changes.
    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.get() == enabled {
            return;
        }
        self.enabled.set(enabled);
        self.subscribers.notify(Change::Enabled);
    }

    /// Applies this modifier's operator to the accumulated value.
    ///
    /// The fold never calls this on a disabled modifier.
    pub fn modify(&self, given: T) -> T {
        self.op.apply(given, self.context.get())
    }

    /// The capability-tagged context reference.
    pub fn context(&self) -> &ValueRef<T> {
        &self.context
    }

    pub fn context_value(&self) -> T {
        self.context.get()
    }

    /// Writes the context value through the reference.
    ///
    /// # Errors
    ///
    /// [`AttributeError::ReadOnlyContext`] when the context borrows an
    /// external read-only value.
    pub fn set_context_value(&self, value: T) -> Result<(), AttributeError> {
        self.context.set(value)
    }

    /// Registers a listener for this modifier's change notifications
    /// (enabled flips and context changes).
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

impl<T: Num> fmt::Display for Modifier<T> {
    /// `"name" +10` when named, `+10` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name.borrow().as_deref() {
            write!(f, "\"{name}\" ")?;
        }
        write!(f, "{}{}", self.op.symbol(), self.context.get())
    }
}
