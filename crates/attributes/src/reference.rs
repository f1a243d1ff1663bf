//! Capability-tagged references to observable values.
//!
//! A modifier's context and a modifiable value's initial slot both need to
//! point at "some observable value", but what the holder may do with it is
//! decided when the reference is constructed, not probed at write time:
//!
//! - [`ValueRef::Owned`]: a mutable value created from a literal and owned by
//!   the holder. Writable; this is how a literal context can be retargeted
//!   later (a "cure" zeroing a poison's per-tick damage).
//! - [`ValueRef::Reading`]: a borrowed read-only value. Writes fail with
//!   [`AttributeError::ReadOnlyContext`].
//! - [`ValueRef::Writing`]: a borrowed mutable value. Writes are forwarded.
//!
//! Borrowed variants share, never own: the referenced value has its own owner
//! and the only link back is the subscription the holder takes out, torn down
//! with the holder.

use std::rc::Rc;

use observable_value::{Listener, ReadValue, Subscription, Value, WriteValue};

use crate::error::AttributeError;

/// A reference to an observable value, tagged with its write capability.
pub enum ValueRef<T> {
    /// Owned mutable value, created from a literal.
    Owned(Rc<Value<T>>),
    /// Borrowed read-only value.
    Reading(Rc<dyn ReadValue<T>>),
    /// Borrowed mutable value; writes are forwarded.
    Writing(Rc<dyn WriteValue<T>>),
}

impl<T: Clone + PartialEq + 'static> ValueRef<T> {
    /// Wraps a literal in an owned mutable value.
    pub fn owned(value: T) -> Self {
        Self::Owned(Value::new(value))
    }

    /// Borrows an external value read-only.
    pub fn reading(value: Rc<dyn ReadValue<T>>) -> Self {
        Self::Reading(value)
    }

    /// Borrows an external value with write-through.
    pub fn writing(value: Rc<dyn WriteValue<T>>) -> Self {
        Self::Writing(value)
    }

    pub fn get(&self) -> T {
        match self {
            Self::Owned(value) => value.get(),
            Self::Reading(value) => value.get(),
            Self::Writing(value) => value.get(),
        }
    }

    /// Writes through the reference.
    ///
    /// # Errors
    ///
    /// [`AttributeError::ReadOnlyContext`] if the reference was constructed
    /// as [`ValueRef::Reading`]; the referenced value is left untouched.
    pub fn set(&self, value: T) -> Result<(), AttributeError> {
        match self {
            Self::Owned(target) => {
                target.set(value);
                Ok(())
            }
            Self::Writing(target) => {
                target.set(value);
                Ok(())
            }
            Self::Reading(_) => Err(AttributeError::ReadOnlyContext),
        }
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Reading(_))
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        match self {
            Self::Owned(value) => value.subscribe(listener),
            Self::Reading(value) => value.subscribe(listener),
            Self::Writing(value) => value.subscribe(listener),
        }
    }
}

impl<T> Clone for ValueRef<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Owned(value) => Self::Owned(Rc::clone(value)),
            Self::Reading(value) => Self::Reading(Rc::clone(value)),
            Self::Writing(value) => Self::Writing(Rc::clone(value)),
        }
    }
}
