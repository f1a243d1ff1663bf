//! Reactive modifiable values for game attributes.
//!
//! A [`ModifiableValue`] models an attribute like health or strength: an
//! initial observable value transformed by a priority-ordered chain of
//! [`Modifier`]s (bonuses, penalties, temporary effects). The displayed value
//! is never cached; every read folds the enabled modifiers, in ascending
//! `(priority, insertion order)`, over the initial value. Changes to the
//! initial value, to any modifier's enabled flag, or to a modifier's context
//! propagate upward as change notifications.
//!
//! # Example
//!
//! ```
//! use attributes::{Modifier, ModifiableValue};
//!
//! let health = ModifiableValue::new(100.0f32);
//! let boost = Modifier::times(1.10).named("10% boost");
//! health.modifiers().add(boost.clone());
//! assert_eq!(health.value(), 110.0);
//!
//! boost.set_enabled(false);
//! assert_eq!(health.value(), 100.0);
//! ```
//!
//! # Architecture
//!
//! - [`Num`]: the closed numeric operation set (`i32`, `f32`, `f64`)
//! - [`ValueRef`]: capability-tagged reference to an observable value
//! - [`Modifier`] / [`Op`]: toggleable unary transforms
//! - [`Modifiers`]: the priority-ordered collection
//! - [`ModifiableValue`]: the fold engine, with the [`probe`] query
//! - [`BoundedValue`]: a mutable value clamped to dynamic observable bounds
//!
//! [`probe`]: ModifiableValue::probe_affects

pub mod bounded;
pub mod collection;
pub mod error;
pub mod modifiable;
pub mod modifier;
pub mod num;
pub mod reference;

// Re-export primary types
pub use bounded::BoundedValue;
pub use collection::Modifiers;
pub use error::AttributeError;
pub use modifiable::ModifiableValue;
pub use modifier::{Modifier, Op};
pub use num::{Num, NumKind};
pub use reference::ValueRef;

// The primitives this engine is built on, re-exported so consumers normally
// need only this crate.
pub use observable_value::{
    Change, Constant, Derived, Listener, ReadValue, Subscribers, Subscription, Value, WriteValue,
};
