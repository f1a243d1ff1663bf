//! Single-threaded observable value primitives.
//!
//! This crate provides the reactive plumbing that the `attributes` engine is
//! built on: typed value holders that notify listeners when they change, and
//! RAII subscription handles that make listener teardown automatic.
//!
//! - **Synchronous dispatch**: notifications are plain function calls on the
//!   caller's thread (typically a game's update loop). No locking, no queues.
//! - **RAII subscriptions**: dropping a [`Subscription`] removes the listener.
//!   Cross-entity links never outlive their owner.
//! - **No-op suppression**: writing a value equal to the current one raises
//!   no notification.
//!
//! # Architecture
//!
//! - [`Subscribers`] / [`Subscription`]: the publish/subscribe registry
//! - [`ReadValue`] / [`WriteValue`]: the value-shaped traits
//! - Concrete values: [`Value`], [`Constant`], [`Derived`]

pub mod event;
pub mod value;

// Re-export core types for ergonomic API
pub use event::{Change, Listener, Subscribers, Subscription};
pub use value::{Constant, Derived, ReadValue, Value, WriteValue};
