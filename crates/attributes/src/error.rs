//! Error types for the attribute engine.
//!
//! Both error kinds are caller bugs surfaced synchronously at the call site;
//! the engine never retries, queues, or defers an error, and no partial
//! mutation is visible when one is returned. Removing an absent modifier or
//! clearing an empty collection are defined no-ops, not errors.

/// Errors returned by the attribute engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// A write was attempted through a [`ValueRef`](crate::ValueRef) that
    /// wraps a borrowed read-only value. The capability is fixed at
    /// construction time; if writes are needed, construct the reference as
    /// owned or borrowed-mutable instead.
    #[error("cannot write through a read-only value reference")]
    ReadOnlyContext,

    /// A numeric kind tag outside the supported closed list.
    #[error("unsupported numeric kind `{kind}` (supported: i32, f32, f64)")]
    UnsupportedNumericKind { kind: String },
}
