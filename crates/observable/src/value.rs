//! Observable value holders.
//!
//! Three concrete shapes cover the engine's needs:
//!
//! - [`Value`]: a mutable holder; the canonical "initial value" and owned
//!   modifier context.
//! - [`Constant`]: a read-only literal; never notifies.
//! - [`Derived`]: a read-only value computed lazily by a closure, with an
//!   explicit [`Derived::touch`] trigger for the owner of the closure's
//!   captures to call when those captures change.
//!
//! All values are created behind `Rc` because sharing is the point: the same
//! value may be a modifier's context, another value's base, and a UI binding
//! source at once.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{Change, Listener, Subscribers, Subscription};

/// A readable, observable value.
///
/// Object-safe so heterogeneous sources can be shared as
/// `Rc<dyn ReadValue<T>>`. Read-only here means *this handle* cannot write;
/// the underlying value may still change out from under the reader, which is
/// exactly what `subscribe` reports.
pub trait ReadValue<T> {
    fn get(&self) -> T;

    /// Registers a change listener; the listener stays registered for the
    /// lifetime of the returned guard.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// A [`ReadValue`] that can also be written through a shared handle.
pub trait WriteValue<T>: ReadValue<T> {
    fn set(&self, value: T);
}

/// A mutable observable value.
///
/// Writes compare against the current value first: setting a `Value` to an
/// equal value is a complete no-op, with no notification raised.
pub struct Value<T> {
    current: RefCell<T>,
    subscribers: Subscribers,
}

impl<T: Clone + PartialEq + 'static> Value<T> {
    pub fn new(value: T) -> Rc<Self> {
        Rc::new(Self {
            current: RefCell::new(value),
            subscribers: Subscribers::new(),
        })
    }
}

impl<T: Clone + PartialEq> ReadValue<T> for Value<T> {
    fn get(&self) -> T {
        self.current.borrow().clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

impl<T: Clone + PartialEq> WriteValue<T> for Value<T> {
    fn set(&self, value: T) {
        if *self.current.borrow() == value {
            return;
        }
        *self.current.borrow_mut() = value;
        self.subscribers.notify(Change::Value);
    }
}

/// A read-only literal value.
///
/// Subscriptions are accepted so `Constant` can stand wherever a
/// `Rc<dyn ReadValue<T>>` is expected (fixed bounds, fixed contexts), but no
/// notification is ever raised.
pub struct Constant<T> {
    value: T,
    subscribers: Subscribers,
}

impl<T: Clone + 'static> Constant<T> {
    pub fn new(value: T) -> Rc<Self> {
        Rc::new(Self {
            value,
            subscribers: Subscribers::new(),
        })
    }
}

impl<T: Clone> ReadValue<T> for Constant<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

/// A read-only value computed on every read by a stored closure.
///
/// The closure's free variables live outside this type, so `Derived` cannot
/// know when they change; whoever owns them calls [`Derived::touch`] to
/// propagate the change to subscribers. The [`Derived::map`] and
/// [`Derived::zip`] constructors wire that trigger up automatically for the
/// common case of deriving one observable value from others.
pub struct Derived<T> {
    compute: Box<dyn Fn() -> T>,
    subscribers: Subscribers,
    // Subscriptions tying this value to its sources. Held only for teardown.
    sources: RefCell<Vec<Subscription>>,
}

impl<T: 'static> Derived<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Rc<Self> {
        Rc::new(Self {
            compute: Box::new(compute),
            subscribers: Subscribers::new(),
            sources: RefCell::new(Vec::new()),
        })
    }

    /// Signals that the closure's inputs changed and the value should be
    /// re-read.
    pub fn touch(&self) {
        self.subscribers.notify(Change::Value);
    }

    /// Projects `source` through `f`, re-notifying whenever `source` does.
    pub fn map<S, V>(source: &Rc<V>, f: impl Fn(S) -> T + 'static) -> Rc<Self>
    where
        S: 'static,
        V: ReadValue<S> + ?Sized + 'static,
    {
        let input = Rc::clone(source);
        let derived = Self::new(move || f(input.get()));
        let forward = derived.subscribers.clone();
        let sub = source.subscribe(Box::new(move |_| forward.notify(Change::Value)));
        derived.sources.borrow_mut().push(sub);
        derived
    }

    /// Combines two sources through `f`, re-notifying whenever either does.
    pub fn zip<A, B, VA, VB>(
        left: &Rc<VA>,
        right: &Rc<VB>,
        f: impl Fn(A, B) -> T + 'static,
    ) -> Rc<Self>
    where
        A: 'static,
        B: 'static,
        VA: ReadValue<A> + ?Sized + 'static,
        VB: ReadValue<B> + ?Sized + 'static,
    {
        let input_left = Rc::clone(left);
        let input_right = Rc::clone(right);
        let derived = Self::new(move || f(input_left.get(), input_right.get()));
        for sub in [
            left.subscribe(Box::new({
                let forward = derived.subscribers.clone();
                move |_| forward.notify(Change::Value)
            })),
            right.subscribe(Box::new({
                let forward = derived.subscribers.clone();
                move |_| forward.notify(Change::Value)
            })),
        ] {
            derived.sources.borrow_mut().push(sub);
        }
        derived
    }
}

impl<T> ReadValue<T> for Derived<T> {
    fn get(&self) -> T {
        (self.compute)()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn count_changes<T, V: ReadValue<T> + ?Sized>(value: &V) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        let sub = value.subscribe(Box::new(move |_| inner.set(inner.get() + 1)));
        (count, sub)
    }

    #[test]
    fn value_read_write() {
        let v = Value::new(1);
        assert_eq!(v.get(), 1);
        v.set(2);
        assert_eq!(v.get(), 2);
    }

    #[test]
    fn equal_write_is_suppressed() {
        let v = Value::new(10);
        let (count, _sub) = count_changes(&*v);

        v.set(10);
        assert_eq!(count.get(), 0);

        v.set(11);
        assert_eq!(count.get(), 1);

        v.set(11);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn constant_never_notifies() {
        let c = Constant::new(5);
        let (count, _sub) = count_changes(&*c);
        assert_eq!(c.get(), 5);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn derived_recomputes_on_read() {
        let base = Rc::new(Cell::new(3));
        let source = Rc::clone(&base);
        let doubled = Derived::new(move || source.get() * 2);
        assert_eq!(doubled.get(), 6);
        base.set(5);
        assert_eq!(doubled.get(), 10);
    }

    #[test]
    fn touch_notifies_subscribers() {
        let derived = Derived::new(|| 1);
        let (count, _sub) = count_changes(&*derived);
        derived.touch();
        derived.touch();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn map_follows_source() {
        let hp = Value::new(40);
        let percent = Derived::map(&hp, |v: i32| v * 100 / 200);
        let (count, _sub) = count_changes(&*percent);

        assert_eq!(percent.get(), 20);
        hp.set(100);
        assert_eq!(percent.get(), 50);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zip_follows_both_sources() {
        let current = Value::new(50);
        let max = Value::new(100);
        let ratio = Derived::zip(&current, &max, |c: i32, m: i32| c as f64 / m as f64);
        let (count, _sub) = count_changes(&*ratio);

        assert_eq!(ratio.get(), 0.5);
        current.set(25);
        max.set(50);
        assert_eq!(ratio.get(), 0.5);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_map_output_releases_source_subscription() {
        let source = Value::new(1);
        {
            let _mapped = Derived::map(&source, |v: i32| v + 1);
        }
        // The source must not retain a dangling listener.
        source.set(2);
    }
}
