//! A mutable observable value clamped to dynamic bounds.
//!
//! A plain projection is enough to clamp a read-only value, but a writable
//! one needs its own type: if health is 100 and takes 120 damage, the stored
//! value must be 0, not a clamped view over -20 that still reads 0 after
//! healing 10. [`BoundedValue`] stores the clamped value itself and
//! re-clamps whenever either bound moves.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use observable_value::{Change, Constant, Listener, ReadValue, Subscribers, Subscription, WriteValue};

use crate::num::Num;

/// A mutable value kept inside an observable `[lower, upper]` range.
///
/// Writes clamp into the current bounds and notify only when the stored
/// value actually moves; a bound change re-clamps the stored value the same
/// way. Bounds are assumed non-inverted (`lower <= upper`); validating that
/// is the caller's job.
pub struct BoundedValue<T: Num> {
    current: Cell<T>,
    lower: Rc<dyn ReadValue<T>>,
    upper: Rc<dyn ReadValue<T>>,
    subscribers: Subscribers,
    // Re-clamp links to the two bounds; torn down with the value.
    bound_subs: RefCell<Vec<Subscription>>,
}

impl<T: Num> BoundedValue<T> {
    /// Builds a bounded value with fixed literal bounds.
    pub fn new(value: T, lower: T, upper: T) -> Rc<Self> {
        Self::with_bounds(
            value,
            Constant::new(lower) as Rc<dyn ReadValue<T>>,
            Constant::new(upper) as Rc<dyn ReadValue<T>>,
        )
    }

    /// Builds a bounded value over externally owned observable bounds.
    pub fn with_bounds(
        value: T,
        lower: Rc<dyn ReadValue<T>>,
        upper: Rc<dyn ReadValue<T>>,
    ) -> Rc<Self> {
        let this = Rc::new(Self {
            current: Cell::new(value),
            lower,
            upper,
            subscribers: Subscribers::new(),
            bound_subs: RefCell::new(Vec::new()),
        });

        let subs = vec![
            this.lower.subscribe(Box::new({
                let weak = Rc::downgrade(&this);
                move |_| {
                    if let Some(value) = weak.upgrade() {
                        value.reclamp();
                    }
                }
            })),
            this.upper.subscribe(Box::new({
                let weak = Rc::downgrade(&this);
                move |_| {
                    if let Some(value) = weak.upgrade() {
                        value.reclamp();
                    }
                }
            })),
        ];
        *this.bound_subs.borrow_mut() = subs;
        this
    }

    /// The current lower bound.
    pub fn min_value(&self) -> T {
        self.lower.get()
    }

    /// The current upper bound.
    pub fn max_value(&self) -> T {
        self.upper.get()
    }

    fn clamp(&self, value: T) -> T {
        self.lower.get().max(self.upper.get().min(value))
    }

    // A bound moved: pull the stored value back into range if needed.
    fn reclamp(&self) {
        let clamped = self.clamp(self.current.get());
        if clamped == self.current.get() {
            return;
        }
        tracing::debug!(
            from = %self.current.get(),
            to = %clamped,
            "bound change moved stored value"
        );
        self.current.set(clamped);
        self.subscribers.notify(Change::Value);
    }
}

impl<T: Num> ReadValue<T> for BoundedValue<T> {
    fn get(&self) -> T {
        self.current.get()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.subscribers.subscribe(listener)
    }
}

impl<T: Num> WriteValue<T> for BoundedValue<T> {
    /// Clamps `value` into the current bounds, stores it, and notifies only
    /// when the stored value changed.
    fn set(&self, value: T) {
        let clamped = self.clamp(value);
        if clamped == self.current.get() {
            return;
        }
        self.current.set(clamped);
        self.subscribers.notify(Change::Value);
    }
}
