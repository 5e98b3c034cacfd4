//! Observable cell value.
//!
//! A [`DataItem`] holds one cell's text and a `changed` flag. Every call to
//! [`DataItem::set_value`] marks the item changed and synchronously notifies all
//! registered observers before returning. Observers receive a snapshot of the
//! value and flag as they were when the write happened, plus a reference to the
//! item so they can consume the change.
//!
//! Items are single-threaded: they use `Cell`/`RefCell` and are shared through `Rc`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`DataItem::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Snapshot delivered to observers on every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub value: String,
    pub changed: bool,
}

type Observer = Rc<dyn Fn(&DataItem, &CellChange)>;

pub struct DataItem {
    value: RefCell<String>,
    changed: Cell<bool>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl DataItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(value.into()),
            changed: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn shared(value: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::new(value))
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn is_changed(&self) -> bool {
        self.changed.get()
    }

    /// Stores `value`, flags the item as changed and notifies every observer.
    ///
    /// Equal values are not filtered out: every write is a change event.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        *self.value.borrow_mut() = value.clone();
        self.changed.set(true);

        let change = CellChange {
            value,
            changed: true,
        };
        // Observers may subscribe, unsubscribe or consume while being notified,
        // so deliver from a snapshot and skip anything removed mid-delivery.
        let observers: Vec<(SubscriptionId, Observer)> = self
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();
        for (id, observer) in observers {
            if self.is_subscribed(id) {
                observer(self, &change);
            }
        }
    }

    /// Clears the changed flag. Idempotent.
    pub fn mark_consumed(&self) {
        self.changed.set(false);
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&DataItem, &CellChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Removes a registration. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl fmt::Debug for DataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataItem")
            .field("value", &*self.value.borrow())
            .field("changed", &self.changed.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}
