use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

pub type ValueListenerId = u64;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Observable value cell.
///
/// This is a plain listener registry, not a snapshot system: the sheet has a
/// single scalar to observe and every mutation happens on the UI thread.
/// Listeners run synchronously on every `set`, after the new value is stored,
/// and may themselves read or write the cell.
pub struct MutableValue<T> {
    inner: Rc<ValueInner<T>>,
}

struct ValueInner<T> {
    value: RefCell<T>,
    next_listener_id: Cell<ValueListenerId>,
    listeners: RefCell<SmallVec<[(ValueListenerId, Listener<T>); 2]>>,
}

impl<T: Clone> MutableValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(ValueInner {
                value: RefCell::new(initial),
                next_listener_id: Cell::new(1),
                listeners: RefCell::new(SmallVec::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value` and notifies every listener.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Registers a change listener. The listener stays registered until
    /// [`MutableValue::remove_listener`] is called with the returned id.
    pub fn add_listener(&self, listener: impl Fn(&T) + 'static) -> ValueListenerId {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ValueListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Read-only view sharing the same cell.
    pub fn as_state(&self) -> ValueState<T> {
        ValueState {
            inner: Rc::clone(&self.inner),
        }
    }

    fn notify(&self) {
        // Snapshot the listener list so a listener may add or remove
        // listeners without re-entering the borrow.
        let listeners: SmallVec<[Listener<T>; 2]> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        let value = self.get();
        for listener in listeners {
            listener(&value);
        }
    }
}

impl<T> Clone for MutableValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Read-only handle to a [`MutableValue`].
pub struct ValueState<T> {
    inner: Rc<ValueInner<T>>,
}

impl<T: Clone> ValueState<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }
}

impl<T> Clone for ValueState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
