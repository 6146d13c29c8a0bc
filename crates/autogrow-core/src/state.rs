//! Observable single-threaded state cells.
//!
//! [`MutableState`] is the two-way binding shared between a host and the
//! widgets it embeds. Writes that do not change the value are dropped, so
//! two parties mirroring each other's changes cannot ping-pong forever.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: T,
    listeners: SmallVec<[(u64, Listener<T>); 2]>,
    next_listener_id: u64,
}

/// Shared, observable value.
///
/// Cloning the handle shares the same cell. Listeners run synchronously after
/// a successful write, outside of any internal borrow, so they may read or
/// write the cell again.
pub struct MutableState<T: 'static> {
    inner: Rc<RefCell<StateInner<T>>>,
}

impl<T: 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MutableState")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StateInner {
                value,
                listeners: SmallVec::new(),
                next_listener_id: 1,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Writes `value` and notifies listeners.
    ///
    /// Returns `false` without notifying when `value` equals the current one.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
        }
        self.notify(&value);
        true
    }

    /// Applies `f` to a copy of the value and stores the result via [`set`](Self::set).
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Registers `listener`; it stays registered while the returned handle lives.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> StateSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        let weak: Weak<RefCell<StateInner<T>>> = Rc::downgrade(&self.inner);
        StateSubscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .borrow_mut()
                        .listeners
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self, value: &T) {
        let listeners: SmallVec<[Listener<T>; 2]> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for MutableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Keeps a [`MutableState`] listener registered until dropped.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct StateSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl StateSubscription {
    /// Unregisters the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for StateSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
