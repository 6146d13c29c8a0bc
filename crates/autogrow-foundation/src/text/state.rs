//! Editable text surface of the input widget.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type ChangeListener = Rc<dyn Fn(&TextChange)>;

/// Content-changed event emitted after a user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub text: String,
}

struct TextFieldStateInner {
    text: String,
    is_editing: bool,
    listeners: SmallVec<[(u64, ChangeListener); 2]>,
    next_listener_id: u64,
}

/// Resets the editing flag when an edit scope ends, even on panic.
struct EditGuard<'a> {
    inner: &'a RefCell<TextFieldStateInner>,
}

impl<'a> EditGuard<'a> {
    fn new(inner: &'a RefCell<TextFieldStateInner>) -> Option<Self> {
        let mut borrowed = inner.borrow_mut();
        if borrowed.is_editing {
            return None;
        }
        borrowed.is_editing = true;
        drop(borrowed);
        Some(Self { inner })
    }
}

impl Drop for EditGuard<'_> {
    fn drop(&mut self) {
        self.inner.borrow_mut().is_editing = false;
    }
}

/// Observable text held by the editing surface.
///
/// User edits go through [`edit`](Self::edit) and notify subscribers.
/// Programmatic assignment through [`set_text_silently`](Self::set_text_silently)
/// replaces the content without emitting a change, the way platform text
/// views behave when the app assigns their text.
#[derive(Clone)]
pub struct TextFieldState {
    inner: Rc<RefCell<TextFieldStateInner>>,
}

impl fmt::Debug for TextFieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TextFieldState")
            .field("text", &inner.text)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl Default for TextFieldState {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextFieldState {
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TextFieldStateInner {
                text: initial_text.into(),
                is_editing: false,
                listeners: SmallVec::new(),
                next_listener_id: 0,
            })),
        }
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.inner.borrow().text)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().text.is_empty()
    }

    /// Applies a user edit. Subscribers see the new text when it changed.
    ///
    /// Returns `false` for an unchanged result or a nested edit; nested
    /// edits from inside a listener are rejected.
    pub fn edit(&self, f: impl FnOnce(&mut String)) -> bool {
        let Some(_guard) = EditGuard::new(&self.inner) else {
            log::warn!("nested TextFieldState::edit ignored");
            return false;
        };

        let change = {
            let mut inner = self.inner.borrow_mut();
            let mut text = inner.text.clone();
            f(&mut text);
            if text == inner.text {
                None
            } else {
                inner.text = text.clone();
                Some(TextChange { text })
            }
        };

        match change {
            Some(change) => {
                self.notify(&change);
                true
            }
            None => false,
        }
    }

    pub fn insert_str(&self, s: &str) -> bool {
        self.edit(|text| text.push_str(s))
    }

    /// Removes the last character, if any.
    pub fn backspace(&self) -> bool {
        self.edit(|text| {
            text.pop();
        })
    }

    pub fn clear(&self) -> bool {
        self.edit(String::clear)
    }

    /// Replaces the content without notifying subscribers.
    ///
    /// Returns `false` when the text already matched.
    pub fn set_text_silently(&self, text: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.text == text {
            return false;
        }
        inner.text.clear();
        inner.text.push_str(text);
        true
    }

    /// Registers a content-changed listener, removed when the handle drops.
    pub fn subscribe(&self, listener: impl Fn(&TextChange) + 'static) -> TextChangeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        TextChangeSubscription {
            state: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self, change: &TextChange) {
        let listeners: SmallVec<[ChangeListener; 2]> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

/// Content-changed registration; unsubscribes on drop.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct TextChangeSubscription {
    state: Weak<RefCell<TextFieldStateInner>>,
    id: Option<u64>,
}

impl TextChangeSubscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(state) = self.state.upgrade() {
            state
                .borrow_mut()
                .listeners
                .retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

impl Drop for TextChangeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn edits_notify_subscribers() {
        let state = TextFieldState::new("");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            state.subscribe(move |change| seen.borrow_mut().push(change.text.clone()))
        };

        assert!(state.insert_str("ab"));
        assert!(state.backspace());
        assert!(!state.edit(|_| {}));

        assert_eq!(*seen.borrow(), vec!["ab".to_string(), "a".to_string()]);
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn silent_set_does_not_notify() {
        let state = TextFieldState::new("a");
        let count = Rc::new(Cell::new(0));
        let _sub = {
            let count = Rc::clone(&count);
            state.subscribe(move |_| count.set(count.get() + 1))
        };

        assert!(state.set_text_silently(""));
        assert!(!state.set_text_silently(""));
        assert!(state.is_empty());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn nested_edit_is_rejected() {
        let state = TextFieldState::new("");
        let nested_result = Rc::new(Cell::new(None));
        let _sub = {
            let inner_state = state.clone();
            let nested_result = Rc::clone(&nested_result);
            state.subscribe(move |_| nested_result.set(Some(inner_state.insert_str("!"))))
        };

        assert!(state.insert_str("x"));
        assert_eq!(nested_result.get(), Some(false));
        assert_eq!(state.text(), "x");
        // The guard is released after the outer edit.
        assert!(state.insert_str("y"));
    }

    #[test]
    fn dropped_subscription_is_removed() {
        let state = TextFieldState::new("");
        let sub = state.subscribe(|_| {});
        let other = state.subscribe(|_| {});
        assert_eq!(state.listener_count(), 2);
        drop(sub);
        assert_eq!(state.listener_count(), 1);
        other.unsubscribe();
        assert_eq!(state.listener_count(), 0);
    }
}
