//! Keyboard focus for text inputs.
//!
//! One focus owner per UI thread. A text input that holds focus is the one
//! the software keyboard is shown for; resigning it dismisses the keyboard.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

/// Identifier of a focusable input.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(usize);

impl FocusId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Inactive,
    Active,
}

/// Tracks which input currently owns focus.
pub struct FocusManager {
    active_focus_id: Option<FocusId>,
    focus_states: FxHashMap<FocusId, FocusState>,
    next_id: usize,
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            active_focus_id: None,
            focus_states: FxHashMap::default(),
            next_id: 1,
        }
    }

    pub fn allocate_focus_id(&mut self) -> FocusId {
        let id = FocusId(self.next_id);
        self.next_id += 1;
        self.focus_states.insert(id, FocusState::Inactive);
        id
    }

    /// Forgets `id`, resigning its focus first.
    pub fn release_focus_id(&mut self, id: FocusId) {
        self.resign_focus(id);
        self.focus_states.remove(&id);
    }

    pub fn active_focus_id(&self) -> Option<FocusId> {
        self.active_focus_id
    }

    /// Moves focus to `id`, deactivating the previous owner.
    pub fn request_focus(&mut self, id: FocusId) -> bool {
        if !self.focus_states.contains_key(&id) {
            log::warn!("focus requested for unknown {id:?}");
            return false;
        }
        if let Some(previous) = self.active_focus_id {
            if previous != id {
                self.focus_states.insert(previous, FocusState::Inactive);
            }
        }
        self.active_focus_id = Some(id);
        self.focus_states.insert(id, FocusState::Active);
        true
    }

    /// Resigns focus only if `id` holds it. Returns `true` when it did.
    pub fn resign_focus(&mut self, id: FocusId) -> bool {
        if self.active_focus_id != Some(id) {
            return false;
        }
        self.active_focus_id = None;
        self.focus_states.insert(id, FocusState::Inactive);
        true
    }

    /// Clears focus from whichever input holds it.
    pub fn clear_focus(&mut self) -> Option<FocusId> {
        let id = self.active_focus_id.take()?;
        self.focus_states.insert(id, FocusState::Inactive);
        Some(id)
    }

    pub fn focus_state(&self, id: FocusId) -> FocusState {
        self.focus_states
            .get(&id)
            .copied()
            .unwrap_or(FocusState::Inactive)
    }

    pub fn is_focused(&self, id: FocusId) -> bool {
        self.active_focus_id == Some(id)
    }
}

thread_local! {
    static FOCUS_MANAGER: RefCell<FocusManager> = RefCell::new(FocusManager::new());
}

fn with_manager<R>(f: impl FnOnce(&mut FocusManager) -> R) -> R {
    FOCUS_MANAGER.with(|manager| f(&mut manager.borrow_mut()))
}

pub fn allocate_focus_id() -> FocusId {
    with_manager(FocusManager::allocate_focus_id)
}

pub fn release_focus_id(id: FocusId) {
    with_manager(|manager| manager.release_focus_id(id));
}

pub fn request_focus(id: FocusId) -> bool {
    let granted = with_manager(|manager| manager.request_focus(id));
    if granted {
        log::debug!("{id:?} became first responder");
    }
    granted
}

pub fn resign_focus(id: FocusId) -> bool {
    let resigned = with_manager(|manager| manager.resign_focus(id));
    if resigned {
        log::debug!("{id:?} resigned first responder");
    }
    resigned
}

/// Ends editing on the current thread, dismissing any keyboard.
pub fn clear_focus() -> Option<FocusId> {
    let cleared = with_manager(FocusManager::clear_focus);
    if let Some(id) = cleared {
        log::debug!("focus cleared from {id:?}");
    }
    cleared
}

pub fn active_focus() -> Option<FocusId> {
    with_manager(|manager| manager.active_focus_id())
}

pub fn is_focused(id: FocusId) -> bool {
    with_manager(|manager| manager.is_focused(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_moves_focus() {
        let mut manager = FocusManager::new();
        let a = manager.allocate_focus_id();
        let b = manager.allocate_focus_id();

        assert!(manager.request_focus(a));
        assert!(manager.request_focus(b));
        assert_eq!(manager.focus_state(a), FocusState::Inactive);
        assert_eq!(manager.focus_state(b), FocusState::Active);
        assert_eq!(manager.active_focus_id(), Some(b));
    }

    #[test]
    fn resign_is_scoped_to_owner() {
        let mut manager = FocusManager::new();
        let a = manager.allocate_focus_id();
        let b = manager.allocate_focus_id();
        manager.request_focus(b);

        assert!(!manager.resign_focus(a));
        assert!(manager.is_focused(b));
        assert!(manager.resign_focus(b));
        assert_eq!(manager.active_focus_id(), None);
    }

    #[test]
    fn released_ids_cannot_take_focus() {
        let mut manager = FocusManager::new();
        let a = manager.allocate_focus_id();
        manager.request_focus(a);
        manager.release_focus_id(a);

        assert_eq!(manager.active_focus_id(), None);
        assert!(!manager.request_focus(a));
    }

    #[test]
    fn thread_manager_clears_focus() {
        let id = allocate_focus_id();
        assert!(request_focus(id));
        assert_eq!(active_focus(), Some(id));
        assert_eq!(clear_focus(), Some(id));
        assert_eq!(clear_focus(), None);
        release_focus_id(id);
    }
}
