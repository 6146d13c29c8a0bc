//! Software keyboard tracking.
//!
//! The platform layer forwards keyboard frame notifications through
//! [`post_keyboard_event`]. Every registered observer receives them in
//! registration order. [`KeyboardTracker`] is the observer the layout side
//! uses: it turns the keyboard's end frame into the height it occludes at the
//! bottom of the screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use autogrow_core::{AliveFlag, MutableState, StateSubscription};
use autogrow_ui_graphics::Rect;
use indexmap::IndexMap;
use smallvec::SmallVec;
use web_time::Instant;

use crate::error::{positive_finite, ConfigError};

/// Kind of keyboard notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEventKind {
    WillShow,
    WillHide,
    WillChangeFrame,
    DidChangeFrame,
}

/// Keyboard notification with the keyboard's final frame in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventKind,
    pub end_frame: Rect,
}

impl KeyboardEvent {
    pub fn new(kind: KeyboardEventKind, end_frame: Rect) -> Self {
        Self { kind, end_frame }
    }

    /// Convenience for a full-width keyboard whose top edge sits at `top`.
    pub fn with_top(kind: KeyboardEventKind, top: f32, screen_width: f32) -> Self {
        Self::new(kind, Rect::new(0.0, top, screen_width, 0.0))
    }
}

type KeyboardObserver = Rc<dyn Fn(&KeyboardEvent)>;

#[derive(Default)]
struct KeyboardCenter {
    observers: IndexMap<u64, KeyboardObserver>,
    next_id: u64,
}

thread_local! {
    static KEYBOARD_CENTER: RefCell<KeyboardCenter> = RefCell::new(KeyboardCenter::default());
}

/// Delivers `event` to every observer registered on this thread.
pub fn post_keyboard_event(event: KeyboardEvent) {
    let observers: SmallVec<[KeyboardObserver; 4]> = KEYBOARD_CENTER.with(|center| {
        center.borrow().observers.values().cloned().collect()
    });
    log::trace!(
        "keyboard {:?} at y={} to {} observers",
        event.kind,
        event.end_frame.y,
        observers.len()
    );
    for observer in observers {
        observer(&event);
    }
}

/// Registers `observer` for keyboard notifications until the returned
/// registration is dropped.
pub fn observe_keyboard_events(
    observer: impl Fn(&KeyboardEvent) + 'static,
) -> KeyboardObserverRegistration {
    let id = KEYBOARD_CENTER.with(|center| {
        let mut center = center.borrow_mut();
        let id = center.next_id;
        center.next_id += 1;
        center.observers.insert(id, Rc::new(observer));
        id
    });
    KeyboardObserverRegistration { id: Some(id) }
}

pub fn keyboard_observer_count() -> usize {
    KEYBOARD_CENTER.with(|center| center.borrow().observers.len())
}

/// Keyboard observer registration; deregisters on drop.
#[must_use = "dropping the registration stops keyboard notifications"]
#[derive(Debug)]
pub struct KeyboardObserverRegistration {
    id: Option<u64>,
}

impl KeyboardObserverRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn deregister(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            // The center may already be gone during thread teardown.
            let _ = KEYBOARD_CENTER.try_with(|center| {
                center.borrow_mut().observers.shift_remove(&id);
            });
        }
    }
}

impl Drop for KeyboardObserverRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

/// Visibility of the software keyboard as seen by a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum KeyboardState {
    #[default]
    Hidden,
    Visible { occlusion_height: f32 },
}

impl KeyboardState {
    pub fn from_occlusion(occlusion_height: f32) -> Self {
        if occlusion_height > 0.0 {
            KeyboardState::Visible { occlusion_height }
        } else {
            KeyboardState::Hidden
        }
    }

    pub fn occlusion_height(&self) -> f32 {
        match self {
            KeyboardState::Hidden => 0.0,
            KeyboardState::Visible { occlusion_height } => *occlusion_height,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, KeyboardState::Visible { .. })
    }
}

/// Last keyboard geometry received; replaced on every notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardGeometry {
    pub occlusion_height: f32,
    pub timestamp: Instant,
}

/// Height of the screen the keyboard's top edge at `keyboard_top` covers.
pub fn occlusion_height(screen_height: f32, keyboard_top: f32) -> f32 {
    let covered = screen_height - keyboard_top;
    if covered.is_nan() {
        return 0.0;
    }
    covered.max(0.0)
}

struct TrackerShared {
    screen_height: Cell<f32>,
    geometry: Cell<Option<KeyboardGeometry>>,
    state: MutableState<KeyboardState>,
}

impl TrackerShared {
    fn handle(&self, event: &KeyboardEvent) {
        let occlusion = occlusion_height(self.screen_height.get(), event.end_frame.y);
        self.geometry.set(Some(KeyboardGeometry {
            occlusion_height: occlusion,
            timestamp: Instant::now(),
        }));
        if self.state.set(KeyboardState::from_occlusion(occlusion)) {
            log::debug!("keyboard {:?}: occlusion {occlusion}", event.kind);
        }
    }
}

/// Publishes how much of the screen the software keyboard covers.
///
/// Registers with the keyboard notification center on construction and
/// deregisters on [`teardown`](Self::teardown) or drop. All notification
/// kinds are handled alike: the state is recomputed from the end frame.
pub struct KeyboardTracker {
    shared: Rc<TrackerShared>,
    registration: Option<KeyboardObserverRegistration>,
    alive: AliveFlag,
}

impl KeyboardTracker {
    pub fn new(screen_height: f32) -> Result<Self, ConfigError> {
        if !positive_finite(screen_height) {
            return Err(ConfigError::InvalidScreenHeight {
                value: screen_height,
            });
        }
        let shared = Rc::new(TrackerShared {
            screen_height: Cell::new(screen_height),
            geometry: Cell::new(None),
            state: MutableState::new(KeyboardState::Hidden),
        });
        let alive = AliveFlag::new();

        let weak = Rc::downgrade(&shared);
        let watcher = alive.watcher();
        let registration = observe_keyboard_events(move |event| {
            if !watcher.is_alive() {
                log::trace!("keyboard event after tracker teardown ignored");
                return;
            }
            if let Some(shared) = weak.upgrade() {
                shared.handle(event);
            }
        });

        Ok(Self {
            shared,
            registration: Some(registration),
            alive,
        })
    }

    pub fn state(&self) -> KeyboardState {
        self.shared.state.get()
    }

    pub fn occlusion_height(&self) -> f32 {
        self.state().occlusion_height()
    }

    pub fn geometry(&self) -> Option<KeyboardGeometry> {
        self.shared.geometry.get()
    }

    pub fn screen_height(&self) -> f32 {
        self.shared.screen_height.get()
    }

    /// Updates the screen height used for later notifications, e.g. after
    /// rotation.
    pub fn set_screen_height(&self, screen_height: f32) -> Result<(), ConfigError> {
        if !positive_finite(screen_height) {
            return Err(ConfigError::InvalidScreenHeight {
                value: screen_height,
            });
        }
        self.shared.screen_height.set(screen_height);
        Ok(())
    }

    /// Observes state changes; repeated notifications with the same
    /// occlusion are not re-delivered.
    pub fn subscribe(&self, listener: impl Fn(&KeyboardState) + 'static) -> StateSubscription {
        self.shared.state.subscribe(listener)
    }

    pub fn is_active(&self) -> bool {
        self.alive.is_alive()
    }

    /// Stops observing the keyboard. Idempotent.
    pub fn teardown(&mut self) {
        self.alive.kill();
        if let Some(registration) = self.registration.take() {
            registration.deregister();
            log::debug!("keyboard tracker torn down");
        }
    }
}

impl Drop for KeyboardTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/keyboard_tests.rs"]
mod tests;
