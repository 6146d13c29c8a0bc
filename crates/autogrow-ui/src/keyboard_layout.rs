//! Screen-level keyboard avoidance.
//!
//! [`KeyboardAwareLayout`] owns a [`KeyboardTracker`] while mounted and
//! animates the host's bottom inset towards the occluded height. It also ends
//! editing when the user taps the background or the scene leaves the
//! foreground.

use autogrow_animation::{Animatable, AnimationSpec, Easing};
use autogrow_core::{AliveFlag, RuntimeHandle, StateSubscription};
use autogrow_foundation::focus;
use autogrow_foundation::{
    ConfigError, FocusId, KeyboardGeometry, KeyboardState, KeyboardTracker, SceneActivity,
};

/// Duration of the inset animation, matching the system keyboard.
pub const KEYBOARD_ANIMATION_MILLIS: u64 = 250;

pub struct KeyboardAwareLayout {
    inset: Animatable<f32>,
    animation: AnimationSpec,
    tracker: Option<KeyboardTracker>,
    subscription: Option<StateSubscription>,
    alive: Option<AliveFlag>,
}

impl KeyboardAwareLayout {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inset: Animatable::new(0.0, runtime),
            animation: AnimationSpec::tween(KEYBOARD_ANIMATION_MILLIS, Easing::EaseInOut),
            tracker: None,
            subscription: None,
            alive: None,
        }
    }

    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Starts tracking the keyboard for a screen `screen_height` tall.
    pub fn mount(&mut self, screen_height: f32) -> Result<(), ConfigError> {
        if self.tracker.is_some() {
            log::warn!("keyboard layout already mounted");
            return Ok(());
        }
        let tracker = KeyboardTracker::new(screen_height)?;
        let alive = AliveFlag::new();

        let watcher = alive.watcher();
        let inset = self.inset.clone();
        let animation = self.animation;
        let subscription = tracker.subscribe(move |state: &KeyboardState| {
            if !watcher.is_alive() {
                return;
            }
            let target = state.occlusion_height();
            if inset.animate_to(target, animation) {
                log::debug!("bottom inset animating to {target}");
            }
        });

        self.tracker = Some(tracker);
        self.subscription = Some(subscription);
        self.alive = Some(alive);
        Ok(())
    }

    /// Stops tracking; the inset stays where it is.
    pub fn unmount(&mut self) {
        if let Some(alive) = self.alive.take() {
            alive.kill();
        }
        self.subscription = None;
        if let Some(mut tracker) = self.tracker.take() {
            tracker.teardown();
        }
        self.inset.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn set_screen_height(&self, screen_height: f32) -> Result<(), ConfigError> {
        match &self.tracker {
            Some(tracker) => tracker.set_screen_height(screen_height),
            None => Ok(()),
        }
    }

    /// Current, possibly mid-animation, bottom inset.
    pub fn bottom_inset(&self) -> f32 {
        self.inset.value()
    }

    pub fn target_inset(&self) -> f32 {
        self.inset.target()
    }

    pub fn is_animating(&self) -> bool {
        self.inset.is_running()
    }

    pub fn subscribe_inset(&self, listener: impl Fn(&f32) + 'static) -> StateSubscription {
        self.inset.subscribe(listener)
    }

    pub fn keyboard_state(&self) -> KeyboardState {
        self.tracker
            .as_ref()
            .map(KeyboardTracker::state)
            .unwrap_or_default()
    }

    pub fn keyboard_geometry(&self) -> Option<KeyboardGeometry> {
        self.tracker.as_ref().and_then(KeyboardTracker::geometry)
    }

    /// Ends editing when the scene is no longer active.
    pub fn on_scene_activity(&self, activity: SceneActivity) -> Option<FocusId> {
        if !activity.ends_editing() {
            return None;
        }
        log::debug!("scene {activity:?}; ending editing");
        focus::clear_focus()
    }

    /// Ends editing when the user taps outside any input.
    pub fn on_background_tap(&self) -> Option<FocusId> {
        focus::clear_focus()
    }
}

impl Drop for KeyboardAwareLayout {
    fn drop(&mut self) {
        self.unmount();
    }
}
