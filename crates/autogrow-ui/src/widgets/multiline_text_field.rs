//! Auto-growing multiline text field.
//!
//! The field owns an editable [`TextFieldState`] surface and keeps it in sync
//! with a host-owned `MutableState<String>` binding. Every content change
//! schedules one height pass on the next frame; the pass measures the text,
//! clamps the height into [`HeightBounds`] and publishes a new
//! [`HeightResolution`] only when it actually changed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use autogrow_core::{
    AliveFlag, FrameCallbackRegistration, MutableState, RuntimeHandle, StateSubscription,
};
use autogrow_foundation::focus::{self, FocusId};
use autogrow_foundation::{
    AccessoryContext, AccessoryDescriptor, AccessoryPolicy, AccessorySlot, AutoFocusPolicy,
    ConfigError, HeightBounds, HeightResolution, HeightTracker, PlaceholderController,
    PlaceholderStyle, TextChange, TextChangeSubscription, TextFieldState,
};
use autogrow_ui_graphics::FontSpec;

use crate::text::{current_text_measurer, TextMeasurer};

/// Width the text wraps at unless the host says otherwise.
pub const DEFAULT_CONTENT_WIDTH: f32 = 343.0;

/// Options for a [`MultilineTextField`].
#[derive(Clone)]
pub struct MultilineTextFieldOptions {
    pub placeholder: String,
    pub placeholder_style: PlaceholderStyle,
    pub bounds: HeightBounds,
    pub font: FontSpec,
    /// Width available to the text; height is unbounded while measuring.
    pub content_width: f32,
    pub accessory_policy: AccessoryPolicy,
    pub auto_focus: AutoFocusPolicy,
    /// Measurer for this field only; the process-wide one when `None`.
    pub measurer: Option<Arc<dyn TextMeasurer>>,
}

impl fmt::Debug for MultilineTextFieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultilineTextFieldOptions")
            .field("placeholder", &self.placeholder)
            .field("bounds", &self.bounds)
            .field("font", &self.font)
            .field("content_width", &self.content_width)
            .field("accessory_policy", &self.accessory_policy)
            .field("auto_focus", &self.auto_focus)
            .field("custom_measurer", &self.measurer.is_some())
            .finish()
    }
}

impl Default for MultilineTextFieldOptions {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            placeholder_style: PlaceholderStyle::default(),
            bounds: HeightBounds::REFERENCE,
            font: FontSpec::default(),
            content_width: DEFAULT_CONTENT_WIDTH,
            accessory_policy: AccessoryPolicy::default(),
            auto_focus: AutoFocusPolicy::default(),
            measurer: None,
        }
    }
}

impl MultilineTextFieldOptions {
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    pub fn with_bounds(mut self, bounds: HeightBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_content_width(mut self, content_width: f32) -> Self {
        self.content_width = content_width;
        self
    }

    pub fn with_accessory_policy(mut self, policy: AccessoryPolicy) -> Self {
        self.accessory_policy = policy;
        self
    }

    pub fn with_auto_focus(mut self, auto_focus: AutoFocusPolicy) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn with_measurer(mut self, measurer: impl TextMeasurer) -> Self {
        self.measurer = Some(Arc::new(measurer));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.content_width.is_finite() && self.content_width > 0.0) {
            return Err(ConfigError::InvalidContentWidth {
                value: self.content_width,
            });
        }
        let line_height = self.font.line_height();
        if !(line_height.is_finite() && line_height > 0.0) {
            return Err(ConfigError::InvalidLineHeight { value: line_height });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    Uninitialized,
    Mounted,
    /// Terminal.
    Unmounted,
}

/// Snapshot of a field as the host sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pub text: String,
    pub min_height: f32,
    pub max_height: f32,
    pub resolved_height: f32,
    pub scrolling_enabled: bool,
    pub placeholder_visible: bool,
}

struct FieldInner {
    phase: FieldPhase,
    runtime: RuntimeHandle,
    binding: MutableState<String>,
    surface: TextFieldState,
    context: AccessoryContext,
    options: MultilineTextFieldOptions,
    placeholder: PlaceholderController,
    placeholder_visible: MutableState<bool>,
    accessory: AccessorySlot,
    height: HeightTracker,
    layout: MutableState<HeightResolution>,
    focus_id: FocusId,
    alive: AliveFlag,
    surface_subscription: Option<TextChangeSubscription>,
    binding_subscription: Option<StateSubscription>,
    pending_height_pass: Option<FrameCallbackRegistration>,
}

/// Multiline input whose height follows its content.
///
/// Create it with [`new`](Self::new), then [`mount`](Self::mount) once the
/// host is ready. Dropping a mounted field unmounts it.
pub struct MultilineTextField {
    inner: Rc<RefCell<FieldInner>>,
}

impl MultilineTextField {
    pub fn new(
        binding: MutableState<String>,
        runtime: RuntimeHandle,
        context: AccessoryContext,
        options: MultilineTextFieldOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let bounds = options.bounds;
        let height = HeightTracker::new(bounds);
        let placeholder = PlaceholderController::new(options.placeholder.clone())
            .with_style(options.placeholder_style.clone());

        let inner = FieldInner {
            phase: FieldPhase::Uninitialized,
            runtime,
            binding,
            surface: TextFieldState::default(),
            context,
            options,
            placeholder,
            placeholder_visible: MutableState::new(true),
            accessory: AccessorySlot::default(),
            layout: MutableState::new(height.current()),
            height,
            focus_id: focus::allocate_focus_id(),
            alive: AliveFlag::new(),
            surface_subscription: None,
            binding_subscription: None,
            pending_height_pass: None,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Attaches the field: pulls the host text into the surface, attaches
    /// the accessory, schedules initial focus and the first height pass.
    ///
    /// Returns `false` if the field was already mounted or unmounted.
    pub fn mount(&self) -> bool {
        let (surface, binding, placeholder_visible, auto_focus) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != FieldPhase::Uninitialized {
                log::warn!("mount ignored in phase {:?}", inner.phase);
                return false;
            }
            inner.phase = FieldPhase::Mounted;

            let text = inner.binding.get();
            inner.surface.set_text_silently(&text);
            inner.placeholder.sync(&text);

            if let Some(descriptor) = inner.options.accessory_policy.decide(inner.context) {
                inner.accessory.attach(descriptor);
            }

            let auto_focus = inner.options.auto_focus.should_focus(inner.context);
            (
                inner.surface.clone(),
                inner.binding.clone(),
                inner.placeholder.is_visible(),
                auto_focus,
            )
        };

        let visible_state = self.inner.borrow().placeholder_visible.clone();
        visible_state.set(placeholder_visible);

        if auto_focus {
            self.schedule_initial_focus();
        }

        let surface_subscription = {
            let weak = Rc::downgrade(&self.inner);
            surface.subscribe(move |change| {
                if let Some(inner) = weak.upgrade() {
                    Self::on_user_edit(&inner, change);
                }
            })
        };
        let binding_subscription = {
            let weak = Rc::downgrade(&self.inner);
            binding.subscribe(move |text: &String| {
                if let Some(inner) = weak.upgrade() {
                    Self::on_host_assignment(&inner, text);
                }
            })
        };
        {
            let mut inner = self.inner.borrow_mut();
            inner.surface_subscription = Some(surface_subscription);
            inner.binding_subscription = Some(binding_subscription);
            log::debug!("{:?} mounted", inner.focus_id);
        }

        Self::schedule_height_pass(&self.inner);
        true
    }

    /// Releases subscriptions, cancels deferred work, resigns focus and
    /// detaches the accessory. Idempotent.
    pub fn unmount(&self) {
        let (surface_subscription, binding_subscription, pending, focus_id) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase == FieldPhase::Unmounted {
                return;
            }
            inner.phase = FieldPhase::Unmounted;
            inner.alive.kill();
            inner.accessory.detach();
            (
                inner.surface_subscription.take(),
                inner.binding_subscription.take(),
                inner.pending_height_pass.take(),
                inner.focus_id,
            )
        };

        drop(surface_subscription);
        drop(binding_subscription);
        if let Some(registration) = pending {
            registration.cancel();
        }
        focus::release_focus_id(focus_id);
        log::debug!("{focus_id:?} unmounted");
    }

    /// Accessory action: ends editing if this field holds focus.
    pub fn dismiss(&self) -> bool {
        let focus_id = self.inner.borrow().focus_id;
        focus::resign_focus(focus_id)
    }

    pub fn request_focus(&self) -> bool {
        let (phase, focus_id) = {
            let inner = self.inner.borrow();
            (inner.phase, inner.focus_id)
        };
        if phase != FieldPhase::Mounted {
            log::warn!("focus request on {phase:?} field ignored");
            return false;
        }
        focus::request_focus(focus_id)
    }

    /// Types `text` at the end of the content as if the user entered it.
    pub fn type_text(&self, text: &str) -> bool {
        match self.mounted_surface() {
            Some(surface) => surface.insert_str(text),
            None => false,
        }
    }

    /// Deletes the last character as if the user pressed backspace.
    pub fn backspace(&self) -> bool {
        match self.mounted_surface() {
            Some(surface) => surface.backspace(),
            None => false,
        }
    }

    /// Changes the wrapping width, e.g. after rotation, and re-measures.
    pub fn set_content_width(&self, content_width: f32) -> Result<(), ConfigError> {
        {
            let mut inner = self.inner.borrow_mut();
            let mut options = inner.options.clone();
            options.content_width = content_width;
            options.validate()?;
            inner.options = options;
            if inner.phase != FieldPhase::Mounted {
                return Ok(());
            }
        }
        Self::schedule_height_pass(&self.inner);
        Ok(())
    }

    pub fn state(&self) -> InputState {
        let inner = self.inner.borrow();
        let resolution = inner.height.current();
        let bounds = inner.height.bounds();
        InputState {
            text: inner.surface.text(),
            min_height: bounds.min(),
            max_height: bounds.max(),
            resolved_height: resolution.height,
            scrolling_enabled: resolution.scrolling_enabled,
            placeholder_visible: inner.placeholder.is_visible(),
        }
    }

    pub fn phase(&self) -> FieldPhase {
        self.inner.borrow().phase
    }

    pub fn layout(&self) -> HeightResolution {
        self.inner.borrow().height.current()
    }

    /// Observes resolved layout changes. Only real changes are delivered.
    pub fn subscribe_layout(
        &self,
        listener: impl Fn(&HeightResolution) + 'static,
    ) -> StateSubscription {
        let layout = self.inner.borrow().layout.clone();
        layout.subscribe(listener)
    }

    pub fn subscribe_placeholder(&self, listener: impl Fn(&bool) + 'static) -> StateSubscription {
        let visible = self.inner.borrow().placeholder_visible.clone();
        visible.subscribe(listener)
    }

    pub fn placeholder(&self) -> PlaceholderController {
        self.inner.borrow().placeholder.clone()
    }

    pub fn accessory(&self) -> Option<AccessoryDescriptor> {
        self.inner.borrow().accessory.current()
    }

    /// Attaches `descriptor` unless an accessory is already present.
    pub fn attach_accessory(&self, descriptor: AccessoryDescriptor) -> bool {
        self.inner.borrow_mut().accessory.attach(descriptor)
    }

    pub fn focus_id(&self) -> FocusId {
        self.inner.borrow().focus_id
    }

    pub fn is_focused(&self) -> bool {
        focus::is_focused(self.focus_id())
    }

    pub fn surface(&self) -> TextFieldState {
        self.inner.borrow().surface.clone()
    }

    pub fn has_pending_height_pass(&self) -> bool {
        self.inner.borrow().pending_height_pass.is_some()
    }

    fn mounted_surface(&self) -> Option<TextFieldState> {
        let inner = self.inner.borrow();
        if inner.phase != FieldPhase::Mounted {
            log::warn!("edit on {:?} field ignored", inner.phase);
            return None;
        }
        Some(inner.surface.clone())
    }

    fn schedule_initial_focus(&self) {
        let (runtime, watcher, focus_id) = {
            let inner = self.inner.borrow();
            (inner.runtime.clone(), inner.alive.watcher(), inner.focus_id)
        };
        let posted = runtime.post_local(move || {
            if !watcher.is_alive() {
                log::trace!("initial focus for unmounted {focus_id:?} skipped");
                return;
            }
            focus::request_focus(focus_id);
        });
        if !posted {
            log::trace!("runtime gone; initial focus not scheduled");
        }
    }

    fn on_user_edit(this: &Rc<RefCell<FieldInner>>, change: &TextChange) {
        let binding = {
            let inner = this.borrow();
            if inner.phase != FieldPhase::Mounted {
                return;
            }
            inner.binding.clone()
        };
        // The binding echoes back through `on_host_assignment`, which finds
        // the surface already up to date.
        binding.set(change.text.clone());
        Self::sync_placeholder(this, &change.text);
        Self::schedule_height_pass(this);
    }

    fn on_host_assignment(this: &Rc<RefCell<FieldInner>>, text: &str) {
        let surface = {
            let inner = this.borrow();
            if inner.phase != FieldPhase::Mounted {
                return;
            }
            inner.surface.clone()
        };
        if !surface.set_text_silently(text) {
            return;
        }
        Self::sync_placeholder(this, text);
        Self::schedule_height_pass(this);
    }

    fn sync_placeholder(this: &Rc<RefCell<FieldInner>>, text: &str) {
        let (visible_state, visible) = {
            let mut inner = this.borrow_mut();
            inner.placeholder.sync(text);
            (inner.placeholder_visible.clone(), inner.placeholder.is_visible())
        };
        visible_state.set(visible);
    }

    /// Coalesces all edits of a frame into one pass on the next frame.
    fn schedule_height_pass(this: &Rc<RefCell<FieldInner>>) {
        let (clock, watcher) = {
            let inner = this.borrow();
            if inner.pending_height_pass.is_some() {
                return;
            }
            (inner.runtime.frame_clock(), inner.alive.watcher())
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |_| {
            if !watcher.is_alive() {
                log::trace!("height pass after unmount ignored");
                return;
            }
            if let Some(strong) = weak.upgrade() {
                Self::run_height_pass(&strong);
            }
        });
        if registration.is_active() {
            this.borrow_mut().pending_height_pass = Some(registration);
        } else {
            log::trace!("runtime gone; height pass not scheduled");
        }
    }

    fn run_height_pass(this: &Rc<RefCell<FieldInner>>) {
        let (text, measurer, width, font) = {
            let mut inner = this.borrow_mut();
            if let Some(registration) = inner.pending_height_pass.take() {
                registration.disarm();
            }
            let measurer = inner
                .options
                .measurer
                .clone()
                .unwrap_or_else(current_text_measurer);
            (
                inner.surface.text(),
                measurer,
                inner.options.content_width,
                inner.options.font.clone(),
            )
        };

        let metrics = measurer.measure(&text, width, &font);

        let update = {
            let mut inner = this.borrow_mut();
            if inner.phase != FieldPhase::Mounted {
                return;
            }
            inner
                .height
                .apply(metrics.height)
                .map(|resolution| (inner.layout.clone(), resolution))
        };

        match update {
            Some((layout, resolution)) => {
                log::debug!(
                    "height {} (measured {}), scrolling {}",
                    resolution.height,
                    metrics.height,
                    resolution.scrolling_enabled
                );
                layout.set(resolution);
            }
            None => log::trace!("height unchanged at measured {}", metrics.height),
        }
    }
}

impl Drop for MultilineTextField {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/multiline_text_field_tests.rs"]
mod tests;
