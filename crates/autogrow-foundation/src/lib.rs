//! Building blocks of the auto-growing multiline input.
//!
//! Nothing in this crate schedules work on its own: the height policy,
//! placeholder and accessory decisions are plain values, while focus and
//! keyboard notifications are thread-local registries the widget layer
//! drives.

pub mod accessory;
pub mod error;
pub mod focus;
pub mod keyboard;
pub mod lifecycle;
pub mod text;

pub use accessory::{
    AccessoryAction, AccessoryContext, AccessoryDescriptor, AccessoryPolicy, AccessorySlot,
    AutoFocusPolicy, DeviceClass, HardwareKeyboardAccessory,
};
pub use error::ConfigError;
pub use focus::{FocusId, FocusManager, FocusState};
pub use keyboard::{
    keyboard_observer_count, observe_keyboard_events, post_keyboard_event, KeyboardEvent,
    KeyboardEventKind, KeyboardGeometry, KeyboardObserverRegistration, KeyboardState,
    KeyboardTracker,
};
pub use lifecycle::SceneActivity;
pub use text::{
    HeightBounds, HeightResolution, HeightTracker, LineLimits, PlaceholderController,
    PlaceholderStyle, TextChange, TextChangeSubscription, TextFieldState,
};
