//! Auto-growing multiline text field with a placeholder, a keyboard dismiss
//! accessory and keyboard-aware screen layout.
//!
//! A host owns a [`Runtime`](autogrow_core::Runtime), mounts a
//! [`MultilineTextField`] bound to a `MutableState<String>`, and mounts a
//! [`KeyboardAwareLayout`] for the screen. Platform keyboard notifications go
//! through [`post_keyboard_event`](autogrow_foundation::post_keyboard_event).

mod keyboard_layout;
pub mod text;
pub mod widgets;

pub use keyboard_layout::{KeyboardAwareLayout, KEYBOARD_ANIMATION_MILLIS};
pub use text::{
    current_text_measurer, measure_text, set_text_measurer, MonospacedTextMeasurer, TextMeasurer,
    TextMetrics,
};
pub use widgets::{FieldPhase, InputState, MultilineTextField, MultilineTextFieldOptions};

pub mod prelude {
    pub use crate::keyboard_layout::KeyboardAwareLayout;
    pub use crate::text::{set_text_measurer, TextMeasurer, TextMetrics};
    pub use crate::widgets::{InputState, MultilineTextField, MultilineTextFieldOptions};
    pub use autogrow_foundation::{
        AccessoryContext, AccessoryPolicy, AutoFocusPolicy, DeviceClass, HeightBounds,
        KeyboardEvent, KeyboardEventKind, SceneActivity,
    };
}
