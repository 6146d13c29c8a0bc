//! Widgets

pub mod multiline_text_field;

pub use multiline_text_field::{
    FieldPhase, InputState, MultilineTextField, MultilineTextFieldOptions, DEFAULT_CONTENT_WIDTH,
};
