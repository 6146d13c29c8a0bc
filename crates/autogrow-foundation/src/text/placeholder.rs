//! Placeholder label shown while the input is empty.

use autogrow_ui_graphics::{EdgeInsets, Rect, Size};

/// Layout of the placeholder label inside the field.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderStyle {
    /// Offset of the label from the field's top-leading corner. The trailing
    /// inset mirrors the leading one so the label wraps inside the field.
    pub insets: EdgeInsets,
}

impl PlaceholderStyle {
    pub const LEADING: f32 = 5.0;
    pub const TOP: f32 = 8.0;

    /// Frame of the label for a field of `field_size`; the label's own height
    /// is left to the host's text layout.
    pub fn label_frame(&self, field_size: Size, label_height: f32) -> Rect {
        let width = (field_size.width - self.insets.horizontal_sum()).max(0.0);
        Rect::new(self.insets.left, self.insets.top, width, label_height)
    }
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            insets: EdgeInsets::new(Self::LEADING, Self::TOP, Self::LEADING, 0.0),
        }
    }
}

/// Keeps placeholder visibility in sync with the emptiness of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderController {
    text: String,
    style: PlaceholderStyle,
    visible: bool,
}

impl PlaceholderController {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: PlaceholderStyle::default(),
            visible: true,
        }
    }

    pub fn with_style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Recomputes visibility from the current content. Whitespace counts as
    /// content. Returns `true` when visibility flipped.
    pub fn sync(&mut self, content: &str) -> bool {
        let visible = content.is_empty();
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &PlaceholderStyle {
        &self.style
    }
}
