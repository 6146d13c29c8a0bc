//! Font description consumed by text measurers.

/// Point size of the system body font used by the reference input.
pub const SYSTEM_BODY_FONT_SIZE: f32 = 17.0;

/// Font data handed to a measurer (no glyph data, rendering is the host's job).
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: f32,
    /// Explicit line height; `None` means one line per point size.
    pub line_height: Option<f32>,
}

impl FontSpec {
    /// The host's system font at `size` points.
    pub fn system(size: f32) -> Self {
        Self {
            family: None,
            size,
            line_height: None,
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Height of one line of text in this font.
    pub fn line_height(&self) -> f32 {
        self.line_height.unwrap_or(self.size)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system(SYSTEM_BODY_FONT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_defaults_to_size() {
        assert_eq!(FontSpec::default().line_height(), 17.0);
        assert_eq!(FontSpec::system(12.0).with_line_height(15.0).line_height(), 15.0);
    }
}
