//! Visible line range of a multiline text field.

use crate::error::ConfigError;

/// Minimum and maximum number of visible lines.
///
/// The field is never shorter than `min_lines` and starts scrolling once
/// its content needs more than `max_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    min_lines: usize,
    max_lines: usize,
}

impl LineLimits {
    /// Two visible lines growing to five.
    pub const REFERENCE: Self = Self {
        min_lines: 2,
        max_lines: 5,
    };

    pub fn new(min_lines: usize, max_lines: usize) -> Result<Self, ConfigError> {
        if min_lines == 0 || min_lines > max_lines {
            return Err(ConfigError::InvalidLineLimits {
                min_lines,
                max_lines,
            });
        }
        Ok(Self {
            min_lines,
            max_lines,
        })
    }

    #[inline]
    pub fn min_lines(&self) -> usize {
        self.min_lines
    }

    #[inline]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Whether a text of `line_count` lines has to scroll.
    pub fn overflows(&self, line_count: usize) -> bool {
        line_count > self.max_lines
    }
}

impl Default for LineLimits {
    fn default() -> Self {
        Self::REFERENCE
    }
}
