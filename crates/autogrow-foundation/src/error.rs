use std::fmt;

/// Rejected widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A height was NaN, infinite or negative.
    InvalidHeight { name: &'static str, value: f32 },
    /// `min_height` is larger than `max_height`.
    InvertedHeightBounds { min: f32, max: f32 },
    /// Line limits must be at least one line and `min_lines <= max_lines`.
    InvalidLineLimits { min_lines: usize, max_lines: usize },
    /// Line height must be finite and positive.
    InvalidLineHeight { value: f32 },
    /// The width text wraps at must be finite and positive.
    InvalidContentWidth { value: f32 },
    /// Screen height for keyboard tracking must be finite and positive.
    InvalidScreenHeight { value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHeight { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            ConfigError::InvertedHeightBounds { min, max } => {
                write!(f, "min height {min} exceeds max height {max}")
            }
            ConfigError::InvalidLineLimits {
                min_lines,
                max_lines,
            } => write!(
                f,
                "line limits {min_lines}..={max_lines} must be non-empty and start at 1 or more"
            ),
            ConfigError::InvalidLineHeight { value } => {
                write!(f, "line height must be finite and positive, got {value}")
            }
            ConfigError::InvalidContentWidth { value } => {
                write!(f, "content width must be finite and positive, got {value}")
            }
            ConfigError::InvalidScreenHeight { value } => {
                write!(f, "screen height must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Checks that `value` is usable as a positive layout dimension.
pub(crate) fn positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
