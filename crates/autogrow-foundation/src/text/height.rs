//! Height resolution for auto-growing text fields.
//!
//! The measured content height is clamped into [`HeightBounds`]; content that
//! does not fit the maximum turns scrolling on. [`HeightTracker`] remembers
//! the last resolution so hosts are only told about real changes.

use crate::error::ConfigError;
use crate::text::LineLimits;

/// Validated `[min, max]` height range of a text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBounds {
    min: f32,
    max: f32,
}

impl HeightBounds {
    /// Two to five lines of the 17pt system body font.
    pub const REFERENCE: HeightBounds = HeightBounds {
        min: 34.0,
        max: 85.0,
    };

    /// Creates bounds, rejecting non-finite, negative or inverted values.
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || min < 0.0 {
            return Err(ConfigError::InvalidHeight {
                name: "min_height",
                value: min,
            });
        }
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::InvalidHeight {
                name: "max_height",
                value: max,
            });
        }
        if min > max {
            return Err(ConfigError::InvertedHeightBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds spanning `limits` lines of `line_height` each.
    pub fn from_line_limits(line_height: f32, limits: LineLimits) -> Result<Self, ConfigError> {
        if !crate::error::positive_finite(line_height) {
            return Err(ConfigError::InvalidLineHeight { value: line_height });
        }
        Self::new(
            line_height * limits.min_lines() as f32,
            line_height * limits.max_lines() as f32,
        )
    }

    /// Two to five lines of `line_height`, the reference input geometry.
    pub fn reference(line_height: f32) -> Result<Self, ConfigError> {
        Self::from_line_limits(line_height, LineLimits::REFERENCE)
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Resolves `measured` against these bounds.
    pub fn resolve(&self, measured: f32) -> HeightResolution {
        resolve(measured, *self)
    }
}

/// Outcome of resolving one measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightResolution {
    /// Height to apply to the text surface, always inside the bounds.
    pub height: f32,
    /// True when the content is taller than the maximum height.
    pub scrolling_enabled: bool,
}

impl HeightResolution {
    /// Bit-level comparison; `-0.0` and `0.0` differ, equal NaNs match.
    pub fn same_as(&self, other: &HeightResolution) -> bool {
        self.height.to_bits() == other.height.to_bits()
            && self.scrolling_enabled == other.scrolling_enabled
    }
}

/// Clamps `measured` into `bounds` and decides whether scrolling is needed.
///
/// `+inf` resolves to the maximum with scrolling; `NaN` resolves to the
/// minimum without scrolling.
pub fn resolve(measured: f32, bounds: HeightBounds) -> HeightResolution {
    if measured.is_nan() {
        return HeightResolution {
            height: bounds.min,
            scrolling_enabled: false,
        };
    }
    HeightResolution {
        height: measured.clamp(bounds.min, bounds.max),
        scrolling_enabled: measured > bounds.max,
    }
}

/// Remembers the last applied resolution and filters out repeats.
#[derive(Debug, Clone)]
pub struct HeightTracker {
    bounds: HeightBounds,
    last_measured: Option<f32>,
    current: HeightResolution,
}

impl HeightTracker {
    /// Starts at the minimum height with scrolling off.
    pub fn new(bounds: HeightBounds) -> Self {
        Self {
            bounds,
            last_measured: None,
            current: HeightResolution {
                height: bounds.min,
                scrolling_enabled: false,
            },
        }
    }

    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn current(&self) -> HeightResolution {
        self.current
    }

    pub fn last_measured(&self) -> Option<f32> {
        self.last_measured
    }

    /// Records a measurement. Returns the new resolution only when it differs
    /// from the one currently applied.
    pub fn apply(&mut self, measured: f32) -> Option<HeightResolution> {
        self.last_measured = Some(measured);
        let next = self.bounds.resolve(measured);
        if next.same_as(&self.current) {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
