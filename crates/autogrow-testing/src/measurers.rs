//! Deterministic text measurers for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use autogrow_ui::{TextMeasurer, TextMetrics};
use autogrow_ui_graphics::FontSpec;

fn metrics_for_height(height: f32, font: &FontSpec) -> TextMetrics {
    let line_height = font.line_height();
    let line_count = if height.is_finite() && line_height > 0.0 {
        ((height / line_height).ceil() as usize).max(1)
    } else {
        1
    };
    TextMetrics {
        width: 0.0,
        height,
        line_height,
        line_count,
    }
}

/// Measures with a closure from text to content height.
pub struct FnMeasurer<F> {
    height_of: F,
}

impl<F> FnMeasurer<F>
where
    F: Fn(&str) -> f32 + Send + Sync + 'static,
{
    pub fn new(height_of: F) -> Self {
        Self { height_of }
    }
}

impl<F> TextMeasurer for FnMeasurer<F>
where
    F: Fn(&str) -> f32 + Send + Sync + 'static,
{
    fn measure(&self, text: &str, _available_width: f32, font: &FontSpec) -> TextMetrics {
        metrics_for_height((self.height_of)(text), font)
    }
}

#[derive(Default)]
struct Script {
    heights: Mutex<BTreeMap<String, f32>>,
    calls: AtomicUsize,
}

/// Returns scripted heights per text and counts calls.
///
/// Clones share the script, so a test can keep one handle and give another
/// to the widget. Unscripted text measures as one line per `\n`-separated
/// line of the font.
#[derive(Clone, Default)]
pub struct ScriptedMeasurer {
    script: Arc<Script>,
}

impl ScriptedMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(self, text: impl Into<String>, height: f32) -> Self {
        self.script(text, height);
        self
    }

    pub fn script(&self, text: impl Into<String>, height: f32) {
        self.script
            .heights
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(text.into(), height);
    }

    /// Number of `measure` calls so far.
    pub fn calls(&self) -> usize {
        self.script.calls.load(Ordering::SeqCst)
    }
}

impl TextMeasurer for ScriptedMeasurer {
    fn measure(&self, text: &str, _available_width: f32, font: &FontSpec) -> TextMetrics {
        self.script.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .heights
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(text)
            .copied();
        let height =
            scripted.unwrap_or_else(|| text.split('\n').count() as f32 * font.line_height());
        metrics_for_height(height, font)
    }
}
