use std::sync::{Arc, OnceLock, RwLock};

use autogrow_ui_graphics::FontSpec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    /// Height of a single line of text
    pub line_height: f32,
    /// Number of lines after wrapping
    pub line_count: usize,
}

/// Measures text laid out at a fixed width with unbounded height.
///
/// Implementations must be pure: the same input yields the same metrics.
/// Empty text measures as one line.
pub trait TextMeasurer: Send + Sync + 'static {
    fn measure(&self, text: &str, available_width: f32, font: &FontSpec) -> TextMetrics;
}

/// Fixed-advance measurer with greedy word wrapping.
///
/// Every character advances by `font.size * ADVANCE_RATIO`. Words longer than
/// a line are broken at character boundaries.
#[derive(Default, Debug, Clone, Copy)]
pub struct MonospacedTextMeasurer;

impl MonospacedTextMeasurer {
    pub const ADVANCE_RATIO: f32 = 0.6;

    pub fn char_width(font: &FontSpec) -> f32 {
        font.size * Self::ADVANCE_RATIO
    }
}

/// Line count and widest line (in characters) of one paragraph.
fn wrap_paragraph(paragraph: &str, max_chars: usize) -> (usize, usize) {
    let mut lines = 1;
    let mut line_len = 0;
    let mut widest = 0;

    for word in paragraph.split(' ') {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len <= max_chars {
            line_len += 1 + word_len;
        } else {
            if line_len > 0 {
                widest = widest.max(line_len);
                lines += 1;
            }
            if word_len > max_chars {
                let full_lines = (word_len - 1) / max_chars;
                lines += full_lines;
                widest = max_chars;
                line_len = word_len - full_lines * max_chars;
            } else {
                line_len = word_len;
            }
        }
    }
    (lines, widest.max(line_len))
}

impl TextMeasurer for MonospacedTextMeasurer {
    fn measure(&self, text: &str, available_width: f32, font: &FontSpec) -> TextMetrics {
        let char_width = Self::char_width(font);
        let line_height = font.line_height();
        let max_chars = if char_width > 0.0 && available_width.is_finite() {
            ((available_width / char_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let (line_count, widest) = text
            .split('\n')
            .map(|paragraph| wrap_paragraph(paragraph, max_chars))
            .fold((0, 0), |(lines, widest), (paragraph_lines, paragraph_widest)| {
                (lines + paragraph_lines, widest.max(paragraph_widest))
            });

        TextMetrics {
            width: widest as f32 * char_width,
            height: line_count as f32 * line_height,
            line_height,
            line_count,
        }
    }
}

fn global_text_measurer() -> &'static RwLock<Arc<dyn TextMeasurer>> {
    static TEXT_MEASURER: OnceLock<RwLock<Arc<dyn TextMeasurer>>> = OnceLock::new();
    TEXT_MEASURER.get_or_init(|| RwLock::new(Arc::new(MonospacedTextMeasurer)))
}

/// Replaces the process-wide measurer used by fields without an override.
pub fn set_text_measurer<M: TextMeasurer>(measurer: M) {
    let mut guard = global_text_measurer()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Arc::new(measurer);
}

pub fn current_text_measurer() -> Arc<dyn TextMeasurer> {
    let guard = global_text_measurer()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&guard)
}

pub fn measure_text(text: &str, available_width: f32, font: &FontSpec) -> TextMetrics {
    current_text_measurer().measure(text, available_width, font)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 17pt font: 10.2 per character, so 100 wide fits 9 characters.
    fn measure(text: &str) -> TextMetrics {
        MonospacedTextMeasurer.measure(text, 100.0, &FontSpec::default())
    }

    #[test]
    fn empty_text_is_one_line() {
        let metrics = measure("");
        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.height, 17.0);
        assert_eq!(metrics.width, 0.0);
    }

    #[test]
    fn words_wrap_greedily() {
        assert_eq!(measure("one two").line_count, 1);
        assert_eq!(measure("one two three").line_count, 2);
        assert_eq!(measure("one\ntwo\n").line_count, 3);
    }

    #[test]
    fn long_words_break_at_width() {
        let metrics = measure("abcdefghijklmnopqrst");
        assert_eq!(metrics.line_count, 3);
        assert!(metrics.width <= 100.0);
    }

    #[test]
    fn explicit_line_height_drives_height() {
        let font = FontSpec::system(17.0).with_line_height(20.0);
        let metrics = MonospacedTextMeasurer.measure("a\nb", 100.0, &font);
        assert_eq!(metrics.height, 40.0);
    }
}
