//! Fonts and the font-metrics boundary.
//!
//! Widgets never rasterize text themselves. They describe text with a
//! [`Font`] and ask a [`FontMetrics`] provider how large it is; the real
//! provider lives in the rendering backend. [`FixedMetrics`] is a
//! backend-free provider that treats every grapheme as the same width.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Rect;

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A font handle: family, pixel size, and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    /// Create a normal-weight font.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
        }
    }

    /// Return a bold variant of this font.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Return a copy with a different pixel size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 14.0)
    }
}

/// Measures text for layout and hit-testing.
pub trait FontMetrics: Send + Sync {
    /// Bounding rectangle of `text` laid out on one line, origin at (0, 0).
    fn text_bounds(&self, text: &str, font: &Font) -> Rect;

    /// Height of one line of text in `font`.
    fn line_height(&self, font: &Font) -> f32;

    /// Horizontal offset of the caret placed before grapheme `index`.
    fn caret_offset(&self, text: &str, font: &Font, index: usize) -> f32 {
        let prefix: String = text.graphemes(true).take(index).collect();
        self.text_bounds(&prefix, font).width()
    }

    /// Grapheme index nearest to horizontal offset `x`.
    fn hit_test_text(&self, text: &str, font: &Font, x: f32) -> usize {
        let count = text.graphemes(true).count();
        let mut previous = 0.0;
        for index in 1..=count {
            let edge = self.caret_offset(text, font, index);
            if x < (previous + edge) / 2.0 {
                return index - 1;
            }
            previous = edge;
        }
        count
    }
}

/// Metrics that give every grapheme the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    /// Advance per grapheme as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_ratio: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_ratio: 1.25,
        }
    }
}

impl FixedMetrics {
    fn advance(&self, font: &Font) -> f32 {
        let ratio = match font.weight {
            FontWeight::Normal => self.advance_ratio,
            FontWeight::Bold => self.advance_ratio * 1.1,
        };
        font.size * ratio
    }
}

impl FontMetrics for FixedMetrics {
    fn text_bounds(&self, text: &str, font: &Font) -> Rect {
        let graphemes = text.graphemes(true).count() as f32;
        Rect::new(0.0, 0.0, graphemes * self.advance(font), self.line_height(font))
    }

    fn line_height(&self, font: &Font) -> f32 {
        font.size * self.line_ratio
    }

    fn caret_offset(&self, text: &str, font: &Font, index: usize) -> f32 {
        let graphemes = text.graphemes(true).count().min(index) as f32;
        graphemes * self.advance(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_metrics_bounds() {
        let metrics = FixedMetrics::default();
        let font = Font::new("mono", 10.0);
        let bounds = metrics.text_bounds("abcd", &font);
        assert_eq!(bounds.width(), 24.0);
        assert_eq!(bounds.height(), 12.5);
    }

    #[test]
    fn test_fixed_metrics_counts_graphemes() {
        let metrics = FixedMetrics::default();
        let font = Font::new("mono", 10.0);
        // "e" + combining acute accent is one grapheme.
        assert_eq!(metrics.text_bounds("e\u{301}x", &font).width(), 12.0);
    }

    #[test]
    fn test_hit_test_text_rounds_to_nearest_caret() {
        let metrics = FixedMetrics::default();
        let font = Font::new("mono", 10.0);
        assert_eq!(metrics.hit_test_text("abc", &font, 0.0), 0);
        assert_eq!(metrics.hit_test_text("abc", &font, 4.0), 1);
        assert_eq!(metrics.hit_test_text("abc", &font, 13.0), 2);
        assert_eq!(metrics.hit_test_text("abc", &font, 100.0), 3);
    }
}
