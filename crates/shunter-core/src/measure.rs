//! Text measurement services.
//!
//! Measurement is an injected capability: the SVG back-end cannot ask a
//! browser how wide a string is, so settings carry a [`TextMeasure`] per node
//! kind. [`SimpleTextMeasure`] multiplies character counts by average
//! advances (good for monospace fonts); [`GlyphTableTextMeasure`] uses exact
//! per-glyph advances supplied by the embedder; [`CellTextMeasure`] is the
//! character-grid measure.

use rustc_hash::FxHashMap;
use unicode_width::UnicodeWidthChar;

use crate::error::EmbedderError;

/// Measured size of a piece of text, in the profile's native unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// An interface for measuring dimensions of rendered text.
pub trait TextMeasure {
    /// Called before rendering a node to measure its text.
    fn measure(&self, text: &str) -> Result<TextMetrics, EmbedderError>;

    /// Font size, in the profile's native unit.
    fn font_size(&self) -> f64;

    /// Height of a single line (CSS `line-height`).
    fn line_height(&self) -> f64;

    /// Distance from the baseline to the highest outline point.
    fn ascent(&self) -> f64;
}

fn char_cells(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// A text measuring service that multiplies the length of the text by the
/// average width of a character. Works best for monospace fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTextMeasure {
    /// Average advance of one narrow character.
    pub character_advance: f64,
    /// Average advance of one wide (double-cell) character.
    pub wide_character_advance: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub ascent: f64,
}

impl SimpleTextMeasure {
    /// Advances measured for Menlo at 14px; Consolas is slightly narrower.
    /// Matches the default embedded stylesheet.
    pub fn menlo_14() -> Self {
        Self {
            character_advance: 8.44,
            wide_character_advance: 14.34,
            font_size: 14.0,
            line_height: 14.0 * 1.1,
            ascent: 12.0,
        }
    }
}

impl TextMeasure for SimpleTextMeasure {
    fn measure(&self, text: &str) -> Result<TextMetrics, EmbedderError> {
        if text.is_empty() {
            return Ok(TextMetrics {
                width: 0.0,
                height: self.line_height.ceil(),
            });
        }

        let mut width = 0.0f64;
        let mut lines = 0usize;
        for line in text.split('\n') {
            lines += 1;
            let line_width: f64 = line
                .chars()
                .map(|c| match char_cells(c) {
                    1 => self.character_advance,
                    2 => self.wide_character_advance,
                    _ => 0.0,
                })
                .sum();
            width = width.max(line_width);
        }

        Ok(TextMetrics {
            width: width.ceil(),
            height: (lines as f64 * self.line_height).ceil(),
        })
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn ascent(&self) -> f64 {
        self.ascent
    }
}

/// A text measuring service backed by a per-glyph advance table, for embedders
/// that can read font metrics. Yields tight boxes where [`SimpleTextMeasure`]
/// estimates.
#[derive(Debug, Clone)]
pub struct GlyphTableTextMeasure {
    advances: FxHashMap<char, f64>,
    default_advance: f64,
    font_size: f64,
    line_height: f64,
    ascent: f64,
}

impl GlyphTableTextMeasure {
    pub fn new(default_advance: f64, font_size: f64, line_height: f64, ascent: f64) -> Self {
        Self {
            advances: FxHashMap::default(),
            default_advance,
            font_size,
            line_height,
            ascent,
        }
    }

    /// Records the advance of a single glyph.
    pub fn with_advance(mut self, glyph: char, advance: f64) -> Self {
        self.advances.insert(glyph, advance);
        self
    }

    /// Records advances for a batch of glyphs sharing one advance.
    pub fn with_advances(mut self, glyphs: impl IntoIterator<Item = char>, advance: f64) -> Self {
        for glyph in glyphs {
            self.advances.insert(glyph, advance);
        }
        self
    }
}

impl TextMeasure for GlyphTableTextMeasure {
    fn measure(&self, text: &str) -> Result<TextMetrics, EmbedderError> {
        if text.is_empty() {
            return Ok(TextMetrics {
                width: 0.0,
                height: self.line_height.ceil(),
            });
        }

        let mut width = 0.0f64;
        let mut lines = 0usize;
        for line in text.split('\n') {
            lines += 1;
            let line_width: f64 = line
                .chars()
                .map(|c| self.advances.get(&c).copied().unwrap_or(self.default_advance))
                .sum();
            width = width.max(line_width);
        }

        Ok(TextMetrics {
            width: width.ceil(),
            height: (lines as f64 * self.line_height).ceil(),
        })
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn ascent(&self) -> f64 {
        self.ascent
    }
}

/// The character-grid measure: one unit per terminal cell, two per wide
/// glyph, one line of height per text line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellTextMeasure;

impl TextMeasure for CellTextMeasure {
    fn measure(&self, text: &str) -> Result<TextMetrics, EmbedderError> {
        if text.is_empty() {
            return Ok(TextMetrics {
                width: 0.0,
                height: 1.0,
            });
        }

        let mut width = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            lines += 1;
            width = width.max(line.chars().map(char_cells).sum());
        }

        Ok(TextMetrics {
            width: width as f64,
            height: lines as f64,
        })
    }

    fn font_size(&self) -> f64 {
        1.0
    }

    fn line_height(&self) -> f64 {
        1.0
    }

    fn ascent(&self) -> f64 {
        1.0
    }
}
