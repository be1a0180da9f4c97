//! Static font-metric table for the briefing page's UI font.
//!
//! Character widths are in em units (relative to font size). This is an
//! intentional approximation — a layout engine uses exact glyph metrics, but a
//! static table reproduces the page's wrapping behavior closely enough to
//! decide where page breaks fall, and the strict overflow comparison in the
//! paginator tolerates borderline ambiguity (±1–2% of line width).
//!
//! The table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Text style
// ────────────────────────────────────────────────────────────────────────────

/// Rendering parameters of the visible page, shared by every height probe.
///
/// Defaults match the briefing page: 14 px font, 1.8 line height, 0.1 em word
/// spacing. The probe must use the same values as the visible page or the
/// committed pages will not match what the reader sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_px: f32,
    /// Unitless multiplier of the font size, CSS-style.
    pub line_height: f32,
    /// Extra advance added to every inter-word space, in em units.
    pub word_spacing_em: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_size_px: 14.0,
            line_height: 1.8,
            word_spacing_em: 0.1,
        }
    }
}

impl TextStyle {
    /// Height of one rendered text line in pixels.
    pub fn line_height_px(&self) -> f32 {
        self.font_size_px * self.line_height
    }

    /// The same style at a scaled font size (headings keep the line-height
    /// ratio and word spacing of the body text).
    pub fn scaled(&self, factor: f32) -> TextStyle {
        TextStyle {
            font_size_px: self.font_size_px * factor,
            ..self.clone()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for the page font.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// Humanist sans-serif — the application's inherited UI font.
static UI_SANS_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Returns the metric table for the page font.
pub fn ui_font() -> &'static FontMetricTable {
    &UI_SANS_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Estimates how many printed lines a text run occupies when word-wrapped at
/// `width_px` under the given style. Greedy word-wrap; an empty or
/// whitespace-only run occupies zero lines.
pub fn wrapped_line_count(
    text: &str,
    width_px: f32,
    style: &TextStyle,
    metrics: &FontMetricTable,
) -> usize {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }

    let em = style.font_size_px;
    let space_w = (metrics.space_width + style.word_spacing_em) * em;
    let mut line_count = 1usize;
    let mut current_width = 0.0_f32;
    let mut first = true;

    for word in &words {
        let word_w = metrics.measure_str(word) * em;

        if !first && current_width + space_w + word_w > width_px {
            line_count += 1;
            current_width = word_w;
            // first stays false — the next word on the new line gets a space
        } else {
            if !first {
                current_width += space_w;
            }
            current_width += word_w;
            first = false;
        }
    }
    line_count
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
