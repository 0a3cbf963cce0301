//! # Text Metrics Provider
//!
//! The layout engine never does font shaping itself — it consumes a "measure
//! text width" capability through the [`TextMeasurer`] trait and treats the
//! result as opaque. A width of `0.0` is the documented sentinel for "no
//! measurement backend available"; callers degrade to minimum page count and
//! no clipping rather than failing.
//!
//! Three implementations ship with the crate:
//! - [`BuiltinMetrics`]: character-class width tables tuned per font
//!   category. No font files needed, good enough for page estimation.
//! - [`FaceMetrics`]: real advance widths parsed from a TrueType/OpenType
//!   face via ttf-parser.
//! - [`NullMeasurer`]: always returns the sentinel. For headless contexts
//!   and as the degenerate fixture in tests.

use std::collections::HashMap;

use crate::fonts::{self, FontCategory};

/// Measure rendered text width. The returned width is in the same unit
/// family as `font_size` (device-independent pixels in, pixels out).
///
/// Implementations return `0.0` when no measurement is possible.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64, family: &str) -> f64;
}

/// Approximate per-character advance widths, in em fractions, tuned per font
/// category. Derived from typical metrics of the catalog families; the page
/// estimator applies its own safety fudge on top, so coarse is fine here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl BuiltinMetrics {
    pub fn new() -> Self {
        Self
    }

    fn char_em(ch: char, category: FontCategory) -> f64 {
        if category == FontCategory::Monospace {
            return 0.60;
        }
        let base = match ch {
            ' ' => 0.33,
            '.' | ',' | '\'' | ':' | ';' | '|' => 0.28,
            '!' | 'i' | 'j' | 'l' | 't' | 'f' | 'r' => 0.35,
            'm' | 'w' => 0.78,
            'M' | 'W' => 0.89,
            'I' => 0.37,
            '0'..='9' => 0.55,
            'A'..='Z' => 0.68,
            'a'..='z' => 0.50,
            _ => 0.60,
        };
        let factor = match category {
            FontCategory::Serif => 0.97,
            FontCategory::SansSerif => 1.0,
            FontCategory::Display => 1.08,
            FontCategory::Handwriting => 0.92,
            FontCategory::Monospace => 1.0,
        };
        base * factor
    }
}

impl TextMeasurer for BuiltinMetrics {
    fn measure(&self, text: &str, font_size: f64, family: &str) -> f64 {
        let category = fonts::category_of(family);
        text.chars()
            .map(|ch| Self::char_em(ch, category) * font_size)
            .sum()
    }
}

/// Advance widths parsed from a real font face.
///
/// Built once from font bytes; measurement afterwards is a pure table
/// lookup with no I/O and no hidden state beyond this handle.
#[derive(Debug, Clone)]
pub struct FaceMetrics {
    units_per_em: u16,
    advance_widths: HashMap<char, u16>,
    default_advance: u16,
}

impl FaceMetrics {
    /// Parse metrics from raw font data. Returns `None` when the face cannot
    /// be parsed.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Sample the Basic Multilingual Plane to build the width table.
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(Self {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }

    fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }
}

impl TextMeasurer for FaceMetrics {
    fn measure(&self, text: &str, font_size: f64, _family: &str) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

/// The headless measurer: always the zero sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMeasurer;

impl TextMeasurer for NullMeasurer {
    fn measure(&self, _text: &str, _font_size: f64, _family: &str) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_width_grows_with_text() {
        let m = BuiltinMetrics::new();
        let short = m.measure("HI", 100.0, "Georgia");
        let long = m.measure("HI THERE FRIEND", 100.0, "Georgia");
        assert!(long > short);
    }

    #[test]
    fn builtin_width_scales_with_font_size() {
        let m = BuiltinMetrics::new();
        let small = m.measure("HOME!", 100.0, "Georgia");
        let large = m.measure("HOME!", 200.0, "Georgia");
        assert!((large - small * 2.0).abs() < 1e-6);
    }

    #[test]
    fn builtin_monospace_is_uniform() {
        let m = BuiltinMetrics::new();
        let a = m.measure("iiii", 100.0, "Courier New");
        let b = m.measure("WWWW", 100.0, "Courier New");
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn null_measurer_returns_sentinel() {
        assert_eq!(NullMeasurer.measure("WELCOME HOME", 450.0, "Georgia"), 0.0);
    }

    #[test]
    fn face_metrics_rejects_garbage() {
        assert!(FaceMetrics::from_font_data(b"not a font").is_none());
    }
}
