//! Font provider.
//! Uses fontdue for CPU-based glyph rasterization over embedded TrueType faces.

use std::collections::HashMap;
use std::sync::OnceLock;

use flicker_core::{FlickerError, FlickerResult, DEFAULT_FONT};
use fontdue::{Font, FontSettings};

/// Embedded font bytes by allow-listed name.
const EMBEDDED_FONTS: &[(&str, &[u8])] = &[
    (
        "condensed-bold",
        include_bytes!("../assets/fonts/DejaVuSansCondensed-Bold.ttf"),
    ),
    (
        "mono-bold",
        include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf"),
    ),
];

/// Parsed embedded fonts, keyed by name. Parse failures are kept so they can
/// be reported as asset errors on lookup.
static TYPEFACES: OnceLock<HashMap<&'static str, Result<Typeface, String>>> = OnceLock::new();

fn typefaces() -> &'static HashMap<&'static str, Result<Typeface, String>> {
    TYPEFACES.get_or_init(|| {
        EMBEDDED_FONTS
            .iter()
            .map(|(name, bytes)| {
                let parsed = Typeface::from_bytes(bytes).map_err(|e| e.to_string());
                (*name, parsed)
            })
            .collect()
    })
}

/// Names of the allow-listed fonts.
pub fn font_names() -> impl Iterator<Item = &'static str> {
    EMBEDDED_FONTS.iter().map(|(name, _)| *name)
}

/// Look up an embedded typeface by name.
///
/// Names outside the allow-list fall back to the default face. Bytes that
/// fail to parse are an asset error.
pub fn typeface(name: &str) -> FlickerResult<&'static Typeface> {
    let table = typefaces();
    let (resolved, entry) = match table.get_key_value(name) {
        Some((key, entry)) => (*key, entry),
        None => {
            tracing::warn!("unknown font '{}', using '{}'", name, DEFAULT_FONT);
            let entry = table
                .get(DEFAULT_FONT)
                .ok_or_else(|| FlickerError::asset("default font is not embedded", DEFAULT_FONT))?;
            (DEFAULT_FONT, entry)
        }
    };
    entry
        .as_ref()
        .map_err(|message| FlickerError::asset(message.clone(), resolved))
}

/// A parsed font, not yet bound to a size.
pub struct Typeface {
    font: Font,
}

impl Typeface {
    /// Parse TrueType/OpenType bytes.
    pub fn from_bytes(bytes: &[u8]) -> FlickerResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FlickerError::asset(format!("failed to parse font: {}", e), "<bytes>"))?;
        Ok(Self { font })
    }

    /// Bind the typeface to a pixel size.
    pub fn face(&self, size: f32) -> FontFace<'_> {
        let size = size.max(1.0);
        let (ascent, descent) = match self.font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent, -m.descent),
            None => (size * 0.8, size * 0.2),
        };
        FontFace {
            font: &self.font,
            size,
            ascent,
            descent,
        }
    }
}

/// A rasterized glyph: coverage bitmap plus placement relative to the pen.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Offset from the pen position to the bitmap's left edge.
    pub xmin: i32,
    /// Distance from the baseline up to the bitmap's top edge.
    pub top: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    /// Row-major coverage, 0..=255.
    pub coverage: Vec<u8>,
}

/// A font bound to a size: the capability the layout engine and the canvas
/// need from a font.
pub trait GlyphFace {
    /// Pixel size.
    fn size(&self) -> f32;

    /// Distance from the baseline to the top of the line box.
    fn ascent(&self) -> f32;

    /// Distance from the baseline to the bottom of the line box (positive).
    fn descent(&self) -> f32;

    /// Horizontal advance of one character.
    fn advance(&self, ch: char) -> f32;

    /// Rasterize one character.
    fn rasterize(&self, ch: char) -> Glyph;

    /// Width of a run of text and the height of its line box.
    fn measure(&self, text: &str) -> (f32, f32) {
        let width = text.chars().map(|ch| self.advance(ch)).sum();
        (width, self.ascent() + self.descent())
    }
}

/// A `Typeface` bound to a pixel size.
#[derive(Clone, Copy)]
pub struct FontFace<'a> {
    font: &'a Font,
    size: f32,
    ascent: f32,
    descent: f32,
}

impl GlyphFace for FontFace<'_> {
    fn size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }

    fn advance(&self, ch: char) -> f32 {
        self.font.metrics(ch, self.size).advance_width
    }

    fn rasterize(&self, ch: char) -> Glyph {
        let (metrics, coverage) = self.font.rasterize(ch, self.size);
        Glyph {
            xmin: metrics.xmin,
            top: metrics.height as i32 + metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            advance: metrics.advance_width,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_parse() {
        for name in font_names() {
            assert!(typeface(name).is_ok(), "font {} should parse", name);
        }
    }

    #[test]
    fn test_unknown_font_falls_back_to_default() {
        let fallback = typeface("comic-sans").unwrap();
        let default = typeface(DEFAULT_FONT).unwrap();
        assert!(std::ptr::eq(fallback, default));
    }

    #[test]
    fn test_invalid_bytes_is_asset_error() {
        let result = Typeface::from_bytes(b"definitely not a font");
        assert!(matches!(result, Err(FlickerError::Asset { .. })));
    }

    #[test]
    fn test_measure_scales_with_size() {
        let tf = typeface(DEFAULT_FONT).unwrap();
        let (small_w, small_h) = tf.face(20.0).measure("Hello");
        let (large_w, large_h) = tf.face(40.0).measure("Hello");
        assert!(small_w > 0.0);
        assert!(large_w > small_w * 1.8);
        assert!(large_h > small_h * 1.8);
    }

    #[test]
    fn test_measure_empty_text_has_line_height() {
        let face = typeface(DEFAULT_FONT).unwrap().face(30.0);
        let (w, h) = face.measure("");
        assert_eq!(w, 0.0);
        assert!(h > 0.0);
    }

    #[test]
    fn test_rasterize_has_coverage() {
        let face = typeface(DEFAULT_FONT).unwrap().face(48.0);
        let glyph = face.rasterize('X');
        assert!(glyph.width > 0 && glyph.height > 0);
        assert_eq!(glyph.coverage.len(), glyph.width * glyph.height);
        assert!(glyph.coverage.iter().any(|&c| c > 200));
        assert!(glyph.top > 0);
    }
}
