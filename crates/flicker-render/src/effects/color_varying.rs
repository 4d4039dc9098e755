//! Color-varying text: wrapped, autofit text whose background and text hues
//! rotate through the color wheel over the animation.

use flicker_core::{Color, ColorVaryingTextOptions, FlickerResult, Gradient};

use crate::canvas::{Canvas, TextAnchor};
use crate::font::{typeface, GlyphFace, Typeface};
use crate::layout::{autofit_font_size, Layout};

/// How the text hue relates to the background hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Complementary,
    Triadic,
    Monochromatic,
    Analogous,
}

impl ColorScheme {
    /// Resolve a scheme name; unknown names are analogous.
    pub fn from_name(name: &str) -> Self {
        match name {
            "complementary" => ColorScheme::Complementary,
            "triadic" => ColorScheme::Triadic,
            "monochromatic" => ColorScheme::Monochromatic,
            "analogous" => ColorScheme::Analogous,
            other => {
                tracing::warn!("unknown color scheme '{}', using analogous", other);
                ColorScheme::Analogous
            }
        }
    }

    /// Background and text colors for a background hue in degrees.
    pub fn gradient(&self, hue: f64) -> Gradient {
        let (background, text) = match self {
            ColorScheme::Complementary => (
                Color::from_hsl(hue, 1.0, 0.3),
                Color::from_hsl(hue + 180.0, 1.0, 0.8),
            ),
            ColorScheme::Triadic => (
                Color::from_hsl(hue, 1.0, 0.3),
                Color::from_hsl(hue + 120.0, 1.0, 0.8),
            ),
            ColorScheme::Monochromatic => (
                Color::from_hsl(hue, 0.8, 0.2),
                Color::from_hsl(hue, 0.8, 0.8),
            ),
            ColorScheme::Analogous => (
                Color::from_hsl(hue, 1.0, 0.3),
                Color::from_hsl(hue + 30.0, 1.0, 0.8),
            ),
        };
        Gradient::new(background, text)
    }
}

pub struct ColorVaryingText {
    frames: usize,
    delay: u16,
    size: (u32, u32),
    padding: u32,
    scheme: ColorScheme,
    layout: Layout,
    typeface: &'static Typeface,
}

impl ColorVaryingText {
    pub fn new(options: &ColorVaryingTextOptions) -> FlickerResult<Self> {
        let size = options.size();
        let padding = options.padding();
        let typeface = typeface(&options.font)?;
        let layout = autofit_font_size(
            options.text.trim(),
            size.0 as f32,
            size.1 as f32,
            padding as f32,
            |text, font_size| typeface.face(font_size).measure(text),
        );

        tracing::debug!(
            "color-varying text fitted at {:.1}px over {} lines",
            layout.font_size,
            layout.lines.len()
        );

        Ok(Self {
            frames: options.frame_count(),
            delay: options.delay(),
            size,
            padding,
            scheme: ColorScheme::from_name(&options.color_scheme),
            layout,
            typeface,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn delay(&self) -> u16 {
        self.delay
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Background hue of frame `index`, in degrees.
    pub fn state(&self, index: usize) -> f64 {
        index as f64 * 360.0 / self.frames as f64
    }

    pub fn gradient(&self, index: usize) -> Gradient {
        self.scheme.gradient(self.state(index))
    }

    pub fn compose(&self, canvas: &mut Canvas) {
        canvas.clear();
        let face = self.typeface.face(self.layout.font_size);
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let padding = self.padding as f32;
        let line_height = self.layout.line_height();
        let start_y =
            padding + (h - 2.0 * padding - self.layout.total_height()) / 2.0 + self.layout.font_size;

        for (i, line) in self.layout.lines.iter().enumerate() {
            let (line_width, _) = face.measure(line);
            let x = padding + (w - 2.0 * padding - line_width) / 2.0;
            let y = start_y + i as f32 * line_height;
            canvas.draw_text(&face, line, x, y, TextAnchor::Baseline);
        }
    }
}
