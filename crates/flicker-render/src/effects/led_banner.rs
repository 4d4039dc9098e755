//! Scrolling LED banner.

use flicker_core::{FlickerResult, Gradient, LedBannerOptions};

use crate::canvas::{Canvas, TextAnchor};
use crate::font::{typeface, GlyphFace, Typeface};

/// Font size as a fraction of the banner height.
const FONT_SIZE_FACTOR: f32 = 0.8;

pub struct LedBanner {
    frames: usize,
    delay: u16,
    size: (u32, u32),
    gradient: Gradient,
    forward: bool,
    font_size: f32,
    /// Width of one `text + spacer` block.
    block_width: f32,
    /// The block repeated enough times to cover the canvas while scrolling.
    strip: String,
    typeface: &'static Typeface,
}

impl LedBanner {
    pub fn new(options: &LedBannerOptions) -> FlickerResult<Self> {
        let size = options.size();
        let typeface = typeface(&options.font)?;
        let font_size = size.1 as f32 * FONT_SIZE_FACTOR;
        let face = typeface.face(font_size);

        let block = format!("{}{}", options.text, options.spacer());
        let block_width = face.measure(&block).0.max(1.0);
        let copies = (size.0 as f32 / block_width).ceil() as usize + 2;

        tracing::debug!(
            "LED banner block width {:.1}px, {} copies at {:.1}px",
            block_width,
            copies,
            font_size
        );

        Ok(Self {
            frames: options.frame_count(),
            delay: options.delay(),
            size,
            gradient: options.gradient(),
            forward: options.forward,
            font_size,
            block_width,
            strip: block.repeat(copies),
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

    pub fn gradient(&self) -> Gradient {
        self.gradient
    }

    pub fn block_width(&self) -> f32 {
        self.block_width
    }

    /// Scroll offset of frame `index`, a fraction of one block width.
    pub fn state(&self, index: usize) -> f32 {
        index as f32 * self.block_width / self.frames as f32
    }

    /// Left edge of the strip for a given offset.
    pub fn strip_x(&self, offset: f32) -> f32 {
        if self.forward {
            -self.block_width + offset
        } else {
            -offset
        }
    }

    pub fn compose(&self, offset: f32, canvas: &mut Canvas) {
        canvas.clear();
        let face = self.typeface.face(self.font_size);
        let y = canvas.height() as f32 / 2.0;
        canvas.draw_text(&face, &self.strip, self.strip_x(offset), y, TextAnchor::START);
    }
}
