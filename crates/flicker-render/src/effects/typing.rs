//! Typing text: the text appears one character per frame, then the caret
//! blinks.

use flicker_core::{FlickerResult, Gradient, TypingTextOptions};

use crate::canvas::{Canvas, TextAnchor};
use crate::font::{typeface, GlyphFace, Typeface};
use crate::layout::{autofit_single_line, initial_font_size};

/// The caret glyph.
pub const CURSOR: &str = "|";

/// Visible prefix length and caret visibility for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typed {
    pub chars: usize,
    pub cursor: bool,
}

pub struct TypingText {
    delay: u16,
    size: (u32, u32),
    gradient: Gradient,
    padding: u32,
    font_size: f32,
    chars: Vec<char>,
    typeface: &'static Typeface,
}

impl TypingText {
    pub fn new(options: &TypingTextOptions) -> FlickerResult<Self> {
        let size = options.size();
        let padding = options.padding();
        let typeface = typeface(&options.font)?;
        let text = options.text.trim();

        let font_size = autofit_single_line(
            &format!("{}{}", text, CURSOR),
            (size.0 - 2 * padding) as f32,
            (size.1 - 2 * padding) as f32,
            initial_font_size(size.1 as f32),
            |s, font_size| typeface.face(font_size).measure(s),
        );
        tracing::debug!("typing text fitted at {:.1}px", font_size);

        Ok(Self {
            delay: options.delay(),
            size,
            gradient: options.gradient(),
            padding,
            font_size,
            chars: text.chars().collect(),
            typeface,
        })
    }

    /// One frame per prefix length including the empty one, then the blink.
    pub fn frame_count(&self) -> usize {
        self.chars.len() + 1 + TypingTextOptions::BLINK_FRAMES
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

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn state(&self, index: usize) -> Typed {
        let total = self.chars.len();
        if index <= total {
            Typed {
                chars: index,
                cursor: false,
            }
        } else {
            Typed {
                chars: total,
                cursor: (index - total - 1) % 2 == 0,
            }
        }
    }

    pub fn compose(&self, typed: &Typed, canvas: &mut Canvas) {
        canvas.clear();
        let face = self.typeface.face(self.font_size);
        let (_, m_height) = face.measure("M");
        let x = self.padding as f32;
        let y = (canvas.height() as f32 + m_height) / 2.0;

        let visible: String = self.chars[..typed.chars.min(self.chars.len())].iter().collect();
        canvas.draw_text(&face, &visible, x, y, TextAnchor::Baseline);

        if typed.cursor {
            let cursor_x = x + face.measure(&visible).0;
            canvas.draw_text(&face, CURSOR, cursor_x, y, TextAnchor::Baseline);
        }
    }
}
