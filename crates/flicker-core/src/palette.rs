//! Two-color gradients and the 256-entry palettes derived from them.
//!
//! Every frame is drawn in "ink" levels between a background (level 0) and a
//! foreground (level 255). Because the palette holds every level of that
//! ramp, any pixel the compositor produces has an exact palette entry and no
//! nearest-color search is ever needed.

use serde::{Deserialize, Serialize};

use crate::color::{blend_by_alpha, Color};

/// Number of entries in a full palette.
pub const PALETTE_SIZE: usize = 256;

/// Ink level of the pure background.
pub const INK_BACKGROUND: u8 = 0;

/// Ink level of the pure foreground.
pub const INK_FOREGROUND: u8 = 255;

/// Linear ramp between a background and a foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub background: Color,
    pub foreground: Color,
}

impl Gradient {
    pub fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Color at a given ink level.
    pub fn color_at(&self, level: u8) -> Color {
        match level {
            INK_BACKGROUND => self.background,
            INK_FOREGROUND => self.foreground,
            _ => blend_by_alpha(self.foreground, self.background, level),
        }
    }

    /// Build the palette covering every ink level of this gradient.
    pub fn palette(&self) -> Palette {
        Palette::from_gradient(self)
    }
}

/// An ordered set of at most 256 colors; index 0 is the background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Background, foreground, then the 254 intermediate ramp steps.
    pub fn from_gradient(gradient: &Gradient) -> Self {
        let mut colors = Vec::with_capacity(PALETTE_SIZE);
        colors.push(gradient.background);
        colors.push(gradient.foreground);
        for level in 1..INK_FOREGROUND {
            colors.push(gradient.color_at(level));
        }
        Self { colors }
    }

    /// Palette index holding the given ink level of a gradient palette.
    pub fn index_of_level(level: u8) -> u8 {
        match level {
            INK_BACKGROUND => 0,
            INK_FOREGROUND => 1,
            other => other + 1,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    /// Flatten to packed RGB triples, the layout GIF color tables use.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_rgb8()).collect()
    }
}
