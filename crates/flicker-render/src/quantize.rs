//! Palette quantizer: full-color rasters to palette indices.
//!
//! Lookup is exact. The compositor only produces colors on the frame's
//! gradient, so a color missing from the palette is a rendering bug and is
//! reported instead of being snapped to a neighbour.

use std::collections::HashMap;

use flicker_core::{FlickerError, FlickerResult, FrameBuffer, IndexedFrame, Palette};

pub struct PaletteQuantizer {
    palette: Palette,
    lookup: HashMap<[u8; 3], u8>,
}

impl PaletteQuantizer {
    pub fn new(palette: Palette) -> Self {
        let mut lookup = HashMap::with_capacity(palette.len());
        for (i, color) in palette.colors().iter().enumerate() {
            // Gradients with close endpoints repeat colors; the lowest index wins.
            lookup.entry(color.to_rgb8()).or_insert(i as u8);
        }
        Self { palette, lookup }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index of one RGBA pixel.
    pub fn index_of(&self, rgba: &[u8]) -> Option<u8> {
        self.lookup.get(&[rgba[0], rgba[1], rgba[2]]).copied()
    }

    /// Map every pixel of a frame buffer to its palette index.
    pub fn quantize(&self, frame: &FrameBuffer) -> FlickerResult<Vec<u8>> {
        frame
            .pixels()
            .enumerate()
            .map(|(i, px)| {
                self.index_of(px).ok_or_else(|| {
                    FlickerError::Render(format!(
                        "pixel {} color rgb({}, {}, {}) is not in the palette",
                        i, px[0], px[1], px[2]
                    ))
                })
            })
            .collect()
    }

    /// Quantize a frame buffer into an indexed frame with the given delay.
    pub fn to_indexed(&self, frame: &FrameBuffer, delay: u16) -> FlickerResult<IndexedFrame> {
        Ok(IndexedFrame {
            width: frame.width,
            height: frame.height,
            indices: self.quantize(frame)?,
            palette: self.palette.clone(),
            delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flicker_core::{Color, Gradient};

    #[test]
    fn test_endpoints_map_to_first_two_indices() {
        let gradient = Gradient::new(Color::rgb(0, 0, 40), Color::rgb(250, 200, 0));
        let quantizer = PaletteQuantizer::new(gradient.palette());
        assert_eq!(quantizer.index_of(&gradient.background.to_rgba8()), Some(0));
        assert_eq!(quantizer.index_of(&gradient.foreground.to_rgba8()), Some(1));
    }

    #[test]
    fn test_every_gradient_level_is_exact() {
        let gradient = Gradient::new(Color::rgb(12, 34, 56), Color::rgb(210, 180, 150));
        let quantizer = PaletteQuantizer::new(gradient.palette());
        for level in 0..=255u8 {
            let index = quantizer
                .index_of(&gradient.color_at(level).to_rgba8())
                .unwrap();
            assert_eq!(quantizer.palette().get(index), Some(gradient.color_at(level)));
        }
    }

    #[test]
    fn test_foreign_color_is_render_error() {
        let quantizer = PaletteQuantizer::new(Gradient::new(Color::BLACK, Color::WHITE).palette());
        let fb = FrameBuffer::solid(2, 2, &Color::RED);
        assert!(matches!(quantizer.quantize(&fb), Err(FlickerError::Render(_))));
    }

    #[test]
    fn test_to_indexed_keeps_delay_and_size() {
        let gradient = Gradient::new(Color::BLACK, Color::WHITE);
        let quantizer = PaletteQuantizer::new(gradient.palette());
        let frame = quantizer
            .to_indexed(&FrameBuffer::solid(3, 2, &Color::WHITE), 25)
            .unwrap();
        assert_eq!(frame.indices, vec![1; 6]);
        assert_eq!(frame.delay, 25);
        assert_eq!((frame.width, frame.height), (3, 2));
    }

    #[test]
    fn test_degenerate_gradient_maps_to_background() {
        let quantizer = PaletteQuantizer::new(Gradient::new(Color::RED, Color::RED).palette());
        let fb = FrameBuffer::solid(2, 1, &Color::RED);
        assert_eq!(quantizer.quantize(&fb).unwrap(), vec![0, 0]);
    }
}
