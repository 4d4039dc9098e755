use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use crate::Color;

/// A full-color RGBA raster, the compositor's output before quantization.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    /// Raw RGBA pixel data, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Create a frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let pixel = color.to_rgba8();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// Iterate over pixels as RGBA quadruples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }
}

/// A palette-indexed raster with its display duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// The palette every index refers to.
    pub palette: Palette,
    /// Display duration in hundredths of a second.
    pub delay: u16,
}

impl IndexedFrame {
    /// Palette color at a pixel coordinate.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.indices[(y as usize) * (self.width as usize) + (x as usize)];
        self.palette.get(index)
    }

    /// Whether any pixel uses the given palette index.
    pub fn uses_index(&self, index: u8) -> bool {
        self.indices.iter().any(|&i| i == index)
    }
}

/// An ordered, non-empty sequence of equally sized indexed frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<IndexedFrame>,
}

impl Animation {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: IndexedFrame) {
        self.frames.push(frame);
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The palette shared by every frame, if there is exactly one.
    pub fn shared_palette(&self) -> Option<&Palette> {
        let first = &self.frames.first()?.palette;
        self.frames
            .iter()
            .all(|f| &f.palette == first)
            .then_some(first)
    }

    /// Per-frame delays in hundredths of a second.
    pub fn delays(&self) -> Vec<u16> {
        self.frames.iter().map(|f| f.delay).collect()
    }
}
