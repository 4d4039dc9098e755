//! Flashing text: copies of the text scattered over the canvas, shown one
//! at a time.

use flicker_core::{FlashingTextOptions, FlickerResult, Gradient};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, TextAnchor};
use crate::font::{typeface, Typeface};

/// Placement seed; identical options always scatter the words identically.
pub const PLACEMENT_SEED: u64 = 42;
const WORD_SIZE_FACTOR: f32 = 0.15;
const PADDING_FACTOR: f32 = 0.1;

/// Where one copy of the text is drawn (its center) and at what size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPosition {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Scatter `count` positions inside the padded canvas.
pub fn scatter_words(count: usize, width: u32, height: u32) -> Vec<WordPosition> {
    let (w, h) = (width as f32, height as f32);
    let padding = h * PADDING_FACTOR;
    let size = h * WORD_SIZE_FACTOR;
    let mut rng = StdRng::seed_from_u64(PLACEMENT_SEED);

    (0..count)
        .map(|_| {
            let x = padding + rng.gen::<f32>() * (w - 2.0 * padding - size);
            let y = padding + rng.gen::<f32>() * (h - 2.0 * padding - size);
            WordPosition {
                x: x.min(w - padding - size),
                y: y.min(h - padding - size),
                size,
            }
        })
        .collect()
}

pub struct FlashingText {
    frames: usize,
    delay: u16,
    size: (u32, u32),
    gradient: Gradient,
    text: String,
    positions: Vec<WordPosition>,
    typeface: &'static Typeface,
}

impl FlashingText {
    pub fn new(options: &FlashingTextOptions) -> FlickerResult<Self> {
        let size = options.size();
        let positions = scatter_words(options.word_count(), size.0, size.1);
        Ok(Self {
            frames: options.frame_count(),
            delay: options.delay(),
            size,
            gradient: options.gradient(),
            text: options.text.clone(),
            positions,
            typeface: typeface(&options.font)?,
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

    pub fn positions(&self) -> &[WordPosition] {
        &self.positions
    }

    /// Index of the copy visible in frame `index`.
    pub fn state(&self, index: usize) -> usize {
        index % self.positions.len().max(1)
    }

    pub fn compose(&self, instance: usize, canvas: &mut Canvas) {
        canvas.clear();
        if let Some(pos) = self.positions.get(instance) {
            let face = self.typeface.face(pos.size);
            canvas.draw_text(&face, &self.text, pos.x, pos.y, TextAnchor::CENTER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_deterministic() {
        assert_eq!(scatter_words(10, 600, 400), scatter_words(10, 600, 400));
    }

    #[test]
    fn test_positions_inside_padding() {
        for pos in scatter_words(20, 600, 400) {
            assert!((pos.size - 60.0).abs() < 1e-3);
            assert!(pos.x >= 39.99 && pos.x <= 500.01, "x {}", pos.x);
            assert!(pos.y >= 39.99 && pos.y <= 300.01, "y {}", pos.y);
        }
    }

    #[test]
    fn test_prefix_stability() {
        // Fewer words reuse the same leading positions.
        let three = scatter_words(3, 600, 400);
        let ten = scatter_words(10, 600, 400);
        assert_eq!(three[..], ten[..3]);
    }

    #[test]
    fn test_frames_cycle_through_instances() {
        let effect = FlashingText::new(&FlashingTextOptions {
            words: 4,
            ..Default::default()
        })
        .unwrap();
        let visible: Vec<usize> = (0..9).map(|i| effect.state(i)).collect();
        assert_eq!(visible, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_word_count_clamped() {
        let effect = FlashingText::new(&FlashingTextOptions {
            words: 99,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(effect.positions().len(), 20);
    }

    #[test]
    fn test_compose_draws_near_position() {
        let effect = FlashingText::new(&FlashingTextOptions::default()).unwrap();
        let mut canvas = Canvas::new(600, 400);
        effect.compose(2, &mut canvas);
        let pos = effect.positions()[2];
        let x = pos.x.round() as u32;
        let near = (x.saturating_sub(30)..x + 30)
            .any(|px| (0..400).any(|py| canvas.ink_at(px, py).unwrap_or(0) > 0));
        assert!(near);
    }
}
