//! Flashing letters: every letter independently blinks off at random.

use flicker_core::{FlashingLettersOptions, FlickerResult, Gradient};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, TextAnchor};
use crate::font::{typeface, GlyphFace, Typeface};

const FONT_SIZE_FACTOR: f32 = 0.6;

pub struct FlashingLetters {
    frames: usize,
    delay: u16,
    size: (u32, u32),
    gradient: Gradient,
    probability: f64,
    font_size: f32,
    letters: Vec<char>,
    typeface: &'static Typeface,
    rng: StdRng,
}

impl FlashingLetters {
    pub fn new(options: &FlashingLettersOptions) -> FlickerResult<Self> {
        let size = options.size();
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            frames: options.frame_count(),
            delay: options.delay(),
            size,
            gradient: options.gradient(),
            probability: options.probability(),
            font_size: size.1 as f32 * FONT_SIZE_FACTOR,
            letters: options.text.chars().collect(),
            typeface: typeface(&options.font)?,
            rng,
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

    /// Visibility of each letter for the next frame. Draws are independent
    /// per letter and per frame, so the frame index does not enter.
    pub fn state(&mut self, _index: usize) -> Vec<bool> {
        let p = self.probability;
        let rng = &mut self.rng;
        self.letters.iter().map(|_| rng.gen::<f64>() >= p).collect()
    }

    pub fn compose(&self, visible: &[bool], canvas: &mut Canvas) {
        canvas.clear();
        let face = self.typeface.face(self.font_size);
        let text: String = self.letters.iter().collect();
        let (text_width, text_height) = face.measure(&text);
        let mut x = (canvas.width() as f32 - text_width) / 2.0;
        let y = (canvas.height() as f32 + text_height) / 2.0;

        let mut buf = [0u8; 4];
        for (ch, shown) in self.letters.iter().zip(visible) {
            if *shown {
                canvas.draw_text(&face, ch.encode_utf8(&mut buf), x, y, TextAnchor::Baseline);
            }
            x += face.advance(*ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(probability: f64, seed: Option<u64>) -> FlashingLetters {
        FlashingLetters::new(&FlashingLettersOptions {
            flash_probability: probability,
            seed,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_probability_zero_shows_everything() {
        let mut effect = letters(0.0, None);
        for i in 0..effect.frame_count() {
            assert_eq!(effect.state(i), vec![true; 4]);
        }
    }

    #[test]
    fn test_probability_one_hides_everything() {
        let mut effect = letters(1.0, None);
        let state = effect.state(0);
        assert_eq!(state, vec![false; 4]);

        let mut canvas = Canvas::new(400, 200);
        effect.compose(&state, &mut canvas);
        assert!(!canvas.has_ink());
    }

    #[test]
    fn test_seeded_pattern_is_reproducible() {
        let mut a = letters(0.5, Some(7));
        let mut b = letters(0.5, Some(7));
        let pa: Vec<_> = (0..20).map(|i| a.state(i)).collect();
        let pb: Vec<_> = (0..20).map(|i| b.state(i)).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_flash_rate_tracks_probability() {
        let mut effect = letters(0.3, Some(1));
        let hidden = (0..500)
            .flat_map(|i| effect.state(i))
            .filter(|shown| !shown)
            .count();
        // 2000 draws at p = 0.3
        assert!((450..750).contains(&hidden), "hidden {}", hidden);
    }

    #[test]
    fn test_hidden_letter_leaves_gap() {
        let effect = letters(0.0, None);
        let mut all = Canvas::new(400, 200);
        effect.compose(&[true, true, true, true], &mut all);
        let mut partial = Canvas::new(400, 200);
        effect.compose(&[true, false, true, true], &mut partial);

        let count = |c: &Canvas| c.levels().iter().filter(|&&l| l > 0).count();
        assert!(count(&partial) < count(&all));
        assert!(count(&partial) > 0);
    }
}
