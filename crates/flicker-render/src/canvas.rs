//! Raster canvas the compositor draws on.
//!
//! Pixels hold an ink level between the background (0) and the foreground
//! (255) instead of a color. Every primitive composites its antialiased
//! coverage toward a target level, so the finished raster only ever contains
//! points on the background→foreground ramp and resolves to exact palette
//! entries.

use std::f32::consts::TAU;

use flicker_core::palette::{INK_BACKGROUND, INK_FOREGROUND};
use flicker_core::{FrameBuffer, Gradient};

use crate::font::GlyphFace;

/// Ink level used for de-emphasized elements such as ring tracks. Resolves to
/// the foreground blended over the background at alpha 50.
pub const INK_DIM: u8 = 50;

/// Where a text run's reference point sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// `(x, y)` is the left end of the baseline.
    Baseline,
    /// `(x, y)` sits at the fraction `(ax, ay)` of the text's line box,
    /// measured from its top-left corner.
    Box { ax: f32, ay: f32 },
}

impl TextAnchor {
    pub const CENTER: TextAnchor = TextAnchor::Box { ax: 0.5, ay: 0.5 };
    pub const START: TextAnchor = TextAnchor::Box { ax: 0.0, ay: 0.5 };
}

/// A fixed-size ink raster.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    ink: Vec<u8>,
}

impl Canvas {
    /// A canvas cleared to the background.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![INK_BACKGROUND; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to the background.
    pub fn clear(&mut self) {
        self.ink.fill(INK_BACKGROUND);
    }

    pub fn ink_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.ink[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Raw ink levels, row-major.
    pub fn levels(&self) -> &[u8] {
        &self.ink
    }

    /// Whether any pixel differs from the background.
    pub fn has_ink(&self) -> bool {
        self.ink.iter().any(|&level| level != INK_BACKGROUND)
    }

    /// Composite `ink` over one pixel with the given coverage in `[0, 1]`.
    fn paint(&mut self, x: i32, y: i32, ink: u8, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }
        let i = (y as usize) * (self.width as usize) + (x as usize);
        let old = self.ink[i] as f32;
        let new = old + (ink as f32 - old) * coverage;
        self.ink[i] = new.round().clamp(0.0, 255.0) as u8;
    }

    /// Visit every pixel whose center lies in the box, handing the center
    /// coordinates to `coverage`.
    fn shade<F>(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32, ink: u8, coverage: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let x0 = min_x.floor().max(0.0) as i32;
        let y0 = min_y.floor().max(0.0) as i32;
        let x1 = max_x.ceil().min(self.width as f32) as i32;
        let y1 = max_y.ceil().min(self.height as f32) as i32;
        for py in y0..y1 {
            for px in x0..x1 {
                let c = coverage(px as f32 + 0.5, py as f32 + 0.5);
                self.paint(px, py, ink, c);
            }
        }
    }

    /// Draw a run of text at full foreground ink.
    pub fn draw_text(&mut self, face: &dyn GlyphFace, text: &str, x: f32, y: f32, anchor: TextAnchor) {
        self.draw_text_ink(face, text, x, y, anchor, INK_FOREGROUND);
    }

    /// Draw a run of text at the given ink level.
    pub fn draw_text_ink(
        &mut self,
        face: &dyn GlyphFace,
        text: &str,
        x: f32,
        y: f32,
        anchor: TextAnchor,
        ink: u8,
    ) {
        let (left, baseline) = match anchor {
            TextAnchor::Baseline => (x, y),
            TextAnchor::Box { ax, ay } => {
                let (w, h) = face.measure(text);
                (x - ax * w, y - ay * h + face.ascent())
            }
        };

        let baseline = baseline.round() as i32;
        let mut pen = left;
        for ch in text.chars() {
            let glyph = face.rasterize(ch);
            let gx = pen.round() as i32 + glyph.xmin;
            let gy = baseline - glyph.top;
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let c = glyph.coverage[row * glyph.width + col];
                    if c > 0 {
                        self.paint(gx + col as i32, gy + row as i32, ink, c as f32 / 255.0);
                    }
                }
            }
            pen += glyph.advance;
        }
    }

    /// Stroke a circular arc. Angles are in radians, clockwise on screen,
    /// zero pointing right. A sweep of a full turn or more strokes the
    /// whole circle.
    pub fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        sweep: f32,
        line_width: f32,
        ink: u8,
    ) {
        if sweep <= 0.0 || radius <= 0.0 {
            return;
        }
        let full = sweep >= TAU;
        let start = start.rem_euclid(TAU);
        let half = line_width / 2.0;
        let reach = radius + half + 1.0;

        self.shade(cx - reach, cy - reach, cx + reach, cy + reach, ink, |px, py| {
            let dx = px - cx;
            let dy = py - cy;
            if !full {
                let angle = dy.atan2(dx).rem_euclid(TAU);
                if (angle - start).rem_euclid(TAU) > sweep {
                    return 0.0;
                }
            }
            let distance = (dx.hypot(dy) - radius).abs();
            half + 0.5 - distance
        });
    }

    /// Stroke a straight segment with butt ends.
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, line_width: f32, ink: u8) {
        let half = line_width / 2.0;
        let pad = half + 1.0;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let length_sq = dx * dx + dy * dy;

        self.shade(
            x0.min(x1) - pad,
            y0.min(y1) - pad,
            x0.max(x1) + pad,
            y0.max(y1) + pad,
            ink,
            |px, py| {
                let t = if length_sq > 0.0 {
                    ((px - x0) * dx + (py - y0) * dy) / length_sq
                } else {
                    0.0
                };
                if !(0.0..=1.0).contains(&t) {
                    return 0.0;
                }
                let distance = (px - (x0 + t * dx)).hypot(py - (y0 + t * dy));
                half + 0.5 - distance
            },
        );
    }

    /// Fill a disc.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, ink: u8) {
        let reach = radius + 1.0;
        self.shade(cx - reach, cy - reach, cx + reach, cy + reach, ink, |px, py| {
            radius + 0.5 - (px - cx).hypot(py - cy)
        });
    }

    /// Resolve ink levels to colors along a gradient.
    pub fn to_frame_buffer(&self, gradient: &Gradient) -> FrameBuffer {
        let mut data = Vec::with_capacity(self.ink.len() * 4);
        for &level in &self.ink {
            data.extend_from_slice(&gradient.color_at(level).to_rgba8());
        }
        FrameBuffer {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::typeface;
    use flicker_core::{Color, DEFAULT_FONT};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn ink_bounds(canvas: &Canvas) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.ink_at(x, y) != Some(0) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((a, b, c, d)) => (a.min(x), b.min(y), c.max(x), d.max(y)),
                    });
                }
            }
        }
        bounds
    }

    #[test]
    fn test_new_canvas_is_background() {
        let canvas = Canvas::new(8, 4);
        assert!(!canvas.has_ink());
        assert_eq!(canvas.levels().len(), 32);
    }

    #[test]
    fn test_fill_circle_center_is_solid() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(10.0, 10.0, 4.0, INK_FOREGROUND);
        assert_eq!(canvas.ink_at(10, 10), Some(255));
        assert_eq!(canvas.ink_at(0, 0), Some(0));
    }

    #[test]
    fn test_dim_ink_composites_toward_level() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(10.0, 10.0, 5.0, INK_DIM);
        assert_eq!(canvas.ink_at(10, 10), Some(INK_DIM));
    }

    #[test]
    fn test_dim_ink_is_alpha_blend() {
        use flicker_core::color::blend_by_alpha;
        let gradient = Gradient::new(Color::rgb(10, 20, 200), Color::rgb(250, 240, 30));
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_circle(2.0, 2.0, 3.0, INK_DIM);
        let fb = canvas.to_frame_buffer(&gradient);
        let expected = blend_by_alpha(gradient.foreground, gradient.background, 50);
        assert_eq!(fb.get_pixel(2, 2), Some(expected.to_rgba8()));
    }

    #[test]
    fn test_full_arc_is_ring() {
        let mut canvas = Canvas::new(100, 100);
        canvas.stroke_arc(50.0, 50.0, 30.0, -FRAC_PI_2, 2.0 * PI, 6.0, INK_FOREGROUND);
        assert_eq!(canvas.ink_at(50, 50), Some(0));
        assert_eq!(canvas.ink_at(80, 50), Some(255));
        assert_eq!(canvas.ink_at(50, 20), Some(255));
        assert_eq!(canvas.ink_at(19, 50), Some(255));
    }

    #[test]
    fn test_quarter_arc_from_top() {
        let mut canvas = Canvas::new(100, 100);
        // From 12 o'clock clockwise to 3 o'clock.
        canvas.stroke_arc(50.0, 50.0, 30.0, -FRAC_PI_2, FRAC_PI_2, 6.0, INK_FOREGROUND);
        assert_eq!(canvas.ink_at(71, 28), Some(255));
        assert_eq!(canvas.ink_at(28, 71), Some(0));
        assert_eq!(canvas.ink_at(28, 28), Some(0));
    }

    #[test]
    fn test_zero_sweep_draws_nothing() {
        let mut canvas = Canvas::new(50, 50);
        canvas.stroke_arc(25.0, 25.0, 10.0, 0.0, 0.0, 4.0, INK_FOREGROUND);
        assert!(!canvas.has_ink());
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut canvas = Canvas::new(30, 10);
        canvas.draw_line(5.0, 5.0, 25.0, 5.0, 3.0, INK_FOREGROUND);
        assert_eq!(canvas.ink_at(15, 4), Some(255));
        assert_eq!(canvas.ink_at(2, 5), Some(0));
        assert_eq!(canvas.ink_at(15, 8), Some(0));
    }

    #[test]
    fn test_centered_text_is_centered() {
        let face = typeface(DEFAULT_FONT).unwrap().face(40.0);
        let mut canvas = Canvas::new(300, 100);
        canvas.draw_text(&face, "HOH", 150.0, 50.0, TextAnchor::CENTER);
        let (x0, y0, x1, y1) = ink_bounds(&canvas).unwrap();
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        assert!((cx - 150.0).abs() < 6.0, "horizontal center {}", cx);
        assert!((cy - 50.0).abs() < 10.0, "vertical center {}", cy);
    }

    #[test]
    fn test_baseline_text_sits_above_baseline() {
        let face = typeface(DEFAULT_FONT).unwrap().face(30.0);
        let mut canvas = Canvas::new(200, 100);
        canvas.draw_text(&face, "HI", 10.0, 60.0, TextAnchor::Baseline);
        let (x0, _, _, y1) = ink_bounds(&canvas).unwrap();
        assert!(x0 >= 10 && x0 < 16);
        assert!(y1 <= 60);
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let face = typeface(DEFAULT_FONT).unwrap().face(40.0);
        let mut canvas = Canvas::new(40, 20);
        canvas.draw_text(&face, "WIDE TEXT", -30.0, 10.0, TextAnchor::START);
        assert!(canvas.has_ink());
    }

    #[test]
    fn test_to_frame_buffer_uses_gradient() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_circle(2.0, 2.0, 10.0, INK_FOREGROUND);
        let fb = canvas.to_frame_buffer(&Gradient::new(Color::BLACK, Color::RED));
        assert_eq!(fb.get_pixel(1, 1), Some([255, 0, 0, 255]));
    }
}
