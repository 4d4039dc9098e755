//! Text layout: word splitting, greedy line wrapping and autofit sizing.
//!
//! Measurement is injected as a closure so the same routines run against a
//! real `GlyphFace` or a synthetic measure in tests.

/// Smallest font size autofit will shrink to.
pub const MIN_FONT_SIZE: f32 = 12.0;
/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Multiplier applied each time the text does not fit.
pub const SHRINK_FACTOR: f32 = 0.9;
/// Initial font size as a fraction of the box height.
pub const INITIAL_SIZE_FACTOR: f32 = 0.5;

/// Text fitted into a box: the chosen size and the wrapped lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub font_size: f32,
    pub lines: Vec<String>,
}

impl Layout {
    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    pub fn total_height(&self) -> f32 {
        self.line_height() * self.lines.len() as f32
    }
}

/// Split on Unicode whitespace, dropping empty tokens.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Greedy line fill. A word that alone exceeds `max_width` becomes its own
/// overflowing line; words are never split.
pub fn wrap_lines<F>(words: &[&str], measure_width: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure_width(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Initial autofit guess for a box of the given height.
pub fn initial_font_size(box_height: f32) -> f32 {
    (box_height * INITIAL_SIZE_FACTOR).max(MIN_FONT_SIZE)
}

/// Find the largest size (shrinking by 10% steps from half the box height)
/// at which the wrapped text fits inside the padded box.
///
/// `measure(text, size)` returns the width and height of `text` at `size`.
/// At the 12px floor the wrap is accepted even if it still overflows.
pub fn autofit_font_size<F>(
    text: &str,
    box_width: f32,
    box_height: f32,
    padding: f32,
    measure: F,
) -> Layout
where
    F: Fn(&str, f32) -> (f32, f32),
{
    let words = split_words(text);
    let available_width = box_width - 2.0 * padding;
    let available_height = box_height - 2.0 * padding;
    let mut font_size = initial_font_size(box_height);

    loop {
        let lines = wrap_lines(&words, |s| measure(s, font_size).0, available_width);
        let layout = Layout { font_size, lines };
        if layout.total_height() <= available_height || font_size <= MIN_FONT_SIZE {
            return layout;
        }
        font_size = (font_size * SHRINK_FACTOR).max(MIN_FONT_SIZE);
    }
}

/// Single-line variant: shrink until the whole string fits both bounds.
pub fn autofit_single_line<F>(text: &str, max_width: f32, max_height: f32, initial: f32, measure: F) -> f32
where
    F: Fn(&str, f32) -> (f32, f32),
{
    let mut font_size = initial.max(MIN_FONT_SIZE);
    loop {
        let (w, h) = measure(text, font_size);
        if (w <= max_width && h <= max_height) || font_size <= MIN_FONT_SIZE {
            return font_size;
        }
        font_size = (font_size * SHRINK_FACTOR).max(MIN_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Monospace measure: every char is `size / 2` wide, lines are `size` tall.
    fn mono(text: &str, size: f32) -> (f32, f32) {
        (text.chars().count() as f32 * size / 2.0, size)
    }

    fn width_at(size: f32) -> impl Fn(&str) -> f32 {
        move |s| mono(s, size).0
    }

    #[test]
    fn test_split_words_discards_empty_tokens() {
        assert_eq!(split_words("  big \t summer\n sale  "), vec!["big", "summer", "sale"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_wrap_lines_greedy() {
        // 10px per char at size 20.
        let words = ["aa", "bb", "cc", "dd"];
        let lines = wrap_lines(&words, width_at(20.0), 50.0);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn test_wrap_lines_long_word_overflows_alone() {
        let words = ["a", "enormous", "b"];
        let lines = wrap_lines(&words, width_at(20.0), 30.0);
        assert_eq!(lines, vec!["a", "enormous", "b"]);
    }

    #[test]
    fn test_wrap_lines_empty() {
        assert!(wrap_lines(&[], width_at(20.0), 100.0).is_empty());
    }

    #[test]
    fn test_autofit_accepts_first_fit() {
        let layout = autofit_font_size("SALE", 600.0, 400.0, 40.0, mono);
        assert_eq!(layout.font_size, 200.0);
        assert_eq!(layout.lines, vec!["SALE"]);
    }

    #[test]
    fn test_autofit_shrinks_until_fit() {
        let layout = autofit_font_size("one two three four five six", 200.0, 200.0, 10.0, mono);
        assert!(layout.font_size < 100.0);
        assert!(layout.total_height() <= 180.0);
        for line in &layout.lines {
            if line.contains(' ') {
                assert!(mono(line, layout.font_size).0 <= 180.0);
            }
        }
    }

    #[test]
    fn test_autofit_floor_accepts_overflow() {
        let text = "word ".repeat(200);
        let layout = autofit_font_size(&text, 100.0, 100.0, 10.0, mono);
        assert_eq!(layout.font_size, MIN_FONT_SIZE);
        assert!(layout.total_height() > 80.0);
    }

    #[test]
    fn test_single_line_autofit() {
        // 13 chars, needs 13 * size / 2 <= 720 -> size <= 110.7
        let size = autofit_single_line("BLACK FRIDAY|", 720.0, 120.0, 100.0, mono);
        assert_eq!(size, 100.0);
        let size = autofit_single_line("BLACK FRIDAY|", 300.0, 120.0, 100.0, mono);
        assert!(size * 13.0 / 2.0 <= 300.0);
        assert!(size > 300.0 / 13.0 * 2.0 * SHRINK_FACTOR);
    }

    #[test]
    fn test_single_line_autofit_floor() {
        let size = autofit_single_line(&"X".repeat(1000), 100.0, 100.0, 50.0, mono);
        assert_eq!(size, MIN_FONT_SIZE);
    }

    proptest! {
        #[test]
        fn prop_wrap_preserves_words(
            words in prop::collection::vec("[a-z]{1,12}", 0..40),
            max_width in 10.0f32..400.0,
        ) {
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let lines = wrap_lines(&refs, width_at(16.0), max_width);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            prop_assert_eq!(rejoined, refs);
        }

        #[test]
        fn prop_wrap_respects_width_unless_single_word(
            words in prop::collection::vec("[a-z]{1,12}", 1..40),
            max_width in 10.0f32..400.0,
        ) {
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            for line in wrap_lines(&refs, width_at(16.0), max_width) {
                prop_assert!(!line.contains(' ') || mono(&line, 16.0).0 <= max_width);
            }
        }

        #[test]
        fn prop_autofit_terminates_in_range(
            text in "[a-zA-Z ]{0,300}",
            width in 16.0f32..2048.0,
            height in 16.0f32..2048.0,
            padding in 0.0f32..7.0,
        ) {
            let layout = autofit_font_size(&text, width, height, padding, mono);
            prop_assert!(layout.font_size >= MIN_FONT_SIZE);
            prop_assert!(layout.font_size <= initial_font_size(height));
        }
    }
}
