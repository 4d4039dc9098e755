//! Effect options: the user-facing configuration of every effect.
//!
//! Option records deserialize from camelCase documents (JSON or TOML) with
//! every field defaulted. Values are kept as given; the clamping accessors
//! (`frame_count`, `size`, `delay`, ...) apply the documented ranges so that
//! out-of-range input is never an error.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{FlickerError, FlickerResult};
use crate::palette::Gradient;

/// Smallest canvas edge accepted, in pixels.
pub const MIN_DIMENSION: i64 = 16;
/// Largest canvas edge accepted, in pixels.
pub const MAX_DIMENSION: i64 = 2048;
/// Longest per-frame delay representable in a GIF, in milliseconds.
pub const MAX_DELAY_MS: i64 = 655_350;
/// Font used when none is named or the name is not allow-listed.
pub const DEFAULT_FONT: &str = "condensed-bold";

/// Clamp a requested frame count into `[1, max]`.
pub fn clamp_frames(requested: i64, max: usize) -> usize {
    requested.clamp(1, max as i64) as usize
}

/// Clamp a requested canvas edge into the supported range.
pub fn clamp_dimension(requested: i64) -> u32 {
    requested.clamp(MIN_DIMENSION, MAX_DIMENSION) as u32
}

/// Clamp padding so that at least a 2×2 drawable area remains.
pub fn clamp_padding(requested: i64, width: u32, height: u32) -> u32 {
    let limit = (width.min(height) / 2).saturating_sub(1) as i64;
    requested.clamp(0, limit) as u32
}

/// Convert a delay in milliseconds into GIF hundredths of a second.
pub fn delay_hundredths(delay_ms: i64) -> u16 {
    (delay_ms.clamp(0, MAX_DELAY_MS) / 10) as u16
}

fn gradient(background: &str, color: &str) -> Gradient {
    Gradient::new(Color::parse_hex(background), Color::parse_hex(color))
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_color() -> String {
    "#ffffff".to_string()
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

// ── Countdown ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownOptions {
    pub background: String,
    pub color: String,
    /// Target instant, `YYYY-MM-DDTHH:MM:SS.mmmZ`. Ten days from now when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub frames: i64,
    /// Hours added to the target date before counting down.
    pub gmt: f64,
    pub width: i64,
    pub height: i64,
    /// `basic`, `rounded`, `rounded-ticks` or `rounded-dots`.
    pub kind: String,
    pub lang: String,
    pub font: String,
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self {
            background: default_background(),
            color: default_color(),
            date: None,
            frames: 10,
            gmt: 0.0,
            width: 700,
            height: 200,
            kind: "rounded".to_string(),
            lang: "en".to_string(),
            font: default_font(),
        }
    }
}

impl CountdownOptions {
    pub const MAX_FRAMES: usize = 60;
    /// One frame per second of countdown.
    pub const DELAY_MS: i64 = 1000;
    /// Largest GMT shift in either direction, in hours.
    pub const MAX_GMT_HOURS: f64 = 24.0;

    pub fn frame_count(&self) -> usize {
        clamp_frames(self.frames, Self::MAX_FRAMES)
    }

    /// GMT shift in hours, within `[-24, 24]`. NaN is no shift.
    pub fn gmt_hours(&self) -> f64 {
        if self.gmt.is_nan() {
            0.0
        } else {
            self.gmt.clamp(-Self::MAX_GMT_HOURS, Self::MAX_GMT_HOURS)
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(Self::DELAY_MS)
    }

    pub fn gradient(&self) -> Gradient {
        gradient(&self.background, &self.color)
    }
}

// ── LED banner ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedBannerOptions {
    pub background: String,
    pub color: String,
    pub delay: i64,
    /// Scroll direction; `true` moves the text to the right.
    pub forward: bool,
    pub frames: i64,
    pub width: i64,
    pub height: i64,
    /// Number of spaces between repeated copies of the text.
    pub space_size: i64,
    pub text: String,
    pub font: String,
}

impl Default for LedBannerOptions {
    fn default() -> Self {
        Self {
            background: default_background(),
            color: default_color(),
            delay: 50,
            forward: true,
            frames: 10,
            width: 800,
            height: 50,
            space_size: 4,
            text: "Hello World!".to_string(),
            font: default_font(),
        }
    }
}

impl LedBannerOptions {
    pub const MAX_FRAMES: usize = 30;
    pub const MAX_SPACE_SIZE: i64 = 64;

    pub fn frame_count(&self) -> usize {
        clamp_frames(self.frames, Self::MAX_FRAMES)
    }

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(self.delay)
    }

    pub fn spacer(&self) -> String {
        " ".repeat(self.space_size.clamp(0, Self::MAX_SPACE_SIZE) as usize)
    }

    pub fn gradient(&self) -> Gradient {
        gradient(&self.background, &self.color)
    }
}

// ── Flashing letters ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashingLettersOptions {
    pub background: String,
    pub color: String,
    pub delay: i64,
    /// Probability that any one letter is hidden in a frame.
    pub flash_probability: f64,
    pub frames: i64,
    pub width: i64,
    pub height: i64,
    pub text: String,
    pub font: String,
    /// Fixes the flash pattern. Each render draws a fresh pattern when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FlashingLettersOptions {
    fn default() -> Self {
        Self {
            background: default_background(),
            color: default_color(),
            delay: 100,
            flash_probability: 0.3,
            frames: 20,
            width: 400,
            height: 200,
            text: "SALE".to_string(),
            font: default_font(),
            seed: None,
        }
    }
}

impl FlashingLettersOptions {
    pub const MAX_FRAMES: usize = 60;

    pub fn frame_count(&self) -> usize {
        clamp_frames(self.frames, Self::MAX_FRAMES)
    }

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(self.delay)
    }

    /// Flash probability clamped to `[0, 1]`; NaN counts as never flashing.
    pub fn probability(&self) -> f64 {
        if self.flash_probability.is_nan() {
            0.0
        } else {
            self.flash_probability.clamp(0.0, 1.0)
        }
    }

    pub fn gradient(&self) -> Gradient {
        gradient(&self.background, &self.color)
    }
}

// ── Flashing text ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashingTextOptions {
    pub background: String,
    pub color: String,
    pub delay: i64,
    pub frames: i64,
    pub width: i64,
    pub height: i64,
    pub text: String,
    /// How many scattered copies of the text to place.
    pub words: i64,
    pub font: String,
}

impl Default for FlashingTextOptions {
    fn default() -> Self {
        Self {
            background: default_background(),
            color: default_color(),
            delay: 300,
            frames: 30,
            width: 600,
            height: 400,
            text: "SALE".to_string(),
            words: 10,
            font: default_font(),
        }
    }
}

impl FlashingTextOptions {
    pub const MAX_FRAMES: usize = 60;
    pub const MAX_WORDS: usize = 20;

    pub fn frame_count(&self) -> usize {
        clamp_frames(self.frames, Self::MAX_FRAMES)
    }

    pub fn word_count(&self) -> usize {
        clamp_frames(self.words, Self::MAX_WORDS)
    }

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(self.delay)
    }

    pub fn gradient(&self) -> Gradient {
        gradient(&self.background, &self.color)
    }
}

// ── Color-varying text ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorVaryingTextOptions {
    /// `complementary`, `triadic`, `monochromatic` or `analogous`.
    pub color_scheme: String,
    pub delay: i64,
    pub frames: i64,
    pub width: i64,
    pub height: i64,
    pub padding: i64,
    pub text: String,
    pub font: String,
}

impl Default for ColorVaryingTextOptions {
    fn default() -> Self {
        Self {
            color_scheme: "complementary".to_string(),
            delay: 100,
            frames: 30,
            width: 600,
            height: 400,
            padding: 40,
            text: "SALE".to_string(),
            font: default_font(),
        }
    }
}

impl ColorVaryingTextOptions {
    pub const MAX_FRAMES: usize = 60;

    pub fn frame_count(&self) -> usize {
        clamp_frames(self.frames, Self::MAX_FRAMES)
    }

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn padding(&self) -> u32 {
        let (w, h) = self.size();
        clamp_padding(self.padding, w, h)
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(self.delay)
    }
}

// ── Typing text ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypingTextOptions {
    pub background: String,
    pub color: String,
    pub delay: i64,
    pub width: i64,
    pub height: i64,
    pub padding: i64,
    pub text: String,
    pub font: String,
}

impl Default for TypingTextOptions {
    fn default() -> Self {
        Self {
            background: default_background(),
            color: default_color(),
            delay: 100,
            width: 800,
            height: 200,
            padding: 40,
            text: "BLACK FRIDAY".to_string(),
            font: default_font(),
        }
    }
}

impl TypingTextOptions {
    /// Frames spent blinking the caret after the text is complete.
    pub const BLINK_FRAMES: usize = 6;

    pub fn size(&self) -> (u32, u32) {
        (clamp_dimension(self.width), clamp_dimension(self.height))
    }

    pub fn padding(&self) -> u32 {
        let (w, h) = self.size();
        clamp_padding(self.padding, w, h)
    }

    pub fn delay(&self) -> u16 {
        delay_hundredths(self.delay)
    }

    pub fn gradient(&self) -> Gradient {
        gradient(&self.background, &self.color)
    }
}

// ── Tagged union ────────────────────────────────────────────────────

/// Options of any effect, tagged by the `effect` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum EffectOptions {
    Countdown(CountdownOptions),
    LedBanner(LedBannerOptions),
    FlashingLetters(FlashingLettersOptions),
    FlashingText(FlashingTextOptions),
    ColorVaryingText(ColorVaryingTextOptions),
    TypingText(TypingTextOptions),
}

impl EffectOptions {
    /// Every effect name, in tag form.
    pub const NAMES: [&'static str; 6] = [
        "countdown",
        "led-banner",
        "flashing-letters",
        "flashing-text",
        "color-varying-text",
        "typing-text",
    ];

    /// The tag of this effect.
    pub fn name(&self) -> &'static str {
        match self {
            EffectOptions::Countdown(_) => "countdown",
            EffectOptions::LedBanner(_) => "led-banner",
            EffectOptions::FlashingLetters(_) => "flashing-letters",
            EffectOptions::FlashingText(_) => "flashing-text",
            EffectOptions::ColorVaryingText(_) => "color-varying-text",
            EffectOptions::TypingText(_) => "typing-text",
        }
    }

    /// Default options for an effect name.
    pub fn defaults(name: &str) -> Option<Self> {
        let options = match name {
            "countdown" => EffectOptions::Countdown(Default::default()),
            "led-banner" => EffectOptions::LedBanner(Default::default()),
            "flashing-letters" => EffectOptions::FlashingLetters(Default::default()),
            "flashing-text" => EffectOptions::FlashingText(Default::default()),
            "color-varying-text" => EffectOptions::ColorVaryingText(Default::default()),
            "typing-text" => EffectOptions::TypingText(Default::default()),
            _ => return None,
        };
        Some(options)
    }

    /// Parse a tagged JSON document.
    pub fn from_json(json: &str) -> FlickerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a tagged TOML document.
    pub fn from_toml(source: &str) -> FlickerResult<Self> {
        toml::from_str(source).map_err(|e| FlickerError::config(e.to_string()))
    }

    /// Parse an untagged JSON object as options of the named effect.
    pub fn from_untagged_json(name: &str, json: &str) -> FlickerResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(name, value)
    }

    /// Load options from a `.toml` or `.json` file.
    pub fn load_from_file(path: &std::path::Path) -> FlickerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// Build options for the named effect from a JSON object whose keys may
    /// omit the tag.
    pub fn from_value(name: &str, value: serde_json::Value) -> FlickerResult<Self> {
        if !Self::NAMES.contains(&name) {
            return Err(FlickerError::InvalidArgument(format!(
                "unknown effect '{}'",
                name
            )));
        }
        let mut object = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                return Err(FlickerError::config(format!(
                    "options must be an object, got {}",
                    other
                )))
            }
        };
        object.insert("effect".to_string(), serde_json::Value::from(name));
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    /// Apply `key=value` overrides. Values are read as JSON when they parse
    /// and as plain strings otherwise.
    pub fn with_overrides<'a, I>(self, overrides: I) -> FlickerResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let name = self.name();
        let mut value = serde_json::to_value(&self)?;
        if let serde_json::Value::Object(map) = &mut value {
            for (key, raw) in overrides {
                if key == "effect" {
                    return Err(FlickerError::InvalidArgument(
                        "the effect tag cannot be overridden".to_string(),
                    ));
                }
                let parsed = serde_json::from_str(raw)
                    .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
                map.insert(key.to_string(), parsed);
            }
        }
        Self::from_value(name, value)
    }
}

/// Split a `key=value` override.
pub fn parse_override(arg: &str) -> FlickerResult<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(FlickerError::InvalidArgument(format!(
            "expected key=value, got '{}'",
            arg
        ))),
    }
}
