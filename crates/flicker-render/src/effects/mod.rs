//! Effect descriptors.
//!
//! Each effect is prepared once from its options (layout, palette policy,
//! placements) and then asked, frame by frame, for the state of that frame
//! and to compose that state onto a canvas.

pub mod color_varying;
pub mod countdown;
pub mod flashing_letters;
pub mod flashing_text;
pub mod led_banner;
pub mod typing;

use chrono::{DateTime, Utc};
use flicker_core::{EffectOptions, FlickerError, FlickerResult, Gradient};

use crate::canvas::Canvas;

pub use color_varying::{ColorScheme, ColorVaryingText};
pub use countdown::{Countdown, CountdownKind, Remaining};
pub use flashing_letters::FlashingLetters;
pub use flashing_text::{FlashingText, WordPosition};
pub use led_banner::LedBanner;
pub use typing::{Typed, TypingText};

/// What one frame shows.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectState {
    Countdown(Remaining),
    /// Scroll offset in pixels.
    LedBanner(f32),
    /// Visibility per letter.
    FlashingLetters(Vec<bool>),
    /// Index of the visible copy.
    FlashingText(usize),
    /// Background hue in degrees.
    ColorVaryingText(f64),
    TypingText(Typed),
}

/// A prepared effect.
pub enum Effect {
    Countdown(Countdown),
    LedBanner(LedBanner),
    FlashingLetters(FlashingLetters),
    FlashingText(FlashingText),
    ColorVaryingText(ColorVaryingText),
    TypingText(TypingText),
}

impl Effect {
    /// Prepare an effect. `now` is the instant countdowns count from.
    pub fn prepare(options: &EffectOptions, now: DateTime<Utc>) -> FlickerResult<Self> {
        Ok(match options {
            EffectOptions::Countdown(o) => Effect::Countdown(Countdown::new(o, now)?),
            EffectOptions::LedBanner(o) => Effect::LedBanner(LedBanner::new(o)?),
            EffectOptions::FlashingLetters(o) => Effect::FlashingLetters(FlashingLetters::new(o)?),
            EffectOptions::FlashingText(o) => Effect::FlashingText(FlashingText::new(o)?),
            EffectOptions::ColorVaryingText(o) => {
                Effect::ColorVaryingText(ColorVaryingText::new(o)?)
            }
            EffectOptions::TypingText(o) => Effect::TypingText(TypingText::new(o)?),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Countdown(_) => "countdown",
            Effect::LedBanner(_) => "led-banner",
            Effect::FlashingLetters(_) => "flashing-letters",
            Effect::FlashingText(_) => "flashing-text",
            Effect::ColorVaryingText(_) => "color-varying-text",
            Effect::TypingText(_) => "typing-text",
        }
    }

    /// Canvas width and height.
    pub fn size(&self) -> (u32, u32) {
        match self {
            Effect::Countdown(e) => e.size(),
            Effect::LedBanner(e) => e.size(),
            Effect::FlashingLetters(e) => e.size(),
            Effect::FlashingText(e) => e.size(),
            Effect::ColorVaryingText(e) => e.size(),
            Effect::TypingText(e) => e.size(),
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Effect::Countdown(e) => e.frame_count(),
            Effect::LedBanner(e) => e.frame_count(),
            Effect::FlashingLetters(e) => e.frame_count(),
            Effect::FlashingText(e) => e.frame_count(),
            Effect::ColorVaryingText(e) => e.frame_count(),
            Effect::TypingText(e) => e.frame_count(),
        }
    }

    /// Per-frame delay in hundredths of a second.
    pub fn delay(&self) -> u16 {
        match self {
            Effect::Countdown(e) => e.delay(),
            Effect::LedBanner(e) => e.delay(),
            Effect::FlashingLetters(e) => e.delay(),
            Effect::FlashingText(e) => e.delay(),
            Effect::ColorVaryingText(e) => e.delay(),
            Effect::TypingText(e) => e.delay(),
        }
    }

    /// Background and foreground of frame `index`.
    pub fn gradient(&self, index: usize) -> Gradient {
        match self {
            Effect::Countdown(e) => e.gradient(),
            Effect::LedBanner(e) => e.gradient(),
            Effect::FlashingLetters(e) => e.gradient(),
            Effect::FlashingText(e) => e.gradient(),
            Effect::ColorVaryingText(e) => e.gradient(index),
            Effect::TypingText(e) => e.gradient(),
        }
    }

    /// State of frame `index`. Only flashing letters consumes randomness,
    /// hence `&mut self`.
    pub fn frame_state(&mut self, index: usize) -> EffectState {
        match self {
            Effect::Countdown(e) => EffectState::Countdown(e.state(index)),
            Effect::LedBanner(e) => EffectState::LedBanner(e.state(index)),
            Effect::FlashingLetters(e) => EffectState::FlashingLetters(e.state(index)),
            Effect::FlashingText(e) => EffectState::FlashingText(e.state(index)),
            Effect::ColorVaryingText(e) => EffectState::ColorVaryingText(e.state(index)),
            Effect::TypingText(e) => EffectState::TypingText(e.state(index)),
        }
    }

    /// Draw a frame state. The canvas is cleared first.
    pub fn compose(&self, state: &EffectState, canvas: &mut Canvas) -> FlickerResult<()> {
        match (self, state) {
            (Effect::Countdown(e), EffectState::Countdown(s)) => e.compose(s, canvas),
            (Effect::LedBanner(e), EffectState::LedBanner(s)) => e.compose(*s, canvas),
            (Effect::FlashingLetters(e), EffectState::FlashingLetters(s)) => e.compose(s, canvas),
            (Effect::FlashingText(e), EffectState::FlashingText(s)) => e.compose(*s, canvas),
            (Effect::ColorVaryingText(e), EffectState::ColorVaryingText(_)) => e.compose(canvas),
            (Effect::TypingText(e), EffectState::TypingText(s)) => e.compose(s, canvas),
            (effect, state) => {
                return Err(FlickerError::Render(format!(
                    "{} cannot draw state {:?}",
                    effect.name(),
                    state
                )))
            }
        }
        Ok(())
    }
}
