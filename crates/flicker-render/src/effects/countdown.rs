//! Countdown timer: days/hours/minutes/seconds until a target instant,
//! one frame per second.

use std::f32::consts::{FRAC_PI_2, TAU};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use flicker_core::i18n::translate;
use flicker_core::palette::INK_FOREGROUND;
use flicker_core::{CountdownOptions, FlickerError, FlickerResult, Gradient};

use crate::canvas::{Canvas, TextAnchor, INK_DIM};
use crate::font::{typeface, GlyphFace, Typeface};

/// Date format of the `date` option.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const BASIC_TEXT_SIZE: f32 = 60.0;
const VALUE_TEXT_SIZE: f32 = 40.0;
const LABEL_TEXT_SIZE: f32 = 16.0;
const RING_RADIUS: f32 = 65.0;
const RING_SPACING: f32 = 160.0;
const RING_WIDTH: f32 = 10.0;
const TICK_WIDTH: f32 = 3.0;
const TICK_HALF_LENGTH: f32 = 5.0;
const DOT_RADIUS: f32 = 3.0;

/// How the remaining time is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    Basic,
    Rounded,
    RoundedTicks,
    RoundedDots,
}

impl CountdownKind {
    /// Resolve a kind name; unknown names draw as `Basic`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "basic" => CountdownKind::Basic,
            "rounded" => CountdownKind::Rounded,
            "rounded-ticks" => CountdownKind::RoundedTicks,
            "rounded-dots" => CountdownKind::RoundedDots,
            other => {
                tracing::warn!("unknown countdown kind '{}', drawing as basic", other);
                CountdownKind::Basic
            }
        }
    }
}

/// Time left, split into calendar-free components. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: total / 86_400,
            hours: total / 3_600 % 24,
            minutes: total / 60 % 60,
            seconds: total % 60,
        }
    }

    /// `"{d}d {h}h {m}m {s}s"`
    pub fn to_basic_text(&self) -> String {
        format!(
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }

    /// Components with their label key and ring maximum.
    fn rings(&self) -> [(i64, &'static str, i64); 4] {
        [
            (self.days, "days", 31),
            (self.hours, "hours", 24),
            (self.minutes, "minutes", 60),
            (self.seconds, "seconds", 60),
        ]
    }
}

/// Parse the `date` option. Accepts the millisecond UTC form and falls back
/// to any RFC 3339 timestamp.
pub fn parse_date(s: &str) -> FlickerResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, DATE_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FlickerError::config(format!("unparsable date '{}': {}", s, e)))
}

pub struct Countdown {
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    frames: usize,
    delay: u16,
    size: (u32, u32),
    gradient: Gradient,
    kind: CountdownKind,
    lang: String,
    typeface: &'static Typeface,
}

impl Countdown {
    pub fn new(options: &CountdownOptions, now: DateTime<Utc>) -> FlickerResult<Self> {
        let date = match &options.date {
            Some(date) => parse_date(date)?,
            None => now + Duration::days(10),
        };
        let mut frames = options.frame_count();
        let target = if date <= now {
            frames = 1;
            now
        } else {
            let offset = Duration::seconds((options.gmt_hours() * 3600.0).round() as i64);
            date.checked_add_signed(offset).ok_or_else(|| {
                FlickerError::config(format!("gmt {} moves {} out of range", options.gmt, date))
            })?
        };

        Ok(Self {
            target,
            now,
            frames,
            delay: options.delay(),
            size: options.size(),
            gradient: options.gradient(),
            kind: CountdownKind::from_name(&options.kind),
            lang: options.lang.clone(),
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

    /// Time left as seen `index` seconds after the render instant.
    pub fn state(&self, index: usize) -> Remaining {
        let instant = self.now + Duration::seconds(index as i64);
        Remaining::from_seconds((self.target - instant).num_seconds())
    }

    pub fn compose(&self, remaining: &Remaining, canvas: &mut Canvas) {
        canvas.clear();
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);

        if self.kind == CountdownKind::Basic {
            let face = self.typeface.face(BASIC_TEXT_SIZE);
            canvas.draw_text(&face, &remaining.to_basic_text(), w / 2.0, h / 2.0, TextAnchor::CENTER);
            return;
        }

        let value_face = self.typeface.face(VALUE_TEXT_SIZE);
        let label_face = self.typeface.face(LABEL_TEXT_SIZE);
        let start_x = w / 2.0 - 1.5 * RING_SPACING;
        let y = h / 2.0;

        for (i, (value, key, max)) in remaining.rings().into_iter().enumerate() {
            let x = start_x + i as f32 * RING_SPACING;
            match self.kind {
                CountdownKind::RoundedTicks => draw_ticks(canvas, x, y, value, max),
                CountdownKind::RoundedDots => draw_dots(canvas, x, y, value, max),
                _ => draw_ring(canvas, x, y, value, max),
            }
            let label = translate(&self.lang, key).to_uppercase();
            canvas.draw_text(&value_face, &value.to_string(), x, y - 10.0, TextAnchor::CENTER);
            canvas.draw_text(&label_face, &label, x, y + 25.0, TextAnchor::CENTER);
        }
    }
}

fn draw_ring(canvas: &mut Canvas, x: f32, y: f32, value: i64, max: i64) {
    canvas.stroke_arc(x, y, RING_RADIUS, 0.0, TAU, RING_WIDTH, INK_DIM);
    let sweep = (value as f32 / max as f32 * TAU).min(TAU);
    canvas.stroke_arc(x, y, RING_RADIUS, -FRAC_PI_2, sweep, RING_WIDTH, INK_FOREGROUND);
}

/// Angle of segment `i` of `count`, starting at 12 o'clock.
fn segment_angle(i: i64, count: i64) -> f32 {
    -FRAC_PI_2 + i as f32 * TAU / count as f32
}

fn segment_ink(i: i64, value: i64) -> u8 {
    if i <= value {
        INK_FOREGROUND
    } else {
        INK_DIM
    }
}

fn draw_ticks(canvas: &mut Canvas, x: f32, y: f32, value: i64, max: i64) {
    let inner = RING_RADIUS - TICK_HALF_LENGTH;
    let outer = RING_RADIUS + TICK_HALF_LENGTH;
    for i in 0..max {
        let (sin, cos) = segment_angle(i, max).sin_cos();
        canvas.draw_line(
            x + inner * cos,
            y + inner * sin,
            x + outer * cos,
            y + outer * sin,
            TICK_WIDTH,
            segment_ink(i, value),
        );
    }
}

fn draw_dots(canvas: &mut Canvas, x: f32, y: f32, value: i64, max: i64) {
    let r = RING_RADIUS + TICK_HALF_LENGTH;
    for i in 0..max {
        let (sin, cos) = segment_angle(i, max).sin_cos();
        canvas.fill_circle(x + r * cos, y + r * sin, DOT_RADIUS, segment_ink(i, value));
    }
}
