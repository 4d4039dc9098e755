use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color with 8-bit channels.
///
/// Alpha is carried for completeness but every color produced by this crate
/// is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RGB` / `#RRGGBB` hex string, failing on anything else.
    ///
    /// Any number of leading `#` characters is accepted, including none.
    pub fn try_from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex);
        }
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| ColorError::InvalidHex)
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => {
                let byte = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex)
                };
                Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(ColorError::InvalidHex),
        }
    }

    /// Parse a hex color, silently falling back to opaque white.
    ///
    /// This is the tolerant form used for every user-supplied color option.
    pub fn parse_hex(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or(Color::WHITE)
    }

    /// Build a color from hue (degrees), saturation and lightness in `[0, 1]`.
    ///
    /// Hues outside `[0, 360)` wrap around.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            let h = h.rem_euclid(360.0) / 360.0;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        Self::rgb(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// Convert to an RGBA byte quadruple.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to an RGB byte triple.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Linearly interpolate from `self` towards `other`; `t = 1` yields `other`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Color::rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

/// Blend `fg` over `bg` with an 8-bit alpha; 255 yields `fg`.
pub fn blend_by_alpha(fg: Color, bg: Color, alpha: u8) -> Color {
    blend_by_fraction(fg, bg, alpha as f64 / 255.0)
}

/// Blend `fg` over `bg` by a fraction in `[0, 1]`; 1 yields `fg`.
pub fn blend_by_fraction(fg: Color, bg: Color, t: f64) -> Color {
    bg.lerp(&fg, t)
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color, tol: i16) -> bool {
        (a.r as i16 - b.r as i16).abs() <= tol
            && (a.g as i16 - b.g as i16).abs() <= tol
            && (a.b as i16 - b.b as i16).abs() <= tol
    }

    #[test]
    fn test_color_from_hex_long() {
        let c = Color::parse_hex("#FF8800");
        assert_eq!(c.to_rgba8(), [255, 136, 0, 255]);
    }

    #[test]
    fn test_color_from_hex_short_expands_nibbles() {
        assert_eq!(Color::parse_hex("#FFF"), Color::parse_hex("#FFFFFF"));
        assert_eq!(Color::parse_hex("#1a2"), Color::rgb(0x11, 0xAA, 0x22));
    }

    #[test]
    fn test_color_from_hex_no_hash() {
        assert_eq!(Color::parse_hex("00FF00"), Color::GREEN);
        assert_eq!(Color::parse_hex("fff"), Color::WHITE);
    }

    #[test]
    fn test_color_from_hex_repeated_hash_is_idempotent() {
        let once = Color::parse_hex("#0A0B0C");
        assert_eq!(Color::parse_hex("##0A0B0C"), once);
        assert_eq!(Color::parse_hex("###0A0B0C"), once);
    }

    #[test]
    fn test_color_from_hex_malformed_falls_back_to_white() {
        assert_eq!(Color::parse_hex("bogus"), Color::WHITE);
        assert_eq!(Color::parse_hex("#12345"), Color::WHITE);
        assert_eq!(Color::parse_hex("#GG0000"), Color::WHITE);
        assert_eq!(Color::parse_hex(""), Color::WHITE);
        assert!(Color::try_from_hex("#12345").is_err());
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::RED, 2));
        assert!(close(Color::from_hsl(120.0, 1.0, 0.5), Color::GREEN, 2));
        assert!(close(Color::from_hsl(240.0, 1.0, 0.5), Color::BLUE, 2));
    }

    #[test]
    fn test_hsl_wraps_hue() {
        assert_eq!(Color::from_hsl(480.0, 1.0, 0.5), Color::from_hsl(120.0, 1.0, 0.5));
        assert_eq!(Color::from_hsl(-120.0, 1.0, 0.5), Color::from_hsl(240.0, 1.0, 0.5));
    }

    #[test]
    fn test_hsl_zero_saturation_is_gray() {
        let c = Color::from_hsl(200.0, 0.0, 0.5);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(c.r, 128);
    }

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::rgb(200, 100, 50);
        let bg = Color::rgb(0, 0, 0);
        assert_eq!(blend_by_alpha(fg, bg, 255), fg);
        assert_eq!(blend_by_alpha(fg, bg, 0), bg);
        assert_eq!(blend_by_fraction(fg, bg, 1.0), fg);
        assert_eq!(blend_by_fraction(fg, bg, 0.0), bg);
    }

    #[test]
    fn test_blend_dim_alpha() {
        let dim = blend_by_alpha(Color::WHITE, Color::BLACK, 50);
        assert_eq!(dim, Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::RED), "#FF0000");
    }
}
