//! Overlay colors.

use serde::{Deserialize, Serialize};

/// Normalized RGBA color; every channel is nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha multiplied by `factor`.
    pub fn faded(&self, factor: f64) -> Self {
        Self {
            a: self.a * factor,
            ..*self
        }
    }

    /// True if any channel is NaN (malformed hex input).
    pub fn is_nan(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan() || self.a.is_nan()
    }

    /// `#rrggbb` form; NaN channels render as `00`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| -> u8 {
            if v.is_nan() {
                0
            } else {
                (v.clamp(0.0, 1.0) * 255.0).round() as u8
            }
        };
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

fn channel(hex: &str, range: std::ops::Range<usize>) -> f64 {
    hex.get(range)
        .and_then(|s| u8::from_str_radix(s, 16).ok())
        .map(|v| v as f64 / 255.0)
        .unwrap_or(f64::NAN)
}

/// Decode a 6-hex-digit RGB string into a [`Color`] with the given opacity.
///
/// A leading `#` is stripped. Input is not validated: any channel that does
/// not decode becomes NaN and the caller is responsible for passing valid hex.
pub fn hex_to_color(hex: &str, opacity: f64) -> Color {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    Color::new(
        channel(hex, 0..2),
        channel(hex, 2..4),
        channel(hex, 4..6),
        opacity,
    )
}
