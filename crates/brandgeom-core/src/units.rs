//! Clearspace unit conversion
//!
//! Clearspace margins are specified in one of four units and converted to
//! pixels with a fixed lookup. The `logomark` unit is relative to the size of
//! the detected icon.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points per centimeter (72 / 2.54, truncated as in print tooling)
pub const PIXELS_PER_CENTIMETER: f64 = 28.346;

/// Points per inch
pub const PIXELS_PER_INCH: f64 = 72.0;

/// Unit in which a clearspace value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearspaceUnit {
    /// Multiples of the logomark size
    Logomark,
    /// Pixels (identity)
    Pixels,
    /// Centimeters
    Centimeters,
    /// Inches
    Inches,
}

impl Default for ClearspaceUnit {
    fn default() -> Self {
        Self::Logomark
    }
}

impl ClearspaceUnit {
    /// Convert `value` in this unit to pixels.
    ///
    /// `logomark_size` is only consulted for [`ClearspaceUnit::Logomark`].
    pub fn to_pixels(self, value: f64, logomark_size: f64) -> f64 {
        match self {
            Self::Logomark => value * logomark_size,
            Self::Pixels => value,
            Self::Centimeters => value * PIXELS_PER_CENTIMETER,
            Self::Inches => value * PIXELS_PER_INCH,
        }
    }
}

impl fmt::Display for ClearspaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logomark => write!(f, "logomark"),
            Self::Pixels => write!(f, "px"),
            Self::Centimeters => write!(f, "cm"),
            Self::Inches => write!(f, "in"),
        }
    }
}

impl FromStr for ClearspaceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logomark" | "logo" => Ok(Self::Logomark),
            "pixels" | "px" => Ok(Self::Pixels),
            "centimeters" | "cm" => Ok(Self::Centimeters),
            "inches" | "inch" | "in" => Ok(Self::Inches),
            _ => Err(format!("Unknown clearspace unit: {}", s)),
        }
    }
}
