//! Color values and the HSL rotation arithmetic.

mod hex;
mod hsl;

pub use hex::to_hex;
pub use hsl::{clamp, from_hsl, rotate, to_hsl, wrap_hue, Hsl};

use serde::{Deserialize, Serialize};

/// Normalized color with channels in [0, 1] and optional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl ColorValue {
    /// Create an opaque color without an explicit alpha channel.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Create a color with an explicit alpha channel.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }

    /// Alpha channel, treating a missing channel as fully opaque.
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// Copy of this color carrying the given alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: Some(a), ..self }
    }

    /// Check if every channel lies in [0, 1].
    pub fn is_in_gamut(&self) -> bool {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        unit(self.r) && unit(self.g) && unit(self.b) && self.a.map_or(true, unit)
    }

    /// Check if the RGB channels of two colors differ by at most `tolerance`.
    pub fn approx_eq_rgb(&self, other: &ColorValue, tolerance: f64) -> bool {
        (self.r - other.r).abs() <= tolerance
            && (self.g - other.g).abs() <= tolerance
            && (self.b - other.b).abs() <= tolerance
    }

    /// Lowercase `#rrggbb[aa]` representation.
    pub fn to_hex(&self) -> String {
        to_hex(self)
    }
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", to_hex(self))
    }
}
