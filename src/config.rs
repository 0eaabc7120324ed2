//! Configuration constants and settings for color rotation.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Full hue circle in degrees.
pub const HUE_PERIOD: f64 = 360.0;

/// Upper bound of the saturation and lightness scale.
pub const PERCENT_MAX: f64 = 100.0;

/// Hue delta range offered by the hue slider.
pub const HUE_DELTA_RANGE: (f64, f64) = (-180.0, 180.0);

/// Saturation delta range offered by the saturation slider.
pub const SATURATION_DELTA_RANGE: (f64, f64) = (-100.0, 100.0);

/// Lightness delta range offered by the lightness slider.
pub const LIGHTNESS_DELTA_RANGE: (f64, f64) = (-100.0, 100.0);

/// Client storage key holding the last confirmed scope.
pub const SELECT_PREFERENCE_KEY: &str = "select";

/// Which entries a rotation pass operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every entry of the document catalog.
    #[default]
    All,
    /// Only catalog entries that are checked in the current selection view.
    Select,
}

impl Scope {
    /// Parse a scope from its persisted preference value.
    pub fn from_preference_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Scope::All),
            "select" | "selection" => Some(Scope::Select),
            _ => None,
        }
    }

    /// Value written to the preference store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Select => "select",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hue/saturation/lightness deltas for one rotation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Adjustment {
    /// Hue delta in degrees.
    pub hue: f64,
    /// Saturation delta in percentage points.
    pub saturation: f64,
    /// Lightness delta in percentage points.
    pub lightness: f64,
}

impl Adjustment {
    /// Create a new adjustment.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// The adjustment that restores every entry to its base color.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Check if every delta lies within its slider range.
    pub fn is_within_ranges(&self) -> bool {
        float_cmp::in_range(self.hue, HUE_DELTA_RANGE.0, HUE_DELTA_RANGE.1)
            && float_cmp::in_range(
                self.saturation,
                SATURATION_DELTA_RANGE.0,
                SATURATION_DELTA_RANGE.1,
            )
            && float_cmp::in_range(
                self.lightness,
                LIGHTNESS_DELTA_RANGE.0,
                LIGHTNESS_DELTA_RANGE.1,
            )
    }

    /// Clamp every delta into its slider range.
    ///
    /// Hue deltas beyond ±180 would break the single-period wrap in
    /// [`crate::color::wrap_hue`].
    pub fn clamped_to_ranges(&self) -> Self {
        Self {
            hue: self.hue.max(HUE_DELTA_RANGE.0).min(HUE_DELTA_RANGE.1),
            saturation: self
                .saturation
                .max(SATURATION_DELTA_RANGE.0)
                .min(SATURATION_DELTA_RANGE.1),
            lightness: self
                .lightness
                .max(LIGHTNESS_DELTA_RANGE.0)
                .min(LIGHTNESS_DELTA_RANGE.1),
        }
    }
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "H{:+} S{:+} L{:+}",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}
