//! Paint - Fill/stroke/style paint definitions.

use super::VariableAlias;
use crate::color::ColorValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a paint or effect composites with what lies beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    Normal,
    Darken,
    Multiply,
    ColorBurn,
    Lighten,
    Screen,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

pub(crate) fn default_opacity() -> f64 {
    1.0
}

pub(crate) fn default_visible() -> bool {
    true
}

/// Single-color paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    /// Paint color (RGB; transparency lives in `opacity`).
    pub color: ColorValue,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Paint fields bound to variables, keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bound_variables: BTreeMap<String, VariableAlias>,
}

impl SolidPaint {
    /// Create a visible, fully opaque paint.
    pub fn new(color: ColorValue) -> Self {
        Self {
            color,
            opacity: 1.0,
            visible: true,
            blend_mode: BlendMode::Normal,
            bound_variables: BTreeMap::new(),
        }
    }

    /// Create a paint whose color is bound to a variable.
    pub fn bound_to(color: ColorValue, variable_id: impl Into<String>) -> Self {
        let mut paint = Self::new(color);
        paint
            .bound_variables
            .insert("color".to_string(), VariableAlias::new(variable_id));
        paint
    }

    /// Check if any field of this paint is bound to a variable.
    pub fn is_bound(&self) -> bool {
        !self.bound_variables.is_empty()
    }

    /// The variable backing this paint's color, if any.
    pub fn color_alias(&self) -> Option<&VariableAlias> {
        self.bound_variables.get("color")
    }

    /// Copy of this paint with its color overridden.
    ///
    /// Opacity, visibility and blend mode are kept. An alpha channel on
    /// `color` becomes the paint opacity. The result is a concrete color, so
    /// variable bindings are dropped.
    pub fn with_color(&self, color: ColorValue) -> Self {
        Self {
            color: ColorValue { a: None, ..color },
            opacity: color.a.unwrap_or(self.opacity),
            visible: self.visible,
            blend_mode: self.blend_mode,
            bound_variables: BTreeMap::new(),
        }
    }
}

/// One stop of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: ColorValue,
}

/// Linear or radial gradient paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

/// Image paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    pub image_hash: String,
    #[serde(default)]
    pub scale_mode: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

/// Paint attached to a style, fill list or stroke list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    Image(ImagePaint),
}

impl Paint {
    /// Shorthand for a plain solid paint.
    pub fn solid(color: ColorValue) -> Self {
        Paint::Solid(SolidPaint::new(color))
    }

    /// Get the solid paint, if this is one.
    pub fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Paint::Solid(solid) => Some(solid),
            _ => None,
        }
    }

    /// Check if this is a solid paint.
    pub fn is_solid(&self) -> bool {
        matches!(self, Paint::Solid(_))
    }
}
