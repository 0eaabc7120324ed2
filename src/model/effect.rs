//! Effect - Shadows, noise and blurs attached to nodes.

use super::paint::{default_visible, BlendMode};
use super::VariableAlias;
use crate::color::ColorValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2D offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// Drop shadow or inner shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    /// Shadow color (RGBA).
    pub color: ColorValue,
    #[serde(default)]
    pub offset: Vector,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bound_variables: BTreeMap<String, VariableAlias>,
}

impl ShadowEffect {
    /// Create a visible shadow with the given color and blur radius.
    pub fn new(color: ColorValue, radius: f64) -> Self {
        Self {
            color,
            offset: Vector::default(),
            radius,
            spread: 0.0,
            visible: true,
            blend_mode: BlendMode::Normal,
            bound_variables: BTreeMap::new(),
        }
    }
}

/// Monotone noise texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseEffect {
    /// Noise color (RGBA).
    pub color: ColorValue,
    #[serde(default)]
    pub noise_size: f64,
    #[serde(default)]
    pub density: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bound_variables: BTreeMap<String, VariableAlias>,
}

/// Layer or background blur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurEffect {
    pub radius: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Visual effect attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    Noise(NoiseEffect),
    LayerBlur(BlurEffect),
    BackgroundBlur(BlurEffect),
}

impl Effect {
    /// Color of a color-bearing effect (shadows and noise).
    pub fn color(&self) -> Option<ColorValue> {
        match self {
            Effect::DropShadow(e) | Effect::InnerShadow(e) => Some(e.color),
            Effect::Noise(e) => Some(e.color),
            Effect::LayerBlur(_) | Effect::BackgroundBlur(_) => None,
        }
    }

    /// Check if this effect carries a color.
    pub fn is_color_bearing(&self) -> bool {
        self.color().is_some()
    }

    /// Check if any field of this effect is bound to a variable.
    pub fn is_bound(&self) -> bool {
        match self {
            Effect::DropShadow(e) | Effect::InnerShadow(e) => !e.bound_variables.is_empty(),
            Effect::Noise(e) => !e.bound_variables.is_empty(),
            Effect::LayerBlur(_) | Effect::BackgroundBlur(_) => false,
        }
    }

    /// Copy of this effect with its color overridden.
    ///
    /// Effects without a color are returned unchanged.
    pub fn with_color(&self, color: ColorValue) -> Effect {
        match self {
            Effect::DropShadow(e) => Effect::DropShadow(ShadowEffect {
                color,
                ..e.clone()
            }),
            Effect::InnerShadow(e) => Effect::InnerShadow(ShadowEffect {
                color,
                ..e.clone()
            }),
            Effect::Noise(e) => Effect::Noise(NoiseEffect {
                color,
                ..e.clone()
            }),
            Effect::LayerBlur(_) | Effect::BackgroundBlur(_) => self.clone(),
        }
    }

    /// Host type name of this effect.
    pub fn type_name(&self) -> &'static str {
        match self {
            Effect::DropShadow(_) => "DROP_SHADOW",
            Effect::InnerShadow(_) => "INNER_SHADOW",
            Effect::Noise(_) => "NOISE",
            Effect::LayerBlur(_) => "LAYER_BLUR",
            Effect::BackgroundBlur(_) => "BACKGROUND_BLUR",
        }
    }
}
