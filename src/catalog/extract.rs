//! Extraction rules shared by the catalog builder and the selection resolver.

use super::ColorEntry;
use crate::model::{Node, Paint, PaintStyle, SolidPaint, Variable};

/// Check if a mode is displayed on the page.
///
/// With no explicitly active modes every mode counts as active.
pub fn mode_is_active(mode: &str, active_modes: &[String]) -> bool {
    active_modes.is_empty() || active_modes.iter().any(|m| m == mode)
}

/// Solid paints whose color is not bound to a variable, with their index.
fn rotatable_paints(paints: &[Paint]) -> impl Iterator<Item = (usize, &SolidPaint)> {
    paints
        .iter()
        .enumerate()
        .filter_map(|(i, paint)| paint.as_solid().map(|solid| (i, solid)))
        .filter(|(_, solid)| !solid.is_bound())
}

/// One entry per concrete mode of a variable; alias modes are skipped.
pub fn variable_entries(variable: &Variable) -> Vec<ColorEntry> {
    variable
        .concrete_modes()
        .map(|(mode, color)| ColorEntry::variable(variable, mode, *color))
        .collect()
}

/// Like [`variable_entries`], restricted to modes active on the page.
pub fn active_variable_entries(variable: &Variable, active_modes: &[String]) -> Vec<ColorEntry> {
    variable
        .concrete_modes()
        .filter(|(mode, _)| mode_is_active(mode, active_modes))
        .map(|(mode, color)| ColorEntry::variable(variable, mode, *color))
        .collect()
}

/// Entries for the unbound solid paints of a style.
pub fn style_entries(style: &PaintStyle) -> Vec<ColorEntry> {
    rotatable_paints(&style.paints)
        .map(|(i, paint)| ColorEntry::style(style, i, paint))
        .collect()
}

/// Entries for the unbound solid fills of a node; none when fills are mixed.
pub fn fill_entries(node: &Node) -> Vec<ColorEntry> {
    match node.fill_paints() {
        Some(paints) => rotatable_paints(paints)
            .map(|(i, paint)| ColorEntry::fill(node, i, paint))
            .collect(),
        None => Vec::new(),
    }
}

/// Entries for the unbound solid strokes of a node.
pub fn stroke_entries(node: &Node) -> Vec<ColorEntry> {
    match node.strokes.as_deref() {
        Some(paints) => rotatable_paints(paints)
            .map(|(i, paint)| ColorEntry::stroke(node, i, paint))
            .collect(),
        None => Vec::new(),
    }
}

/// Entries for the unbound shadow and noise effects of a node.
pub fn effect_entries(node: &Node) -> Vec<ColorEntry> {
    let Some(effects) = node.effects.as_deref() else {
        return Vec::new();
    };

    effects
        .iter()
        .enumerate()
        .filter(|(_, effect)| !effect.is_bound())
        .filter_map(|(i, effect)| effect.color().map(|color| ColorEntry::effect(node, i, color)))
        .collect()
}
