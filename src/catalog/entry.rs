//! ColorEntry - One rotatable color slot.

use crate::color::{to_hex, ColorValue};
use crate::model::{Node, PaintStyle, SolidPaint, Variable};
use serde::{Deserialize, Serialize};

/// What owns a color slot, with the payload needed to write it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ownerKind", rename_all = "kebab-case")]
pub enum EntryKind {
    /// One mode of a color variable.
    VariableMode { mode: String },
    /// One paint of a paint style.
    StylePaint { paint: SolidPaint },
    /// One fill paint of a node.
    NodeFill { paint: SolidPaint },
    /// One stroke paint of a node.
    NodeStroke { paint: SolidPaint },
    /// One shadow or noise effect of a node.
    NodeEffect,
}

/// One color-bearing slot and the color it had when catalogued.
///
/// `base_color` never changes after construction; every rotation is
/// computed from it. Only `selected` is mutated, by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    /// Entry identifier: the owner id, suffixed with `-index` for effects.
    pub id: String,
    /// Owning variable, style or node.
    pub owner_id: String,
    /// Position in the owner's paint or effect list (0 for variables).
    pub index: usize,
    base_color: ColorValue,
    /// Display name for option lists.
    pub name: String,
    /// Display hex of the base color.
    pub hex_color: String,
    /// Whether the UI checkbox for this entry is ticked.
    pub selected: bool,
    pub kind: EntryKind,
}

impl ColorEntry {
    fn new(
        id: String,
        owner_id: &str,
        index: usize,
        base_color: ColorValue,
        name: Option<&str>,
        kind: EntryKind,
    ) -> Self {
        let hex_color = to_hex(&base_color);
        Self {
            id,
            owner_id: owner_id.to_string(),
            index,
            base_color,
            name: name.map_or_else(|| hex_color.clone(), str::to_string),
            hex_color,
            selected: true,
            kind,
        }
    }

    /// Entry for one concrete mode of a variable.
    pub fn variable(variable: &Variable, mode: &str, color: ColorValue) -> Self {
        Self::new(
            variable.id.clone(),
            &variable.id,
            0,
            color,
            Some(&variable.name),
            EntryKind::VariableMode {
                mode: mode.to_string(),
            },
        )
    }

    /// Entry for one solid paint of a style.
    pub fn style(style: &PaintStyle, index: usize, paint: &SolidPaint) -> Self {
        Self::new(
            style.id.clone(),
            &style.id,
            index,
            paint.color,
            Some(&style.name),
            EntryKind::StylePaint {
                paint: paint.clone(),
            },
        )
    }

    /// Entry for one solid fill of a node.
    pub fn fill(node: &Node, index: usize, paint: &SolidPaint) -> Self {
        Self::new(
            node.id.clone(),
            &node.id,
            index,
            paint.color,
            None,
            EntryKind::NodeFill {
                paint: paint.clone(),
            },
        )
    }

    /// Entry for one solid stroke of a node.
    pub fn stroke(node: &Node, index: usize, paint: &SolidPaint) -> Self {
        Self::new(
            node.id.clone(),
            &node.id,
            index,
            paint.color,
            None,
            EntryKind::NodeStroke {
                paint: paint.clone(),
            },
        )
    }

    /// Entry for one color-bearing effect of a node.
    pub fn effect(node: &Node, index: usize, color: ColorValue) -> Self {
        Self::new(
            format!("{}-{}", node.id, index),
            &node.id,
            index,
            color,
            None,
            EntryKind::NodeEffect,
        )
    }

    /// Color the slot held when catalogued.
    pub fn base_color(&self) -> ColorValue {
        self.base_color
    }

    /// Variable mode of a variable entry.
    pub fn mode(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::VariableMode { mode } => Some(mode),
            _ => None,
        }
    }

    /// Catalogued paint of a style, fill or stroke entry.
    pub fn base_paint(&self) -> Option<&SolidPaint> {
        match &self.kind {
            EntryKind::StylePaint { paint }
            | EntryKind::NodeFill { paint }
            | EntryKind::NodeStroke { paint } => Some(paint),
            EntryKind::VariableMode { .. } | EntryKind::NodeEffect => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;

    #[test]
    fn test_variable_entry_uses_variable_name() {
        let variable = Variable::new("V:1", "brand/red");
        let entry = ColorEntry::variable(&variable, "dark", ColorValue::rgb(1.0, 0.0, 0.0));
        assert_eq!(entry.id, "V:1");
        assert_eq!(entry.name, "brand/red");
        assert_eq!(entry.hex_color, "#ff0000");
        assert_eq!(entry.mode(), Some("dark"));
        assert!(entry.selected);
    }

    #[test]
    fn test_effect_entry_has_composite_id() {
        let node = Node::new("4:2", NodeType::Frame);
        let entry = ColorEntry::effect(&node, 1, ColorValue::rgba(0.0, 0.0, 0.0, 0.5));
        assert_eq!(entry.id, "4:2-1");
        assert_eq!(entry.owner_id, "4:2");
        assert_eq!(entry.name, "#00000080");
        assert!(entry.base_paint().is_none());
    }

    #[test]
    fn test_fill_entry_named_by_hex() {
        let node = Node::new("4:3", NodeType::Rectangle);
        let paint = SolidPaint::new(ColorValue::rgb(0.0, 0.0, 1.0));
        let entry = ColorEntry::fill(&node, 2, &paint);
        assert_eq!(entry.name, "#0000ff");
        assert_eq!(entry.index, 2);
        assert_eq!(entry.base_paint(), Some(&paint));
    }

    #[test]
    fn test_entry_json_shape() {
        let variable = Variable::new("V:1", "red");
        let entry = ColorEntry::variable(&variable, "m1", ColorValue::rgb(1.0, 0.0, 0.0));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["hexColor"], "#ff0000");
        assert_eq!(json["kind"]["ownerKind"], "variable-mode");
        assert_eq!(json["kind"]["mode"], "m1");

        let back: ColorEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
