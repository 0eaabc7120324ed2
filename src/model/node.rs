//! Node - Scene graph element carrying fills, strokes and effects.

use super::{Effect, Paint};
use serde::{Deserialize, Serialize};

/// Kind of scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    #[default]
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    Text,
    BooleanOperation,
    Connector,
    Sticky,
}

/// Marker for the host's "mixed" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixedMarker {
    #[serde(rename = "mixed")]
    Mixed,
}

/// Fill list of a node, or the mixed sentinel (e.g. text with per-range fills).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fills {
    Paints(Vec<Paint>),
    Mixed(MixedMarker),
}

impl Fills {
    /// The mixed sentinel.
    pub fn mixed() -> Self {
        Fills::Mixed(MixedMarker::Mixed)
    }

    /// Get the concrete paint list; `None` when mixed.
    pub fn paints(&self) -> Option<&[Paint]> {
        match self {
            Fills::Paints(paints) => Some(paints),
            Fills::Mixed(_) => None,
        }
    }

    /// Check if this is the mixed sentinel.
    pub fn is_mixed(&self) -> bool {
        matches!(self, Fills::Mixed(_))
    }
}

/// Scene node (frame, shape, text, group, ...).
///
/// A property left as `None` means the node type does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node identifier.
    pub id: String,
    /// Layer name.
    #[serde(default)]
    pub name: String,
    /// Node kind.
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Fills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,
    /// Paint style backing the fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    /// Paint style backing the strokes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no paint properties.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            ..Default::default()
        }
    }

    /// Builder: set the fill list.
    pub fn with_fills(mut self, paints: Vec<Paint>) -> Self {
        self.fills = Some(Fills::Paints(paints));
        self
    }

    /// Builder: set the stroke list.
    pub fn with_strokes(mut self, paints: Vec<Paint>) -> Self {
        self.strokes = Some(paints);
        self
    }

    /// Builder: set the effect list.
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Builder: append a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Concrete fill list; `None` when absent or mixed.
    pub fn fill_paints(&self) -> Option<&[Paint]> {
        self.fills.as_ref().and_then(Fills::paints)
    }

    /// Collect this node and all of its descendants, depth-first.
    pub fn collect_subtree<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in &self.children {
            child.collect_subtree(out);
        }
    }
}

/// Find a node by id in a forest.
pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Find a node by id in a forest, mutably.
pub fn find_node_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}
