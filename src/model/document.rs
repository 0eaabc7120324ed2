//! Document - Variables, paint styles and the current page.

use super::node::{find_node, find_node_mut};
use super::{Node, Paint, Variable};
use crate::error::{Result, RotateError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Named, reusable paint list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    /// Style identifier.
    pub id: String,
    /// Style name (e.g., "Brand/Primary").
    pub name: String,
    /// Ordered paint list.
    pub paints: Vec<Paint>,
}

impl PaintStyle {
    /// Create a new paint style.
    pub fn new(id: impl Into<String>, name: impl Into<String>, paints: Vec<Paint>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            paints,
        }
    }
}

/// The page the plugin runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Explicitly chosen mode per variable collection.
    #[serde(default)]
    pub explicit_variable_modes: BTreeMap<String, String>,
    /// Ids of the selected nodes.
    #[serde(default)]
    pub selection: Vec<String>,
    /// Top-level nodes.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Complete design document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// Local color variables.
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Local paint styles.
    #[serde(default)]
    pub paint_styles: Vec<PaintStyle>,
    /// Page the plugin was launched on.
    #[serde(default)]
    pub current_page: Page,
}

impl Document {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RotateError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(RotateError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }

        Self::from_json(&content)
    }

    /// Write the document to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// All nodes of the current page, depth-first.
    pub fn all_nodes(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        for node in &self.current_page.children {
            node.collect_subtree(&mut nodes);
        }
        nodes
    }

    /// Find a node on the current page.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        find_node(&self.current_page.children, id)
    }

    /// Find a node on the current page, mutably.
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        find_node_mut(&mut self.current_page.children, id)
    }

    /// Find a variable by id.
    pub fn find_variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Find a variable by id, mutably.
    pub fn find_variable_mut(&mut self, id: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.id == id)
    }

    /// Find a paint style by id.
    pub fn find_style(&self, id: &str) -> Option<&PaintStyle> {
        self.paint_styles.iter().find(|s| s.id == id)
    }

    /// Find a paint style by id, mutably.
    pub fn find_style_mut(&mut self, id: &str) -> Option<&mut PaintStyle> {
        self.paint_styles.iter_mut().find(|s| s.id == id)
    }

    /// Selected nodes that still exist, in selection order.
    pub fn selected_nodes(&self) -> Vec<&Node> {
        self.current_page
            .selection
            .iter()
            .filter_map(|id| self.find_node(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorValue;
    use crate::model::NodeType;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut doc = Document::new("Sample");
        doc.variables
            .push(Variable::new("V:1", "red").with_color("m1", ColorValue::rgb(1.0, 0.0, 0.0)));
        doc.paint_styles.push(PaintStyle::new(
            "S:1",
            "Brand",
            vec![Paint::solid(ColorValue::rgb(0.0, 0.0, 1.0))],
        ));
        doc.current_page.children.push(
            Node::new("1:1", NodeType::Frame)
                .with_child(Node::new("1:2", NodeType::Rectangle)),
        );
        doc.current_page.selection = vec!["1:2".into(), "9:9".into()];
        doc
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample();
        let json = doc.to_json_pretty().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_selected_nodes_skip_missing() {
        let doc = sample();
        let ids: Vec<&str> = doc.selected_nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1:2"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Document::load(Path::new("/nonexistent/doc.json"));
        assert!(matches!(result, Err(RotateError::DocumentNotFound { .. })));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = Document::load(file.path());
        assert!(matches!(result, Err(RotateError::EmptyDocument { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = sample();
        doc.save(&path).unwrap();
        assert_eq!(Document::load(&path).unwrap(), doc);
    }
}
