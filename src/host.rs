//! Host document interface and its in-memory implementation.
//!
//! The rotation engine never touches a document directly: it enumerates,
//! reads and writes through [`DocumentHost`]. Owners expose whole-list
//! write semantics only, so paints and effects are always replaced as a
//! complete list.

use crate::color::ColorValue;
use crate::error::{Result, RotateError};
use crate::model::{Document, Effect, Fills, Node, Paint, PaintStyle, Variable, VariableValue};
use tracing::{debug, info};

/// Aggregate color summary of the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionColors {
    /// Distinct solid paints used directly by the selection.
    pub paints: Vec<Paint>,
    /// Distinct paint styles used by the selection.
    pub styles: Vec<PaintStyle>,
}

/// Operations the rotation engine needs from the host document.
pub trait DocumentHost {
    /// Local color variables.
    fn local_color_variables(&self) -> Vec<&Variable>;

    /// Look up a variable; `None` once deleted.
    fn variable_by_id(&self, id: &str) -> Option<&Variable>;

    /// Write a concrete color into one mode of a variable.
    fn set_variable_value_for_mode(&mut self, id: &str, mode: &str, color: ColorValue)
        -> Result<()>;

    /// Local paint styles.
    fn local_paint_styles(&self) -> Vec<&PaintStyle>;

    /// Look up a paint style; `None` once deleted.
    fn paint_style_by_id(&self, id: &str) -> Option<&PaintStyle>;

    /// Replace a style's paint list.
    fn set_style_paints(&mut self, id: &str, paints: Vec<Paint>) -> Result<()>;

    /// Every node of the current page.
    fn page_nodes(&self) -> Vec<&Node>;

    /// Look up a node; `None` once deleted.
    fn node_by_id(&self, id: &str) -> Option<&Node>;

    /// Currently selected nodes.
    fn selection(&self) -> Vec<&Node>;

    /// Aggregate color summary of the selection; `None` when unavailable.
    fn selection_colors(&self) -> Option<SelectionColors>;

    /// Mode ids explicitly activated on the current page.
    fn explicit_variable_modes(&self) -> Vec<String>;

    /// Replace a node's fill list.
    fn set_fills(&mut self, node_id: &str, paints: Vec<Paint>) -> Result<()>;

    /// Replace a node's stroke list.
    fn set_strokes(&mut self, node_id: &str, paints: Vec<Paint>) -> Result<()>;

    /// Replace a node's effect list.
    fn set_effects(&mut self, node_id: &str, effects: Vec<Effect>) -> Result<()>;

    /// Close the plugin, keeping the document as it is.
    fn close_plugin(&mut self);

    /// Undo every edit made since the plugin started.
    fn trigger_undo(&mut self);
}

/// [`DocumentHost`] over an in-memory [`Document`].
///
/// The document as it was at construction is kept as the single undo step.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    document: Document,
    snapshot: Document,
    closed: bool,
}

impl MemoryHost {
    /// Wrap a document.
    pub fn new(document: Document) -> Self {
        Self {
            snapshot: document.clone(),
            document,
            closed: false,
        }
    }

    /// Current document state.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for edits made outside the plugin.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Consume the host, returning the current document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Check if the plugin has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replace the selection.
    pub fn select(&mut self, ids: &[&str]) {
        self.document.current_page.selection = ids.iter().map(|id| id.to_string()).collect();
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.document
            .find_node_mut(id)
            .ok_or_else(|| RotateError::NodeNotFound { id: id.to_string() })
    }
}

/// Push unless an equal item is already present.
fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

impl DocumentHost for MemoryHost {
    fn local_color_variables(&self) -> Vec<&Variable> {
        self.document.variables.iter().collect()
    }

    fn variable_by_id(&self, id: &str) -> Option<&Variable> {
        self.document.find_variable(id)
    }

    fn set_variable_value_for_mode(
        &mut self,
        id: &str,
        mode: &str,
        color: ColorValue,
    ) -> Result<()> {
        let variable = self
            .document
            .find_variable_mut(id)
            .ok_or_else(|| RotateError::VariableNotFound { id: id.to_string() })?;
        let value = variable
            .values_by_mode
            .get_mut(mode)
            .ok_or_else(|| RotateError::ModeNotFound {
                id: id.to_string(),
                mode: mode.to_string(),
            })?;
        *value = VariableValue::Color(color);
        Ok(())
    }

    fn local_paint_styles(&self) -> Vec<&PaintStyle> {
        self.document.paint_styles.iter().collect()
    }

    fn paint_style_by_id(&self, id: &str) -> Option<&PaintStyle> {
        self.document.find_style(id)
    }

    fn set_style_paints(&mut self, id: &str, paints: Vec<Paint>) -> Result<()> {
        let style = self
            .document
            .find_style_mut(id)
            .ok_or_else(|| RotateError::StyleNotFound { id: id.to_string() })?;
        style.paints = paints;
        Ok(())
    }

    fn page_nodes(&self) -> Vec<&Node> {
        self.document.all_nodes()
    }

    fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.document.find_node(id)
    }

    fn selection(&self) -> Vec<&Node> {
        self.document.selected_nodes()
    }

    fn selection_colors(&self) -> Option<SelectionColors> {
        let selected = self.selection();
        if selected.is_empty() {
            return None;
        }

        let mut nodes = Vec::new();
        for node in selected {
            node.collect_subtree(&mut nodes);
        }

        let mut colors = SelectionColors::default();
        for node in nodes {
            let styled_fill = node
                .fill_style_id
                .as_deref()
                .and_then(|id| self.document.find_style(id));
            match (styled_fill, node.fill_paints()) {
                (Some(style), _) => push_unique(&mut colors.styles, style.clone()),
                (None, Some(paints)) => paints
                    .iter()
                    .filter(|p| p.is_solid())
                    .for_each(|p| push_unique(&mut colors.paints, p.clone())),
                (None, None) => {}
            }

            let styled_stroke = node
                .stroke_style_id
                .as_deref()
                .and_then(|id| self.document.find_style(id));
            match (styled_stroke, node.strokes.as_deref()) {
                (Some(style), _) => push_unique(&mut colors.styles, style.clone()),
                (None, Some(paints)) => paints
                    .iter()
                    .filter(|p| p.is_solid())
                    .for_each(|p| push_unique(&mut colors.paints, p.clone())),
                (None, None) => {}
            }
        }

        Some(colors)
    }

    fn explicit_variable_modes(&self) -> Vec<String> {
        self.document
            .current_page
            .explicit_variable_modes
            .values()
            .cloned()
            .collect()
    }

    fn set_fills(&mut self, node_id: &str, paints: Vec<Paint>) -> Result<()> {
        let node = self.node_mut(node_id)?;
        if node.fills.is_none() {
            return Err(RotateError::MissingProperty {
                id: node_id.to_string(),
                property: "fills",
            });
        }
        node.fills = Some(Fills::Paints(paints));
        Ok(())
    }

    fn set_strokes(&mut self, node_id: &str, paints: Vec<Paint>) -> Result<()> {
        let node = self.node_mut(node_id)?;
        match node.strokes.as_mut() {
            Some(strokes) => {
                *strokes = paints;
                Ok(())
            }
            None => Err(RotateError::MissingProperty {
                id: node_id.to_string(),
                property: "strokes",
            }),
        }
    }

    fn set_effects(&mut self, node_id: &str, effects: Vec<Effect>) -> Result<()> {
        let node = self.node_mut(node_id)?;
        match node.effects.as_mut() {
            Some(current) => {
                *current = effects;
                Ok(())
            }
            None => Err(RotateError::MissingProperty {
                id: node_id.to_string(),
                property: "effects",
            }),
        }
    }

    fn close_plugin(&mut self) {
        info!("Plugin closed");
        self.closed = true;
    }

    fn trigger_undo(&mut self) {
        debug!("Restoring document to its state at launch");
        self.document = self.snapshot.clone();
    }
}
