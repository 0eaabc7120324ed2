//! Validation logic for documents loaded from disk.

use crate::catalog::{effect_entries, fill_entries, stroke_entries, style_entries, variable_entries};
use crate::color::ColorValue;
use crate::model::{Document, Paint, Variable};
use std::collections::{HashMap, HashSet};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a whole document.
///
/// Only duplicate node ids are errors. Everything the engine tolerates at
/// run time (stale selection ids, dangling or cyclic aliases, missing
/// styles, out-of-gamut channels) is reported as a warning.
pub fn validate_document(document: &Document) -> ValidationResult {
    let mut result = ValidationResult::ok();

    result.merge(validate_nodes(document));
    result.merge(validate_variables(document));
    result.merge(validate_styles(document));

    if !document_has_colors(document) {
        result.add_warning(format!(
            "Document '{}': No rotatable colors found",
            document.name
        ));
    }

    result
}

/// Check node ids, the selection and style references.
pub fn validate_nodes(document: &Document) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let nodes = document.all_nodes();

    // Check for duplicate ids
    let mut seen = HashSet::new();
    for node in &nodes {
        if !seen.insert(node.id.as_str()) {
            result.add_error(format!("Node {}: Duplicate node id", node.id));
        }
    }

    // Stale selection ids are dropped by the resolver
    for id in &document.current_page.selection {
        if !seen.contains(id.as_str()) {
            result.add_warning(format!("Selection: Node {} not found on page", id));
        }
    }

    for node in &nodes {
        for (kind, style_id) in [("Fill", &node.fill_style_id), ("Stroke", &node.stroke_style_id)] {
            if let Some(style_id) = style_id {
                if document.find_style(style_id).is_none() {
                    result.add_warning(format!(
                        "Node {}: {} style {} not found",
                        node.id, kind, style_id
                    ));
                }
            }
        }

        if let Some(paints) = node.fill_paints() {
            check_paints(&mut result, &format!("Node {}, Fill", node.id), paints);
        }
        if let Some(paints) = &node.strokes {
            check_paints(&mut result, &format!("Node {}, Stroke", node.id), paints);
        }
        for (idx, effect) in node.effects.iter().flatten().enumerate() {
            if let Some(color) = effect.color() {
                check_color(
                    &mut result,
                    &format!("Node {}, Effect {} ({})", node.id, idx + 1, effect.type_name()),
                    &color,
                );
            }
        }
    }

    result
}

/// Check alias targets, alias cycles and concrete mode values.
pub fn validate_variables(document: &Document) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for variable in &document.variables {
        for target in variable.alias_targets() {
            if document.find_variable(target).is_none() {
                result.add_warning(format!(
                    "Variable {}: Alias to missing variable {}",
                    variable.id, target
                ));
            }
        }

        for (mode, color) in variable.concrete_modes() {
            check_color(
                &mut result,
                &format!("Variable {}, Mode {}", variable.id, mode),
                color,
            );
        }
    }

    for id in find_alias_cycles(&document.variables) {
        result.add_warning(format!(
            "Variable {}: Alias cycle (resolution stops at the repeat)",
            id
        ));
    }

    result
}

/// Check every style paint.
pub fn validate_styles(document: &Document) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for style in &document.paint_styles {
        check_paints(&mut result, &format!("Style {}", style.id), &style.paints);
    }
    result
}

/// Check if the document has at least one rotatable color.
pub fn document_has_colors(document: &Document) -> bool {
    document
        .variables
        .iter()
        .any(|v| !variable_entries(v).is_empty())
        || document
            .paint_styles
            .iter()
            .any(|s| !style_entries(s).is_empty())
        || document.all_nodes().into_iter().any(|n| {
            !fill_entries(n).is_empty()
                || !stroke_entries(n).is_empty()
                || !effect_entries(n).is_empty()
        })
}

/// Variables at which an alias walk closes a cycle, one per cycle.
///
/// Depth-first over the alias graph in document order; each back edge
/// reports the variable it returns to.
pub fn find_alias_cycles(variables: &[Variable]) -> Vec<String> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit<'a>(
        id: &'a str,
        by_id: &HashMap<&'a str, &'a Variable>,
        marks: &mut HashMap<&'a str, Mark>,
        cycles: &mut Vec<String>,
    ) {
        marks.insert(id, Mark::Active);
        if let Some(&variable) = by_id.get(id) {
            for target in variable.alias_targets() {
                match marks.get(target) {
                    Some(Mark::Active) => cycles.push(target.to_string()),
                    Some(Mark::Done) => {}
                    None if by_id.contains_key(target) => visit(target, by_id, marks, cycles),
                    None => {}
                }
            }
        }
        marks.insert(id, Mark::Done);
    }

    let by_id: HashMap<&str, &Variable> = variables.iter().map(|v| (v.id.as_str(), v)).collect();
    let mut marks = HashMap::new();
    let mut cycles = Vec::new();

    for variable in variables {
        if !marks.contains_key(variable.id.as_str()) {
            visit(&variable.id, &by_id, &mut marks, &mut cycles);
        }
    }
    cycles
}

fn check_paints(result: &mut ValidationResult, owner: &str, paints: &[Paint]) {
    for (idx, paint) in paints.iter().enumerate() {
        if let Some(solid) = paint.as_solid() {
            check_color(result, &format!("{} {}", owner, idx + 1), &solid.color);
        }
    }
}

fn check_color(result: &mut ValidationResult, location: &str, color: &ColorValue) {
    if !color.is_in_gamut() {
        result.add_warning(format!(
            "{}: Color channel out of range ({}, {}, {})",
            location, color.r, color.g, color.b
        ));
    }
}
