//! Document validation.

mod validate;

pub use validate::{
    document_has_colors, find_alias_cycles, validate_document, validate_nodes, validate_styles,
    validate_variables, ValidationResult,
};
