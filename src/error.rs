//! Error types for color rotation.

use std::path::PathBuf;
use thiserror::Error;

/// Failure classes of the rotation engine.
///
/// None of these abort an apply pass: an entity that fails contributes no
/// rotatable color and every other entity is still updated. Alias cycles
/// are not a failure; the resolver truncates them at the repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An id no longer resolves (deleted variable, style or node).
    MissingEntity,
    /// A node property reports the mixed sentinel instead of a list.
    MixedValue,
    /// A paint or effect is present but carries no rotatable color.
    TypeMismatch,
    /// Loading, validating or saving documents and preferences failed.
    Io,
}

/// Main error type for the rotation engine and its host glue.
#[derive(Debug, Error)]
pub enum RotateError {
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Empty document: {path}")]
    EmptyDocument { path: PathBuf },

    #[error("Invalid document: {}", errors.join("; "))]
    InvalidDocument { errors: Vec<String> },

    #[error("Variable not found: {id}")]
    VariableNotFound { id: String },

    #[error("Variable {id} has no mode '{mode}'")]
    ModeNotFound { id: String, mode: String },

    #[error("Paint style not found: {id}")]
    StyleNotFound { id: String },

    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Node {id} has no {property}")]
    MissingProperty { id: String, property: &'static str },

    #[error("Node {id} reports mixed {property}")]
    MixedProperty { id: String, property: &'static str },

    #[error("Index {index} is out of range for {owner} ({len} entries)")]
    IndexOutOfRange {
        owner: String,
        index: usize,
        len: usize,
    },

    #[error("Slot {index} of {owner} does not carry a rotatable color")]
    NotRotatable { owner: String, index: usize },

    #[error("Preference store error: {message}")]
    Preferences { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RotateError {
    /// Get the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RotateError::VariableNotFound { .. }
            | RotateError::ModeNotFound { .. }
            | RotateError::StyleNotFound { .. }
            | RotateError::NodeNotFound { .. }
            | RotateError::MissingProperty { .. }
            | RotateError::IndexOutOfRange { .. } => ErrorKind::MissingEntity,
            RotateError::MixedProperty { .. } => ErrorKind::MixedValue,
            RotateError::NotRotatable { .. } => ErrorKind::TypeMismatch,
            RotateError::DocumentNotFound { .. }
            | RotateError::EmptyDocument { .. }
            | RotateError::InvalidDocument { .. }
            | RotateError::Preferences { .. }
            | RotateError::Io(_)
            | RotateError::Json(_) => ErrorKind::Io,
        }
    }

    /// Check if the affected entity should simply be skipped.
    pub fn is_skippable(&self) -> bool {
        self.kind() != ErrorKind::Io
    }
}

/// Result type alias for rotation operations.
pub type Result<T> = std::result::Result<T, RotateError>;
