//! hue-rotate - Batch hue/saturation/lightness rotation for design documents.
//!
//! This library catalogs every rotatable color of a document (color
//! variables, paint styles, node fills, strokes and shadow/noise effects),
//! resolves variable alias chains, and rewrites colors by a uniform
//! hue/saturation/lightness delta. Every rotation is computed from the color
//! an entry had when catalogued, so previews never accumulate drift.
//!
//! # Example
//!
//! ```no_run
//! use hue_rotate::{rotate_document, Adjustment, Document, Scope};
//! use std::path::Path;
//!
//! let document = Document::load(Path::new("design.json")).unwrap();
//! let (rotated, report) =
//!     rotate_document(document, &Adjustment::new(30.0, 0.0, 0.0), Scope::All).unwrap();
//! println!("{} color(s) rotated", report.written());
//! rotated.save(Path::new("design.rotated.json")).unwrap();
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod preferences;
pub mod resolve;
pub mod session;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use catalog::{Catalog, ColorEntry, EntryKind, EntryMaps, SelectionView};
pub use color::{rotate, ColorValue};
pub use config::{Adjustment, Scope};
pub use error::{ErrorKind, Result, RotateError};
pub use host::{DocumentHost, MemoryHost, SelectionColors};
pub use model::{Document, Node, Paint, PaintStyle, Variable};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use resolve::{resolve_aliases, resolve_selection};
pub use session::{InboundMessage, OutboundMessage, Session};
pub use transform::{apply_transform, ApplyReport};
pub use validation::{validate_document, ValidationResult};

/// Rotate the colors of a document in one pass.
///
/// This is the non-interactive pipeline:
/// 1. Validate the document (duplicate node ids abort)
/// 2. Catalog every rotatable color
/// 3. With `Scope::Select`, resolve the document's stored selection
/// 4. Apply the adjustment and return the rewritten document
pub fn rotate_document(
    document: Document,
    adjustment: &Adjustment,
    scope: Scope,
) -> Result<(Document, ApplyReport)> {
    let validation = validate_document(&document);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    if !validation.passed {
        return Err(RotateError::InvalidDocument {
            errors: validation.errors,
        });
    }

    let mut host = MemoryHost::new(document);
    let catalog = Catalog::build(&host);
    let view = match scope {
        Scope::All => SelectionView::default(),
        Scope::Select => resolve_selection(&host),
    };

    let report = apply_transform(&mut host, &catalog, adjustment, scope, &view);
    Ok((host.into_document(), report))
}
