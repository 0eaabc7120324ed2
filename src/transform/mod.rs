//! Transformations applied to catalogued colors.

mod apply;

pub use apply::{apply_transform, replace_slot, ApplyReport};
