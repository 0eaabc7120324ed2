//! Alias and selection resolution.

mod alias;
mod selection;

pub use alias::resolve_aliases;
pub use selection::resolve_selection;
