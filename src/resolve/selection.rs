//! Selection scope resolution.

use super::resolve_aliases;
use crate::catalog::{
    active_variable_entries, effect_entries, fill_entries, insert_group, stroke_entries,
    style_entries, EntryMaps, SelectionView,
};
use crate::host::DocumentHost;
use tracing::{debug, info};

/// Compute the entries relevant to the current selection.
///
/// - Solid paints in the aggregate selection summary that are bound to a
///   variable contribute every variable of the alias chain, one entry per
///   concrete mode the page actually displays.
/// - Styles in the summary contribute their unbound solid paints.
/// - Each selected node contributes its own fills, strokes and effects,
///   extracted with the catalog's rules.
///
/// The result always replaces the previous view; nothing is merged.
pub fn resolve_selection<H: DocumentHost + ?Sized>(host: &H) -> SelectionView {
    let mut items = EntryMaps::default();

    if let Some(summary) = host.selection_colors() {
        let active_modes = host.explicit_variable_modes();

        for paint in summary.paints.iter().filter_map(|p| p.as_solid()) {
            let Some(alias) = paint.color_alias() else {
                continue;
            };
            for variable in resolve_aliases(host, &alias.id) {
                insert_group(
                    &mut items.variable_entries,
                    &variable.id,
                    active_variable_entries(variable, &active_modes),
                );
            }
        }

        for style in &summary.styles {
            insert_group(&mut items.style_entries, &style.id, style_entries(style));
        }
    } else {
        debug!("No selection color summary available");
    }

    for node in host.selection() {
        insert_group(&mut items.fill_entries, &node.id, fill_entries(node));
        insert_group(&mut items.stroke_entries, &node.id, stroke_entries(node));
        insert_group(&mut items.effect_entries, &node.id, effect_entries(node));
    }

    info!("Selection resolved to {} color(s)", items.len());
    SelectionView::new(items)
}
