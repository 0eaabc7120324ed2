//! Catalog of every color-bearing entry in a document.
//!
//! The [`Catalog`] is built once when the plugin starts and read by every
//! selection and apply pass afterwards. A [`SelectionView`] has the same
//! shape but only covers the current selection and is rebuilt from scratch
//! on every selection change.

mod entry;
mod extract;

pub use entry::{ColorEntry, EntryKind};
pub use extract::{
    active_variable_entries, effect_entries, fill_entries, mode_is_active, stroke_entries,
    style_entries, variable_entries,
};

use crate::config::Scope;
use crate::host::DocumentHost;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::info;

/// Entries grouped by owner id.
pub type EntryMap = BTreeMap<String, Vec<ColorEntry>>;

/// The five owner-keyed entry mappings.
///
/// Keys are variable ids, style ids or node ids; effect entries are keyed
/// by node id while their entry ids carry the effect index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMaps {
    #[serde(default)]
    pub variable_entries: EntryMap,
    #[serde(default)]
    pub style_entries: EntryMap,
    #[serde(default)]
    pub fill_entries: EntryMap,
    #[serde(default)]
    pub stroke_entries: EntryMap,
    #[serde(default)]
    pub effect_entries: EntryMap,
}

/// Insert a group of entries unless it is empty.
pub(crate) fn insert_group(map: &mut EntryMap, key: &str, entries: Vec<ColorEntry>) {
    if !entries.is_empty() {
        map.insert(key.to_string(), entries);
    }
}

/// Keep the catalog groups whose key is in the view, and within each group
/// the entries whose id is ticked in the view.
fn narrow(catalog: &EntryMap, view: &EntryMap) -> EntryMap {
    catalog
        .iter()
        .filter_map(|(key, entries)| {
            let view_entries = view.get(key)?;
            let kept = entries
                .iter()
                .filter(|e| view_entries.iter().any(|v| v.id == e.id && v.selected))
                .cloned()
                .collect();
            Some((key.clone(), kept))
        })
        .collect()
}

impl EntryMaps {
    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.maps().iter().map(|m| m.values().map(Vec::len).sum::<usize>()).sum()
    }

    /// Check if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn maps(&self) -> [&EntryMap; 5] {
        [
            &self.variable_entries,
            &self.style_entries,
            &self.fill_entries,
            &self.stroke_entries,
            &self.effect_entries,
        ]
    }

    /// All entries: variables, styles, fills, strokes, then effects.
    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.maps()
            .into_iter()
            .flat_map(|map| map.values())
            .flatten()
    }

    /// Tick or untick every entry.
    pub fn set_all_selected(&mut self, selected: bool) {
        for map in [
            &mut self.variable_entries,
            &mut self.style_entries,
            &mut self.fill_entries,
            &mut self.stroke_entries,
            &mut self.effect_entries,
        ] {
            map.values_mut()
                .flatten()
                .for_each(|entry| entry.selected = selected);
        }
    }

    /// Restrict these entries to the ones ticked in `view`.
    ///
    /// Groups absent from the view are dropped entirely.
    pub fn narrowed_to(&self, view: &EntryMaps) -> EntryMaps {
        EntryMaps {
            variable_entries: narrow(&self.variable_entries, &view.variable_entries),
            style_entries: narrow(&self.style_entries, &view.style_entries),
            fill_entries: narrow(&self.fill_entries, &view.fill_entries),
            stroke_entries: narrow(&self.stroke_entries, &view.stroke_entries),
            effect_entries: narrow(&self.effect_entries, &view.effect_entries),
        }
    }
}

/// Entries relevant to the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionView {
    pub items: EntryMaps,
}

impl SelectionView {
    /// Wrap resolved entries.
    pub fn new(items: EntryMaps) -> Self {
        Self { items }
    }
}

/// Persistent catalog of the document's color entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: EntryMaps,
}

impl Catalog {
    /// Walk the document once and catalog every rotatable color.
    ///
    /// Colors bound to variables are left out; they are only reached
    /// through alias resolution.
    pub fn build<H: DocumentHost + ?Sized>(host: &H) -> Self {
        let mut entries = EntryMaps::default();

        for variable in host.local_color_variables() {
            insert_group(
                &mut entries.variable_entries,
                &variable.id,
                variable_entries(variable),
            );
        }

        for style in host.local_paint_styles() {
            insert_group(&mut entries.style_entries, &style.id, style_entries(style));
        }

        for node in host.page_nodes() {
            insert_group(&mut entries.fill_entries, &node.id, fill_entries(node));
            insert_group(&mut entries.stroke_entries, &node.id, stroke_entries(node));
            insert_group(&mut entries.effect_entries, &node.id, effect_entries(node));
        }

        info!(
            "Catalogued {} color(s): {} variable(s), {} style(s), {} fill owner(s), {} stroke owner(s), {} effect owner(s)",
            entries.len(),
            entries.variable_entries.len(),
            entries.style_entries.len(),
            entries.fill_entries.len(),
            entries.stroke_entries.len(),
            entries.effect_entries.len()
        );

        Self { entries }
    }

    /// All catalogued entries.
    pub fn entries(&self) -> &EntryMaps {
        &self.entries
    }

    /// Working set for a rotation pass.
    ///
    /// `Scope::All` borrows the whole catalog; `Scope::Select` returns a
    /// copy narrowed to the entries ticked in `view`.
    pub fn scoped(&self, scope: Scope, view: &SelectionView) -> Cow<'_, EntryMaps> {
        match scope {
            Scope::All => Cow::Borrowed(&self.entries),
            Scope::Select => Cow::Owned(self.entries.narrowed_to(&view.items)),
        }
    }
}
