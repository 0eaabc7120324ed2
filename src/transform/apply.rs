//! Writing rotated colors back to their owners.

use crate::catalog::{mode_is_active, Catalog, ColorEntry, EntryMap, SelectionView};
use crate::color::rotate;
use crate::config::{Adjustment, Scope};
use crate::error::{Result, RotateError};
use crate::host::DocumentHost;
use crate::model::{Effect, Paint};
use tracing::{debug, info, warn};

/// Counts of one apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Variable modes written.
    pub variables: usize,
    /// Style paints written.
    pub styles: usize,
    /// Node fills written.
    pub fills: usize,
    /// Node strokes written.
    pub strokes: usize,
    /// Node effects written.
    pub effects: usize,
    /// Variable modes left alone because the page does not display them.
    pub inactive_modes: usize,
    /// Entries whose owner could not be updated.
    pub skipped: usize,
}

impl ApplyReport {
    /// Total number of color slots written.
    pub fn written(&self) -> usize {
        self.variables + self.styles + self.fills + self.strokes + self.effects
    }
}

/// Paint list owners sharing the whole-list write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaintTarget {
    Style,
    Fill,
    Stroke,
}

impl PaintTarget {
    fn read<H: DocumentHost + ?Sized>(self, host: &H, owner: &str) -> Result<Vec<Paint>> {
        match self {
            PaintTarget::Style => host
                .paint_style_by_id(owner)
                .map(|style| style.paints.clone())
                .ok_or_else(|| RotateError::StyleNotFound {
                    id: owner.to_string(),
                }),
            PaintTarget::Fill => {
                let node = node(host, owner)?;
                let fills = node.fills.as_ref().ok_or_else(|| RotateError::MissingProperty {
                    id: owner.to_string(),
                    property: "fills",
                })?;
                fills
                    .paints()
                    .map(<[Paint]>::to_vec)
                    .ok_or_else(|| RotateError::MixedProperty {
                        id: owner.to_string(),
                        property: "fills",
                    })
            }
            PaintTarget::Stroke => node(host, owner)?
                .strokes
                .clone()
                .ok_or_else(|| RotateError::MissingProperty {
                    id: owner.to_string(),
                    property: "strokes",
                }),
        }
    }

    fn write<H: DocumentHost + ?Sized>(
        self,
        host: &mut H,
        owner: &str,
        paints: Vec<Paint>,
    ) -> Result<()> {
        match self {
            PaintTarget::Style => host.set_style_paints(owner, paints),
            PaintTarget::Fill => host.set_fills(owner, paints),
            PaintTarget::Stroke => host.set_strokes(owner, paints),
        }
    }
}

fn record_skip(entry: &ColorEntry, err: &RotateError, skipped: &mut usize) {
    if err.is_skippable() {
        debug!("Skipping {} [{}]: {}", entry.id, entry.index, err);
    } else {
        warn!("Failed to write {} [{}]: {}", entry.id, entry.index, err);
    }
    *skipped += 1;
}

fn node<'a, H: DocumentHost + ?Sized>(host: &'a H, id: &str) -> Result<&'a crate::model::Node> {
    host.node_by_id(id)
        .ok_or_else(|| RotateError::NodeNotFound { id: id.to_string() })
}

/// Copy `list`, replacing the item at `index`.
///
/// Owners only guarantee consistency on whole-list writes, so a single slot
/// is changed by rebuilding the full list.
pub fn replace_slot<T: Clone>(list: &[T], index: usize, item: T, owner: &str) -> Result<Vec<T>> {
    if index >= list.len() {
        return Err(RotateError::IndexOutOfRange {
            owner: owner.to_string(),
            index,
            len: list.len(),
        });
    }
    let mut copy = list.to_vec();
    copy[index] = item;
    Ok(copy)
}

/// Rotate every in-scope entry from its base color and write it back.
///
/// With `Scope::Select` only catalog entries ticked in `view` take part.
/// Each write starts from the entry's base color, so repeating a call with
/// the same adjustment always lands on the same colors, and a zero
/// adjustment restores them.
pub fn apply_transform<H: DocumentHost + ?Sized>(
    host: &mut H,
    catalog: &Catalog,
    adjustment: &Adjustment,
    scope: Scope,
    view: &SelectionView,
) -> ApplyReport {
    let working_set = catalog.scoped(scope, view);
    let mut report = ApplyReport::default();

    apply_variables(host, &working_set.variable_entries, adjustment, &mut report);
    report.styles = apply_paints(
        host,
        PaintTarget::Style,
        &working_set.style_entries,
        adjustment,
        &mut report.skipped,
    );
    report.fills = apply_paints(
        host,
        PaintTarget::Fill,
        &working_set.fill_entries,
        adjustment,
        &mut report.skipped,
    );
    report.strokes = apply_paints(
        host,
        PaintTarget::Stroke,
        &working_set.stroke_entries,
        adjustment,
        &mut report.skipped,
    );
    report.effects = apply_effects(host, &working_set.effect_entries, adjustment, &mut report.skipped);

    info!(
        "Applied {} ({} scope): {} written, {} skipped",
        adjustment,
        scope,
        report.written(),
        report.skipped
    );
    report
}

fn apply_variables<H: DocumentHost + ?Sized>(
    host: &mut H,
    entries: &EntryMap,
    adjustment: &Adjustment,
    report: &mut ApplyReport,
) {
    // Modes can be switched between resolving and applying, so check again
    let active_modes = host.explicit_variable_modes();

    for (variable_id, group) in entries {
        if host.variable_by_id(variable_id).is_none() {
            debug!("Variable {} no longer exists", variable_id);
            report.skipped += group.len();
            continue;
        }

        for entry in group {
            let Some(mode) = entry.mode() else {
                continue;
            };
            if !mode_is_active(mode, &active_modes) {
                report.inactive_modes += 1;
                continue;
            }

            let base = entry.base_color();
            let rotated = rotate(&base, adjustment).with_alpha(base.alpha());
            match host.set_variable_value_for_mode(variable_id, mode, rotated) {
                Ok(()) => report.variables += 1,
                Err(err) => record_skip(entry, &err, &mut report.skipped),
            }
        }
    }
}

fn apply_paints<H: DocumentHost + ?Sized>(
    host: &mut H,
    target: PaintTarget,
    entries: &EntryMap,
    adjustment: &Adjustment,
    skipped: &mut usize,
) -> usize {
    let mut written = 0;
    for entry in entries.values().flatten() {
        match apply_paint_entry(host, target, entry, adjustment) {
            Ok(()) => written += 1,
            Err(err) => record_skip(entry, &err, skipped),
        }
    }
    written
}

fn apply_paint_entry<H: DocumentHost + ?Sized>(
    host: &mut H,
    target: PaintTarget,
    entry: &ColorEntry,
    adjustment: &Adjustment,
) -> Result<()> {
    let base_paint = entry.base_paint().ok_or_else(|| RotateError::NotRotatable {
        owner: entry.owner_id.clone(),
        index: entry.index,
    })?;

    let current = target.read(host, &entry.owner_id)?;
    let rotated = rotate(&entry.base_color(), adjustment);
    let paint = Paint::Solid(base_paint.with_color(rotated));
    let paints = replace_slot(&current, entry.index, paint, &entry.owner_id)?;
    target.write(host, &entry.owner_id, paints)
}

fn apply_effects<H: DocumentHost + ?Sized>(
    host: &mut H,
    entries: &EntryMap,
    adjustment: &Adjustment,
    skipped: &mut usize,
) -> usize {
    let mut written = 0;
    for entry in entries.values().flatten() {
        match apply_effect_entry(host, entry, adjustment) {
            Ok(()) => written += 1,
            Err(err) => record_skip(entry, &err, skipped),
        }
    }
    written
}

fn apply_effect_entry<H: DocumentHost + ?Sized>(
    host: &mut H,
    entry: &ColorEntry,
    adjustment: &Adjustment,
) -> Result<()> {
    let owner = &entry.owner_id;
    let current: Vec<Effect> = node(host, owner)?
        .effects
        .clone()
        .ok_or_else(|| RotateError::MissingProperty {
            id: owner.clone(),
            property: "effects",
        })?;

    let slot = current.get(entry.index).ok_or_else(|| RotateError::IndexOutOfRange {
        owner: owner.clone(),
        index: entry.index,
        len: current.len(),
    })?;
    // Only shadows and noise are rewritten; anything else in the slot now
    // passes through untouched
    if !slot.is_color_bearing() {
        return Err(RotateError::NotRotatable {
            owner: owner.clone(),
            index: entry.index,
        });
    }

    let base = entry.base_color();
    let rotated = rotate(&base, adjustment).with_alpha(base.alpha());
    let effects = replace_slot(&current, entry.index, slot.with_color(rotated), owner)?;
    host.set_effects(owner, effects)
}
