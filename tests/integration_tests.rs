//! Integration tests for document color rotation.
//!
//! These tests drive the public API against JSON documents in
//! `tests/fixtures`, the same shape the CLI reads and writes. Colors are
//! compared channel-wise with a small tolerance since every rotation goes
//! through HSL.

use hue_rotate::model::{Effect, VariableValue};
use hue_rotate::preferences::{FilePreferences, MemoryPreferences};
use hue_rotate::session::{InboundMessage, OutboundMessage};
use hue_rotate::{
    resolve_aliases, rotate_document, validate_document, Adjustment, Catalog, ColorValue,
    Document, DocumentHost, MemoryHost, RotateError, Scope, Session,
};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

/// Fixture directory for integration tests
const FIXTURE_DIR: &str = "tests/fixtures";

const TOL: f64 = 1e-9;

const LIGHT: &str = "1:0";
const DARK: &str = "1:1";

fn load_fixture(name: &str) -> Document {
    Document::load(&Path::new(FIXTURE_DIR).join(name)).expect("fixture should load")
}

fn fill_color(document: &Document, id: &str) -> ColorValue {
    document
        .find_node(id)
        .and_then(|n| n.fill_paints())
        .and_then(|p| p[0].as_solid())
        .map(|s| s.color)
        .expect("solid fill")
}

fn stroke_color(document: &Document, id: &str) -> ColorValue {
    document
        .find_node(id)
        .and_then(|n| n.strokes.as_ref())
        .and_then(|p| p[0].as_solid())
        .map(|s| s.color)
        .expect("solid stroke")
}

fn variable_value(document: &Document, id: &str, mode: &str) -> VariableValue {
    document
        .find_variable(id)
        .and_then(|v| v.value_for_mode(mode))
        .cloned()
        .expect("variable mode")
}

fn variable_color(document: &Document, id: &str, mode: &str) -> ColorValue {
    *variable_value(document, id, mode)
        .as_color()
        .expect("concrete variable value")
}

fn assert_color(actual: ColorValue, r: f64, g: f64, b: f64) {
    assert!(
        actual.approx_eq_rgb(&ColorValue::rgb(r, g, b), TOL),
        "expected ({}, {}, {}), got {:?}",
        r,
        g,
        b,
        actual
    );
}

// ==================== Loading & Validation ====================

#[test]
fn test_brand_kit_is_valid() {
    let result = validate_document(&load_fixture("brand_kit.json"));
    assert!(result.passed);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_broken_references_only_warn() {
    let result = validate_document(&load_fixture("broken_refs.json"));
    assert!(result.passed);
    assert_eq!(
        result.warnings,
        vec![
            "Node 3:1: Stroke style S:gone not found",
            "Variable VariableID:2:2: Alias to missing variable VariableID:9:9",
            "Variable VariableID:2:1: Alias cycle (resolution stops at the repeat)",
        ]
    );
}

#[test]
fn test_duplicate_ids_fail_validation() {
    let result = validate_document(&load_fixture("duplicate_ids.json"));
    assert!(!result.passed);
    assert_eq!(result.errors, vec!["Node 4:1: Duplicate node id"]);
    assert_eq!(result.warnings, vec!["Selection: Node 4:9 not found on page"]);

    let err = rotate_document(
        load_fixture("duplicate_ids.json"),
        &Adjustment::new(10.0, 0.0, 0.0),
        Scope::All,
    )
    .unwrap_err();
    assert!(matches!(err, RotateError::InvalidDocument { .. }));
}

#[test]
fn test_stale_selection_id_is_skipped() {
    let mut document = load_fixture("brand_kit.json");
    document.current_page.selection.push("9:9".into());

    let result = validate_document(&document);
    assert!(result.passed);
    assert_eq!(result.warnings, vec!["Selection: Node 9:9 not found on page"]);

    let (rotated, report) = rotate_document(
        document.clone(),
        &Adjustment::new(120.0, 0.0, 0.0),
        Scope::All,
    )
    .unwrap();
    assert_eq!(report.written(), 8);
    assert_color(fill_color(&rotated, "1:1"), 0.0, 1.0, 0.0);

    let (_, report) =
        rotate_document(document, &Adjustment::new(120.0, 0.0, 0.0), Scope::Select).unwrap();
    assert_eq!(report.written(), 5);
}

#[test]
fn test_missing_and_empty_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Document::load(&missing),
        Err(RotateError::DocumentNotFound { .. })
    ));

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "  \n").unwrap();
    assert!(matches!(
        Document::load(&empty),
        Err(RotateError::EmptyDocument { .. })
    ));
}

// ==================== Catalog & Resolution ====================

#[test]
fn test_catalog_skips_bound_mixed_and_blur() {
    let host = MemoryHost::new(load_fixture("brand_kit.json"));
    let catalog = Catalog::build(&host);
    let entries = catalog.entries();

    assert_eq!(entries.len(), 8);
    assert_eq!(entries.variable_entries["VariableID:1:1"].len(), 2);
    // The alias mode has no color of its own
    assert_eq!(entries.variable_entries["VariableID:1:2"].len(), 1);
    let fill_owners: Vec<&String> = entries.fill_entries.keys().collect();
    assert_eq!(fill_owners, vec!["1:1", "1:4"]);
    assert_eq!(entries.effect_entries["1:2"].len(), 1);
    assert_eq!(entries.effect_entries["1:2"][0].id, "1:2-0");
}

#[test]
fn test_cyclic_aliases_terminate() {
    let host = MemoryHost::new(load_fixture("broken_refs.json"));
    let ids: Vec<&str> = resolve_aliases(&host, "VariableID:2:1")
        .iter()
        .map(|v| v.id.as_str())
        .collect();
    assert_eq!(ids, vec!["VariableID:2:1", "VariableID:2:2"]);
}

// ==================== Rotation Scenarios ====================

#[test]
fn test_rotate_all_by_120() {
    let (rotated, report) = rotate_document(
        load_fixture("brand_kit.json"),
        &Adjustment::new(120.0, 0.0, 0.0),
        Scope::All,
    )
    .unwrap();

    assert_eq!(report.written(), 8);
    assert_eq!(report.skipped, 0);

    assert_color(variable_color(&rotated, "VariableID:1:1", LIGHT), 0.0, 1.0, 0.0);
    assert_color(variable_color(&rotated, "VariableID:1:1", DARK), 0.0, 0.5, 0.0);
    assert_color(variable_color(&rotated, "VariableID:1:2", DARK), 0.5, 1.0, 0.5);
    assert!(variable_value(&rotated, "VariableID:1:2", LIGHT).is_alias());

    // Blue wraps past 360 back to red
    let style = rotated.find_style("S:accent").expect("style");
    let accent = style.paints[0].as_solid().expect("solid");
    assert_color(accent.color, 1.0, 0.0, 0.0);
    assert_eq!(accent.opacity, 0.8);

    assert_color(fill_color(&rotated, "1:1"), 0.0, 1.0, 0.0);
    assert_color(fill_color(&rotated, "1:4"), 1.0, 0.0, 0.0);
    assert_color(stroke_color(&rotated, "1:2"), 0.0, 0.0, 1.0);

    // Bound and mixed fills are untouched
    let badge = rotated.find_node("1:2").expect("badge");
    assert!(badge.fill_paints().and_then(|p| p[0].as_solid()).expect("solid").is_bound());
    assert!(rotated
        .find_node("1:3")
        .and_then(|n| n.fills.as_ref())
        .expect("fills")
        .is_mixed());

    let effects = badge.effects.as_ref().expect("effects");
    let shadow = effects[0].color().expect("shadow color");
    assert_color(shadow, 0.0, 1.0, 0.0);
    assert_eq!(shadow.a, Some(0.25));
    assert!(matches!(effects[1], Effect::LayerBlur(_)));
}

#[test]
fn test_desaturate_to_gray() {
    let (rotated, _) = rotate_document(
        load_fixture("brand_kit.json"),
        &Adjustment::new(0.0, -100.0, 0.0),
        Scope::All,
    )
    .unwrap();
    assert_color(fill_color(&rotated, "1:1"), 0.5, 0.5, 0.5);
    assert_color(stroke_color(&rotated, "1:2"), 0.5, 0.5, 0.5);
}

#[test]
fn test_rotate_selection_only() {
    let (rotated, report) = rotate_document(
        load_fixture("brand_kit.json"),
        &Adjustment::new(120.0, 0.0, 0.0),
        Scope::Select,
    )
    .unwrap();

    // Alias chain of the badge fill, its stroke and its shadow
    assert_eq!(report.variables, 3);
    assert_eq!(report.strokes, 1);
    assert_eq!(report.effects, 1);
    assert_eq!(report.written(), 5);

    assert_color(variable_color(&rotated, "VariableID:1:1", LIGHT), 0.0, 1.0, 0.0);
    assert_color(stroke_color(&rotated, "1:2"), 0.0, 0.0, 1.0);
    assert_color(fill_color(&rotated, "1:1"), 1.0, 0.0, 0.0);
    assert_color(fill_color(&rotated, "1:4"), 0.0, 0.0, 1.0);
}

#[test]
fn test_inactive_modes_survive() {
    let mut document = load_fixture("brand_kit.json");
    document
        .current_page
        .explicit_variable_modes
        .insert("VariableCollectionId:1:0".into(), DARK.into());

    let (rotated, report) =
        rotate_document(document, &Adjustment::new(120.0, 0.0, 0.0), Scope::All).unwrap();
    assert_eq!(report.variables, 2);
    assert_eq!(report.inactive_modes, 1);
    assert_color(variable_color(&rotated, "VariableID:1:1", LIGHT), 1.0, 0.0, 0.0);
    assert_color(variable_color(&rotated, "VariableID:1:1", DARK), 0.0, 0.5, 0.0);
}

#[test]
fn test_rotated_document_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rotated.json");
    let (rotated, _) = rotate_document(
        load_fixture("brand_kit.json"),
        &Adjustment::new(45.0, 10.0, -10.0),
        Scope::All,
    )
    .unwrap();

    rotated.save(&path).unwrap();
    assert_eq!(Document::load(&path).unwrap(), rotated);
}

// ==================== Session Flow ====================

#[test]
fn test_session_preview_then_cancel_restores_document() {
    let original = load_fixture("brand_kit.json");
    let mut host = MemoryHost::new(original.clone());
    host.select(&["1:2"]);
    let mut session = Session::start(host, MemoryPreferences::new());
    session.selection_changed();

    let outbox = session.drain_outbox();
    assert_eq!(outbox[0], OutboundMessage::InitValues { select: Scope::All });
    let OutboundMessage::SelectionChange { selection_items } = &outbox[1] else {
        panic!("expected selection-change, got {:?}", outbox[1]);
    };
    assert_eq!(selection_items.len(), 5);

    // The UI echoes the view back with its update
    let message = serde_json::json!({
        "type": "update",
        "hue": 90,
        "saturation": 0,
        "lightness": 0,
        "select": "select",
        "selectionItems": selection_items,
    });
    let update = serde_json::from_value::<InboundMessage>(message).unwrap();
    session.handle(update).unwrap();
    assert_ne!(session.host().document(), &original);

    session.handle(InboundMessage::Cancel).unwrap();
    assert!(session.host().is_closed());
    assert_eq!(session.into_host().into_document(), original);
}

#[test]
fn test_session_deselect_all_writes_nothing() {
    let mut host = MemoryHost::new(load_fixture("brand_kit.json"));
    host.select(&["1:2"]);
    let mut session = Session::start(host, MemoryPreferences::new());
    session.selection_changed();

    let mut items = session.selection_view().items.clone();
    items.set_all_selected(false);
    session
        .handle(InboundMessage::Update {
            hue: 90.0,
            saturation: 0.0,
            lightness: 0.0,
            select: Scope::Select,
            selection_items: items,
            reset: false,
        })
        .unwrap();

    assert_eq!(session.last_report().map(|r| r.written()), Some(0));
}

#[test]
fn test_selection_change_replaces_previous_view() {
    let mut session = Session::start(
        MemoryHost::new(load_fixture("brand_kit.json")),
        MemoryPreferences::new(),
    );
    session.drain_outbox();

    session.host_mut().select(&["1:2"]);
    session.selection_changed();
    session.host_mut().select(&["1:4"]);
    session.selection_changed();

    let outbox = session.drain_outbox();
    assert_eq!(outbox.len(), 2);
    let views: Vec<_> = outbox
        .iter()
        .map(|message| match message {
            OutboundMessage::SelectionChange { selection_items } => selection_items,
            other => panic!("expected selection-change, got {:?}", other),
        })
        .collect();

    assert_eq!(views[0].len(), 5);
    assert!(views[0].stroke_entries.contains_key("1:2"));

    // Nothing of the badge survives into the card's view
    let second = views[1];
    assert!(second.variable_entries.is_empty());
    assert!(second.stroke_entries.is_empty());
    assert!(second.effect_entries.is_empty());
    assert!(second.fill_entries.contains_key("1:4"));
    assert!(second.style_entries.contains_key("S:accent"));
    assert!(second.iter().all(|entry| entry.owner_id != "1:2"));
    assert_eq!(&session.selection_view().items, second);
}

#[test]
fn test_scope_preference_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let prefs_path = dir.path().join("prefs.json");

    let host = MemoryHost::new(load_fixture("brand_kit.json"));
    let mut first = Session::start(host, FilePreferences::new(&prefs_path));
    first
        .handle(InboundMessage::SaveValues {
            select: Scope::Select,
        })
        .unwrap();
    first.handle(InboundMessage::Apply).unwrap();

    let host = MemoryHost::new(load_fixture("brand_kit.json"));
    let mut second = Session::start(host, FilePreferences::new(&prefs_path));
    assert_eq!(
        second.drain_outbox(),
        vec![OutboundMessage::InitValues {
            select: Scope::Select
        }]
    );
}

#[test]
fn test_host_selection_summary_uses_styles() {
    let mut host = MemoryHost::new(load_fixture("brand_kit.json"));
    host.select(&["1:4"]);
    let summary = host.selection_colors().expect("summary");
    assert!(summary.paints.is_empty());
    assert_eq!(summary.styles.len(), 1);
    assert_eq!(summary.styles[0].id, "S:accent");
}
