//! hue-rotate - CLI tool to rotate the colors of a design document.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use hue_rotate::{
    validate_document, Adjustment, Document, FilePreferences, InboundMessage, MemoryHost, Scope,
    Session,
};

/// Default preference file name, stored next to the input document.
const PREFS_FILE_NAME: &str = "hue-rotate-prefs.json";

/// Rotate hue, saturation and lightness of every color in a document.
#[derive(Parser, Debug)]
#[command(name = "hue-rotate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output document path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hue delta in degrees (-180 to 180)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    hue: f64,

    /// Saturation delta in percentage points (-100 to 100)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    saturation: f64,

    /// Lightness delta in percentage points (-100 to 100)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lightness: f64,

    /// Which colors to rotate: "all" or "select" (defaults to the stored preference)
    #[arg(long, value_parser = parse_scope)]
    scope: Option<Scope>,

    /// Preference file path
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Print the catalog (or selection view) as JSON and exit
    #[arg(long)]
    list: bool,

    /// Validate only, don't rotate
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_scope(value: &str) -> std::result::Result<Scope, String> {
    Scope::from_preference_str(value)
        .ok_or_else(|| format!("unknown scope '{}', expected 'all' or 'select'", value))
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{}.rotated.json", stem))
}

fn drain_outbox(session: &mut Session<MemoryHost, FilePreferences>) -> Result<()> {
    for message in session.drain_outbox() {
        debug!("-> {}", serde_json::to_string(&message)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Clamp deltas to the slider ranges
    let requested = Adjustment::new(args.hue, args.saturation, args.lightness);
    let adjustment = requested.clamped_to_ranges();
    if !requested.is_within_ranges() {
        warn!("Adjustment {} is outside the slider ranges, using {}", requested, adjustment);
    }

    info!("Processing: {}", args.input.display());

    let document = Document::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    // Validate
    let validation = validate_document(&document);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let prefs_path = args
        .prefs
        .clone()
        .unwrap_or_else(|| args.input.with_file_name(PREFS_FILE_NAME));
    let mut session = Session::start(MemoryHost::new(document), FilePreferences::new(&prefs_path));

    let scope = match args.scope {
        Some(scope) if scope != session.scope() => {
            session
                .handle(InboundMessage::SaveValues { select: scope })
                .with_context(|| format!("Failed to store preferences in {}", prefs_path.display()))?;
            scope
        }
        Some(scope) => scope,
        None => session.scope(),
    };
    info!("Scope: {}", scope);

    if scope == Scope::Select {
        session.selection_changed();
    }
    drain_outbox(&mut session)?;

    // Listing mode
    if args.list {
        let entries = match scope {
            Scope::All => session.catalog().entries(),
            Scope::Select => &session.selection_view().items,
        };
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    session.handle(InboundMessage::Update {
        hue: adjustment.hue,
        saturation: adjustment.saturation,
        lightness: adjustment.lightness,
        select: scope,
        selection_items: session.selection_view().items.clone(),
        reset: false,
    })?;

    if let Some(report) = session.last_report() {
        info!(
            "Rotated {} color(s): {} variable mode(s), {} style paint(s), {} fill(s), {} stroke(s), {} effect(s)",
            report.written(),
            report.variables,
            report.styles,
            report.fills,
            report.strokes,
            report.effects
        );
        if report.skipped > 0 {
            warn!("Skipped {} color slot(s) that could not be written", report.skipped);
        }
    }

    session.handle(InboundMessage::Apply)?;

    // Write output
    let output_path = args.output.unwrap_or_else(|| default_output(&args.input));
    session
        .into_host()
        .into_document()
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", output_path.display());

    Ok(())
}
