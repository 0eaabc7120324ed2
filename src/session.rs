//! Plugin session - the message loop between the UI and the engine.
//!
//! The UI never talks to the document. It posts [`InboundMessage`]s, the
//! session runs the resolver or the applicator against the host, and
//! answers with [`OutboundMessage`]s collected in an outbox. Messages are
//! handled one at a time, to completion.

use crate::catalog::{Catalog, EntryMaps, SelectionView};
use crate::config::{Adjustment, Scope};
use crate::error::Result;
use crate::host::DocumentHost;
use crate::preferences::{load_scope, store_scope, PreferenceStore};
use crate::resolve::resolve_selection;
use crate::transform::{apply_transform, ApplyReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Messages posted by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Slider or checkbox change: re-render the preview.
    #[serde(rename_all = "camelCase")]
    Update {
        #[serde(default)]
        hue: f64,
        #[serde(default)]
        saturation: f64,
        #[serde(default)]
        lightness: f64,
        #[serde(default)]
        select: Scope,
        #[serde(default)]
        selection_items: EntryMaps,
        /// Force every delta to zero.
        #[serde(default)]
        reset: bool,
    },
    /// Scope toggle confirmed.
    SaveValues { select: Scope },
    /// Discard every preview change and close.
    Cancel,
    /// Keep the current preview and close.
    Apply,
}

impl InboundMessage {
    /// Parse a message from its JSON form.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    fn type_name(&self) -> &'static str {
        match self {
            InboundMessage::Update { .. } => "update",
            InboundMessage::SaveValues { .. } => "save-values",
            InboundMessage::Cancel => "cancel",
            InboundMessage::Apply => "apply",
        }
    }
}

/// Messages sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// Initial control values, sent once on start.
    InitValues { select: Scope },
    /// Full snapshot of the current selection view.
    #[serde(rename_all = "camelCase")]
    SelectionChange { selection_items: EntryMaps },
}

/// One plugin run over a host document.
pub struct Session<H: DocumentHost, P: PreferenceStore> {
    host: H,
    prefs: P,
    catalog: Catalog,
    view: SelectionView,
    scope: Scope,
    outbox: Vec<OutboundMessage>,
    last_report: Option<ApplyReport>,
    closed: bool,
}

impl<H: DocumentHost, P: PreferenceStore> Session<H, P> {
    /// Start a session: read the scope preference, announce it and
    /// catalog the document.
    ///
    /// An unreadable preference store is logged and treated as unset.
    pub fn start(host: H, prefs: P) -> Self {
        let scope = load_scope(&prefs).unwrap_or_else(|e| {
            warn!("Could not read preferences: {}", e);
            Scope::All
        });
        let catalog = Catalog::build(&host);

        Self {
            host,
            prefs,
            catalog,
            view: SelectionView::default(),
            scope,
            outbox: vec![OutboundMessage::InitValues { select: scope }],
            last_report: None,
            closed: false,
        }
    }

    /// Re-resolve the host selection and send the new view to the UI.
    pub fn selection_changed(&mut self) {
        if self.closed {
            warn!("Ignoring selection change: session is closed");
            return;
        }
        self.view = resolve_selection(&self.host);
        self.outbox.push(OutboundMessage::SelectionChange {
            selection_items: self.view.items.clone(),
        });
    }

    /// Handle one UI message to completion.
    pub fn handle(&mut self, message: InboundMessage) -> Result<()> {
        if self.closed {
            warn!("Ignoring '{}' message: session is closed", message.type_name());
            return Ok(());
        }
        debug!("Handling '{}' message", message.type_name());

        match message {
            InboundMessage::Update {
                hue,
                saturation,
                lightness,
                select,
                selection_items,
                reset,
            } => {
                let adjustment = if reset {
                    Adjustment::reset()
                } else {
                    Adjustment::new(hue, saturation, lightness)
                };
                self.scope = select;
                let view = SelectionView::new(selection_items);
                let report =
                    apply_transform(&mut self.host, &self.catalog, &adjustment, select, &view);
                self.last_report = Some(report);
            }
            InboundMessage::SaveValues { select } => {
                store_scope(&mut self.prefs, select)?;
                self.scope = select;
                self.selection_changed();
            }
            InboundMessage::Cancel => {
                info!("Cancelled, reverting preview changes");
                self.close();
                self.host.trigger_undo();
            }
            InboundMessage::Apply => {
                info!("Applied, keeping preview changes");
                self.close();
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.host.close_plugin();
        self.closed = true;
    }

    /// Take every message queued for the UI.
    pub fn drain_outbox(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to change its selection.
    ///
    /// Call [`Session::selection_changed`] afterwards so the UI sees the
    /// new view.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// End the session and hand back the host.
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Last resolved selection view.
    pub fn selection_view(&self) -> &SelectionView {
        &self.view
    }

    /// Scope of the last update or confirmed toggle.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Report of the most recent update.
    pub fn last_report(&self) -> Option<ApplyReport> {
        self.last_report
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
