//! Shared modal overlay: a single dialog fed from a keyed content source.
//!
//! The modal walks `Closed -> Opening -> Open -> Closing -> Closed`. Opening
//! and Closing both resolve after [`TRANSITION_MS`]; while Closing, the
//! overlay is already hidden but the injected content survives until the
//! transition timer fires, so the closing animation never flashes empty.
//! Re-entrant opens while Open replace content in place, and an epoch counter
//! keeps a stale close-transition from clobbering a dialog that was reopened
//! mid-close.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::page::{ElementId, Page};
use crate::timer::{TimerId, TimerTask, Timers};

/// Duration of the open/close visual transition.
pub const TRANSITION_MS: u64 = 300;

const ACTIVE_CLASS: &str = "active";

// ---------------------------------------------------------------------------
// Content source
// ---------------------------------------------------------------------------

/// A content record injected into the modal body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    pub category: String,
    pub attribution: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Read-only keyed lookup of modal content. The catalog's population is the
/// host's concern; the modal only reads.
pub trait ContentSource {
    /// Look up a record by identifier.
    fn get(&self, id: &str) -> Option<&ContentRecord>;
}

/// In-memory [`ContentSource`] backed by a map, loadable from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ContentCatalog {
    records: HashMap<String, ContentRecord>,
}

impl ContentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under the given identifier.
    pub fn insert(&mut self, id: impl Into<String>, record: ContentRecord) {
        self.records.insert(id.into(), record);
    }

    /// Parse a catalog from a JSON object keyed by content identifier.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ContentSource for ContentCatalog {
    fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.records.get(id)
    }
}

/// Render a record to the plain-text body representation.
fn format_content(record: &ContentRecord) -> String {
    let mut out = format!(
        "{}\n{}\n{} — {}\n\n{}",
        record.title, record.category, record.attribution, record.date, record.description
    );
    if !record.tags.is_empty() {
        out.push_str("\n\n");
        out.push_str(&record.tags.join(", "));
    }
    out
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// Lifecycle state of the modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Controller for the page's single modal overlay.
#[derive(Debug)]
pub struct Modal {
    /// The backdrop element; clicking it (outside the body) closes the modal.
    overlay: ElementId,
    /// The content slot inside the overlay.
    body: ElementId,
    state: ModalState,
    content: Option<ContentRecord>,
    transition_timer: Option<TimerId>,
    epoch: u64,
}

impl Modal {
    /// Create a closed modal bound to its overlay and body elements.
    pub fn new(overlay: ElementId, body: ElementId) -> Self {
        Self {
            overlay,
            body,
            state: ModalState::Closed,
            content: None,
            transition_timer: None,
            epoch: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Whether the modal is visible (opening or fully open).
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Opening | ModalState::Open)
    }

    /// The currently injected content, if any.
    pub fn content(&self) -> Option<&ContentRecord> {
        self.content.as_ref()
    }

    /// The overlay element, for pointer-target comparison.
    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    /// Open the modal with content looked up from `source`.
    ///
    /// A lookup miss leaves the modal untouched and logs a warning. An open
    /// while already visible replaces the content without passing through
    /// Closed. Returns whether content was injected.
    pub fn open(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        source: &dyn ContentSource,
        content_id: &str,
    ) -> bool {
        let Some(record) = source.get(content_id) else {
            warn!(content_id, "modal content not found");
            return false;
        };
        let record = record.clone();

        self.bump_epoch(timers);
        page.set_text(self.body, format_content(&record));
        page.add_class(self.overlay, ACTIVE_CLASS);
        self.content = Some(record);

        if self.state != ModalState::Open {
            self.state = ModalState::Opening;
            self.schedule_transition(timers);
        }
        debug!(content_id, "modal opened");
        true
    }

    /// Close the modal. The overlay hides immediately; content is cleared
    /// once the transition elapses. No-op unless the modal is visible.
    pub fn close(&mut self, page: &mut Page, timers: &mut Timers) {
        if !self.is_open() {
            return;
        }
        self.bump_epoch(timers);
        page.remove_class(self.overlay, ACTIVE_CLASS);
        self.state = ModalState::Closing;
        self.schedule_transition(timers);
        debug!("modal closing");
    }

    /// Handle a transition timer firing. Stale epochs are ignored.
    pub fn on_transition(&mut self, page: &mut Page, epoch: u64) {
        if epoch != self.epoch {
            return;
        }
        self.transition_timer = None;
        match self.state {
            ModalState::Opening => self.state = ModalState::Open,
            ModalState::Closing => {
                self.content = None;
                page.set_text(self.body, "");
                self.state = ModalState::Closed;
            }
            ModalState::Open | ModalState::Closed => {}
        }
    }

    fn bump_epoch(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.transition_timer.take() {
            timers.cancel(timer);
        }
        self.epoch += 1;
    }

    fn schedule_transition(&mut self, timers: &mut Timers) {
        self.transition_timer = Some(timers.schedule(
            TRANSITION_MS,
            TimerTask::ModalTransition { epoch: self.epoch },
        ));
    }
}
