//! Transient notifications: a single visible slot with timed auto-dismiss.
//!
//! At most one notification is visible at any instant. A new [`notify`]
//! replaces the current one immediately and restarts the dismissal timer
//! from zero — last write wins, with the previous timer explicitly
//! cancelled rather than orphaned.
//!
//! [`notify`]: Notifier::notify

use tracing::debug;

use crate::page::{ElementId, Page};
use crate::timer::{TimerId, Timers};

/// How long a notification stays visible unless replaced.
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Class toggled on the slot element while a notification is visible.
const SHOW_CLASS: &str = "show";

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// The presentation class applied to the slot element.
    pub fn as_class(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// The currently displayed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub message: String,
    pub severity: Severity,
}

/// Controller for the page's single notification slot.
#[derive(Debug)]
pub struct Notifier {
    slot: ElementId,
    active: Option<ActiveNotification>,
    dismiss_timer: Option<TimerId>,
    epoch: u64,
}

impl Notifier {
    /// Create a notifier bound to the given slot element.
    pub fn new(slot: ElementId) -> Self {
        Self {
            slot,
            active: None,
            dismiss_timer: None,
            epoch: 0,
        }
    }

    /// Display a notification with the default duration.
    pub fn notify(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.notify_for(page, timers, message, severity, DEFAULT_DURATION_MS);
    }

    /// Display a notification that auto-dismisses after `duration_ms`.
    ///
    /// Replaces any currently visible notification and restarts the
    /// dismissal timer from zero.
    pub fn notify_for(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        message: impl Into<String>,
        severity: Severity,
        duration_ms: u64,
    ) {
        let message = message.into();
        if let Some(timer) = self.dismiss_timer.take() {
            timers.cancel(timer);
        }
        self.epoch += 1;

        if let Some(el) = page.get_mut(self.slot) {
            for s in [Severity::Info, Severity::Success, Severity::Error] {
                el.remove_class(s.as_class());
            }
            el.add_class(severity.as_class());
            el.add_class(SHOW_CLASS);
            el.text = message.clone();
        }

        debug!(severity = severity.as_class(), "notification shown");
        self.active = Some(ActiveNotification { message, severity });
        self.dismiss_timer = Some(timers.schedule(
            duration_ms,
            crate::timer::TimerTask::DismissNotification { epoch: self.epoch },
        ));
    }

    /// Handle a dismissal timer firing. Stale epochs are ignored.
    pub fn on_dismiss(&mut self, page: &mut Page, epoch: u64) {
        if epoch != self.epoch {
            return;
        }
        page.remove_class(self.slot, SHOW_CLASS);
        self.active = None;
        self.dismiss_timer = None;
        debug!("notification dismissed");
    }

    /// The currently visible notification, if any.
    pub fn active(&self) -> Option<&ActiveNotification> {
        self.active.as_ref()
    }

    /// Whether a notification is currently visible.
    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    /// The slot element this notifier renders into.
    pub fn slot(&self) -> ElementId {
        self.slot
    }
}
