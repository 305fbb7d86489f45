//! Harness: programmatic interaction with a headless App.
//!
//! The `Harness` wraps an [`App`](crate::app::App) and provides methods to
//! simulate user input (scrolling, clicks, typing, form interaction), move
//! virtual time, and inspect the resulting page state.

use crate::app::{App, AppConfig};
use crate::event::{Key, KeyEvent, Modifiers, UiEvent};
use crate::page::{ElementId, Page};

/// A headless app driver for testing.
///
/// The Harness owns an [`App`] and exposes a high-level API for feeding it
/// synthetic events and advancing its clock, so timed behavior (dismissals,
/// animations, transitions) can be asserted deterministically.
///
/// # Examples
///
/// ```ignore
/// use pageflow::testing::Harness;
///
/// let mut harness = Harness::new(page, config);
/// harness.scroll(520);
/// harness.advance_ms(3000);
/// ```
pub struct Harness {
    app: App,
}

impl Harness {
    /// Assemble an app over the given page and config.
    pub fn new(page: Page, config: AppConfig) -> Self {
        Self {
            app: App::new(page, config),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate the document scrolling to `top`.
    pub fn scroll(&mut self, top: i64) {
        self.app.handle_event(UiEvent::Scroll { top });
    }

    /// Simulate the visible window height changing.
    pub fn resize(&mut self, height: i64) {
        self.app.handle_event(UiEvent::Resize { height });
    }

    /// Simulate a click on `target`.
    pub fn click(&mut self, target: ElementId) {
        self.app.handle_event(UiEvent::Click { target });
    }

    /// Simulate a pointer press over `target` (or over nothing).
    pub fn pointer_down(&mut self, target: Option<ElementId>) {
        self.app.handle_event(UiEvent::PointerDown { target });
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.app.handle_event(UiEvent::Key(KeyEvent::plain(key)));
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app
            .handle_event(UiEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Set a field's value, as the host would after user typing.
    pub fn type_into(&mut self, field: ElementId, value: &str) {
        self.app.handle_event(UiEvent::Input {
            field,
            value: value.to_owned(),
        });
    }

    /// Simulate a field losing focus.
    pub fn blur(&mut self, field: ElementId) {
        self.app.handle_event(UiEvent::Blur { field });
    }

    /// Simulate a checkbox toggle.
    pub fn set_checked(&mut self, field: ElementId, checked: bool) {
        self.app.handle_event(UiEvent::Toggle { field, checked });
    }

    /// Simulate a form submission.
    pub fn submit(&mut self) {
        self.app.handle_event(UiEvent::Submit);
    }

    /// Open the modal directly with the given content id.
    pub fn open_modal(&mut self, content_id: &str) -> bool {
        self.app.open_modal(content_id)
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance virtual time, firing every timer that comes due.
    pub fn advance_ms(&mut self, ms: u64) {
        self.app.advance(ms);
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The wrapped app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable access to the wrapped app.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The app's page.
    pub fn page(&self) -> &Page {
        self.app.page()
    }

    /// An element's rendered text ("" for stale ids).
    pub fn text(&self, element: ElementId) -> &str {
        self.app.page().text(element)
    }

    /// Whether an element currently carries `class`.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.app.page().has_class(element, class)
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness").field("app", &self.app).finish()
    }
}
