//! Application context: owns the page, the timer wheel, and every controller,
//! and routes events between them.
//!
//! Hosts describe the page's interactive surface with [`AppConfig`], then
//! feed [`UiEvent`]s through [`App::handle_event`] and move time with
//! [`App::advance`]. Nothing here blocks; the optional [`App::run`] loop
//! pumps a tokio channel for hosts that want an async driver.

use std::collections::HashMap;

use slotmap::SecondaryMap;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::counter::CounterBank;
use crate::event::{Key, Modifiers, UiEvent};
use crate::form::FormController;
use crate::geometry::Viewport;
use crate::modal::{ContentCatalog, ContentSource, Modal};
use crate::notify::Notifier;
use crate::page::{ElementId, Page};
use crate::rotator::Rotator;
use crate::scrollspy::{ActivationThreshold, ScrollSpy, SectionLink};
use crate::theme::{PreferenceStore, ThemeController};
use crate::timer::{TimerTask, Timers};
use crate::viewport::ViewportObserver;

/// Visible fraction at which scroll-reveal elements get the `revealed` class.
const REVEAL_THRESHOLD: f64 = 0.1;

/// Visible fraction at which counter animations trigger (one-shot).
const COUNTER_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Declarative description of the page's interactive surface.
///
/// Every part is optional; an empty config yields an app that routes events
/// into nothing.
pub struct AppConfig {
    viewport_height: i64,
    notification_slot: Option<ElementId>,
    sections: Vec<SectionLink>,
    threshold: Option<ActivationThreshold>,
    header: Option<ElementId>,
    back_to_top: Option<ElementId>,
    theme: Option<(ElementId, Box<dyn PreferenceStore>, bool)>,
    theme_toggles: Vec<ElementId>,
    modal: Option<(ElementId, ElementId)>,
    modal_triggers: Vec<(ElementId, String)>,
    modal_close: Vec<ElementId>,
    content: Box<dyn ContentSource>,
    form: Option<FormController>,
    rotator: Option<(Vec<ElementId>, Vec<ElementId>)>,
    rotator_next: Option<ElementId>,
    rotator_prev: Option<ElementId>,
    counters: Vec<(ElementId, u64)>,
    reveals: Vec<ElementId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            viewport_height: 800,
            notification_slot: None,
            sections: Vec::new(),
            threshold: None,
            header: None,
            back_to_top: None,
            theme: None,
            theme_toggles: Vec::new(),
            modal: None,
            modal_triggers: Vec::new(),
            modal_close: Vec::new(),
            content: Box::new(ContentCatalog::new()),
            form: None,
            rotator: None,
            rotator_next: None,
            rotator_prev: None,
            counters: Vec::new(),
            reveals: Vec::new(),
        }
    }

    /// Initial visible window height (builder).
    pub fn viewport_height(mut self, height: i64) -> Self {
        self.viewport_height = height;
        self
    }

    /// Element that renders transient notifications (builder).
    pub fn notification_slot(mut self, slot: ElementId) -> Self {
        self.notification_slot = Some(slot);
        self
    }

    /// Sections tracked by the scroll spy, in document order (builder).
    pub fn sections(mut self, sections: Vec<SectionLink>) -> Self {
        self.sections = sections;
        self
    }

    /// Activation threshold for the scroll spy (builder). Defaults to the
    /// spy's own default when unset.
    pub fn threshold(mut self, threshold: ActivationThreshold) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Header element that compacts on scroll (builder).
    pub fn header(mut self, header: ElementId) -> Self {
        self.header = Some(header);
        self
    }

    /// Back-to-top control (builder).
    pub fn back_to_top(mut self, control: ElementId) -> Self {
        self.back_to_top = Some(control);
        self
    }

    /// Themed root element, preference store, and system fallback (builder).
    pub fn theme(
        mut self,
        root: ElementId,
        store: Box<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> Self {
        self.theme = Some((root, store, system_prefers_dark));
        self
    }

    /// A control that toggles the theme when clicked (builder).
    pub fn theme_toggle(mut self, control: ElementId) -> Self {
        self.theme_toggles.push(control);
        self
    }

    /// Modal overlay and body elements (builder).
    pub fn modal(mut self, overlay: ElementId, body: ElementId) -> Self {
        self.modal = Some((overlay, body));
        self
    }

    /// Keyed content source backing the modal (builder).
    pub fn content(mut self, source: Box<dyn ContentSource>) -> Self {
        self.content = source;
        self
    }

    /// A control that opens the modal with the given content id (builder).
    pub fn modal_trigger(mut self, control: ElementId, content_id: impl Into<String>) -> Self {
        self.modal_triggers.push((control, content_id.into()));
        self
    }

    /// A control that closes the modal (builder).
    pub fn modal_close(mut self, control: ElementId) -> Self {
        self.modal_close.push(control);
        self
    }

    /// The validated form (builder).
    pub fn form(mut self, form: FormController) -> Self {
        self.form = Some(form);
        self
    }

    /// Rotating items and their dots; auto-advance starts immediately
    /// (builder).
    pub fn rotator(mut self, items: Vec<ElementId>, dots: Vec<ElementId>) -> Self {
        self.rotator = Some((items, dots));
        self
    }

    /// Controls that step the rotator forward / back (builder).
    pub fn rotator_controls(mut self, prev: ElementId, next: ElementId) -> Self {
        self.rotator_prev = Some(prev);
        self.rotator_next = Some(next);
        self
    }

    /// A stat element that counts up to `target` when half visible (builder).
    pub fn counter(mut self, element: ElementId, target: u64) -> Self {
        self.counters.push((element, target));
        self
    }

    /// An element revealed when it scrolls into view (builder).
    pub fn reveal(mut self, element: ElementId) -> Self {
        self.reveals.push(element);
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The assembled application: page, timers, controllers, and event routing.
pub struct App {
    page: Page,
    timers: Timers,
    viewport: Viewport,
    observer: ViewportObserver,
    counters: CounterBank,
    counter_targets: SecondaryMap<ElementId, u64>,
    notifier: Option<Notifier>,
    spy: Option<ScrollSpy>,
    modal: Option<Modal>,
    form: Option<FormController>,
    theme: Option<ThemeController>,
    rotator: Option<Rotator>,
    content: Box<dyn ContentSource>,
    nav_targets: HashMap<ElementId, ElementId>,
    modal_triggers: HashMap<ElementId, String>,
    modal_close: Vec<ElementId>,
    theme_toggles: Vec<ElementId>,
    rotator_next: Option<ElementId>,
    rotator_prev: Option<ElementId>,
    dot_indices: HashMap<ElementId, usize>,
}

impl App {
    /// Assemble the app over a prepared page, run the initial scroll and
    /// visibility pass, and start any auto-advance intervals.
    pub fn new(mut page: Page, config: AppConfig) -> Self {
        let mut timers = Timers::new();

        let notifier = config.notification_slot.map(Notifier::new);

        let mut nav_targets = HashMap::new();
        for link in &config.sections {
            if let Some(nav) = link.nav_link {
                nav_targets.insert(nav, link.section);
            }
        }
        let spy = if config.sections.is_empty()
            && config.header.is_none()
            && config.back_to_top.is_none()
        {
            None
        } else {
            let mut spy = ScrollSpy::new(config.sections);
            if let Some(threshold) = config.threshold {
                spy = spy.with_threshold(threshold);
            }
            if let Some(header) = config.header {
                spy = spy.with_header(header);
            }
            if let Some(control) = config.back_to_top {
                spy = spy.with_back_to_top(control);
            }
            Some(spy)
        };

        let theme = config
            .theme
            .map(|(root, store, dark)| ThemeController::new(&mut page, root, store, dark));

        let modal = config.modal.map(|(overlay, body)| Modal::new(overlay, body));

        let mut dot_indices = HashMap::new();
        let rotator = config.rotator.map(|(items, dots)| {
            for (i, &dot) in dots.iter().enumerate() {
                dot_indices.insert(dot, i);
            }
            let mut rotator = Rotator::new(&mut page, items, dots);
            rotator.start_auto(&mut timers);
            rotator
        });

        let mut observer = ViewportObserver::new();
        let mut counter_targets = SecondaryMap::new();
        for (element, target) in config.counters {
            counter_targets.insert(element, target);
            observer.observe(element, COUNTER_THRESHOLD, true);
        }
        for element in config.reveals {
            observer.observe(element, REVEAL_THRESHOLD, false);
        }

        let mut app = Self {
            page,
            timers,
            viewport: Viewport::new(0, config.viewport_height),
            observer,
            counters: CounterBank::new(),
            counter_targets,
            notifier,
            spy,
            modal,
            form: config.form,
            theme,
            rotator,
            content: config.content,
            nav_targets,
            modal_triggers: config.modal_triggers.into_iter().collect(),
            modal_close: config.modal_close,
            theme_toggles: config.theme_toggles,
            rotator_next: config.rotator_next,
            rotator_prev: config.rotator_prev,
            dot_indices,
        };
        // Establish scroll-derived state for the load position.
        app.apply_scroll(0);
        app
    }

    // --- accessors --------------------------------------------------------

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn notifier(&self) -> Option<&Notifier> {
        self.notifier.as_ref()
    }

    pub fn spy(&self) -> Option<&ScrollSpy> {
        self.spy.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn rotator(&self) -> Option<&Rotator> {
        self.rotator.as_ref()
    }

    pub fn counters(&self) -> &CounterBank {
        &self.counters
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    // --- event routing ----------------------------------------------------

    /// Route one synthetic event to the owning controllers.
    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Scroll { top } => self.apply_scroll(top),
            UiEvent::Resize { height } => {
                self.viewport.height = height;
                self.run_visibility_pass();
            }
            UiEvent::Key(key) => self.handle_key(key.code, key.modifiers),
            UiEvent::PointerDown { target } => {
                if let (Some(modal), Some(target)) = (self.modal.as_mut(), target) {
                    if target == modal.overlay() {
                        modal.close(&mut self.page, &mut self.timers);
                    }
                }
            }
            UiEvent::Click { target } => self.handle_click(target),
            UiEvent::Input { field, value } => {
                self.page.set_value(field, value);
                // Live re-validation only once a field has been flagged.
                if self.page.has_class(field, "invalid") {
                    if let Some(form) = &self.form {
                        form.validate_field(&mut self.page, field);
                    }
                }
            }
            UiEvent::Blur { field } => {
                if let Some(form) = &self.form {
                    form.validate_field(&mut self.page, field);
                }
            }
            UiEvent::Toggle { field, checked } => {
                self.page.set_checked(field, checked);
            }
            UiEvent::Submit => {
                if let Some(form) = self.form.as_mut() {
                    form.on_submit(&mut self.page, &mut self.timers, self.notifier.as_mut());
                }
            }
        }
    }

    /// Open the modal directly with the given content id.
    pub fn open_modal(&mut self, content_id: &str) -> bool {
        match self.modal.as_mut() {
            Some(modal) => modal.open(
                &mut self.page,
                &mut self.timers,
                self.content.as_ref(),
                content_id,
            ),
            None => false,
        }
    }

    /// Advance virtual time, dispatching every timer task that comes due.
    pub fn advance(&mut self, ms: u64) {
        for task in self.timers.advance(ms) {
            match task {
                TimerTask::DismissNotification { epoch } => {
                    if let Some(notifier) = self.notifier.as_mut() {
                        notifier.on_dismiss(&mut self.page, epoch);
                    }
                }
                TimerTask::ModalTransition { epoch } => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.on_transition(&mut self.page, epoch);
                    }
                }
                TimerTask::CounterTick { element } => {
                    self.counters.on_tick(&mut self.page, &mut self.timers, element);
                }
                TimerTask::CompleteSubmission => {
                    if let Some(form) = self.form.as_mut() {
                        form.on_submission_complete(
                            &mut self.page,
                            &mut self.timers,
                            self.notifier.as_mut(),
                        );
                    }
                }
                TimerTask::RotateAdvance => {
                    if let Some(rotator) = self.rotator.as_mut() {
                        rotator.on_auto_advance(&mut self.page);
                    }
                }
            }
        }
    }

    /// Drain events from `rx`, advancing virtual time in step with the wall
    /// clock. Returns when the sender side is dropped.
    pub async fn run(mut self, mut rx: UnboundedReceiver<UiEvent>) -> Self {
        let mut clock = tokio::time::interval(std::time::Duration::from_millis(15));
        let mut last = tokio::time::Instant::now();
        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else { break };
                    self.handle_event(event);
                }
                tick = clock.tick() => {
                    let elapsed = tick.duration_since(last).as_millis() as u64;
                    last = tick;
                    if elapsed > 0 {
                        self.advance(elapsed);
                    }
                }
            }
        }
        debug!("event channel closed, run loop exiting");
        self
    }

    // --- internals --------------------------------------------------------

    fn apply_scroll(&mut self, top: i64) {
        self.viewport.scroll_top = top;
        if let Some(spy) = self.spy.as_mut() {
            spy.on_scroll(&mut self.page, top);
        }
        self.run_visibility_pass();
    }

    fn run_visibility_pass(&mut self) {
        let entered = self.observer.check(&self.page, self.viewport);
        for element in entered {
            if let Some(&target) = self.counter_targets.get(element) {
                self.counters
                    .start_default(&mut self.page, &mut self.timers, element, target);
            } else {
                self.page.add_class(element, "revealed");
            }
        }
    }

    fn handle_key(&mut self, code: Key, modifiers: Modifiers) {
        match code {
            Key::Escape if modifiers.is_empty() => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.close(&mut self.page, &mut self.timers);
                }
            }
            Key::Char('t') | Key::Char('T') if modifiers.contains(Modifiers::ALT) => {
                self.toggle_theme();
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, target: ElementId) {
        if let Some(content_id) = self.modal_triggers.get(&target).cloned() {
            self.open_modal(&content_id);
            return;
        }
        if self.modal_close.contains(&target) {
            if let Some(modal) = self.modal.as_mut() {
                modal.close(&mut self.page, &mut self.timers);
            }
            return;
        }
        if self.theme_toggles.contains(&target) {
            self.toggle_theme();
            return;
        }
        if let Some(&section) = self.nav_targets.get(&target) {
            if let Some(spy) = self.spy.as_mut() {
                spy.activate(&mut self.page, section);
            }
            return;
        }
        if self.rotator_next == Some(target) {
            if let Some(rotator) = self.rotator.as_mut() {
                rotator.next(&mut self.page, &mut self.timers);
            }
            return;
        }
        if self.rotator_prev == Some(target) {
            if let Some(rotator) = self.rotator.as_mut() {
                rotator.prev(&mut self.page, &mut self.timers);
            }
            return;
        }
        if let Some(&index) = self.dot_indices.get(&target) {
            if let Some(rotator) = self.rotator.as_mut() {
                rotator.goto(&mut self.page, &mut self.timers, index);
            }
        }
    }

    fn toggle_theme(&mut self) {
        if let Some(theme) = self.theme.as_mut() {
            // Persistence failures are logged inside the controller; the
            // visual flip already happened, so the event is consumed.
            let _ = theme.toggle(&mut self.page, &mut self.timers, self.notifier.as_mut());
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("viewport", &self.viewport)
            .field("now", &self.timers.now())
            .field("elements", &self.page.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEvent;
    use crate::modal::ContentRecord;
    use crate::page::ElementData;
    use crate::theme::MemoryStore;

    fn record(title: &str) -> ContentRecord {
        ContentRecord {
            title: title.to_owned(),
            category: "Demo".to_owned(),
            attribution: "Acme".to_owned(),
            date: "March 2025".to_owned(),
            description: "Demo record.".to_owned(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn empty_config_routes_into_nothing() {
        let mut app = App::new(Page::new(), AppConfig::new());
        app.handle_event(UiEvent::Scroll { top: 400 });
        app.handle_event(UiEvent::Submit);
        app.advance(10_000);
        assert_eq!(app.viewport().scroll_top, 400);
    }

    #[test]
    fn scroll_drives_spy_and_counters() {
        let mut page = Page::new();
        let section = page.insert(ElementData::new("Section").with_bounds(0, 2000));
        let nav = page.insert(ElementData::new("NavLink"));
        let stat = page.insert(ElementData::new("Stat").with_bounds(1500, 100));

        let mut app = App::new(
            page,
            AppConfig::new()
                .viewport_height(800)
                .sections(vec![SectionLink::new(section, nav)])
                .counter(stat, 120),
        );
        assert!(!app.counters().is_running(stat));

        // Scroll the stat fully into view; the counter starts.
        app.handle_event(UiEvent::Scroll { top: 1200 });
        assert!(app.counters().is_running(stat));
        app.advance(crate::counter::DEFAULT_DURATION_MS + crate::counter::TICK_MS);
        assert_eq!(app.page().text(stat), "120");
        assert!(app.counters().is_finished(stat));
    }

    #[test]
    fn configured_threshold_reaches_the_spy() {
        let mut page = Page::new();
        let s1 = page.insert(ElementData::new("Section").with_bounds(0, 500));
        let s2 = page.insert(ElementData::new("Section").with_bounds(500, 500));
        let links = vec![SectionLink::unlinked(s1), SectionLink::unlinked(s2)];

        // With zero lookahead, S2 only activates once its top is reached;
        // the spy's default height-fraction would already have flipped at 334.
        let mut app = App::new(
            page,
            AppConfig::new()
                .sections(links)
                .threshold(ActivationThreshold::Lookahead(0)),
        );
        app.handle_event(UiEvent::Scroll { top: 499 });
        assert_eq!(app.spy().unwrap().active_section(), Some(s1));
        app.handle_event(UiEvent::Scroll { top: 500 });
        assert_eq!(app.spy().unwrap().active_section(), Some(s2));
    }

    #[test]
    fn reveal_class_applied_on_entry() {
        let mut page = Page::new();
        let card = page.insert(ElementData::new("Card").with_bounds(1000, 300));
        let mut app = App::new(
            page,
            AppConfig::new().viewport_height(600).reveal(card),
        );
        assert!(!app.page().has_class(card, "revealed"));

        app.handle_event(UiEvent::Scroll { top: 800 });
        assert!(app.page().has_class(card, "revealed"));
    }

    #[test]
    fn resize_triggers_visibility_pass() {
        let mut page = Page::new();
        let card = page.insert(ElementData::new("Card").with_bounds(700, 300));
        let mut app = App::new(
            page,
            AppConfig::new().viewport_height(600).reveal(card),
        );
        assert!(!app.page().has_class(card, "revealed"));

        app.handle_event(UiEvent::Resize { height: 1200 });
        assert!(app.page().has_class(card, "revealed"));
    }

    #[test]
    fn escape_closes_modal() {
        let mut page = Page::new();
        let overlay = page.insert(ElementData::new("ModalOverlay"));
        let body = page.insert(ElementData::new("ModalBody"));
        let mut catalog = ContentCatalog::new();
        catalog.insert("p1", record("One"));

        let mut app = App::new(
            page,
            AppConfig::new()
                .modal(overlay, body)
                .content(Box::new(catalog)),
        );
        assert!(app.open_modal("p1"));
        assert!(app.modal().unwrap().is_open());

        app.handle_event(UiEvent::Key(KeyEvent::plain(Key::Escape)));
        assert!(!app.modal().unwrap().is_open());
    }

    #[test]
    fn overlay_pointer_down_closes_modal() {
        let mut page = Page::new();
        let overlay = page.insert(ElementData::new("ModalOverlay"));
        let body = page.insert(ElementData::new("ModalBody"));
        let elsewhere = page.insert(ElementData::new("Card"));
        let mut catalog = ContentCatalog::new();
        catalog.insert("p1", record("One"));

        let mut app = App::new(
            page,
            AppConfig::new()
                .modal(overlay, body)
                .content(Box::new(catalog)),
        );
        app.open_modal("p1");

        // Pressing inside some other element leaves the modal open.
        app.handle_event(UiEvent::PointerDown {
            target: Some(elsewhere),
        });
        assert!(app.modal().unwrap().is_open());

        app.handle_event(UiEvent::PointerDown {
            target: Some(overlay),
        });
        assert!(!app.modal().unwrap().is_open());
    }

    #[test]
    fn click_routing_reaches_each_controller() {
        let mut page = Page::new();
        let section = page.insert(ElementData::new("Section").with_bounds(0, 500));
        let nav = page.insert(ElementData::new("NavLink"));
        let root = page.insert(ElementData::new("Body"));
        let toggle = page.insert(ElementData::new("Button"));
        let items: Vec<_> = (0..2)
            .map(|_| page.insert(ElementData::new("Testimonial")))
            .collect();
        let next = page.insert(ElementData::new("Button"));
        let prev = page.insert(ElementData::new("Button"));

        let mut app = App::new(
            page,
            AppConfig::new()
                .sections(vec![SectionLink::new(section, nav)])
                .theme(root, Box::new(MemoryStore::new()), false)
                .theme_toggle(toggle)
                .rotator(items.clone(), Vec::new())
                .rotator_controls(prev, next),
        );

        app.handle_event(UiEvent::Click { target: nav });
        assert_eq!(app.spy().unwrap().active_section(), Some(section));

        app.handle_event(UiEvent::Click { target: toggle });
        assert!(app.page().has_class(root, "dark-theme"));

        app.handle_event(UiEvent::Click { target: next });
        assert_eq!(app.rotator().unwrap().current(), 1);
        app.handle_event(UiEvent::Click { target: prev });
        assert_eq!(app.rotator().unwrap().current(), 0);
    }

    #[test]
    fn alt_t_toggles_theme() {
        let mut page = Page::new();
        let root = page.insert(ElementData::new("Body"));
        let mut app = App::new(
            page,
            AppConfig::new().theme(root, Box::new(MemoryStore::new()), false),
        );
        app.handle_event(UiEvent::Key(KeyEvent::new(Key::Char('t'), Modifiers::ALT)));
        assert!(app.page().has_class(root, "dark-theme"));
        // Plain 't' does nothing.
        app.handle_event(UiEvent::Key(KeyEvent::plain(Key::Char('t'))));
        assert!(app.page().has_class(root, "dark-theme"));
    }

    #[test]
    fn input_revalidates_only_flagged_fields() {
        use crate::form::{FieldBinding, FieldRule};

        let mut page = Page::new();
        let email = page.insert(ElementData::new("Field"));
        let slot = page.insert(ElementData::new("Validation"));
        let form = FormController::new(vec![FieldBinding::new(
            email,
            slot,
            FieldRule::email("Email").required(),
        )]);
        let mut app = App::new(page, AppConfig::new().form(form));

        // Typing before any blur does not flag the field.
        app.handle_event(UiEvent::Input {
            field: email,
            value: "not-an-email".into(),
        });
        assert!(!app.page().has_class(email, "invalid"));

        app.handle_event(UiEvent::Blur { field: email });
        assert!(app.page().has_class(email, "invalid"));

        // Once flagged, typing a fix clears it live.
        app.handle_event(UiEvent::Input {
            field: email,
            value: "ok@example.com".into(),
        });
        assert!(!app.page().has_class(email, "invalid"));
        assert!(app.page().has_class(email, "valid"));
    }

    #[test]
    fn run_loop_drains_events_until_channel_closes() {
        let mut page = Page::new();
        let card = page.insert(ElementData::new("Card").with_bounds(2000, 100));
        let app = App::new(page, AppConfig::new().viewport_height(600).reveal(card));

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(UiEvent::Scroll { top: 1800 }).unwrap();
        drop(tx);

        let app = tokio_test::block_on(app.run(rx));
        assert_eq!(app.viewport().scroll_top, 1800);
        assert!(app.page().has_class(card, "revealed"));
    }
}
