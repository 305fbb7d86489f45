//! Scroll-driven navigation state: active section tracking, header compact
//! mode, and the back-to-top affordance.
//!
//! On every scroll tick the spy derives the current section from the ordered
//! section list: the deepest section the user has scrolled into wins, and
//! exactly one nav link carries the `active` class. Recomputation is
//! idempotent and early-outs when nothing changed, so high-frequency scroll
//! events are cheap without explicit throttling.

use tracing::debug;

use crate::page::{ElementId, Page};

/// Scroll offset past which the header gets the `scrolled` class.
pub const HEADER_SCROLLED_THRESHOLD: i64 = 50;

/// Scroll offset past which the back-to-top control gets the `show` class.
pub const BACK_TO_TOP_THRESHOLD: i64 = 300;

const ACTIVE_CLASS: &str = "active";

// ---------------------------------------------------------------------------
// ActivationThreshold
// ---------------------------------------------------------------------------

/// How far ahead of a section's top edge it starts counting as current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationThreshold {
    /// A fixed pixel lookahead.
    Lookahead(i64),
    /// A fraction of the section's own height.
    HeightFraction(f64),
}

impl Default for ActivationThreshold {
    fn default() -> Self {
        // A section becomes current once a third of it would be scrolled past.
        ActivationThreshold::HeightFraction(1.0 / 3.0)
    }
}

impl ActivationThreshold {
    fn lookahead_for(&self, section_height: i64) -> i64 {
        match *self {
            ActivationThreshold::Lookahead(px) => px,
            ActivationThreshold::HeightFraction(f) => (section_height as f64 * f) as i64,
        }
    }
}

// ---------------------------------------------------------------------------
// ScrollSpy
// ---------------------------------------------------------------------------

/// A section paired with the nav link that highlights it.
#[derive(Debug, Clone, Copy)]
pub struct SectionLink {
    pub section: ElementId,
    pub nav_link: Option<ElementId>,
}

impl SectionLink {
    /// A section with a nav link.
    pub fn new(section: ElementId, nav_link: ElementId) -> Self {
        Self {
            section,
            nav_link: Some(nav_link),
        }
    }

    /// A section with no nav link (still participates in active tracking).
    pub fn unlinked(section: ElementId) -> Self {
        Self {
            section,
            nav_link: None,
        }
    }
}

/// The nav/scroll state controller.
#[derive(Debug)]
pub struct ScrollSpy {
    /// Sections in document order.
    sections: Vec<SectionLink>,
    threshold: ActivationThreshold,
    header: Option<ElementId>,
    back_to_top: Option<ElementId>,
    active: Option<ElementId>,
    scroll_top: i64,
}

impl ScrollSpy {
    /// Create a spy over sections listed in document order.
    pub fn new(sections: Vec<SectionLink>) -> Self {
        Self {
            sections,
            threshold: ActivationThreshold::default(),
            header: None,
            back_to_top: None,
            active: None,
            scroll_top: 0,
        }
    }

    /// Set the activation threshold (builder).
    pub fn with_threshold(mut self, threshold: ActivationThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Track a header element for compact mode (builder).
    pub fn with_header(mut self, header: ElementId) -> Self {
        self.header = Some(header);
        self
    }

    /// Track a back-to-top control (builder).
    pub fn with_back_to_top(mut self, control: ElementId) -> Self {
        self.back_to_top = Some(control);
        self
    }

    /// The currently active section, if any.
    pub fn active_section(&self) -> Option<ElementId> {
        self.active
    }

    /// The last seen scroll offset.
    pub fn scroll_top(&self) -> i64 {
        self.scroll_top
    }

    /// Recompute all scroll-derived state for the given offset.
    pub fn on_scroll(&mut self, page: &mut Page, top: i64) {
        self.scroll_top = top;

        if let Some(header) = self.header {
            page.set_class(header, "scrolled", top > HEADER_SCROLLED_THRESHOLD);
        }
        if let Some(control) = self.back_to_top {
            page.set_class(control, "show", top > BACK_TO_TOP_THRESHOLD);
        }

        let current = self.compute_active(page, top);
        if current != self.active {
            debug!(?current, "active section changed");
            self.apply_active(page, current);
        }
    }

    /// Force a section active, as when its nav link is clicked directly.
    pub fn activate(&mut self, page: &mut Page, section: ElementId) {
        if self.sections.iter().any(|s| s.section == section) {
            self.apply_active(page, Some(section));
        }
    }

    /// The deepest section whose (top - lookahead) the scroll offset has
    /// reached. Iterates in document order; the last qualifying section wins.
    fn compute_active(&self, page: &Page, top: i64) -> Option<ElementId> {
        let mut current = None;
        for link in &self.sections {
            let Some(bounds) = page.bounds(link.section) else {
                continue;
            };
            let lookahead = self.threshold.lookahead_for(bounds.height);
            if top >= bounds.top - lookahead {
                current = Some(link.section);
            }
        }
        current
    }

    fn apply_active(&mut self, page: &mut Page, current: Option<ElementId>) {
        for link in &self.sections {
            let Some(nav) = link.nav_link else { continue };
            page.set_class(nav, ACTIVE_CLASS, current == Some(link.section));
        }
        self.active = current;
    }
}
