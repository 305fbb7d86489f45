//! Rotating content display: one item visible at a time, with dots, manual
//! navigation, and a repeating auto-advance.
//!
//! Manual navigation restarts the auto-advance interval so the next automatic
//! step happens a full period after the user's last interaction. Indices wrap
//! in both directions.

use crate::page::{ElementId, Page};
use crate::timer::{TimerId, TimerTask, Timers};

/// Auto-advance period.
pub const AUTO_ADVANCE_MS: u64 = 5000;

const ACTIVE_CLASS: &str = "active";

/// Cycles the `active` class through a list of items and their dots.
#[derive(Debug)]
pub struct Rotator {
    items: Vec<ElementId>,
    dots: Vec<ElementId>,
    current: usize,
    auto_timer: Option<TimerId>,
}

impl Rotator {
    /// Create a rotator over `items`, showing the first one. `dots` may be
    /// empty or shorter than `items`; extras are ignored.
    pub fn new(page: &mut Page, items: Vec<ElementId>, dots: Vec<ElementId>) -> Self {
        let rotator = Self {
            items,
            dots,
            current: 0,
            auto_timer: None,
        };
        rotator.render(page);
        rotator
    }

    /// Begin auto-advancing every [`AUTO_ADVANCE_MS`].
    pub fn start_auto(&mut self, timers: &mut Timers) {
        if self.auto_timer.is_none() && self.items.len() > 1 {
            self.auto_timer =
                Some(timers.schedule_repeating(AUTO_ADVANCE_MS, TimerTask::RotateAdvance));
        }
    }

    /// Cancel the auto-advance interval. Teardown for hosts that remove the
    /// rotator from the page.
    pub fn shutdown(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.auto_timer.take() {
            timers.cancel(timer);
        }
    }

    /// Index of the visible item.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the rotator has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advance to the next item (manual; restarts the interval).
    pub fn next(&mut self, page: &mut Page, timers: &mut Timers) {
        self.step(page, 1);
        self.restart_auto(timers);
    }

    /// Go back to the previous item (manual; restarts the interval).
    pub fn prev(&mut self, page: &mut Page, timers: &mut Timers) {
        self.step(page, -1);
        self.restart_auto(timers);
    }

    /// Jump to an item, as when its dot is clicked. Out-of-range indices are
    /// ignored.
    pub fn goto(&mut self, page: &mut Page, timers: &mut Timers, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.current = index;
        self.render(page);
        self.restart_auto(timers);
    }

    /// Handle the auto-advance interval firing. Does not restart the timer;
    /// the interval is already repeating.
    pub fn on_auto_advance(&mut self, page: &mut Page) {
        self.step(page, 1);
    }

    fn step(&mut self, page: &mut Page, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        self.current = ((self.current as isize + delta).rem_euclid(len)) as usize;
        self.render(page);
    }

    fn restart_auto(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.auto_timer.take() {
            timers.cancel(timer);
            self.auto_timer =
                Some(timers.schedule_repeating(AUTO_ADVANCE_MS, TimerTask::RotateAdvance));
        }
    }

    fn render(&self, page: &mut Page) {
        for (i, &item) in self.items.iter().enumerate() {
            page.set_class(item, ACTIVE_CLASS, i == self.current);
        }
        for (i, &dot) in self.dots.iter().enumerate() {
            page.set_class(dot, ACTIVE_CLASS, i == self.current);
        }
    }
}
