//! Counter animation: drive a numeric display from 0 to a target value.
//!
//! Each animation steps a fixed increment every [`TICK_MS`] and clamps on the
//! final frame so the rendered value never overshoots. An element animates at
//! most once for the lifetime of the bank: re-triggering (e.g. the element
//! scrolling in and out of view) is refused.

use slotmap::SecondaryMap;
use tracing::debug;

use crate::page::{ElementId, Page};
use crate::timer::{TimerId, TimerTask, Timers};

/// Step interval for running animations.
pub const TICK_MS: u64 = 30;

/// Default animation duration.
pub const DEFAULT_DURATION_MS: u64 = 2000;

#[derive(Debug)]
struct Animation {
    target: u64,
    current: u64,
    increment: u64,
    timer: TimerId,
}

/// Registry of running and finished counter animations.
#[derive(Debug, Default)]
pub struct CounterBank {
    running: SecondaryMap<ElementId, Animation>,
    finished: SecondaryMap<ElementId, ()>,
}

impl CounterBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `element` from 0 to `target` over `duration_ms`.
    ///
    /// Returns `false` without side effects if the element is already
    /// animating or has finished animating. A zero target finishes
    /// immediately, rendering "0".
    pub fn start(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        element: ElementId,
        target: u64,
        duration_ms: u64,
    ) -> bool {
        if self.running.contains_key(element) || self.finished.contains_key(element) {
            return false;
        }

        if target == 0 {
            page.set_text(element, "0");
            self.finished.insert(element, ());
            return true;
        }

        let ticks = (duration_ms / TICK_MS).max(1);
        let increment = target.div_ceil(ticks);
        let timer = timers.schedule_repeating(TICK_MS, TimerTask::CounterTick { element });

        page.set_text(element, "0");
        self.running.insert(
            element,
            Animation {
                target,
                current: 0,
                increment,
                timer,
            },
        );
        debug!(target, increment, "counter animation started");
        true
    }

    /// Start with the default 2-second duration.
    pub fn start_default(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        element: ElementId,
        target: u64,
    ) -> bool {
        self.start(page, timers, element, target, DEFAULT_DURATION_MS)
    }

    /// Handle a tick for `element`. Clamps at the target and stops the
    /// interval on the final frame. Ticks for unknown elements are ignored.
    pub fn on_tick(&mut self, page: &mut Page, timers: &mut Timers, element: ElementId) {
        let Some(anim) = self.running.get_mut(element) else {
            return;
        };

        anim.current = anim.current.saturating_add(anim.increment);
        if anim.current >= anim.target {
            page.set_text(element, anim.target.to_string());
            timers.cancel(anim.timer);
            self.running.remove(element);
            self.finished.insert(element, ());
            debug!("counter animation finished");
        } else {
            page.set_text(element, anim.current.to_string());
        }
    }

    /// Whether the element's animation is currently stepping.
    pub fn is_running(&self, element: ElementId) -> bool {
        self.running.contains_key(element)
    }

    /// Whether the element's animation has completed.
    pub fn is_finished(&self, element: ElementId) -> bool {
        self.finished.contains_key(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ElementData;

    fn setup() -> (Page, Timers, CounterBank, ElementId) {
        let mut page = Page::new();
        let stat = page.insert(ElementData::new("Stat").with_id("projects-count"));
        (page, Timers::new(), CounterBank::new(), stat)
    }

    /// Advance time, routing counter ticks back into the bank.
    fn pump(bank: &mut CounterBank, page: &mut Page, timers: &mut Timers, ms: u64) {
        for task in timers.advance(ms) {
            if let TimerTask::CounterTick { element } = task {
                bank.on_tick(page, timers, element);
            }
        }
    }

    #[test]
    fn reaches_target_exactly() {
        let (mut page, mut timers, mut bank, stat) = setup();
        assert!(bank.start_default(&mut page, &mut timers, stat, 250));
        pump(&mut bank, &mut page, &mut timers, DEFAULT_DURATION_MS + TICK_MS);
        assert_eq!(page.text(stat), "250");
        assert!(bank.is_finished(stat));
        assert!(!bank.is_running(stat));
    }

    #[test]
    fn never_overshoots_in_rendered_output() {
        let (mut page, mut timers, mut bank, stat) = setup();
        // 1000 over 2000ms: increment 16, which does not divide 1000.
        bank.start_default(&mut page, &mut timers, stat, 1000);
        let mut last = 0u64;
        for _ in 0..100 {
            pump(&mut bank, &mut page, &mut timers, TICK_MS);
            let shown: u64 = page.text(stat).parse().unwrap();
            assert!(shown <= 1000, "rendered value overshot: {shown}");
            assert!(shown >= last, "rendered value decreased");
            last = shown;
        }
        assert_eq!(last, 1000);
    }

    #[test]
    fn increment_is_ceiling_of_target_over_ticks() {
        let (mut page, mut timers, mut bank, stat) = setup();
        // 2000ms / 30ms = 66 ticks; ceil(100 / 66) = 2.
        bank.start_default(&mut page, &mut timers, stat, 100);
        pump(&mut bank, &mut page, &mut timers, TICK_MS);
        assert_eq!(page.text(stat), "2");
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let (mut page, mut timers, mut bank, stat) = setup();
        assert!(bank.start_default(&mut page, &mut timers, stat, 0));
        assert_eq!(page.text(stat), "0");
        assert!(bank.is_finished(stat));
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn restart_while_running_is_refused() {
        let (mut page, mut timers, mut bank, stat) = setup();
        assert!(bank.start_default(&mut page, &mut timers, stat, 500));
        assert!(!bank.start_default(&mut page, &mut timers, stat, 500));
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn restart_after_finish_is_refused() {
        let (mut page, mut timers, mut bank, stat) = setup();
        bank.start_default(&mut page, &mut timers, stat, 10);
        pump(&mut bank, &mut page, &mut timers, DEFAULT_DURATION_MS + TICK_MS);
        assert!(bank.is_finished(stat));
        assert!(!bank.start_default(&mut page, &mut timers, stat, 10));
        assert_eq!(page.text(stat), "10");
    }

    #[test]
    fn interval_stops_after_completion() {
        let (mut page, mut timers, mut bank, stat) = setup();
        bank.start_default(&mut page, &mut timers, stat, 5);
        pump(&mut bank, &mut page, &mut timers, DEFAULT_DURATION_MS);
        // The repeating tick was cancelled when the target was reached.
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn tick_for_unknown_element_is_ignored() {
        let (mut page, mut timers, mut bank, stat) = setup();
        bank.on_tick(&mut page, &mut timers, stat);
        assert_eq!(page.text(stat), "");
    }

    #[test]
    fn stale_element_does_not_panic() {
        let (mut page, mut timers, mut bank, stat) = setup();
        bank.start_default(&mut page, &mut timers, stat, 100);
        page.remove(stat);
        pump(&mut bank, &mut page, &mut timers, DEFAULT_DURATION_MS + TICK_MS);
        assert!(bank.is_finished(stat));
    }

    #[test]
    fn two_counters_run_independently() {
        let (mut page, mut timers, mut bank, a) = setup();
        let b = page.insert(ElementData::new("Stat"));
        bank.start_default(&mut page, &mut timers, a, 66);
        bank.start_default(&mut page, &mut timers, b, 660);
        pump(&mut bank, &mut page, &mut timers, DEFAULT_DURATION_MS + TICK_MS);
        assert_eq!(page.text(a), "66");
        assert_eq!(page.text(b), "660");
    }
}
