//! Virtual-time timer wheel.
//!
//! All deferred work in this crate (notification dismissal, modal transition
//! cleanup, counter ticks, simulated submission, rotation) is expressed as a
//! [`TimerTask`] scheduled on [`Timers`]. Time only moves when the host calls
//! [`Timers::advance`], which makes every timed behavior deterministic and
//! testable without sleeping.
//!
//! The contract is explicit cancel-then-reschedule: a controller that wants
//! to restart a pending timer must [`cancel`](Timers::cancel) the old handle
//! before scheduling a new one, so no timer is ever silently leaked.

use crate::page::ElementId;

// ---------------------------------------------------------------------------
// TimerId / TimerTask
// ---------------------------------------------------------------------------

/// Handle for a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Deferred work item fired by the timer wheel.
///
/// Tasks carry the minimum routing data; the application context dispatches
/// them to the owning controller. `epoch` fields guard against stale firings
/// after a controller has moved on (last-write-wins semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Hide the active notification, if `epoch` still matches.
    DismissNotification { epoch: u64 },
    /// Complete a modal open/close transition, if `epoch` still matches.
    ModalTransition { epoch: u64 },
    /// Advance a running counter animation by one step.
    CounterTick { element: ElementId },
    /// The simulated form submission delay elapsed.
    CompleteSubmission,
    /// Auto-advance the content rotator.
    RotateAdvance,
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    /// Absolute deadline in virtual milliseconds.
    due: u64,
    /// Schedule order, for FIFO firing of equal deadlines.
    seq: u64,
    /// `Some(interval)` for repeating timers.
    interval: Option<u64>,
    task: TimerTask,
}

/// The virtual-time scheduler.
#[derive(Debug, Default)]
pub struct Timers {
    now: u64,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl Timers {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether the given handle is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Schedule `task` to fire once after `delay_ms`.
    pub fn schedule(&mut self, delay_ms: u64, task: TimerTask) -> TimerId {
        self.push(delay_ms, None, task)
    }

    /// Schedule `task` to fire every `interval_ms`, first after one interval.
    ///
    /// A zero interval is clamped to 1 ms so the wheel always makes progress.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: TimerTask) -> TimerId {
        let interval = interval_ms.max(1);
        self.push(interval, Some(interval), task)
    }

    /// Cancel a pending timer. Returns `false` if it had already fired or
    /// been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Advance virtual time by `ms`, returning every task that came due, in
    /// deadline order (FIFO for equal deadlines).
    ///
    /// Repeating timers are rescheduled as they fire, so a repeating timer
    /// may appear several times in one `advance` call.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerTask> {
        let target = self.now + ms;
        let mut fired = Vec::new();

        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= target)
                .min_by_key(|(_, e)| (e.due, e.seq))
                .map(|(i, _)| i);

            let Some(index) = next else { break };
            let entry = self.entries.swap_remove(index);
            self.now = entry.due.max(self.now);
            fired.push(entry.task);

            if let Some(interval) = entry.interval {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.entries.push(Entry {
                    id: entry.id,
                    due: entry.due + interval,
                    seq,
                    interval: Some(interval),
                    task: entry.task,
                });
            }
        }

        self.now = target;
        fired
    }

    fn push(&mut self, delay_ms: u64, interval: Option<u64>, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay_ms,
            seq,
            interval,
            task,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── One-shot timers ──────────────────────────────────────────────

    #[test]
    fn fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(100, TimerTask::CompleteSubmission);
        assert!(timers.advance(99).is_empty());
        let fired = timers.advance(1);
        assert_eq!(fired, vec![TimerTask::CompleteSubmission]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn advance_moves_virtual_time() {
        let mut timers = Timers::new();
        assert_eq!(timers.now(), 0);
        timers.advance(250);
        assert_eq!(timers.now(), 250);
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = Timers::new();
        timers.schedule(200, TimerTask::CompleteSubmission);
        timers.schedule(100, TimerTask::RotateAdvance);
        let fired = timers.advance(300);
        assert_eq!(
            fired,
            vec![TimerTask::RotateAdvance, TimerTask::CompleteSubmission]
        );
    }

    #[test]
    fn equal_deadlines_fire_fifo() {
        let mut timers = Timers::new();
        timers.schedule(100, TimerTask::DismissNotification { epoch: 1 });
        timers.schedule(100, TimerTask::DismissNotification { epoch: 2 });
        let fired = timers.advance(100);
        assert_eq!(
            fired,
            vec![
                TimerTask::DismissNotification { epoch: 1 },
                TimerTask::DismissNotification { epoch: 2 },
            ]
        );
    }

    // ── Cancellation ─────────────────────────────────────────────────

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::new();
        let id = timers.schedule(100, TimerTask::CompleteSubmission);
        assert!(timers.cancel(id));
        assert!(timers.advance(200).is_empty());
    }

    #[test]
    fn cancel_after_fire_returns_false() {
        let mut timers = Timers::new();
        let id = timers.schedule(50, TimerTask::CompleteSubmission);
        timers.advance(50);
        assert!(!timers.cancel(id));
    }

    #[test]
    fn is_scheduled_tracks_lifecycle() {
        let mut timers = Timers::new();
        let id = timers.schedule(50, TimerTask::CompleteSubmission);
        assert!(timers.is_scheduled(id));
        timers.advance(50);
        assert!(!timers.is_scheduled(id));
    }

    // ── Repeating timers ─────────────────────────────────────────────

    #[test]
    fn repeating_fires_every_interval() {
        let mut timers = Timers::new();
        let element = {
            // Fabricate an ElementId through a throwaway page.
            let mut page = crate::page::Page::new();
            page.insert(crate::page::ElementData::new("Stat"))
        };
        timers.schedule_repeating(30, TimerTask::CounterTick { element });
        let fired = timers.advance(100);
        assert_eq!(fired.len(), 3); // 30, 60, 90
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn repeating_cancel_stops_it() {
        let mut timers = Timers::new();
        let id = timers.schedule_repeating(30, TimerTask::RotateAdvance);
        timers.advance(30);
        assert!(timers.cancel(id));
        assert!(timers.advance(300).is_empty());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut timers = Timers::new();
        timers.schedule_repeating(0, TimerTask::RotateAdvance);
        let fired = timers.advance(3);
        assert_eq!(fired.len(), 3);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut timers = Timers::new();
        timers.schedule(0, TimerTask::CompleteSubmission);
        let fired = timers.advance(0);
        assert_eq!(fired.len(), 1);
    }
}
