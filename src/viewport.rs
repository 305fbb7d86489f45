//! Viewport observation: detect elements entering the visible window.
//!
//! A watch fires when its element's visible fraction first meets the
//! threshold. One-shot watches (`once`) unregister themselves after firing,
//! which is how counter animations are guaranteed a single trigger.
//! Persistent watches re-arm once the element leaves the viewport.

use crate::geometry::Viewport;
use crate::page::{ElementId, Page};

#[derive(Debug)]
struct Watch {
    element: ElementId,
    threshold: f64,
    once: bool,
    intersecting: bool,
}

/// Observes registered elements against the current viewport.
///
/// Watches fire in registration order, mirroring the handler-ordering
/// guarantee of the driving event loop.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    watches: Vec<Watch>,
}

impl ViewportObserver {
    /// Create an observer with no watches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `element`, firing when at least `threshold` of it is visible.
    ///
    /// `once` watches are removed after their first fire.
    pub fn observe(&mut self, element: ElementId, threshold: f64, once: bool) {
        if self.watches.iter().any(|w| w.element == element) {
            return;
        }
        self.watches.push(Watch {
            element,
            threshold,
            once,
            intersecting: false,
        });
    }

    /// Stop watching `element`. Returns `false` if it wasn't watched.
    pub fn unobserve(&mut self, element: ElementId) -> bool {
        let before = self.watches.len();
        self.watches.retain(|w| w.element != element);
        self.watches.len() != before
    }

    /// Number of active watches.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Whether no watches are registered.
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Evaluate all watches against `viewport`, returning the elements that
    /// newly entered it, in registration order.
    ///
    /// Watches on removed elements are dropped silently.
    pub fn check(&mut self, page: &Page, viewport: Viewport) -> Vec<ElementId> {
        let mut entered = Vec::new();

        self.watches.retain_mut(|watch| {
            let Some(bounds) = page.bounds(watch.element) else {
                return false;
            };
            let fraction = viewport.visible_fraction(bounds);
            let visible = if watch.threshold <= 0.0 {
                fraction > 0.0
            } else {
                fraction >= watch.threshold
            };

            if visible && !watch.intersecting {
                entered.push(watch.element);
                if watch.once {
                    return false;
                }
            }
            watch.intersecting = visible;
            true
        });

        entered
    }
}
