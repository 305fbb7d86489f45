//! Document-space geometry: element bounds and the scrolled viewport.
//!
//! All coordinates are vertical document pixels. The page is a single tall
//! column; an element occupies `[top, top + height)` and the viewport is the
//! window `[scroll_top, scroll_top + height)` over it.

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Vertical extent of an element in document space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Offset of the element's top edge from the document top.
    pub top: i64,
    /// Height of the element. Zero-height elements are valid (markers).
    pub height: i64,
}

impl Bounds {
    /// Create bounds from a top offset and height.
    pub fn new(top: i64, height: i64) -> Self {
        Self { top, height }
    }

    /// Offset of the element's bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// Whether a document offset falls within this element.
    pub fn contains(&self, offset: i64) -> bool {
        offset >= self.top && offset < self.bottom()
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The currently visible window over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Current scroll offset (top edge of the visible window).
    pub scroll_top: i64,
    /// Height of the visible window.
    pub height: i64,
}

impl Viewport {
    /// Create a viewport at the given scroll offset and height.
    pub fn new(scroll_top: i64, height: i64) -> Self {
        Self { scroll_top, height }
    }

    /// Offset of the viewport's bottom edge.
    pub fn bottom(&self) -> i64 {
        self.scroll_top + self.height
    }

    /// Fraction of `bounds` currently inside the viewport, in `[0.0, 1.0]`.
    ///
    /// Zero-height elements report `1.0` when their top edge is inside the
    /// viewport and `0.0` otherwise.
    pub fn visible_fraction(&self, bounds: Bounds) -> f64 {
        if bounds.height <= 0 {
            return if bounds.top >= self.scroll_top && bounds.top < self.bottom() {
                1.0
            } else {
                0.0
            };
        }
        let overlap = bounds.bottom().min(self.bottom()) - bounds.top.max(self.scroll_top);
        if overlap <= 0 {
            return 0.0;
        }
        overlap as f64 / bounds.height as f64
    }
}
