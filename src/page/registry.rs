//! The element registry and stale-safe mutation helpers.

use slotmap::SlotMap;

use crate::geometry::Bounds;

use super::element::{ElementData, ElementId};

/// The page's element registry, backed by a slotmap arena.
///
/// Controllers hold `ElementId`s across timer callbacks, so every mutation
/// helper tolerates stale ids: a removed element absorbs writes as no-ops
/// instead of panicking.
pub struct Page {
    pub(crate) elements: SlotMap<ElementId, ElementData>,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
        }
    }

    /// Register an element and return its handle.
    pub fn insert(&mut self, data: ElementData) -> ElementId {
        self.elements.insert(data)
    }

    /// Remove an element. Returns its data, or `None` if it didn't exist.
    pub fn remove(&mut self, id: ElementId) -> Option<ElementData> {
        self.elements.remove(id)
    }

    /// Immutable access to an element's data.
    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id)
    }

    /// Mutable access to an element's data.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.elements.get_mut(id)
    }

    /// Whether the page contains an element with the given handle.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ── Stale-safe mutation helpers ──────────────────────────────────

    /// Set an element's text content. No-op for stale ids.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = text.into();
        }
    }

    /// Set an element's input value. No-op for stale ids.
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.value = value.into();
        }
    }

    /// Set an element's checkbox state. No-op for stale ids.
    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            el.checked = checked;
        }
    }

    /// Add a class to an element. No-op for stale ids.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.add_class(class);
        }
    }

    /// Remove a class from an element. No-op for stale ids.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.remove_class(class);
        }
    }

    /// Add or remove a class based on `on`. No-op for stale ids.
    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            if on {
                el.add_class(class);
            } else {
                el.remove_class(class);
            }
        }
    }

    /// Whether an element carries a class. `false` for stale ids.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.has_class(class))
    }

    /// An element's text content. Empty for stale ids.
    pub fn text(&self, id: ElementId) -> &str {
        self.elements.get(id).map(|el| el.text.as_str()).unwrap_or("")
    }

    /// An element's bounds. `None` for stale ids.
    pub fn bounds(&self, id: ElementId) -> Option<Bounds> {
        self.elements.get(id).map(|el| el.bounds)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
