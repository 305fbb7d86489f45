//! Element types: ElementId, ElementData.

use slotmap::new_key_type;

use crate::geometry::Bounds;

new_key_type! {
    /// Unique handle for a page element. Copy, lightweight (u64).
    pub struct ElementId;
}

/// State of a single page element.
///
/// Elements are flat records: the crate does not model a tree, only the
/// per-element flags the controllers read and write. `value` and `checked`
/// are only meaningful for form fields; other elements leave them at their
/// defaults.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Element kind (e.g. "Section", "NavLink", "Field").
    pub kind: String,
    /// Optional unique id, used by [`Page::query_by_id`](super::Page::query_by_id).
    pub id: Option<String>,
    /// Presentation classes (e.g. "active", "show", "revealed").
    pub classes: Vec<String>,
    /// Text content (counter display, validation messages, notification text).
    pub text: String,
    /// Current input value, for field elements.
    pub value: String,
    /// Checkbox state, for consent-style fields.
    pub checked: bool,
    /// Whether this element is visible.
    pub visible: bool,
    /// Whether this element is disabled (submit control during sending).
    pub disabled: bool,
    /// Vertical extent in document space, for scroll/viewport math.
    pub bounds: Bounds,
}

impl ElementData {
    /// Create a new `ElementData` with the given kind and sensible defaults.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            visible: true,
            disabled: false,
            bounds: Bounds::default(),
        }
    }

    /// Set the unique id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the input value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the document-space bounds (builder).
    pub fn with_bounds(mut self, top: i64, height: i64) -> Self {
        self.bounds = Bounds::new(top, height);
        self
    }

    /// Set whether this element is visible (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Check whether this element has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }
}
