//! Page queries: by id, class, kind; generic predicate matching.

use super::element::{ElementData, ElementId};
use super::registry::Page;

impl Page {
    /// Find the first element whose `id` field matches the given string.
    pub fn query_by_id(&self, id: &str) -> Option<ElementId> {
        self.iter_elements()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(element_id, _)| element_id)
    }

    /// Find all elements that carry the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<ElementId> {
        self.iter_elements()
            .filter(|(_, data)| data.has_class(class))
            .map(|(element_id, _)| element_id)
            .collect()
    }

    /// Find all elements of the given kind.
    pub fn query_by_kind(&self, kind: &str) -> Vec<ElementId> {
        self.iter_elements()
            .filter(|(_, data)| data.kind == kind)
            .map(|(element_id, _)| element_id)
            .collect()
    }

    /// Find all elements matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&ElementData) -> bool) -> Vec<ElementId> {
        self.iter_elements()
            .filter(|(_, data)| predicate(data))
            .map(|(element_id, _)| element_id)
            .collect()
    }

    /// Iterate over all `(ElementId, &ElementData)` pairs in the arena.
    ///
    /// Iterates in slotmap insertion order, which is deterministic but not
    /// document order.
    fn iter_elements(&self) -> impl Iterator<Item = (ElementId, &ElementData)> {
        self.elements.iter()
    }
}
