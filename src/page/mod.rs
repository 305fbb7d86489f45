//! Element arena: slotmap-backed registry with class/id queries.
//!
//! The [`Page`] is the rendering surface the controllers mutate. It owns no
//! layout or styling — only the state flags (classes, text, visibility) that
//! a presentation layer consumes.

pub mod element;
pub mod registry;
pub mod query;

pub use element::{ElementData, ElementId};
pub use registry::Page;
