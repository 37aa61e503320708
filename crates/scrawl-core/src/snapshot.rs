//! Scene snapshots.

use crate::elements::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// One complete state of the scene.
///
/// Element order is z-order: later entries are drawn on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    elements: Vec<Element>,
}

impl Snapshot {
    /// Create a snapshot from elements in z-order.
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// All elements, back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    /// Elements front to back, the order used for hit testing.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().rev()
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Whether an element with this id exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Z-index of an element.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append on top of the z-order.
    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Replace the element sharing `element`'s id in place, keeping its
    /// z-index. Returns false when no such element exists.
    pub(crate) fn set(&mut self, element: Element) -> bool {
        match self.position(element.id()) {
            Some(index) => {
                self.elements[index] = element;
                true
            }
            None => false,
        }
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Element) -> bool) {
        self.elements.retain(keep);
    }

    pub(crate) fn clear(&mut self) {
        self.elements.clear();
    }
}

impl FromIterator<Element> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
