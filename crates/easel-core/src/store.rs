#![forbid(unsafe_code)]

//! The live document: an id-addressed element map plus a z-order list.
//!
//! [`ElementStore`] is deliberately dumb. It validates nothing beyond keeping
//! its two halves consistent with each other; editing policy (what may change,
//! how changes are recorded for undo) lives in `easel-history`. Mutators are
//! total: out-of-range insertion indices clamp rather than fail.
//!
//! # Consistency invariant
//!
//! Every id in the order list has an entry in the map and vice versa. All
//! mutators preserve this; `set_order` trusts the caller to pass a permutation
//! of the live ids and checks it in debug builds only.

use ahash::AHashMap;

use crate::element::{Element, ElementId};

/// Mutable document state: elements by id, plus bottom-to-top z order.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: AHashMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl ElementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Mutable access to a live element. Callers that want the change to be
    /// undoable must snapshot the element before and after and record an
    /// update through the history log.
    #[must_use]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Bottom-to-top z order.
    #[must_use]
    pub fn order(&self) -> &[ElementId] {
        &self.order
    }

    /// Position of `id` in the z order, if the element is live.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    /// Elements in z order, bottom first.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Inserts an element at the top of the z order. If the id is already
    /// live, the payload is replaced and the z position is kept.
    pub fn insert(&mut self, element: Element) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
    }

    /// Inserts an element at `index` in the z order, clamped to the current
    /// length. If the id is already live, the payload is replaced and the z
    /// position is kept.
    pub fn insert_at(&mut self, element: Element, index: usize) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            let index = index.min(self.order.len());
            self.order.insert(index, id);
        }
    }

    /// Removes an element, returning it if it was live.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id);
        if removed.is_some() {
            self.order.retain(|&o| o != id);
        }
        removed
    }

    /// Overwrites an element in place, leaving its z position untouched.
    /// An id not currently live is appended to the top instead, so the map
    /// and the order list never diverge.
    pub fn write(&mut self, element: Element) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
    }

    /// Replaces the z order wholesale. `order` must be a permutation of the
    /// live ids; debug builds assert this.
    pub fn set_order(&mut self, order: Vec<ElementId>) {
        debug_assert_eq!(order.len(), self.elements.len());
        debug_assert!(order.iter().all(|id| self.elements.contains_key(id)));
        self.order = order;
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.order.clear();
    }
}
