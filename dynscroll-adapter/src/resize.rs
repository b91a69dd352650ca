use dynscroll::{SizeUpdate, WindowState};

use crate::ElementKey;
use crate::key::ElementIndexMap;

/// Maps rendered elements to entry indexes so resize observations become size updates.
#[derive(Clone, Debug)]
pub struct ResizeTracker<E> {
    elements: ElementIndexMap<E>,
}

impl<E: ElementKey> Default for ResizeTracker<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ElementKey> ResizeTracker<E> {
    pub fn new() -> Self {
        Self {
            elements: ElementIndexMap::<E>::new(),
        }
    }

    /// Associates `element` with the entry at `index`, replacing any previous binding.
    pub fn bind(&mut self, element: E, index: i64) {
        self.elements.insert(element, index);
    }

    /// Returns the index the element was bound to.
    pub fn unbind(&mut self, element: &E) -> Option<i64> {
        self.elements.remove(element)
    }

    pub fn index_of(&self, element: &E) -> Option<i64> {
        self.elements.get(element).copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Turns a resize observation into a size update, if the element is bound.
    pub fn observe(&self, element: &E, size: f64) -> Option<SizeUpdate> {
        let index = self.index_of(element)?;
        Some(SizeUpdate { index, size })
    }

    /// Drops bindings whose entries are no longer loaded.
    pub fn retain_loaded<T>(&mut self, state: &WindowState<T>) {
        self.elements.retain(|_, index| state.contains(*index));
    }
}
