use alloc::sync::Arc;
use core::fmt;

use crate::translate::index_offset_from_distance;
use crate::{Anchor, Entry};

/// Sub-pixel tolerance used by [`AnchorStrategy::Touch`].
pub const SUBPIXEL_TOLERANCE: f64 = 1.0;

/// Host geometry handed to an anchor strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorQuery {
    /// Where the loaded content begins inside the scroll container (the head padding).
    pub content_offset: f64,
    pub scroll_position: f64,
    pub container_size: f64,
    /// Last reported touch/pointer position, relative to the container's leading edge.
    pub last_touch_position: f64,
}

impl AnchorQuery {
    /// Distance from the start of the loaded content to the container's leading edge.
    pub fn distance_in_content(&self) -> f64 {
        self.scroll_position - self.content_offset
    }
}

/// A custom anchor selector.
pub type AnchorSelector<T> = Arc<dyn Fn(&[Entry<T>], AnchorQuery) -> Anchor + Send + Sync>;

/// Decides which point must stay visually fixed when entries change size.
pub enum AnchorStrategy<T> {
    /// The entry at the container's leading edge.
    Default,
    /// The entry under the last touch position.
    Touch,
    Custom(AnchorSelector<T>),
}

impl<T> AnchorStrategy<T> {
    pub fn custom(f: impl Fn(&[Entry<T>], AnchorQuery) -> Anchor + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn resolve(&self, entries: &[Entry<T>], query: AnchorQuery) -> Anchor {
        match self {
            Self::Default => default_anchor(entries, query),
            Self::Touch => touch_anchor(entries, query),
            Self::Custom(f) => f(entries, query),
        }
    }
}

impl<T> Default for AnchorStrategy<T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<T> Clone for AnchorStrategy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Touch => Self::Touch,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for AnchorStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Touch => f.write_str("Touch"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

pub fn default_anchor<T>(entries: &[Entry<T>], query: AnchorQuery) -> Anchor {
    index_offset_from_distance(entries, query.distance_in_content())
}

pub fn touch_anchor<T>(entries: &[Entry<T>], query: AnchorQuery) -> Anchor {
    let point = query.distance_in_content() + query.last_touch_position;
    let anchor = index_offset_from_distance(entries, point);

    // A point resting within the tolerance of an entry's end belongs to the next entry.
    let Some(pos) = entries.iter().position(|e| e.index == anchor.index) else {
        return anchor;
    };
    let Some(next) = entries.get(pos + 1) else {
        return anchor;
    };
    let size = entries[pos].size;
    if anchor.offset >= 0.0 && anchor.offset < size && size - anchor.offset < SUBPIXEL_TOLERANCE {
        return Anchor::new(next.index, anchor.offset - size);
    }
    anchor
}
