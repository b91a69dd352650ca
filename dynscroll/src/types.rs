use alloc::vec::Vec;

/// One boundary of the loaded window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// The head of the window (lower indexes).
    Prev,
    /// The tail of the window (higher indexes).
    Next,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }
}

/// A loaded item.
///
/// `index` is a key into an unbounded logical sequence and may be negative. `size` is the
/// item's extent along the scroll axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<T> {
    pub index: i64,
    pub size: f64,
    pub payload: T,
}

impl<T> Entry<T> {
    pub fn new(index: i64, size: f64, payload: T) -> Self {
        Self {
            index,
            size: size.max(0.0),
            payload,
        }
    }
}

/// A measured size for the entry at `index`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeUpdate {
    pub index: i64,
    pub size: f64,
}

/// A position expressed as "entry index + distance into that entry".
///
/// `offset` may be negative (head overscroll) or exceed the entry's size (tail overscroll).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub index: i64,
    pub offset: f64,
}

impl Anchor {
    pub fn new(index: i64, offset: f64) -> Self {
        Self { index, offset }
    }
}

/// Lifecycle of a single edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeStatus {
    Idle,
    Loading,
    /// The last load failed; nothing is scheduled until `retry` or the boundary moves.
    Stalled,
    /// The item source reported end of stream. Terminal.
    Ended,
}

/// An immutable snapshot of the loaded window.
///
/// `entries` are sorted by ascending index without gaps. The scrollable extent is
/// `prepend_space + content_size + append_space`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState<T> {
    /// Index of the first entry, or the index the first append will take when empty.
    pub start_index: i64,
    pub entries: Vec<Entry<T>>,
    pub prepend_space: f64,
    pub append_space: f64,
    /// Hysteresis floor for head eviction.
    pub min_live_distance_prev: f64,
    /// Hysteresis floor for tail eviction.
    pub min_live_distance_next: f64,
}

impl<T> WindowState<T> {
    pub(crate) fn empty(start_index: i64, prepend_space: f64, append_space: f64) -> Self {
        Self {
            start_index,
            entries: Vec::new(),
            prepend_space,
            append_space,
            min_live_distance_prev: 0.0,
            min_live_distance_next: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One past the last loaded index.
    pub fn end_index(&self) -> i64 {
        self.start_index + self.entries.len() as i64
    }

    pub fn first_index(&self) -> Option<i64> {
        self.entries.first().map(|e| e.index)
    }

    pub fn last_index(&self) -> Option<i64> {
        self.entries.last().map(|e| e.index)
    }

    pub fn get(&self, index: i64) -> Option<&Entry<T>> {
        let pos = index.checked_sub(self.start_index)?;
        let pos = usize::try_from(pos).ok()?;
        self.entries.get(pos)
    }

    pub(crate) fn get_mut(&mut self, index: i64) -> Option<&mut Entry<T>> {
        let pos = index.checked_sub(self.start_index)?;
        let pos = usize::try_from(pos).ok()?;
        self.entries.get_mut(pos)
    }

    pub fn contains(&self, index: i64) -> bool {
        self.get(index).is_some()
    }

    pub fn content_size(&self) -> f64 {
        crate::translate::content_size(&self.entries)
    }

    pub fn total_size(&self) -> f64 {
        self.prepend_space + self.content_size() + self.append_space
    }
}
