//! Conversions between "entry index + offset into it" and "distance from the start of the
//! loaded content".
//!
//! Everything that needs to reason about positions composes these two functions.

use crate::{Anchor, DynScrollError, Entry};

/// Sum of all entry sizes.
pub fn content_size<T>(entries: &[Entry<T>]) -> f64 {
    entries.iter().map(|e| e.size).sum()
}

/// Maps a distance from the start of the loaded content to the entry under it.
///
/// - Empty `entries` yield `(0, distance)`.
/// - A negative distance yields the first entry with a negative offset.
/// - A distance past the end yields the last entry with an offset beyond its size.
///
/// The boundary between two entries belongs to the later one (at offset 0).
pub fn index_offset_from_distance<T>(entries: &[Entry<T>], distance: f64) -> Anchor {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Anchor::new(0, distance);
    };
    if distance < 0.0 {
        return Anchor::new(first.index, distance);
    }

    let mut remaining = distance;
    for entry in entries {
        if remaining < entry.size {
            return Anchor::new(entry.index, remaining);
        }
        remaining -= entry.size;
    }

    Anchor::new(last.index, remaining + last.size)
}

/// Inverse of [`index_offset_from_distance`].
///
/// Returns `offset` for empty `entries`. If `index` is not loaded this returns `0` instead of
/// failing; this happens when a stream starts scrolled to the end with nothing loaded yet. Use
/// [`try_distance_from_index_offset`] to detect the case.
pub fn distance_from_index_offset<T>(entries: &[Entry<T>], index: i64, offset: f64) -> f64 {
    match try_distance_from_index_offset(entries, index, offset) {
        Ok(distance) => distance,
        Err(_) => {
            ds_trace!(index, "distance_from_index_offset: index not loaded");
            0.0
        }
    }
}

/// Strict variant of [`distance_from_index_offset`].
pub fn try_distance_from_index_offset<T>(
    entries: &[Entry<T>],
    index: i64,
    offset: f64,
) -> Result<f64, DynScrollError> {
    if entries.is_empty() {
        return Ok(offset);
    }
    let mut before = 0.0;
    for entry in entries {
        if entry.index == index {
            return Ok(before + offset);
        }
        before += entry.size;
    }
    Err(DynScrollError::InvalidAnchorIndex { index })
}

/// Distance of an anchor from the start of the loaded content (lenient).
pub fn anchor_distance<T>(entries: &[Entry<T>], anchor: Anchor) -> f64 {
    distance_from_index_offset(entries, anchor.index, anchor.offset)
}
