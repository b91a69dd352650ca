use crate::{Edge, Entry};

/// How an edge's hysteresis floor changes after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FloorTweak {
    /// Content was inserted or resized: keep at least what is loaded now.
    Grow,
    /// Content was evicted: let trimming proceed normally.
    Reset,
}

/// Next hysteresis floor for an edge.
pub(crate) fn next_floor(
    current: f64,
    tweak: Option<FloorTweak>,
    distance: f64,
    preload_range: f64,
) -> f64 {
    match tweak {
        None => current,
        Some(FloorTweak::Reset) => 0.0,
        Some(FloorTweak::Grow) => distance.max(0.0) + preload_range,
    }
}

/// Effective eviction watermark: the static floor or the dynamic minimum, whichever is larger.
pub fn watermark(max_live_viewport: f64, min_live_distance: f64) -> f64 {
    max_live_viewport.max(min_live_distance)
}

/// Number of entries to unload from `edge`.
///
/// Walks from the edge accumulating sizes until at least `distance - watermark` is covered.
/// Never reaches the entry at `anchor_pos` and never empties the window.
pub fn unload_count<T>(
    entries: &[Entry<T>],
    edge: Edge,
    distance: f64,
    watermark: f64,
    anchor_pos: Option<usize>,
) -> usize {
    if entries.len() <= 1 || distance <= watermark {
        return 0;
    }
    let excess = distance - watermark;

    let mut limit = entries.len() - 1;
    if let Some(pos) = anchor_pos {
        let before_anchor = match edge {
            Edge::Prev => pos,
            Edge::Next => entries.len().saturating_sub(pos + 1),
        };
        limit = limit.min(before_anchor);
    }

    let count = match edge {
        Edge::Prev => covering_count(entries.iter().map(|e| e.size), excess),
        Edge::Next => covering_count(entries.iter().rev().map(|e| e.size), excess),
    };
    count.min(limit)
}

fn covering_count(sizes: impl Iterator<Item = f64>, excess: f64) -> usize {
    let mut sum = 0.0;
    let mut count = 0;
    for size in sizes {
        sum += size;
        count += 1;
        if sum >= excess {
            break;
        }
    }
    count
}
