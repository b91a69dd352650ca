use alloc::vec::Vec;

use crate::evict::FloorTweak;
use crate::translate::{anchor_distance, content_size};
use crate::{Anchor, DynScrollError, Edge, Entry, SizeUpdate, Task, WindowState};

/// Checks that `items` are contiguous and adjoin `state` at `edge`.
pub fn validate_batch<T>(
    state: &WindowState<T>,
    edge: Edge,
    items: &[Entry<T>],
) -> Result<(), DynScrollError> {
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Err(DynScrollError::EmptyBatch { edge });
    };
    let (expected, got) = match edge {
        Edge::Prev => (state.start_index - 1, last.index),
        Edge::Next => (state.end_index(), first.index),
    };
    if got != expected {
        return Err(DynScrollError::BadContiguity {
            edge,
            expected,
            got,
        });
    }
    for pair in items.windows(2) {
        if pair[1].index != pair[0].index + 1 {
            return Err(DynScrollError::BadContiguity {
                edge,
                expected: pair[0].index + 1,
                got: pair[1].index,
            });
        }
    }
    Ok(())
}

/// Working copy of the window for one tick.
#[derive(Debug)]
pub(crate) struct Reconcile<T> {
    pub(crate) work: WindowState<T>,
    pub(crate) tweak_prev: Option<FloorTweak>,
    pub(crate) tweak_next: Option<FloorTweak>,
    pub(crate) fixed_head: bool,
    pub(crate) fixed_foot: bool,
    pub(crate) force_resync: bool,
    pub(crate) shape_changed: bool,
    pub(crate) applied: usize,
    pub(crate) rejected: usize,
    deferred: Vec<SizeUpdate>,
}

impl<T> Reconcile<T> {
    pub(crate) fn new(work: WindowState<T>) -> Self {
        Self {
            work,
            tweak_prev: None,
            tweak_next: None,
            fixed_head: false,
            fixed_foot: false,
            force_resync: false,
            shape_changed: false,
            applied: 0,
            rejected: 0,
            deferred: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, task: Task<T>) {
        let _kind = task.kind();
        let _batch = match &task {
            Task::Prepend(items) | Task::Append(items) => items
                .first()
                .zip(items.last())
                .map(|(first, last)| (first.index, last.index)),
            _ => None,
        };
        let result = match task {
            Task::Prepend(items) => self.prepend(items),
            Task::Append(items) => self.append(items),
            Task::UnloadPrev(count) => {
                self.unload(Edge::Prev, count);
                Ok(())
            }
            Task::UnloadNext(count) => {
                self.unload(Edge::Next, count);
                Ok(())
            }
            Task::FixHead => {
                self.fixed_head = true;
                Ok(())
            }
            Task::FixFoot => {
                self.fixed_foot = true;
                Ok(())
            }
            Task::ForceResync => {
                self.force_resync = true;
                Ok(())
            }
            Task::Patch(updates) => {
                self.deferred.extend(updates);
                self.applied += 1;
                return;
            }
        };
        match result {
            Ok(()) => self.applied += 1,
            Err(_err) => {
                ds_warn!(
                    kind = ?_kind,
                    batch = ?_batch,
                    start_index = self.work.start_index,
                    end_index = self.work.end_index(),
                    error = %_err,
                    "dropping batch"
                );
                self.rejected += 1;
            }
        }
    }

    fn prepend(&mut self, mut items: Vec<Entry<T>>) -> Result<(), DynScrollError> {
        validate_batch(&self.work, Edge::Prev, &items)?;
        let inserted = content_size(&items);
        self.work.start_index = items[0].index;
        items.append(&mut self.work.entries);
        self.work.entries = items;
        self.work.prepend_space -= inserted;
        self.tweak_prev = Some(FloorTweak::Grow);
        self.shape_changed = true;
        Ok(())
    }

    fn append(&mut self, mut items: Vec<Entry<T>>) -> Result<(), DynScrollError> {
        validate_batch(&self.work, Edge::Next, &items)?;
        let inserted = content_size(&items);
        self.work.entries.append(&mut items);
        self.work.append_space -= inserted;
        self.tweak_next = Some(FloorTweak::Grow);
        self.shape_changed = true;
        Ok(())
    }

    fn unload(&mut self, edge: Edge, count: usize) {
        let len = self.work.entries.len();
        let count = count.min(len.saturating_sub(1));
        match edge {
            Edge::Prev => {
                self.tweak_prev = Some(FloorTweak::Reset);
                if count == 0 {
                    return;
                }
                let removed: f64 = self.work.entries.drain(..count).map(|e| e.size).sum();
                self.work.start_index = self.work.entries[0].index;
                self.work.prepend_space += removed;
            }
            Edge::Next => {
                self.tweak_next = Some(FloorTweak::Reset);
                if count == 0 {
                    return;
                }
                let removed: f64 = self.work.entries.drain(len - count..).map(|e| e.size).sum();
                self.work.append_space += removed;
            }
        }
        ds_debug!(?edge, count, "unloaded entries");
        self.shape_changed = true;
    }

    /// Overwrites sizes; returns whether anything changed.
    fn patch_unanchored(&mut self, updates: &[SizeUpdate]) -> bool {
        let mut changed = false;
        for update in updates {
            let Some(entry) = self.work.get_mut(update.index) else {
                continue;
            };
            let size = update.size.max(0.0);
            if entry.size != size {
                entry.size = size;
                changed = true;
            }
        }
        changed
    }

    /// Applies size updates while keeping `anchor_of`'s anchor visually fixed: the anchor's
    /// displacement is folded into the head padding.
    pub(crate) fn apply_patches(
        &mut self,
        patches: Vec<Task<T>>,
        anchor_of: impl FnOnce(&WindowState<T>) -> Anchor,
    ) {
        let mut updates = core::mem::take(&mut self.deferred);
        for task in patches {
            if let Task::Patch(batch) = task {
                updates.extend(batch);
                self.applied += 1;
            }
        }
        if updates.is_empty() {
            return;
        }

        let anchor = anchor_of(&self.work);
        let before = anchor_distance(&self.work.entries, anchor);
        if !self.patch_unanchored(&updates) {
            return;
        }
        let after = anchor_distance(&self.work.entries, anchor);
        self.work.prepend_space -= after - before;
        ds_trace!(
            anchor_index = anchor.index,
            shift = after - before,
            "patched entry sizes"
        );

        self.tweak_prev = Some(FloorTweak::Grow);
        self.tweak_next = Some(FloorTweak::Grow);
    }
}
