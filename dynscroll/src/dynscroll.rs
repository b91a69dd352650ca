use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::anchor::default_anchor;
use crate::evict::{next_floor, unload_count, watermark};
use crate::job::{EntryFactory, JobSlots};
use crate::reconcile::Reconcile;
use crate::task::{TaskKind, TaskQueue};
use crate::{
    Anchor, AnchorQuery, AnchorStrategy, DynScrollError, DynScrollOptions, Edge, EdgeDistances,
    EdgeStatus, Entry, ItemSource, LoadPoll, LoadRequest, LoadResult, LoadTicket, Loaded,
    SizeUpdate, Task, TickReport, ViewportState, WindowState,
};

/// A headless, bidirectional windowing engine.
///
/// The engine keeps a contiguous window of entries loaded out of an unbounded sequence, with
/// virtual padding on both sides standing in for what is not loaded. It never touches UI
/// objects:
/// - the host reports geometry (`mount`, `set_scroll_offset`, `set_viewport_size`, ...);
/// - an [`ItemSource`] is asked for batches and answers now or later via [`Self::complete`];
/// - measured sizes arrive through [`Self::patch`] / [`Self::report_size`];
/// - once per frame the host calls [`Self::tick`] and applies the returned scroll correction.
///
/// Producers only enqueue work. The window itself changes only inside `tick`, which publishes
/// a new immutable [`WindowState`] snapshot.
pub struct DynScroll<T> {
    options: DynScrollOptions<T>,
    source: Box<dyn ItemSource<T>>,
    state: Arc<WindowState<T>>,
    viewport: ViewportState,
    mounted: bool,
    head_ended: bool,
    foot_ended: bool,
    resync_pending: bool,
    jobs: JobSlots,
    queue: TaskQueue<T>,
}

impl<T: Clone> DynScroll<T> {
    /// Creates an engine. Nothing is loaded until [`Self::mount`] reports the viewport size.
    pub fn new(options: DynScrollOptions<T>, source: impl ItemSource<T> + 'static) -> Self {
        let prepend_space = if options.initial_head_locked {
            options.fixed_head_space
        } else {
            options.prepend_space
        };
        let append_space = if options.initial_foot_locked {
            options.fixed_foot_space
        } else {
            options.append_space
        };
        ds_debug!(
            prepend_space,
            append_space,
            initial_index = options.initial_index,
            "DynScroll::new"
        );
        Self {
            state: Arc::new(WindowState::empty(
                options.initial_index,
                prepend_space,
                append_space,
            )),
            head_ended: options.initial_head_locked,
            foot_ended: options.initial_foot_locked,
            source: Box::new(source),
            viewport: ViewportState::default(),
            mounted: false,
            resync_pending: false,
            jobs: JobSlots::default(),
            queue: TaskQueue::default(),
            options,
        }
    }

    /// Same as [`Self::new`], taking the item source as a closure.
    pub fn with_load_more(
        options: DynScrollOptions<T>,
        load_more: impl FnMut(LoadRequest<'_, T>) -> LoadPoll<T> + 'static,
    ) -> Self {
        Self::new(options, load_more)
    }

    pub fn options(&self) -> &DynScrollOptions<T> {
        &self.options
    }

    /// Clones the current options, applies `f`, and re-checks the viewport.
    ///
    /// The head padding is steered to its (possibly new) target on the next tick.
    pub fn update_options(&mut self, f: impl FnOnce(&mut DynScrollOptions<T>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.options = next;
        self.resync_pending = true;
        self.check();
    }

    /// Replaces the item source. Requests already in flight keep their tickets.
    pub fn set_item_source(&mut self, source: impl ItemSource<T> + 'static) {
        self.source = Box::new(source);
    }

    pub fn set_load_more(
        &mut self,
        load_more: impl FnMut(LoadRequest<'_, T>) -> LoadPoll<T> + 'static,
    ) {
        self.set_item_source(load_more);
    }

    pub fn set_on_progress(
        &mut self,
        on_progress: Option<impl Fn(Option<&Entry<T>>, f64, &[Entry<T>]) + Send + Sync + 'static>,
    ) {
        self.options.on_progress = on_progress.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_error(
        &mut self,
        on_error: Option<impl Fn(&DynScrollError) + Send + Sync + 'static>,
    ) {
        self.options.on_error = on_error.map(|f| Arc::new(f) as _);
    }

    pub fn set_anchor_strategy(&mut self, strategy: AnchorStrategy<T>) {
        self.options.anchor_strategy = strategy;
    }

    /// The current window snapshot.
    pub fn state(&self) -> &WindowState<T> {
        &self.state
    }

    /// A shared handle to the current window snapshot.
    pub fn snapshot(&self) -> Arc<WindowState<T>> {
        Arc::clone(&self.state)
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.state.entries
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_ended(&self, edge: Edge) -> bool {
        match edge {
            Edge::Prev => self.head_ended,
            Edge::Next => self.foot_ended,
        }
    }

    pub fn edge_status(&self, edge: Edge) -> EdgeStatus {
        if self.is_ended(edge) {
            return EdgeStatus::Ended;
        }
        match self.jobs.get(edge) {
            Some(job) if job.stalled => EdgeStatus::Stalled,
            Some(_) => EdgeStatus::Loading,
            None => EdgeStatus::Idle,
        }
    }

    /// Number of tasks waiting for the next tick.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// The ticket of the in-flight load for `edge`, if any.
    pub fn pending_load(&self, edge: Edge) -> Option<LoadTicket> {
        self.jobs
            .get(edge)
            .filter(|job| !job.stalled)
            .map(|job| job.ticket)
    }

    pub fn distances(&self) -> EdgeDistances {
        EdgeDistances::measure(
            &self.viewport,
            self.state.prepend_space,
            self.state.content_size(),
        )
    }

    /// The entry at the container's leading edge, and the offset into it.
    pub fn current_anchor(&self) -> Anchor {
        default_anchor(&self.state.entries, self.anchor_query(self.state.prepend_space))
    }

    /// Scroll position that shows `anchor` at the container's leading edge.
    pub fn scroll_offset_for(&self, anchor: Anchor) -> f64 {
        self.state.prepend_space
            + crate::translate::anchor_distance(&self.state.entries, anchor)
    }

    /// Reports the first viewport measurement and triggers the initial load.
    ///
    /// Returns the scroll position the host should apply: the head padding plus the configured
    /// initial offset. Subsequent calls behave like [`Self::set_viewport_size`].
    pub fn mount(&mut self, viewport_size: f64) -> f64 {
        if self.mounted {
            self.set_viewport_size(viewport_size);
            return self.viewport.scroll_offset;
        }
        self.mounted = true;
        self.viewport.viewport_size = viewport_size;
        self.viewport.scroll_offset =
            self.state.prepend_space + self.options.initial_offset.resolve();
        ds_debug!(
            viewport_size,
            scroll_offset = self.viewport.scroll_offset,
            "mount"
        );
        self.check();
        self.viewport.scroll_offset
    }

    pub fn set_viewport_size(&mut self, viewport_size: f64) {
        if self.viewport.viewport_size == viewport_size {
            return;
        }
        self.viewport.viewport_size = viewport_size;
        self.check();
    }

    /// Records the host's scroll position and re-checks the edges.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.viewport.scroll_offset = scroll_offset;
        self.check();
    }

    /// Records a user scroll: updates the position, marks the host as scrolling, re-checks.
    pub fn apply_scroll_event(&mut self, scroll_offset: f64) {
        self.viewport.is_scrolling = true;
        self.set_scroll_offset(scroll_offset);
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: f64, scroll_offset: f64) {
        self.viewport.viewport_size = viewport_size;
        self.viewport.scroll_offset = scroll_offset;
        self.check();
    }

    /// Reports whether the host is in an active scroll gesture or momentum phase.
    ///
    /// While scrolling, ticks commit padding changes without writing the scroll position.
    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        self.viewport.is_scrolling = is_scrolling;
    }

    pub fn set_last_touch_position(&mut self, position: f64) {
        self.viewport.last_touch_position = position;
    }

    /// Requests a scroll-position resync on the next tick, even while the host is scrolling.
    pub fn force_resync(&mut self) {
        self.queue.replace(Task::ForceResync);
    }

    /// Queues a measured size for a loaded (or about to be loaded) entry.
    pub fn report_size(&mut self, index: i64, size: f64) {
        if !self.is_known_index(index) {
            ds_trace!(index, "report_size: index not loaded");
            return;
        }
        self.queue.push(Task::Patch(alloc::vec![SizeUpdate { index, size }]));
    }

    /// Queues several measured sizes as one patch. Unknown indexes are ignored when applied.
    pub fn patch(&mut self, updates: impl IntoIterator<Item = SizeUpdate>) {
        let updates: alloc::vec::Vec<SizeUpdate> = updates.into_iter().collect();
        if updates.is_empty() {
            return;
        }
        self.queue.push(Task::Patch(updates));
    }

    fn is_known_index(&self, index: i64) -> bool {
        self.state.contains(index)
            || self.queue.iter().any(|task| match task {
                Task::Prepend(items) | Task::Append(items) => {
                    items.iter().any(|e| e.index == index)
                }
                _ => false,
            })
    }

    /// Delivers the result of a request that answered [`LoadPoll::Pending`].
    ///
    /// Returns `false` (and does nothing) when the request was superseded or cancelled.
    pub fn complete(&mut self, ticket: LoadTicket, result: LoadResult<T>) -> bool {
        let Some(job) = self.jobs.find(ticket) else {
            ds_trace!(ticket = ticket.id(), "complete: stale ticket");
            return false;
        };
        let edge = job.edge;
        let _boundary = job.boundary;
        if job.token.is_cancelled() {
            self.jobs.finish(edge);
            return false;
        }

        match result {
            Ok(Loaded::EndOfStream) => {
                ds_debug!(?edge, "end of stream");
                self.jobs.finish(edge);
                self.queue.push(match edge {
                    Edge::Prev => Task::FixHead,
                    Edge::Next => Task::FixFoot,
                });
                true
            }
            Ok(Loaded::Items(items)) => {
                self.jobs.finish(edge);
                if items.is_empty() {
                    ds_warn!(?edge, boundary = _boundary, "item source returned an empty batch");
                    return true;
                }
                self.queue.push(match edge {
                    Edge::Prev => Task::Prepend(items),
                    Edge::Next => Task::Append(items),
                });
                true
            }
            Err(err) if err.is_cancelled() => {
                self.jobs.finish(edge);
                false
            }
            Err(err) => {
                ds_warn!(
                    ?edge,
                    boundary = _boundary,
                    ticket = ticket.id(),
                    error = %err,
                    "load failed"
                );
                self.jobs.stall(edge);
                if let Some(cb) = &self.options.on_error {
                    cb(&err);
                }
                true
            }
        }
    }

    /// Clears a failed load for `edge` so the next check may request again.
    ///
    /// Returns `false` if the edge was not stalled.
    pub fn retry(&mut self, edge: Edge) -> bool {
        if !self.jobs.get(edge).is_some_and(|job| job.stalled) {
            return false;
        }
        self.jobs.finish(edge);
        self.check();
        true
    }

    /// Re-checks both edges: requests more items when an edge is within `preload_range`, and
    /// queues unloads when loaded content extends past the eviction watermark.
    pub fn check(&mut self) {
        if !self.mounted {
            return;
        }
        let distances = self.distances();
        ds_trace!(
            to_head = distances.to_head,
            to_end = distances.to_end,
            "check"
        );
        for edge in [Edge::Prev, Edge::Next] {
            if distances.get(edge) < self.options.preload_range {
                self.maybe_load(edge);
            }
        }
        for edge in [Edge::Prev, Edge::Next] {
            self.maybe_evict(edge, distances.get(edge));
        }
    }

    fn boundary(&self, edge: Edge) -> i64 {
        match edge {
            Edge::Prev => self.state.start_index,
            Edge::Next => self.state.end_index() - 1,
        }
    }

    fn maybe_load(&mut self, edge: Edge) {
        if self.is_ended(edge) {
            return;
        }
        let boundary = self.boundary(edge);
        if self.jobs.get(edge).is_some_and(|job| job.boundary == boundary) {
            return;
        }
        if self.queue.contains(TaskKind::load(edge)) || self.queue.contains(TaskKind::fix(edge)) {
            return;
        }
        self.queue.remove(TaskKind::unload(edge));
        let job = self.jobs.start(edge, boundary);
        ds_trace!(?edge, boundary, ticket = job.ticket.id(), "load_more");

        let request = LoadRequest {
            edge,
            factory: EntryFactory::new(edge, boundary),
            entries: &self.state.entries,
            cancellation: job.token.clone(),
            ticket: job.ticket,
        };
        if let LoadPoll::Ready(result) = self.source.load_more(request) {
            self.complete(job.ticket, result);
        }
    }

    fn maybe_evict(&mut self, edge: Edge, distance: f64) {
        if self.queue.contains(TaskKind::load(edge)) {
            return;
        }
        let floor = match edge {
            Edge::Prev => self.state.min_live_distance_prev,
            Edge::Next => self.state.min_live_distance_next,
        };
        let mark = watermark(self.options.max_live_viewport, floor);
        if distance <= mark {
            return;
        }
        let anchor = self.current_anchor();
        let anchor_pos = self
            .state
            .entries
            .iter()
            .position(|e| e.index == anchor.index);
        let count = unload_count(&self.state.entries, edge, distance, mark, anchor_pos);
        if count == 0 {
            return;
        }
        ds_debug!(?edge, count, distance, watermark = mark, "queue unload");
        self.jobs.cancel(edge);
        self.queue.replace(match edge {
            Edge::Prev => Task::UnloadPrev(count),
            Edge::Next => Task::UnloadNext(count),
        });
    }

    fn anchor_query(&self, content_offset: f64) -> AnchorQuery {
        AnchorQuery {
            content_offset,
            scroll_position: self.viewport.scroll_offset,
            container_size: self.viewport.viewport_size,
            last_touch_position: self.viewport.last_touch_position,
        }
    }

    fn head_target(&self) -> f64 {
        if self.head_ended {
            self.options.fixed_head_space
        } else {
            self.options.prepend_space
        }
    }

    /// Applies every queued task in one batch and publishes a new window snapshot.
    ///
    /// Call once per frame. Structural tasks run in arrival order, then all size patches. If
    /// the head padding moved and the host is not scrolling, the padding is steered back to its
    /// target and the difference is returned as `scroll_correction`; the host must add it to its
    /// scroll position so nothing moves on screen.
    pub fn tick(&mut self) -> TickReport {
        let resync_due = self.resync_pending && !self.viewport.is_scrolling;
        if self.queue.is_empty() && !resync_due {
            return TickReport::default();
        }

        let (structural, patches) = self.queue.drain_ordered();
        ds_trace!(
            structural = structural.len(),
            patches = patches.len(),
            "tick"
        );

        let mut rec = Reconcile::new(WindowState::clone(&self.state));
        for task in structural {
            rec.apply(task);
        }
        if rec.fixed_head {
            ds_debug!(start_index = rec.work.start_index, "head ended");
            self.head_ended = true;
            self.jobs.cancel(Edge::Prev);
        }
        if rec.fixed_foot {
            ds_debug!(end_index = rec.work.end_index(), "foot ended");
            self.foot_ended = true;
            self.jobs.cancel(Edge::Next);
        }

        let strategy = &self.options.anchor_strategy;
        let query = self.anchor_query(rec.work.prepend_space);
        rec.apply_patches(patches, |work| strategy.resolve(&work.entries, query));

        let mut work = rec.work;
        let distances = EdgeDistances::measure(&self.viewport, work.prepend_space, work.content_size());
        let preload = self.options.preload_range;
        work.min_live_distance_prev =
            next_floor(work.min_live_distance_prev, rec.tweak_prev, distances.to_head, preload);
        work.min_live_distance_next =
            next_floor(work.min_live_distance_next, rec.tweak_next, distances.to_end, preload);

        let mut report = TickReport {
            scroll_correction: None,
            applied: rec.applied,
            rejected: rec.rejected,
            structural: rec.shape_changed,
        };

        let target = self.head_target();
        let commit_directly = (self.viewport.is_scrolling && !rec.force_resync) || rec.fixed_head;
        if commit_directly {
            self.resync_pending = work.prepend_space != target;
        } else {
            let correction = target - work.prepend_space;
            work.prepend_space = target;
            self.resync_pending = false;
            if correction != 0.0 {
                self.viewport.scroll_offset += correction;
                report.scroll_correction = Some(correction);
            }
        }
        if self.foot_ended {
            work.append_space = self.options.fixed_foot_space;
        }

        self.state = Arc::new(work);

        if report.structural {
            self.check();
        }
        self.notify_progress();
        report
    }

    fn notify_progress(&self) {
        let Some(cb) = &self.options.on_progress else {
            return;
        };
        let anchor = self.current_anchor();
        cb(self.state.get(anchor.index), anchor.offset, &self.state.entries);
    }
}

impl<T> Drop for DynScroll<T> {
    fn drop(&mut self) {
        self.jobs.cancel_all();
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for DynScroll<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynScroll")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("head_ended", &self.head_ended)
            .field("foot_ended", &self.foot_ended)
            .field("pending_tasks", &self.queue.len())
            .finish_non_exhaustive()
    }
}
