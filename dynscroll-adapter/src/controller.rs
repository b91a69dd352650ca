use dynscroll::{
    DynScroll, DynScrollOptions, ItemSource, LoadPoll, LoadRequest, TickReport, ViewportState,
};

use crate::{ElementKey, ResizeTracker, ScrollActivity};

/// The scroll container a [`Controller`] drives.
pub trait ScrollHost {
    fn scroll_offset(&self) -> f64;

    fn viewport_size(&self) -> f64;

    fn write_scroll_offset(&mut self, offset: f64);

    /// Temporarily disables native scrolling (e.g. `overflow: hidden`) around a programmatic
    /// scroll write, so momentum from the old position does not override it.
    fn freeze_scrollbar(&mut self, _frozen: bool) {}
}

/// A framework-neutral controller that wraps a `dynscroll::DynScroll` and provides the common
/// host workflow (scroll activity, resize tracking, per-frame reconcile).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` / `on_touch` / `on_resize` when UI events occur
/// - `frame(now_ms, host)` once per animation frame
#[derive(Debug)]
pub struct Controller<T, E = u64> {
    engine: DynScroll<T>,
    activity: ScrollActivity,
    resize: ResizeTracker<E>,
    freeze_on_correction: bool,
}

impl<T: Clone, E: ElementKey> Controller<T, E> {
    pub fn new(options: DynScrollOptions<T>, source: impl ItemSource<T> + 'static) -> Self {
        Self::from_engine(DynScroll::new(options, source))
    }

    pub fn with_load_more(
        options: DynScrollOptions<T>,
        load_more: impl FnMut(LoadRequest<'_, T>) -> LoadPoll<T> + 'static,
    ) -> Self {
        Self::from_engine(DynScroll::with_load_more(options, load_more))
    }

    pub fn from_engine(engine: DynScroll<T>) -> Self {
        Self {
            engine,
            activity: ScrollActivity::new(),
            resize: ResizeTracker::new(),
            freeze_on_correction: true,
        }
    }

    pub fn with_activity(mut self, activity: ScrollActivity) -> Self {
        self.activity = activity;
        self
    }

    /// Whether scroll corrections are written with the scrollbar frozen. Defaults to `true`.
    pub fn with_freeze_on_correction(mut self, freeze: bool) -> Self {
        self.freeze_on_correction = freeze;
        self
    }

    pub fn engine(&self) -> &DynScroll<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DynScroll<T> {
        &mut self.engine
    }

    pub fn into_engine(self) -> DynScroll<T> {
        self.engine
    }

    pub fn activity(&self) -> &ScrollActivity {
        &self.activity
    }

    pub fn resize_tracker(&self) -> &ResizeTracker<E> {
        &self.resize
    }

    pub fn viewport(&self) -> ViewportState {
        self.engine.viewport()
    }

    /// Mounts the engine using the host's viewport and writes the initial scroll position.
    pub fn mount(&mut self, host: &mut impl ScrollHost) -> f64 {
        let offset = self.engine.mount(host.viewport_size());
        host.write_scroll_offset(offset);
        offset
    }

    /// Re-reads geometry from the host without treating it as a user scroll.
    pub fn sync_from_host(&mut self, host: &impl ScrollHost) {
        self.engine
            .set_viewport_and_scroll(host.viewport_size(), host.scroll_offset());
    }

    pub fn on_viewport_size(&mut self, viewport_size: f64) {
        self.engine.set_viewport_size(viewport_size);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, scroll_offset: f64, now_ms: u64) {
        self.activity.notify_scroll_event(now_ms);
        self.engine.apply_scroll_event(scroll_offset);
    }

    /// Native scroll-end notification.
    pub fn on_scroll_end(&mut self) {
        if self.activity.on_scroll_end() {
            self.settle();
        }
    }

    pub fn on_touch(&mut self, position: f64) {
        self.engine.set_last_touch_position(position);
    }

    pub fn bind(&mut self, element: E, index: i64) {
        self.resize.bind(element, index);
    }

    pub fn unbind(&mut self, element: &E) -> Option<i64> {
        self.resize.unbind(element)
    }

    /// Reports a measured element size. Returns `false` if the element is not bound.
    pub fn on_resize(&mut self, element: &E, size: f64) -> bool {
        let Some(update) = self.resize.observe(element, size) else {
            return false;
        };
        self.engine.report_size(update.index, update.size);
        true
    }

    fn settle(&mut self) {
        dsa_trace!("scrolling stopped");
        self.engine.set_is_scrolling(false);
        self.engine.force_resync();
    }

    /// Advances the controller by one frame.
    ///
    /// Picks up the host's current scroll position, settles scroll activity, runs the engine's
    /// reconcile, and writes any scroll correction back to the host.
    pub fn frame(&mut self, now_ms: u64, host: &mut impl ScrollHost) -> TickReport {
        let host_offset = host.scroll_offset();
        if host_offset != self.engine.viewport().scroll_offset {
            dsa_trace!(host_offset, "scroll position moved outside on_scroll");
            self.engine.set_scroll_offset(host_offset);
        }
        if self.activity.update(now_ms) == Some(false) {
            self.settle();
        }

        let report = self.engine.tick();
        if let Some(_correction) = report.scroll_correction {
            let offset = self.engine.viewport().scroll_offset;
            dsa_trace!(correction = _correction, offset, "write scroll correction");
            if self.freeze_on_correction {
                host.freeze_scrollbar(true);
            }
            host.write_scroll_offset(offset);
            if self.freeze_on_correction {
                host.freeze_scrollbar(false);
            }
        }
        if report.structural {
            self.resize.retain_loaded(self.engine.state());
        }
        report
    }
}
