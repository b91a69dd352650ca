use crate::*;

use alloc::vec::Vec;
use dynscroll::{DynScrollOptions, Entry, LoadPoll, LoadRequest, Loaded, SizeUpdate};

#[derive(Debug, Default)]
struct FakeHost {
    offset: f64,
    viewport: f64,
    writes: Vec<f64>,
    freezes: Vec<bool>,
}

impl FakeHost {
    fn new(viewport: f64) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }
}

impl ScrollHost for FakeHost {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn viewport_size(&self) -> f64 {
        self.viewport
    }

    fn write_scroll_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.writes.push(offset);
    }

    fn freeze_scrollbar(&mut self, frozen: bool) {
        self.freezes.push(frozen);
    }
}

/// Ten 50-unit entries per request above index 0; nothing below.
fn history(req: LoadRequest<'_, i64>) -> LoadPoll<i64> {
    let items: Vec<Entry<i64>> = (0..10)
        .map(|i| req.factory.slot(i, 10).index)
        .filter(|index| (-100..0).contains(index))
        .map(|index| Entry::new(index, 50.0, index))
        .collect();
    if items.is_empty() {
        LoadPoll::Ready(Ok(Loaded::EndOfStream))
    } else {
        LoadPoll::Ready(Ok(Loaded::Items(items)))
    }
}

fn controller() -> Controller<i64, &'static str> {
    Controller::with_load_more(DynScrollOptions::new().with_preload_range(200.0), history)
}

#[test]
fn scroll_activity_debounces() {
    let mut activity = ScrollActivity::new();
    assert_eq!(activity.reset_delay_ms(), 150);
    assert!(activity.notify_scroll_event(0));
    assert!(!activity.notify_scroll_event(50));
    assert_eq!(activity.update(100), None);
    assert!(activity.is_scrolling());
    assert_eq!(activity.update(200), Some(false));
    assert!(!activity.is_scrolling());
    assert_eq!(activity.update(400), None);
}

#[test]
fn scroll_activity_waits_for_scrollend_when_enabled() {
    let mut activity = ScrollActivity::new().with_use_scrollend_event(true);
    activity.notify_scroll_event(0);
    assert_eq!(activity.update(10_000), None);
    assert!(activity.is_scrolling());
    assert!(activity.on_scroll_end());
    assert!(!activity.on_scroll_end());
}

#[test]
fn resize_tracker_maps_elements_to_indexes() {
    let mut tracker = ResizeTracker::new();
    tracker.bind("a", 3);
    tracker.bind("b", 4);
    assert_eq!(
        tracker.observe(&"a", 40.0),
        Some(SizeUpdate {
            index: 3,
            size: 40.0
        })
    );
    assert_eq!(tracker.observe(&"zzz", 40.0), None);

    // Recycled element.
    tracker.bind("a", 9);
    assert_eq!(tracker.index_of(&"a"), Some(9));
    assert_eq!(tracker.unbind(&"b"), Some(4));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn frame_writes_prepend_correction_to_host() {
    let mut host = FakeHost::new(400.0);
    let mut c = controller();
    assert_eq!(c.mount(&mut host), 0.0);

    let report = c.frame(16, &mut host);
    assert_eq!(report.scroll_correction, Some(500.0));
    assert_eq!(host.offset, 500.0);
    assert_eq!(host.writes, [0.0, 500.0]);
    assert_eq!(host.freezes, [true, false]);
    assert_eq!(c.engine().state().len(), 10);
}

#[test]
fn frame_corrects_relative_to_the_host_position() {
    let mut host = FakeHost::new(400.0);
    let mut c = controller();
    c.mount(&mut host);
    // The host moved without reporting a scroll event.
    host.offset = 30.0;

    let report = c.frame(16, &mut host);
    assert_eq!(report.scroll_correction, Some(500.0));
    assert_eq!(host.offset, 530.0);
    assert_eq!(host.writes, [0.0, 530.0]);
    assert_eq!(c.viewport().scroll_offset, 530.0);
}

#[test]
fn frame_defers_correction_until_scrolling_settles() {
    let mut host = FakeHost::new(400.0);
    let mut c = controller();
    c.mount(&mut host);
    c.on_scroll(0.0, 0);

    let report = c.frame(10, &mut host);
    assert_eq!(report.scroll_correction, None);
    assert_eq!(c.engine().state().prepend_space, -500.0);
    assert_eq!(host.writes, [0.0]);

    let report = c.frame(200, &mut host);
    assert_eq!(report.scroll_correction, Some(500.0));
    assert_eq!(host.offset, 500.0);
    assert!(!c.activity().is_scrolling());
}

#[test]
fn resize_reports_become_anchored_patches() {
    let mut host = FakeHost::new(400.0);
    let mut c = controller().with_freeze_on_correction(false);
    c.mount(&mut host);
    c.frame(16, &mut host);

    c.bind("row", -3);
    assert!(c.on_resize(&"row", 80.0));
    assert!(!c.on_resize(&"ghost", 80.0));

    let report = c.frame(32, &mut host);
    assert_eq!(report.scroll_correction, Some(30.0));
    assert_eq!(host.offset, 530.0);
    assert!(host.freezes.is_empty());
}

#[test]
fn structural_frames_drop_unloaded_bindings() {
    let mut host = FakeHost::new(400.0);
    let mut c = controller();
    c.bind("stale", 500);
    c.bind("kept", -1);
    c.mount(&mut host);
    c.frame(16, &mut host);

    assert_eq!(c.resize_tracker().index_of(&"stale"), None);
    assert_eq!(c.resize_tracker().index_of(&"kept"), Some(-1));
}
