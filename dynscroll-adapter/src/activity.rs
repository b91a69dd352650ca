/// Debounced "is the user scrolling" detector.
///
/// Hosts that emit a native scroll-end event set `use_scrollend_event` and call
/// [`Self::on_scroll_end`]; everyone else relies on the timeout fallback in [`Self::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollActivity {
    is_scrolling: bool,
    last_event_ms: Option<u64>,
    use_scrollend_event: bool,
    reset_delay_ms: u64,
}

impl Default for ScrollActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollActivity {
    pub const DEFAULT_RESET_DELAY_MS: u64 = 150;

    pub fn new() -> Self {
        Self {
            is_scrolling: false,
            last_event_ms: None,
            use_scrollend_event: false,
            reset_delay_ms: Self::DEFAULT_RESET_DELAY_MS,
        }
    }

    pub fn with_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.reset_delay_ms = delay_ms;
        self
    }

    pub fn with_use_scrollend_event(mut self, use_scrollend_event: bool) -> Self {
        self.use_scrollend_event = use_scrollend_event;
        self
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn reset_delay_ms(&self) -> u64 {
        self.reset_delay_ms
    }

    pub fn use_scrollend_event(&self) -> bool {
        self.use_scrollend_event
    }

    /// Returns `true` if the state changed.
    pub fn set_is_scrolling(&mut self, is_scrolling: bool) -> bool {
        if self.is_scrolling == is_scrolling {
            return false;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.last_event_ms = None;
        }
        true
    }

    /// Records a scroll event. Returns `true` if scrolling just started.
    pub fn notify_scroll_event(&mut self, now_ms: u64) -> bool {
        self.last_event_ms = Some(now_ms);
        self.set_is_scrolling(true)
    }

    /// Native scroll-end notification. Returns `true` if scrolling just stopped.
    pub fn on_scroll_end(&mut self) -> bool {
        self.set_is_scrolling(false)
    }

    /// Runs the timeout fallback.
    ///
    /// Returns `Some(false)` when scrolling stopped during this call, `None` otherwise.
    pub fn update(&mut self, now_ms: u64) -> Option<bool> {
        if self.use_scrollend_event || !self.is_scrolling {
            return None;
        }
        let last = self.last_event_ms?;
        if now_ms.saturating_sub(last) >= self.reset_delay_ms {
            self.set_is_scrolling(false);
            return Some(false);
        }
        None
    }
}
