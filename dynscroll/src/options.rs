use alloc::sync::Arc;

use crate::{AnchorStrategy, DynScrollError, Entry};

/// A callback fired after every reconcile with the entry at the container's leading edge (if
/// any), the offset into it, and all loaded entries.
pub type ProgressCallback<T> = Arc<dyn Fn(Option<&Entry<T>>, f64, &[Entry<T>]) + Send + Sync>;

/// A callback receiving load failures. The engine never retries on its own.
pub type ErrorCallback = Arc<dyn Fn(&DynScrollError) + Send + Sync>;

/// Initial scroll position, measured from the start of the loaded content.
#[derive(Clone)]
pub enum InitialOffset {
    Value(f64),
    /// Lazily evaluated when the engine is mounted.
    Provider(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> f64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::DynScroll`].
///
/// Cheap to clone: callbacks live in `Arc`s.
pub struct DynScrollOptions<T> {
    /// Virtual space before the loaded window. The head padding is steered back to this value
    /// whenever the host is not scrolling.
    pub prepend_space: f64,
    /// Virtual space after the loaded window.
    pub append_space: f64,
    /// Distance to an edge below which more items are requested.
    pub preload_range: f64,
    /// Static eviction floor: content farther than this from the viewport may be unloaded.
    pub max_live_viewport: f64,

    /// Start with the head already ended (no `prev` loads).
    pub initial_head_locked: bool,
    /// Start with the tail already ended (no `next` loads).
    pub initial_foot_locked: bool,
    /// Head padding once the head has ended.
    pub fixed_head_space: f64,
    /// Tail padding once the tail has ended.
    pub fixed_foot_space: f64,

    /// Scroll position inside the content to seed before the first measurement.
    pub initial_offset: InitialOffset,
    /// Index the first loaded entry will take.
    pub initial_index: i64,

    pub anchor_strategy: AnchorStrategy<T>,
    pub on_progress: Option<ProgressCallback<T>>,
    pub on_error: Option<ErrorCallback>,
}

impl<T> Clone for DynScrollOptions<T> {
    fn clone(&self) -> Self {
        Self {
            prepend_space: self.prepend_space,
            append_space: self.append_space,
            preload_range: self.preload_range,
            max_live_viewport: self.max_live_viewport,
            initial_head_locked: self.initial_head_locked,
            initial_foot_locked: self.initial_foot_locked,
            fixed_head_space: self.fixed_head_space,
            fixed_foot_space: self.fixed_foot_space,
            initial_offset: self.initial_offset.clone(),
            initial_index: self.initial_index,
            anchor_strategy: self.anchor_strategy.clone(),
            on_progress: self.on_progress.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> Default for DynScrollOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynScrollOptions<T> {
    pub fn new() -> Self {
        Self {
            prepend_space: 0.0,
            append_space: 0.0,
            preload_range: 1000.0,
            max_live_viewport: 3000.0,
            initial_head_locked: false,
            initial_foot_locked: false,
            fixed_head_space: 0.0,
            fixed_foot_space: 0.0,
            initial_offset: InitialOffset::default(),
            initial_index: 0,
            anchor_strategy: AnchorStrategy::Default,
            on_progress: None,
            on_error: None,
        }
    }

    pub fn with_space(mut self, prepend_space: f64, append_space: f64) -> Self {
        self.prepend_space = prepend_space;
        self.append_space = append_space;
        self
    }

    pub fn with_preload_range(mut self, preload_range: f64) -> Self {
        self.preload_range = preload_range;
        self
    }

    pub fn with_max_live_viewport(mut self, max_live_viewport: f64) -> Self {
        self.max_live_viewport = max_live_viewport;
        self
    }

    pub fn with_head_locked(mut self, locked: bool) -> Self {
        self.initial_head_locked = locked;
        self
    }

    pub fn with_foot_locked(mut self, locked: bool) -> Self {
        self.initial_foot_locked = locked;
        self
    }

    pub fn with_fixed_space(mut self, head: f64, foot: f64) -> Self {
        self.fixed_head_space = head;
        self.fixed_foot_space = foot;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: f64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_initial_index(mut self, initial_index: i64) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_anchor_strategy(mut self, anchor_strategy: AnchorStrategy<T>) -> Self {
        self.anchor_strategy = anchor_strategy;
        self
    }

    pub fn with_on_progress(
        mut self,
        on_progress: Option<impl Fn(Option<&Entry<T>>, f64, &[Entry<T>]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_progress = on_progress.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_error(
        mut self,
        on_error: Option<impl Fn(&DynScrollError) + Send + Sync + 'static>,
    ) -> Self {
        self.on_error = on_error.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T> core::fmt::Debug for DynScrollOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynScrollOptions")
            .field("prepend_space", &self.prepend_space)
            .field("append_space", &self.append_space)
            .field("preload_range", &self.preload_range)
            .field("max_live_viewport", &self.max_live_viewport)
            .field("initial_head_locked", &self.initial_head_locked)
            .field("initial_foot_locked", &self.initial_foot_locked)
            .field("fixed_head_space", &self.fixed_head_space)
            .field("fixed_foot_space", &self.fixed_foot_space)
            .field("initial_offset", &self.initial_offset)
            .field("initial_index", &self.initial_index)
            .field("anchor_strategy", &self.anchor_strategy)
            .finish_non_exhaustive()
    }
}
