/// A lightweight, serializable snapshot of the host's scroll geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Scroll position of the container, including the head padding.
    pub scroll_offset: f64,
    /// Extent of the container along the scroll axis.
    pub viewport_size: f64,
    pub is_scrolling: bool,
    pub last_touch_position: f64,
}

/// Distances from the viewport to both ends of the loaded content.
///
/// Negative values mean the viewport already extends past that end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeDistances {
    pub to_head: f64,
    pub to_end: f64,
}

impl EdgeDistances {
    pub fn measure(viewport: &ViewportState, prepend_space: f64, content_size: f64) -> Self {
        let to_head = viewport.scroll_offset - prepend_space;
        let to_end =
            prepend_space + content_size - (viewport.scroll_offset + viewport.viewport_size);
        Self { to_head, to_end }
    }

    pub fn get(&self, edge: crate::Edge) -> f64 {
        match edge {
            crate::Edge::Prev => self.to_head,
            crate::Edge::Next => self.to_end,
        }
    }
}

/// What one `tick` did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Amount to add to the host's scroll position, if the tick moved the head padding.
    pub scroll_correction: Option<f64>,
    /// Tasks applied (including no-op patches).
    pub applied: usize,
    /// Batches dropped because they did not adjoin the window.
    pub rejected: usize,
    /// Whether the window's shape changed.
    pub structural: bool,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.applied == 0 && self.rejected == 0 && self.scroll_correction.is_none()
    }
}
