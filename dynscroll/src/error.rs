use alloc::boxed::Box;

use crate::Edge;

/// Boxed error returned by an item source.
pub type SourceError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Errors observed by the engine.
///
/// Only [`DynScrollError::LoadFailed`] reaches the error callback. Contiguity violations are
/// logged and the offending batch is dropped; cancellations are silent.
#[derive(Debug, thiserror::Error)]
pub enum DynScrollError {
    #[error("{edge:?} batch does not adjoin the window: expected index {expected}, got {got}")]
    BadContiguity { edge: Edge, expected: i64, got: i64 },
    #[error("{edge:?} batch is empty")]
    EmptyBatch { edge: Edge },
    #[error("load cancelled")]
    LoadCancelled,
    #[error("{edge:?} load failed: {source}")]
    LoadFailed {
        edge: Edge,
        #[source]
        source: SourceError,
    },
    #[error("index {index} is not loaded")]
    InvalidAnchorIndex { index: i64 },
}

impl DynScrollError {
    pub fn load_failed(edge: Edge, source: impl Into<SourceError>) -> Self {
        Self::LoadFailed {
            edge,
            source: source.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::LoadCancelled)
    }
}
