//! A headless, bidirectional windowing engine for lazily loaded, variable-size lists.
//!
//! For host-side plumbing (scroll activity, resize tracking, a frame controller), see the
//! `dynscroll-adapter` crate.
//!
//! The engine keeps a contiguous window of entries out of an unbounded sequence (chat logs,
//! feeds, timelines) and stands in for everything else with virtual padding. It loads at both
//! edges as the viewport approaches them, evicts content far from the viewport, and absorbs
//! size changes into the head padding so the content under the user's finger does not jump.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size and scroll offset
//! - an item source that produces entries (synchronously or via tickets)
//! - measured entry sizes
//! - one `tick` per frame, applying the returned scroll correction
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod dynscroll;
mod error;
mod evict;
mod job;
mod options;
mod reconcile;
mod state;
mod task;
mod translate;
mod types;


pub use anchor::{
    AnchorQuery, AnchorSelector, AnchorStrategy, SUBPIXEL_TOLERANCE, default_anchor, touch_anchor,
};
pub use dynscroll::DynScroll;
pub use error::{DynScrollError, SourceError};
pub use evict::{unload_count, watermark};
pub use job::{
    CancellationToken, EntryFactory, EntrySlot, ItemSource, LoadPoll, LoadRequest, LoadResult,
    LoadTicket, Loaded,
};
pub use options::{DynScrollOptions, ErrorCallback, InitialOffset, ProgressCallback};
pub use reconcile::validate_batch;
pub use state::{EdgeDistances, TickReport, ViewportState};
pub use task::{Task, TaskKind};
pub use translate::{
    anchor_distance, content_size, distance_from_index_offset, index_offset_from_distance,
    try_distance_from_index_offset,
};
pub use types::{Anchor, Edge, EdgeStatus, Entry, SizeUpdate, WindowState};
