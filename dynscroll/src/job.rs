use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::{DynScrollError, Edge, Entry, SizeUpdate};

/// Shared cancellation flag handed to the item source with every request.
///
/// The engine cancels it when the request is superseded. Sources should check it
/// cooperatively and may drop their work early.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Identifies one load request. Pass it back to `DynScroll::complete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Computes absolute indexes for a batch inserted at one edge.
///
/// `boundary` is the first loaded index for [`Edge::Prev`] and the last loaded index for
/// [`Edge::Next`] (one below the seed index when the window is empty).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryFactory {
    edge: Edge,
    boundary: i64,
}

impl EntryFactory {
    pub(crate) fn new(edge: Edge, boundary: i64) -> Self {
        Self { edge, boundary }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn boundary(&self) -> i64 {
        self.boundary
    }

    /// Slot for local position `i` in a batch of `total` entries.
    pub fn slot(&self, i: usize, total: usize) -> EntrySlot {
        let index = match self.edge {
            Edge::Next => self.boundary + i as i64 + 1,
            Edge::Prev => self.boundary - total as i64 + i as i64,
        };
        EntrySlot { index }
    }

    /// Builds the entry for local position `i` in a batch of `total` entries.
    pub fn entry<T>(&self, i: usize, total: usize, size: f64, payload: T) -> Entry<T> {
        Entry::new(self.slot(i, total).index, size, payload)
    }

    /// Builds a whole batch from payloads and their initial sizes.
    pub fn batch<T>(&self, items: impl IntoIterator<Item = (f64, T)>) -> Vec<Entry<T>> {
        let items: Vec<(f64, T)> = items.into_iter().collect();
        let total = items.len();
        items
            .into_iter()
            .enumerate()
            .map(|(i, (size, payload))| self.entry(i, total, size, payload))
            .collect()
    }
}

/// The absolute index assigned to one entry of a batch, plus its size-update hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntrySlot {
    pub index: i64,
}

impl EntrySlot {
    /// A size update for this slot; feed it to `DynScroll::patch`.
    pub fn size_update(&self, size: f64) -> SizeUpdate {
        SizeUpdate {
            index: self.index,
            size,
        }
    }
}

/// A successful load result.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded<T> {
    /// Entries adjoining the requested edge, in ascending index order.
    Items(Vec<Entry<T>>),
    /// No more data in this direction.
    EndOfStream,
}

pub type LoadResult<T> = Result<Loaded<T>, DynScrollError>;

/// What an item source returns from `load_more`.
#[derive(Debug)]
pub enum LoadPoll<T> {
    /// The result is available now.
    Ready(LoadResult<T>),
    /// The result will be delivered later through `DynScroll::complete`.
    Pending,
}

/// Everything an item source needs to serve one request.
#[derive(Debug)]
pub struct LoadRequest<'a, T> {
    pub edge: Edge,
    pub factory: EntryFactory,
    pub entries: &'a [Entry<T>],
    pub cancellation: CancellationToken,
    pub ticket: LoadTicket,
}

/// Supplies entries on demand.
///
/// Closures `FnMut(LoadRequest<'_, T>) -> LoadPoll<T>` implement this trait.
pub trait ItemSource<T> {
    fn load_more(&mut self, request: LoadRequest<'_, T>) -> LoadPoll<T>;
}

impl<T, F> ItemSource<T> for F
where
    F: FnMut(LoadRequest<'_, T>) -> LoadPoll<T>,
{
    fn load_more(&mut self, request: LoadRequest<'_, T>) -> LoadPoll<T> {
        self(request)
    }
}

/// An in-flight (or stalled) load for one edge.
#[derive(Clone, Debug)]
pub(crate) struct Job {
    pub(crate) edge: Edge,
    pub(crate) boundary: i64,
    pub(crate) ticket: LoadTicket,
    pub(crate) token: CancellationToken,
    pub(crate) stalled: bool,
}

/// At most one job per edge.
#[derive(Debug, Default)]
pub(crate) struct JobSlots {
    prev: Option<Job>,
    next: Option<Job>,
    next_ticket: u64,
}

impl JobSlots {
    pub(crate) fn get(&self, edge: Edge) -> Option<&Job> {
        match edge {
            Edge::Prev => self.prev.as_ref(),
            Edge::Next => self.next.as_ref(),
        }
    }

    fn slot_mut(&mut self, edge: Edge) -> &mut Option<Job> {
        match edge {
            Edge::Prev => &mut self.prev,
            Edge::Next => &mut self.next,
        }
    }

    /// Cancels and forgets the job for `edge`.
    pub(crate) fn cancel(&mut self, edge: Edge) {
        if let Some(job) = self.slot_mut(edge).take() {
            ds_trace!(?edge, ticket = job.ticket.0, "cancel load");
            job.token.cancel();
        }
    }

    /// Registers a new job for `edge`, superseding any previous one.
    pub(crate) fn start(&mut self, edge: Edge, boundary: i64) -> Job {
        self.cancel(edge);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let job = Job {
            edge,
            boundary,
            ticket: LoadTicket(self.next_ticket),
            token: CancellationToken::new(),
            stalled: false,
        };
        *self.slot_mut(edge) = Some(job.clone());
        job
    }

    /// Looks up a live (not stalled) job by ticket.
    pub(crate) fn find(&self, ticket: LoadTicket) -> Option<&Job> {
        [self.prev.as_ref(), self.next.as_ref()]
            .into_iter()
            .flatten()
            .find(|job| job.ticket == ticket && !job.stalled)
    }

    pub(crate) fn finish(&mut self, edge: Edge) {
        *self.slot_mut(edge) = None;
    }

    pub(crate) fn stall(&mut self, edge: Edge) {
        if let Some(job) = self.slot_mut(edge) {
            job.stalled = true;
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        self.cancel(Edge::Prev);
        self.cancel(Edge::Next);
    }
}
