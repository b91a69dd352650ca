use alloc::vec::Vec;

use crate::{Edge, Entry, SizeUpdate};

/// A deferred mutation of the window, applied by the next `tick`.
#[derive(Clone, Debug, PartialEq)]
pub enum Task<T> {
    Prepend(Vec<Entry<T>>),
    Append(Vec<Entry<T>>),
    UnloadPrev(usize),
    UnloadNext(usize),
    Patch(Vec<SizeUpdate>),
    FixHead,
    FixFoot,
    ForceResync,
}

/// Discriminant of [`Task`], used for queue filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Prepend,
    Append,
    UnloadPrev,
    UnloadNext,
    Patch,
    FixHead,
    FixFoot,
    ForceResync,
}

impl<T> Task<T> {
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Prepend(_) => TaskKind::Prepend,
            Self::Append(_) => TaskKind::Append,
            Self::UnloadPrev(_) => TaskKind::UnloadPrev,
            Self::UnloadNext(_) => TaskKind::UnloadNext,
            Self::Patch(_) => TaskKind::Patch,
            Self::FixHead => TaskKind::FixHead,
            Self::FixFoot => TaskKind::FixFoot,
            Self::ForceResync => TaskKind::ForceResync,
        }
    }

    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Patch(_))
    }
}

impl TaskKind {
    pub(crate) fn load(edge: Edge) -> Self {
        match edge {
            Edge::Prev => Self::Prepend,
            Edge::Next => Self::Append,
        }
    }

    pub(crate) fn unload(edge: Edge) -> Self {
        match edge {
            Edge::Prev => Self::UnloadPrev,
            Edge::Next => Self::UnloadNext,
        }
    }

    pub(crate) fn fix(edge: Edge) -> Self {
        match edge {
            Edge::Prev => Self::FixHead,
            Edge::Next => Self::FixFoot,
        }
    }
}

/// Pending tasks, owned by one engine and drained once per tick.
#[derive(Clone, Debug)]
pub(crate) struct TaskQueue<T> {
    tasks: Vec<Task<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T> TaskQueue<T> {
    pub(crate) fn push(&mut self, task: Task<T>) {
        self.tasks.push(task);
    }

    pub(crate) fn contains(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind() == kind)
    }

    pub(crate) fn remove(&mut self, kind: TaskKind) {
        self.tasks.retain(|t| t.kind() != kind);
    }

    /// Replaces any queued task of the same kind.
    pub(crate) fn replace(&mut self, task: Task<T>) {
        self.remove(task.kind());
        self.push(task);
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Task<T>> {
        self.tasks.iter()
    }

    /// Takes every queued task: structural tasks in arrival order, then patches.
    pub(crate) fn drain_ordered(&mut self) -> (Vec<Task<T>>, Vec<Task<T>>) {
        core::mem::take(&mut self.tasks)
            .into_iter()
            .partition(Task::is_structural)
    }
}
