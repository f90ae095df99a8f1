//! Bounded undo/redo history over cloneable snapshots.
//!
//! [`HistoryLog`] is a linear, branch-discarding log: a `Vec` of snapshots
//! plus a cursor index, bounded to a maximum depth. Pushing while the cursor
//! sits before the end discards every later snapshot, so redo information for
//! an abandoned future is lost permanently. When the bound is exceeded the
//! oldest snapshot is evicted from the front and the cursor shifts down with
//! it, keeping it on the same logical snapshot.
//!
//! Snapshots are cloned on both store and retrieve. Callers may freely mutate
//! a returned snapshot, and later mutation of live state cannot retroactively
//! corrupt a stored one. There is no error path: undo/redo past a boundary
//! are no-ops signalled by `None`.

/// Default maximum number of retained snapshots.
pub const DEFAULT_HISTORY_BOUND: usize = 10;

#[derive(Debug)]
pub struct HistoryLog<T: Clone> {
    states: Vec<T>,
    current_index: usize,
    bound: usize,
}

impl<T: Clone> HistoryLog<T> {
    pub fn new() -> Self {
        Self::with_bound(DEFAULT_HISTORY_BOUND)
    }

    /// Create a log retaining at most `bound` snapshots. A bound of zero is
    /// treated as one so the cursor invariant holds after the first push.
    pub fn with_bound(bound: usize) -> Self {
        Self { states: Vec::new(), current_index: 0, bound: bound.max(1) }
    }

    /// Record a snapshot as the new current state.
    ///
    /// Discards any redo tail beyond the cursor, then appends a clone of
    /// `state`. If the log now exceeds its bound, the oldest snapshot is
    /// evicted and the cursor decremented to compensate.
    pub fn push(&mut self, state: &T) {
        if !self.states.is_empty() && self.current_index < self.states.len() - 1 {
            self.states.truncate(self.current_index + 1);
        }

        self.states.push(state.clone());
        self.current_index = self.states.len() - 1;

        if self.states.len() > self.bound {
            self.states.remove(0);
            self.current_index -= 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.states.is_empty() && self.current_index < self.states.len() - 1
    }

    /// Step the cursor back and return a clone of the snapshot now under it.
    /// Returns `None` when there is nothing before the cursor.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(self.states[self.current_index].clone())
    }

    /// Step the cursor forward and return a clone of the snapshot now under
    /// it. Returns `None` when the cursor is already at the end.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        Some(self.states[self.current_index].clone())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<T: Clone> Default for HistoryLog<T> {
    fn default() -> Self {
        Self::new()
    }
}
