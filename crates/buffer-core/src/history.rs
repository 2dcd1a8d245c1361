//! Linear undo/redo log.
//!
//! [`History`] is a plain append/seek log with a cursor separating applied entries from entries
//! available to redo. It knows nothing about text: callers hand it records and get records back,
//! and interpreting them (inverting, re-applying) is the caller's job.

/// Ordered log of records plus a cursor.
///
/// The cursor is `None` when nothing is applied; otherwise it indexes the last applied entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Append a record, discarding every entry after the cursor first.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.applied_len());
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Whether there is an applied entry to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether there is an undone entry to redo.
    pub fn can_redo(&self) -> bool {
        self.applied_len() < self.entries.len()
    }

    /// Step the cursor back and return the entry that was undone.
    pub fn undo(&mut self) -> Option<&T> {
        let idx = self.cursor?;
        self.cursor = idx.checked_sub(1);
        self.entries.get(idx)
    }

    /// Step the cursor forward and return the entry to re-apply.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        let idx = self.applied_len();
        self.cursor = Some(idx);
        self.entries.get(idx)
    }

    /// Total number of entries, applied or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the last applied entry.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of entries that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.applied_len()
    }

    /// Number of entries that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.applied_len()
    }

    /// All entries in recording order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Drop every entry and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    fn applied_len(&self) -> usize {
        self.cursor.map_or(0, |idx| idx + 1)
    }
}
