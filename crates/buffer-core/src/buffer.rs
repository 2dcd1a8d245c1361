//! Line-oriented text buffer with linear undo/redo.
//!
//! A [`Buffer`] stores its content as a list of lines (always at least one; the empty document is
//! a single empty line). All edits go through [`Buffer::insert`], [`Buffer::delete`] and
//! [`Buffer::replace`], which validate positions, mutate the lines, and record one
//! [`Operation`] per call in the buffer's [`History`]. [`Buffer::undo`] and [`Buffer::redo`]
//! replay recorded operations directly against the line storage without recording anything.
//!
//! # Example
//!
//! ```rust
//! use buffer_core::{Buffer, Position};
//!
//! let mut buffer = Buffer::from_content("scratch", "hello world");
//! buffer.insert(Position::new(0, 5), ",\nbig").unwrap();
//! assert_eq!(buffer.content(), "hello,\nbig world");
//!
//! assert!(buffer.undo());
//! assert_eq!(buffer.content(), "hello world");
//! ```

use std::path::{Path, PathBuf};

use crate::error::BufferError;
use crate::history::History;
use crate::operation::{Operation, OperationKind};
use crate::position::{Position, normalize};
use crate::text;

/// Identifier of a buffer, unique within a [`crate::BufferManager`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferId(String);

impl BufferId {
    /// Create an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BufferId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BufferId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An editable text buffer.
#[derive(Debug, Clone)]
pub struct Buffer {
    id: BufferId,
    lines: Vec<String>,
    cursor: Position,
    dirty: bool,
    path: Option<PathBuf>,
    history: History<Operation>,
    last_sequence: u64,
}

impl Buffer {
    /// Create an empty, clean buffer.
    pub fn new(id: impl Into<BufferId>) -> Self {
        Self {
            id: id.into(),
            lines: vec![String::new()],
            cursor: Position::origin(),
            dirty: false,
            path: None,
            history: History::new(),
            last_sequence: 0,
        }
    }

    /// Create a clean buffer holding `content`.
    pub fn from_content(id: impl Into<BufferId>, content: &str) -> Self {
        let mut buffer = Self::new(id);
        buffer.set_content(content);
        buffer.mark_clean();
        buffer
    }

    /// Replace the whole content without recording an operation.
    ///
    /// The cursor returns to the origin, the undo/redo log is discarded (its positions no longer
    /// address this content) and the buffer becomes dirty.
    pub fn set_content(&mut self, content: &str) {
        self.lines = text::split_lines(content);
        self.cursor = Position::origin();
        self.history.clear();
        self.dirty = true;
    }

    /// Buffer id.
    pub fn id(&self) -> &BufferId {
        &self.id
    }

    pub(crate) fn rename(&mut self, id: BufferId) {
        self.id = id;
    }

    /// Full text, lines joined with `'\n'`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// A copy of every line.
    pub fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// A copy of line `index`, or an empty string when out of range.
    pub fn line(&self, index: usize) -> String {
        self.lines.get(index).cloned().unwrap_or_default()
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of line `index` in characters (`0` when out of range).
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| text::char_len(line))
    }

    /// Number of characters in [`Buffer::content`], line breaks included.
    pub fn char_count(&self) -> usize {
        let chars: usize = self.lines.iter().map(|line| text::char_len(line)).sum();
        chars + self.lines.len() - 1
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamping it into the current content.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = text::clamp_position(&self.lines, pos);
    }

    /// Whether the buffer was mutated since the last [`Buffer::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget pending modifications (typically after the host saved the content).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// File path associated with the buffer, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Associate the buffer with a file path.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Reset to a single empty line, discarding the undo/redo log.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor = Position::origin();
        self.history.clear();
        self.dirty = true;
    }

    /// The buffer's undo/redo log.
    pub fn history(&self) -> &History<Operation> {
        &self.history
    }

    /// Whether [`Buffer::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Buffer::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Insert `text` at `pos`. Line breaks in `text` split the line.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<Operation, BufferError> {
        self.check_position(pos)?;
        text::insert_text(&mut self.lines, pos, text);
        Ok(self.record(
            pos,
            OperationKind::Insert {
                text: text.to_string(),
            },
        ))
    }

    /// Delete the text between two positions (in either order).
    pub fn delete(&mut self, from: Position, to: Position) -> Result<Operation, BufferError> {
        let (from, to) = normalize(from, to);
        self.check_position(from)?;
        self.check_position(to)?;

        let deleted = text::extract_range(&self.lines, from, to);
        text::delete_range(&mut self.lines, from, to);
        Ok(self.record(from, OperationKind::Delete { end: to, deleted }))
    }

    /// Replace the text between two positions with `text`, as a single undo step.
    pub fn replace(
        &mut self,
        from: Position,
        to: Position,
        text: &str,
    ) -> Result<Operation, BufferError> {
        let (from, to) = normalize(from, to);
        self.check_position(from)?;
        self.check_position(to)?;

        let deleted = text::extract_range(&self.lines, from, to);
        text::delete_range(&mut self.lines, from, to);
        text::insert_text(&mut self.lines, from, text);
        Ok(self.record(
            from,
            OperationKind::Replace {
                end: to,
                text: text.to_string(),
                deleted,
            },
        ))
    }

    /// Execute an externally supplied operation without recording it.
    ///
    /// The operation's positions must address the current content; otherwise the buffer is left
    /// untouched and [`BufferError::InvalidPosition`] is returned. This is stricter than an
    /// unchecked replay: out-of-range operations are rejected, never clamped.
    pub fn apply(&mut self, op: &Operation) -> Result<(), BufferError> {
        let start = op.start();
        self.check_position(start)?;

        match op.kind() {
            OperationKind::Insert { text } => {
                text::insert_text(&mut self.lines, start, text);
            }
            OperationKind::Delete { end, .. } => {
                self.check_position(*end)?;
                let (from, to) = normalize(start, *end);
                text::delete_range(&mut self.lines, from, to);
            }
            OperationKind::Replace { end, text, .. } => {
                self.check_position(*end)?;
                let (from, to) = normalize(start, *end);
                text::delete_range(&mut self.lines, from, to);
                text::insert_text(&mut self.lines, from, text);
            }
        }

        tracing::trace!(buffer = %self.id, op = %op.id(), kind = op.kind_name(), %start, "applied operation");
        self.touch();
        Ok(())
    }

    /// Revert the most recent applied operation. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.undo() else {
            return false;
        };

        let start = op.start();
        match op.kind() {
            OperationKind::Insert { text } => {
                let end = text::end_position(start, text);
                text::delete_range(&mut self.lines, start, end);
            }
            OperationKind::Delete { deleted, .. } => {
                text::insert_text(&mut self.lines, start, deleted);
            }
            OperationKind::Replace { text, deleted, .. } => {
                let end = text::end_position(start, text);
                text::delete_range(&mut self.lines, start, end);
                text::insert_text(&mut self.lines, start, deleted);
            }
        }

        tracing::trace!(buffer = %self.id, op = %op.id(), kind = op.kind_name(), "undo");
        self.touch();
        true
    }

    /// Re-apply the most recently undone operation. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.redo() else {
            return false;
        };

        let start = op.start();
        match op.kind() {
            OperationKind::Insert { text } => {
                text::insert_text(&mut self.lines, start, text);
            }
            OperationKind::Delete { end, .. } => {
                text::delete_range(&mut self.lines, start, *end);
            }
            OperationKind::Replace { end, text, .. } => {
                text::delete_range(&mut self.lines, start, *end);
                text::insert_text(&mut self.lines, start, text);
            }
        }

        tracing::trace!(buffer = %self.id, op = %op.id(), kind = op.kind_name(), "redo");
        self.touch();
        true
    }

    fn check_position(&self, pos: Position) -> Result<(), BufferError> {
        match self.lines.get(pos.line) {
            Some(line) if pos.column <= text::char_len(line) => Ok(()),
            line => Err(BufferError::InvalidPosition {
                line: pos.line,
                column: pos.column,
                line_count: self.lines.len(),
                line_len: line.map_or(0, |l| text::char_len(l)),
            }),
        }
    }

    fn record(&mut self, start: Position, kind: OperationKind) -> Operation {
        self.last_sequence += 1;
        let op = Operation::new(self.id.clone(), start, kind).with_sequence(self.last_sequence);
        tracing::trace!(
            buffer = %self.id,
            op = %op.id(),
            seq = op.sequence(),
            kind = op.kind_name(),
            %start,
            "recorded operation"
        );
        self.history.push(op.clone());
        self.touch();
        op
    }

    /// Mark dirty and keep the cursor inside the (possibly shrunken) content.
    fn touch(&mut self) {
        self.dirty = true;
        self.cursor = text::clamp_position(&self.lines, self.cursor);
    }
}
