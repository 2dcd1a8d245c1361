//! Atomic edit records.
//!
//! An [`Operation`] captures one edit with enough data to invert it: the deleted text is taken
//! from the buffer *before* the mutation. Operations are the unit of undo/redo and the payload a
//! host would ship to replay an edit on another buffer (see [`crate::Buffer::apply`]).

use std::time::SystemTime;

use uuid::Uuid;

use crate::buffer::BufferId;
use crate::position::Position;

/// Globally unique identifier of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationId(Uuid);

impl OperationId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// The closed set of edit kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    /// `text` was inserted at the operation start.
    Insert {
        /// Inserted text.
        text: String,
    },
    /// The range `[start, end)` was removed.
    Delete {
        /// Exclusive end of the removed range, in pre-edit coordinates.
        end: Position,
        /// Exact removed text.
        deleted: String,
    },
    /// The range `[start, end)` was replaced by `text`.
    Replace {
        /// Exclusive end of the replaced range, in pre-edit coordinates.
        end: Position,
        /// Text that took the place of the range.
        text: String,
        /// Exact text that was replaced.
        deleted: String,
    },
}

impl OperationKind {
    /// Human readable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "Insert",
            Self::Delete { .. } => "Delete",
            Self::Replace { .. } => "Replace",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One atomic, invertible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    id: OperationId,
    sequence: u64,
    start: Position,
    kind: OperationKind,
    timestamp: SystemTime,
    buffer_id: BufferId,
}

impl Operation {
    /// Build an operation stamped with a fresh id and the current time.
    ///
    /// Operations built this way carry sequence number `0`; buffers number the operations they
    /// record themselves.
    pub fn new(buffer_id: BufferId, start: Position, kind: OperationKind) -> Self {
        Self {
            id: OperationId::new(),
            sequence: 0,
            start,
            kind,
            timestamp: SystemTime::now(),
            buffer_id,
        }
    }

    /// Shorthand for an [`OperationKind::Insert`] operation.
    pub fn insert(buffer_id: BufferId, start: Position, text: impl Into<String>) -> Self {
        Self::new(buffer_id, start, OperationKind::Insert { text: text.into() })
    }

    /// Shorthand for an [`OperationKind::Delete`] operation.
    pub fn delete(
        buffer_id: BufferId,
        start: Position,
        end: Position,
        deleted: impl Into<String>,
    ) -> Self {
        Self::new(
            buffer_id,
            start,
            OperationKind::Delete {
                end,
                deleted: deleted.into(),
            },
        )
    }

    /// Shorthand for an [`OperationKind::Replace`] operation.
    pub fn replace(
        buffer_id: BufferId,
        start: Position,
        end: Position,
        text: impl Into<String>,
        deleted: impl Into<String>,
    ) -> Self {
        Self::new(
            buffer_id,
            start,
            OperationKind::Replace {
                end,
                text: text.into(),
                deleted: deleted.into(),
            },
        )
    }

    pub(crate) fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Unique operation id.
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Position of this operation in its buffer's recording order (1-based, `0` if unrecorded).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Start position of the edit.
    pub fn start(&self) -> Position {
        self.start
    }

    /// End of the removed range for deletes and replaces.
    pub fn end(&self) -> Option<Position> {
        match &self.kind {
            OperationKind::Insert { .. } => None,
            OperationKind::Delete { end, .. } | OperationKind::Replace { end, .. } => Some(*end),
        }
    }

    /// The edit kind and its payload.
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    /// Kind name (`"Insert"`, `"Delete"` or `"Replace"`).
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Text added by this edit (empty for deletes).
    pub fn inserted_text(&self) -> &str {
        match &self.kind {
            OperationKind::Insert { text } | OperationKind::Replace { text, .. } => text,
            OperationKind::Delete { .. } => "",
        }
    }

    /// Text removed by this edit (empty for inserts).
    pub fn deleted_text(&self) -> &str {
        match &self.kind {
            OperationKind::Delete { deleted, .. } | OperationKind::Replace { deleted, .. } => {
                deleted
            }
            OperationKind::Insert { .. } => "",
        }
    }

    /// Wall-clock time the operation was created.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Buffer the operation was recorded against.
    pub fn buffer_id(&self) -> &BufferId {
        &self.buffer_id
    }
}
