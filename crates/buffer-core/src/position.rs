//! Position and span value types.
//!
//! Positions are logical `(line, column)` coordinates where `column` counts Unicode scalar values
//! (`char`s) within the line, never bytes. A position is only meaningful for the content snapshot
//! it was derived from; any mutation may invalidate it.

use std::cmp::Ordering;

/// Logical position (line and column), both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in characters within the line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The start of the document.
    pub const fn origin() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Order two positions so that the first is not after the second.
pub fn normalize(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A half-open range `[start, end)` between two positions.
///
/// `start <= end` always holds for spans built with [`Span::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Span {
    /// Create a span from an unordered pair of positions.
    pub fn new(a: Position, b: Position) -> Self {
        let (start, end) = normalize(a, b);
        Self { start, end }
    }

    /// Returns `true` if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `pos` lies inside the half-open span.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}
