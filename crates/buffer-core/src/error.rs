//! Error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by buffer edits.
pub enum BufferError {
    #[error(
        "position {line}:{column} out of range (line count {line_count}, line length {line_len})"
    )]
    /// A position addressed a line or column outside the current content.
    InvalidPosition {
        /// Requested line.
        line: usize,
        /// Requested column.
        column: usize,
        /// Number of lines in the buffer at the time of the request.
        line_count: usize,
        /// Length in characters of the requested line, or `0` if the line does not exist.
        line_len: usize,
    },
}

#[derive(Debug, Error)]
/// Errors produced by the search engine.
pub enum SearchError {
    #[error("invalid pattern: {0}")]
    /// The regular expression failed to compile.
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
/// Errors produced by [`crate::search::replace_all`].
pub enum ReplaceError {
    #[error(transparent)]
    /// Locating the matches failed.
    Search(#[from] SearchError),

    #[error(transparent)]
    /// Applying a replacement to the buffer failed.
    Buffer(#[from] BufferError),
}

#[derive(Debug, Error)]
/// Errors produced by [`crate::BufferManager`].
pub enum ManagerError {
    #[error("failed to read {}: {source}", .path.display())]
    /// Reading a file from disk failed.
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
