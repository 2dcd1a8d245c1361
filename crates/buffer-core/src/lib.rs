#![warn(missing_docs)]
//! Buffer Core - Headless Text Buffer Engine
//!
//! # Overview
//!
//! `buffer-core` is the editing kernel of a terminal context editor. It owns text, not pixels:
//! rendering, key bindings, syntax highlighting and file persistence policy live in the host.
//!
//! # Core Features
//!
//! - **Line Storage**: Line-oriented buffer with `(line, column)` addressing in characters
//! - **Atomic Operations**: Every insert/delete/replace yields one invertible [`Operation`]
//! - **Undo/Redo**: Linear history; a new edit after an undo truncates the redo branch
//! - **Buffer Registry**: [`BufferManager`] with an active buffer and lock-protected access
//! - **Search & Replace**: Plain, whole-word, case-sensitive and regex search by position
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Buffer Manager (registry, active buffer)   │  ← Shared access
//! ├──────────────────────┬──────────────────────┤
//! │  Search Engine       │                      │  ← Stateless, edits via Buffer::replace
//! ├──────────────────────┘                      │
//! │  Buffer (lines, cursor, dirty, path)        │  ← Mutation API
//! ├─────────────────────────────────────────────┤
//! │  History<Operation>                         │  ← Text-agnostic log
//! ├─────────────────────────────────────────────┤
//! │  Position / Span / Operation                │  ← Value types
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use buffer_core::{Buffer, Position, SearchOptions, search};
//!
//! let mut buffer = Buffer::from_content("main", "one two\nthree");
//!
//! buffer.replace(Position::new(0, 4), Position::new(0, 7), "2").unwrap();
//! assert_eq!(buffer.content(), "one 2\nthree");
//!
//! let next = search::find_next(&buffer, "three", Position::origin(), SearchOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(next.start, Position::new(1, 0));
//!
//! assert!(buffer.undo());
//! assert_eq!(buffer.content(), "one two\nthree");
//! ```
//!
//! # Module Description
//!
//! - [`position`] - Position and span value types
//! - [`operation`] - Atomic edit records
//! - [`history`] - Linear undo/redo log
//! - [`buffer`] - Editable line buffer
//! - [`manager`] - Buffer registry
//! - [`search`] - Search and replace
//! - [`error`] - Error types
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`trace` for individual edits, `debug` for registry changes
//! and bulk replacements) and never installs a subscriber.

pub mod buffer;
pub mod error;
pub mod history;
pub mod manager;
pub mod operation;
pub mod position;
pub mod search;
mod text;

pub use buffer::{Buffer, BufferId};
pub use error::{BufferError, ManagerError, ReplaceError, SearchError};
pub use history::History;
pub use manager::{BufferManager, BufferRef};
pub use operation::{Operation, OperationId, OperationKind};
pub use position::{Position, Span, normalize};
pub use search::{Match, SearchOptions, SearchResult};
