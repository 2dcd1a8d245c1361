//! Search and replace over a [`Buffer`].
//!
//! The engine is stateless: every call reads the buffer's current content and recomputes the full
//! match set. Matches are reported as buffer [`Position`]s (character columns) plus the character
//! offset of their start in [`Buffer::content`]. Two modes are supported:
//!
//! - plain text (escaped and compiled into a regex), optionally whole-word
//! - regex
//!
//! Replacements go through [`Buffer::replace`], so each one is recorded as its own undo step.
//!
//! # Example
//!
//! ```rust
//! use buffer_core::{Buffer, SearchOptions, search};
//!
//! let mut buffer = Buffer::from_content("notes", "hello world hello");
//! let count = search::replace_all(&mut buffer, "hello", "hi", SearchOptions::default()).unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(buffer.content(), "hi world hi");
//! ```

use regex::{Regex, RegexBuilder};

use crate::buffer::Buffer;
use crate::error::{BufferError, ReplaceError, SearchError};
use crate::operation::Operation;
use crate::position::Position;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, plain-text matches must not touch a letter, digit or `_` on either side.
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
    /// If `true`, [`find_next`]/[`find_previous`] continue from the other end of the document.
    pub wrap_around: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            regex: false,
            wrap_around: true,
        }
    }
}

/// One located occurrence of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
    /// The matched text, as it appears in the buffer.
    pub text: String,
    /// Zero-based ordinal of this match within its [`SearchResult`].
    pub index: usize,
    /// Length of the match in characters.
    pub length: usize,
    /// Character offset of `start` in [`Buffer::content`].
    pub offset: usize,
}

/// Every match of a query, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The query as given.
    pub query: String,
    /// Options the search ran with.
    pub options: SearchOptions,
    /// Non-overlapping matches in ascending order.
    pub matches: Vec<Match>,
}

impl SearchResult {
    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Char offsets of each line start in a content string.
#[derive(Debug)]
struct LineStarts(Vec<usize>);

impl LineStarts {
    fn new(content: &str) -> Self {
        let mut starts = vec![0];
        for (idx, ch) in content.chars().enumerate() {
            if ch == '\n' {
                starts.push(idx + 1);
            }
        }
        Self(starts)
    }

    fn position(&self, char_offset: usize) -> Position {
        let line = self
            .0
            .partition_point(|&start| start <= char_offset)
            .saturating_sub(1);
        Position::new(line, char_offset - self.0[line])
    }
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()?)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(content: &str, start: usize, end: usize) -> bool {
    let before = content[..start].chars().next_back();
    let after = content[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Byte ranges of literal occurrences, left to right, non-overlapping.
///
/// `re` is an escaped non-empty query, so every match has a non-zero length.
fn literal_ranges(re: &Regex, content: &str, whole_word: bool) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut at = 0;
    while at <= content.len() {
        let Some(m) = re.find_at(content, at) else {
            break;
        };
        if whole_word && !is_whole_word(content, m.start(), m.end()) {
            // Resume one char after the rejected candidate's start.
            at = m.start() + content[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        ranges.push(m.range());
        at = m.end();
    }
    ranges
}

fn regex_ranges(re: &Regex, content: &str) -> Vec<std::ops::Range<usize>> {
    re.find_iter(content).map(|m| m.range()).collect()
}

/// Find every occurrence of `query` in `buffer`.
///
/// - An empty `query` yields an empty result.
/// - Malformed regex patterns yield [`SearchError::InvalidPattern`].
/// - Regex matches may be empty (`^`, `$`, `\b`); replacing one inserts at that position.
/// - `^` and `$` anchor to the whole content unless the pattern enables `(?m)`.
pub fn search(
    buffer: &Buffer,
    query: &str,
    options: SearchOptions,
) -> Result<SearchResult, SearchError> {
    let mut result = SearchResult {
        query: query.to_string(),
        options,
        matches: Vec::new(),
    };
    if query.is_empty() {
        return Ok(result);
    }

    let re = compile_search_regex(query, options)?;
    let content = buffer.content();
    let ranges = if options.regex {
        regex_ranges(&re, &content)
    } else {
        literal_ranges(&re, &content, options.whole_word)
    };

    let starts = LineStarts::new(&content);
    // Walk the ranges in order, counting chars incrementally instead of from offset 0 each time.
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    for (index, range) in ranges.into_iter().enumerate() {
        char_cursor += content[byte_cursor..range.start].chars().count();
        let text = &content[range.clone()];
        let length = text.chars().count();

        result.matches.push(Match {
            start: starts.position(char_cursor),
            end: starts.position(char_cursor + length),
            text: text.to_string(),
            index,
            length,
            offset: char_cursor,
        });

        char_cursor += length;
        byte_cursor = range.end;
    }

    Ok(result)
}

/// Convert a character offset in [`Buffer::content`] to a position, clamping past-the-end offsets.
pub fn offset_to_position(buffer: &Buffer, char_offset: usize) -> Position {
    let content = buffer.content();
    let mut line = 0;
    let mut column = 0;
    for ch in content.chars().take(char_offset) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    Position::new(line, column)
}

/// Convert a position to a character offset in [`Buffer::content`].
///
/// Columns past the line end clamp to the line end; lines past the last line clamp to the end of
/// the content.
pub fn position_to_offset(buffer: &Buffer, pos: Position) -> usize {
    if pos.line >= buffer.line_count() {
        return buffer.char_count();
    }
    let preceding: usize = (0..pos.line).map(|line| buffer.line_len(line) + 1).sum();
    preceding + pos.column.min(buffer.line_len(pos.line))
}

/// First match starting strictly after `after`.
///
/// With [`SearchOptions::wrap_around`] the first match of the document is returned when nothing
/// follows `after`.
pub fn find_next(
    buffer: &Buffer,
    query: &str,
    after: Position,
    options: SearchOptions,
) -> Result<Option<Match>, SearchError> {
    let result = search(buffer, query, options)?;
    let after = position_to_offset(buffer, after);

    let wrapped = || result.matches.first().filter(|_| options.wrap_around);
    Ok(result
        .matches
        .iter()
        .find(|m| m.offset > after)
        .or_else(wrapped)
        .cloned())
}

/// Last match starting strictly before `before`.
///
/// With [`SearchOptions::wrap_around`] the last match of the document is returned when nothing
/// precedes `before`.
pub fn find_previous(
    buffer: &Buffer,
    query: &str,
    before: Position,
    options: SearchOptions,
) -> Result<Option<Match>, SearchError> {
    let result = search(buffer, query, options)?;
    let before = position_to_offset(buffer, before);

    let wrapped = || result.matches.last().filter(|_| options.wrap_around);
    Ok(result
        .matches
        .iter()
        .rev()
        .find(|m| m.offset < before)
        .or_else(wrapped)
        .cloned())
}

/// Replace a single match, recording one undoable operation.
///
/// `found` must come from a search over the buffer's current content.
pub fn replace(
    buffer: &mut Buffer,
    found: &Match,
    replacement: &str,
) -> Result<Operation, BufferError> {
    buffer.replace(found.start, found.end, replacement)
}

/// Replace every match of `query`, returning the number of replacements.
///
/// Matches are computed once and replaced from last to first, so positions of the matches still
/// to be processed stay valid. Each replacement is its own undo step.
pub fn replace_all(
    buffer: &mut Buffer,
    query: &str,
    replacement: &str,
    options: SearchOptions,
) -> Result<usize, ReplaceError> {
    let result = search(buffer, query, options)?;

    let mut count = 0;
    for found in result.matches.iter().rev() {
        replace(buffer, found, replacement)?;
        count += 1;
    }

    tracing::debug!(buffer = %buffer.id(), query, count, "replaced all matches");
    Ok(count)
}
