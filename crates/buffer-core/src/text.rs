//! Line storage primitives shared by the buffer's recorded and unrecorded edit paths.
//!
//! Every function here takes character columns and assumes positions were validated (or derived
//! from a valid operation) by the caller; out-of-range input is clamped rather than panicking.

use crate::position::Position;

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    // `str::split('\n')` keeps trailing empty segments: N newlines => N+1 lines.
    text.split('\n').map(str::to_string).collect()
}

pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte index of the `column`-th char of `line`, clamped to the line end.
pub(crate) fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

/// Position reached after inserting `text` at `start`.
pub(crate) fn end_position(start: Position, text: &str) -> Position {
    match text.rsplit_once('\n') {
        None => Position::new(start.line, start.column + char_len(text)),
        Some((head, tail)) => {
            let breaks = head.matches('\n').count() + 1;
            Position::new(start.line + breaks, char_len(tail))
        }
    }
}

/// Clamp `pos` into the addressable range of `lines` (which must be non-empty).
pub(crate) fn clamp_position(lines: &[String], pos: Position) -> Position {
    let line = pos.line.min(lines.len().saturating_sub(1));
    let line_len = lines.get(line).map_or(0, |l| char_len(l));
    Position::new(line, pos.column.min(line_len))
}

pub(crate) fn insert_text(lines: &mut Vec<String>, pos: Position, text: &str) {
    let pos = clamp_position(lines, pos);
    let line = &mut lines[pos.line];
    let cut = byte_index(line, pos.column);
    let suffix = line.split_off(cut);

    let mut fragments = text.split('\n');
    line.push_str(fragments.next().unwrap_or_default());

    let mut tail: Vec<String> = fragments.map(str::to_string).collect();
    match tail.last_mut() {
        None => {
            line.push_str(&suffix);
            return;
        }
        Some(last) => last.push_str(&suffix),
    }
    let at = pos.line + 1;
    lines.splice(at..at, tail);
}

/// Remove `[from, to)` and merge the enclosing lines. `from <= to` is expected.
pub(crate) fn delete_range(lines: &mut Vec<String>, from: Position, to: Position) {
    let from = clamp_position(lines, from);
    let to = clamp_position(lines, to).max(from);

    if from.line == to.line {
        let line = &mut lines[from.line];
        let start = byte_index(line, from.column);
        let end = byte_index(line, to.column);
        line.replace_range(start..end, "");
        return;
    }

    let last = &lines[to.line];
    let rest = last[byte_index(last, to.column)..].to_string();
    let first = &mut lines[from.line];
    let cut = byte_index(first, from.column);
    first.truncate(cut);
    first.push_str(&rest);
    lines.drain(from.line + 1..=to.line);
}

/// Text covered by `[from, to)`, with interior line breaks as `'\n'`.
pub(crate) fn extract_range(lines: &[String], from: Position, to: Position) -> String {
    let from = clamp_position(lines, from);
    let to = clamp_position(lines, to).max(from);

    let first = &lines[from.line];
    if from.line == to.line {
        return first[byte_index(first, from.column)..byte_index(first, to.column)].to_string();
    }

    let mut out = String::new();
    out.push_str(&first[byte_index(first, from.column)..]);
    for line in &lines[from.line + 1..to.line] {
        out.push('\n');
        out.push_str(line);
    }
    out.push('\n');
    let last = &lines[to.line];
    out.push_str(&last[..byte_index(last, to.column)]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text)
    }

    #[test]
    fn test_split_lines_keeps_trailing_empty_line() {
        assert_eq!(lines(""), vec![""]);
        assert_eq!(lines("a\n"), vec!["a", ""]);
        assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_byte_index_counts_chars() {
        assert_eq!(byte_index("héllo", 2), 3);
        assert_eq!(byte_index("héllo", 5), 6);
        assert_eq!(byte_index("héllo", 99), 6);
    }

    #[test]
    fn test_end_position() {
        let start = Position::new(2, 3);
        assert_eq!(end_position(start, ""), start);
        assert_eq!(end_position(start, "ab"), Position::new(2, 5));
        assert_eq!(end_position(start, "ab\n"), Position::new(3, 0));
        assert_eq!(end_position(start, "a\nb\ncd"), Position::new(4, 2));
    }

    #[test]
    fn test_insert_and_delete_multiline() {
        let mut ls = lines("hello world");
        insert_text(&mut ls, Position::new(0, 5), ",\nbig\nwide");
        assert_eq!(ls, vec!["hello,", "big", "wide world"]);

        let removed = extract_range(&ls, Position::new(0, 5), Position::new(2, 4));
        assert_eq!(removed, ",\nbig\nwide");
        delete_range(&mut ls, Position::new(0, 5), Position::new(2, 4));
        assert_eq!(ls, vec!["hello world"]);
    }

    #[test]
    fn test_non_ascii_columns() {
        let mut ls = lines("añb");
        insert_text(&mut ls, Position::new(0, 2), "é");
        assert_eq!(ls, vec!["añéb"]);
        assert_eq!(extract_range(&ls, Position::new(0, 1), Position::new(0, 3)), "ñé");
        delete_range(&mut ls, Position::new(0, 1), Position::new(0, 3));
        assert_eq!(ls, vec!["ab"]);
    }

    #[test]
    fn test_clamp_position() {
        let ls = lines("abc\nd");
        assert_eq!(clamp_position(&ls, Position::new(9, 9)), Position::new(1, 1));
        assert_eq!(clamp_position(&ls, Position::new(0, 9)), Position::new(0, 3));
    }
}
