use buffer_core::{Buffer, BufferError, OperationKind, Position};
use pretty_assertions::assert_eq;

#[test]
fn test_new_buffer_is_single_empty_line() {
    let buffer = Buffer::new("test");
    assert_eq!(buffer.id().as_str(), "test");
    assert_eq!(buffer.line_count(), 1);
    assert_eq!(buffer.content(), "");
    assert_eq!(buffer.cursor(), Position::origin());
    assert!(!buffer.is_dirty());
    assert!(!buffer.can_undo());
    assert_eq!(buffer.path(), None);
}

#[test]
fn test_from_content_is_clean() {
    let buffer = Buffer::from_content("test", "line 1\nline 2\nline 3");
    assert_eq!(buffer.line_count(), 3);
    assert_eq!(buffer.line(1), "line 2");
    assert!(!buffer.is_dirty());
    assert!(!buffer.can_undo());
}

#[test]
fn test_trailing_newline_yields_trailing_empty_line() {
    let buffer = Buffer::from_content("test", "a\nb\n");
    assert_eq!(buffer.lines(), vec!["a", "b", ""]);
    assert_eq!(buffer.content(), "a\nb\n");
    assert_eq!(buffer.char_count(), 4);
}

#[test]
fn test_insert_single_line() {
    let mut buffer = Buffer::new("test");
    let op = buffer.insert(Position::origin(), "Hello").unwrap();

    assert_eq!(buffer.content(), "Hello");
    assert_eq!(op.kind_name(), "Insert");
    assert_eq!(op.start(), Position::origin());
    assert_eq!(op.inserted_text(), "Hello");
    assert_eq!(op.end(), None);
    assert_eq!(op.buffer_id().as_str(), "test");
    assert!(buffer.is_dirty());
}

#[test]
fn test_insert_middle_of_line() {
    let mut buffer = Buffer::from_content("test", "Hello World");
    buffer.insert(Position::new(0, 5), ",").unwrap();
    assert_eq!(buffer.content(), "Hello, World");
}

#[test]
fn test_insert_multi_line_fuses_prefix_and_suffix() {
    let mut buffer = Buffer::from_content("test", "start end");
    buffer
        .insert(Position::new(0, 6), "one\ntwo\nthree ")
        .unwrap();

    assert_eq!(buffer.lines(), vec!["start one", "two", "three end"]);
}

#[test]
fn test_insert_n_line_breaks_adds_n_lines() {
    for breaks in 0..5 {
        let mut buffer = Buffer::from_content("test", "abc\ndef");
        let text = "x\n".repeat(breaks);
        buffer.insert(Position::new(1, 1), &text).unwrap();
        assert_eq!(buffer.line_count(), 2 + breaks);
    }
}

#[test]
fn test_insert_at_line_end_is_valid() {
    let mut buffer = Buffer::from_content("test", "abc");
    buffer.insert(Position::new(0, 3), "d").unwrap();
    assert_eq!(buffer.content(), "abcd");
}

#[test]
fn test_insert_out_of_bounds() {
    let mut buffer = Buffer::from_content("test", "abc");

    let err = buffer.insert(Position::new(1, 0), "x").unwrap_err();
    assert_eq!(
        err,
        BufferError::InvalidPosition {
            line: 1,
            column: 0,
            line_count: 1,
            line_len: 0,
        }
    );

    let err = buffer.insert(Position::new(0, 4), "x").unwrap_err();
    assert_eq!(
        err,
        BufferError::InvalidPosition {
            line: 0,
            column: 4,
            line_count: 1,
            line_len: 3,
        }
    );

    assert_eq!(buffer.content(), "abc");
    assert!(!buffer.is_dirty());
    assert!(!buffer.can_undo());
}

#[test]
fn test_delete_single_line() {
    let mut buffer = Buffer::from_content("test", "Hello World");
    let op = buffer
        .delete(Position::new(0, 5), Position::new(0, 11))
        .unwrap();

    assert_eq!(buffer.content(), "Hello");
    assert_eq!(op.deleted_text(), " World");
    assert_eq!(op.end(), Some(Position::new(0, 11)));
}

#[test]
fn test_delete_multi_line_merges_lines() {
    let mut buffer = Buffer::from_content("test", "Line 1\nLine 2\nLine 3\nLine 4");
    let op = buffer
        .delete(Position::new(0, 4), Position::new(2, 4))
        .unwrap();

    assert_eq!(buffer.content(), "Line 3\nLine 4");
    assert_eq!(op.deleted_text(), " 1\nLine 2\nLine");
}

#[test]
fn test_delete_reversed_positions_are_normalized() {
    let mut buffer = Buffer::from_content("test", "Hello World");
    let op = buffer
        .delete(Position::new(0, 11), Position::new(0, 5))
        .unwrap();

    assert_eq!(buffer.content(), "Hello");
    assert_eq!(op.start(), Position::new(0, 5));
    assert_eq!(op.end(), Some(Position::new(0, 11)));
}

#[test]
fn test_delete_invalid_column_is_rejected() {
    let mut buffer = Buffer::from_content("test", "short\nlonger line");
    let err = buffer
        .delete(Position::new(0, 0), Position::new(0, 9))
        .unwrap_err();
    assert!(matches!(err, BufferError::InvalidPosition { column: 9, .. }));
    assert_eq!(buffer.content(), "short\nlonger line");
}

#[test]
fn test_zero_length_delete_and_replace_record_operations() {
    let mut buffer = Buffer::from_content("test", "abc");

    let op = buffer
        .delete(Position::new(0, 1), Position::new(0, 1))
        .unwrap();
    assert_eq!(op.deleted_text(), "");
    assert_eq!(buffer.content(), "abc");
    assert_eq!(buffer.history().len(), 1);

    let op = buffer
        .replace(Position::new(0, 1), Position::new(0, 1), "X")
        .unwrap();
    assert_eq!(op.deleted_text(), "");
    assert_eq!(buffer.content(), "aXbc");
    assert_eq!(buffer.history().len(), 2);
}

#[test]
fn test_replace_single_line() {
    let mut buffer = Buffer::from_content("test", "Hello World");
    let op = buffer
        .replace(Position::new(0, 6), Position::new(0, 11), "Rust")
        .unwrap();

    assert_eq!(buffer.content(), "Hello Rust");
    assert_eq!(
        op.kind(),
        &OperationKind::Replace {
            end: Position::new(0, 11),
            text: "Rust".to_string(),
            deleted: "World".to_string(),
        }
    );
}

#[test]
fn test_replace_multi_line() {
    let mut buffer = Buffer::from_content("test", "Line 1\nLine 2\nLine 3");
    buffer
        .replace(Position::new(0, 5), Position::new(2, 5), "A\nB")
        .unwrap();

    assert_eq!(buffer.content(), "Line A\nB3");
    assert_eq!(buffer.history().len(), 1);
}

#[test]
fn test_non_ascii_columns_are_characters() {
    let mut buffer = Buffer::from_content("test", "naïve café");
    buffer.insert(Position::new(0, 3), "-").unwrap();
    assert_eq!(buffer.content(), "naï-ve café");

    let op = buffer
        .delete(Position::new(0, 8), Position::new(0, 11))
        .unwrap();
    assert_eq!(op.deleted_text(), "afé");
    assert_eq!(buffer.content(), "naï-ve c");
}

#[test]
fn test_operations_are_sequenced() {
    let mut buffer = Buffer::new("test");
    let a = buffer.insert(Position::origin(), "a").unwrap();
    let b = buffer.insert(Position::new(0, 1), "b").unwrap();

    assert_eq!(a.sequence(), 1);
    assert_eq!(b.sequence(), 2);
    assert_ne!(a.id(), b.id());
    assert!(a.timestamp() <= b.timestamp());
}

#[test]
fn test_cursor_position_and_clamping() {
    let mut buffer = Buffer::from_content("test", "Line 1\nLine 2\nLine 3");

    buffer.set_cursor(Position::new(1, 3));
    assert_eq!(buffer.cursor(), Position::new(1, 3));

    buffer.set_cursor(Position::new(10, 0));
    assert_eq!(buffer.cursor(), Position::new(2, 0));

    buffer.set_cursor(Position::new(0, 100));
    assert_eq!(buffer.cursor(), Position::new(0, 6));

    buffer.set_cursor(Position::new(usize::MAX, usize::MAX));
    assert_eq!(buffer.cursor(), Position::new(2, 6));
}

#[test]
fn test_cursor_is_always_valid() {
    let mut buffer = Buffer::from_content("test", "a\n\nccc\ndddd");
    for line in 0..8 {
        for column in 0..8 {
            buffer.set_cursor(Position::new(line, column));
            let cursor = buffer.cursor();
            assert!(cursor.line < buffer.line_count());
            assert!(cursor.column <= buffer.line(cursor.line).chars().count());
        }
    }
}

#[test]
fn test_cursor_stays_valid_after_shrinking_edit() {
    let mut buffer = Buffer::from_content("test", "one\ntwo\nthree");
    buffer.set_cursor(Position::new(2, 5));
    buffer
        .delete(Position::new(0, 3), Position::new(2, 5))
        .unwrap();

    assert_eq!(buffer.content(), "one");
    assert_eq!(buffer.cursor(), Position::new(0, 3));
}

#[test]
fn test_lines_returns_independent_copies() {
    let buffer = Buffer::from_content("test", "Line 1\nLine 2");

    let mut lines = buffer.lines();
    lines[0] = "Modified".to_string();
    lines.push("extra".to_string());

    let mut line = buffer.line(1);
    line.push_str(" changed");

    assert_eq!(buffer.line(0), "Line 1");
    assert_eq!(buffer.line(1), "Line 2");
    assert_eq!(buffer.line_count(), 2);
}

#[test]
fn test_line_out_of_range_is_empty() {
    let buffer = Buffer::from_content("test", "only");
    assert_eq!(buffer.line(0), "only");
    assert_eq!(buffer.line(1), "");
    assert_eq!(buffer.line(usize::MAX), "");
}

#[test]
fn test_dirty_state() {
    let mut buffer = Buffer::new("test");
    assert!(!buffer.is_dirty());

    buffer.insert(Position::origin(), "Hello").unwrap();
    assert!(buffer.is_dirty());

    buffer.mark_clean();
    assert!(!buffer.is_dirty());

    buffer.delete(Position::origin(), Position::new(0, 1)).unwrap();
    assert!(buffer.is_dirty());
}

#[test]
fn test_path() {
    let mut buffer = Buffer::new("test");
    assert_eq!(buffer.path(), None);

    buffer.set_path("/tmp/test.txt");
    assert_eq!(
        buffer.path(),
        Some(std::path::Path::new("/tmp/test.txt"))
    );
}

#[test]
fn test_clear_resets_content_cursor_and_history() {
    let mut buffer = Buffer::from_content("test", "Line 1\nLine 2");
    buffer.insert(Position::new(1, 6), "!").unwrap();
    buffer.set_cursor(Position::new(1, 3));
    buffer.mark_clean();

    buffer.clear();

    assert_eq!(buffer.content(), "");
    assert_eq!(buffer.line_count(), 1);
    assert_eq!(buffer.cursor(), Position::origin());
    assert!(buffer.is_dirty());
    assert!(!buffer.can_undo());
    assert!(!buffer.undo());
    assert!(buffer.history().is_empty());
}

#[test]
fn test_set_content_discards_history() {
    let mut buffer = Buffer::new("test");
    buffer.insert(Position::origin(), "draft").unwrap();
    buffer.mark_clean();

    buffer.set_content("fresh\ncontent");

    assert_eq!(buffer.line_count(), 2);
    assert!(buffer.is_dirty());
    assert!(!buffer.can_undo());
}
