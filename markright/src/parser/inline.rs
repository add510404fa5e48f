use crate::inline::Inline;
use crate::parser::cursor::{LineCursor, METADATA_MARKER};

/// Read the front line as a statement unless it starts a block.
///
/// `%` lines also stop inline content, so a misplaced directive is reported
/// by the block dispatcher instead of becoming paragraph text.
pub fn parse_inline(cursor: &mut LineCursor) -> Option<Inline> {
    if cursor.peek_delimiter().is_some() || cursor.peek_matches(&[METADATA_MARKER]) {
        return None;
    }
    take_statement(cursor)
}

/// Read the front line as a statement whatever it starts with.
pub fn take_statement(cursor: &mut LineCursor) -> Option<Inline> {
    cursor.pop_line().map(|line| Inline::Statement(line.text))
}
