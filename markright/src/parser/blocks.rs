use crate::block::Block;
use crate::inline::Inline;
use crate::parser::cursor::{Delimiter, LineCursor};
use crate::parser::inline::{parse_inline, take_statement};

/// A paragraph: the space-led line plus every following non-block line.
pub fn parse_paragraph(cursor: &mut LineCursor) -> Block {
    cursor.consume_prefix(Delimiter::Paragraph.token().len());

    // The first line belongs to the paragraph even if what follows the space
    // looks like a delimiter.
    let mut contents: Vec<Inline> = take_statement(cursor).into_iter().collect();
    while let Some(inline) = parse_inline(cursor) {
        contents.push(inline);
    }
    Block::Paragraph(contents)
}

/// Items `1.`, `2.`, ... in sequence. A missing number ends the list.
pub fn parse_indexed_list(cursor: &mut LineCursor) -> Option<Block> {
    let mut items = Vec::new();
    loop {
        let marker = format!("{}.", items.len() + 1);
        if !cursor.peek_matches(&[marker.as_str()]) {
            break;
        }
        cursor.consume_prefix(marker.len());
        items.extend(take_statement(cursor));
    }
    non_empty(items).map(Block::IndexedList)
}

pub fn parse_list(cursor: &mut LineCursor) -> Option<Block> {
    non_empty(parse_marked_lines(cursor, Delimiter::List)).map(Block::List)
}

pub fn parse_quote(cursor: &mut LineCursor) -> Option<Block> {
    non_empty(parse_marked_lines(cursor, Delimiter::Quote)).map(Block::Quote)
}

/// Every consecutive line headed by `delimiter`, marker stripped, one item each.
fn parse_marked_lines(cursor: &mut LineCursor, delimiter: Delimiter) -> Vec<Inline> {
    let token = delimiter.token();
    let mut items = Vec::new();
    while cursor.peek_matches(&[token]) {
        cursor.consume_prefix(token.len());
        items.extend(take_statement(cursor));
    }
    items
}

fn non_empty(items: Vec<Inline>) -> Option<Vec<Inline>> {
    if items.is_empty() { None } else { Some(items) }
}
