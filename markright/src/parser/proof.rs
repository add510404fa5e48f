use crate::block::Block;
use crate::block::proof::ProofTree;
use crate::parser::cursor::{Delimiter, LineCursor};
use crate::parser::error::{ParseError, ParseErrorKind};

const OPEN: &str = "{";
const CLOSE: &str = "}";
const PREMISE: &str = "[premise]";
const LABEL: &str = "[label]";
const CONCLUSION: &str = "[conclusion]";

const ORDER_NOTE: &str =
    "proof elements must appear in order: [premise]..., optional [label], [conclusion], then `}`";

/// Parse a `[proof]` block:
///
/// ```text
/// [proof] {
///   [premise] A
///   [premise] B
///   [label] and-intro
///   [conclusion] A and B
/// }
/// ```
///
/// The opening brace may also sit alone on the line after `[proof]`.
pub fn parse_proof_tree(cursor: &mut LineCursor) -> Result<Block, ParseError> {
    cursor.consume_prefix(Delimiter::Proof.token().len());
    if cursor.front().is_some_and(|line| line.text.is_empty()) {
        cursor.pop_line();
        cursor.consume_prefix(0);
    }
    let opens = cursor
        .front()
        .is_some_and(|line| line.text.starts_with(OPEN) && line.text[OPEN.len()..].trim().is_empty());
    if !opens {
        return Err(cursor.error(
            ParseErrorKind::MalformedProofTree,
            format!("expected `{{` on its own after [proof], found {}", cursor.describe_front()),
        ));
    }
    cursor.pop_line();

    let mut premises = Vec::new();
    while at_element(cursor, PREMISE) {
        premises.push(take_element(cursor, PREMISE));
    }

    let label = if at_element(cursor, LABEL) {
        Some(take_element(cursor, LABEL))
    } else {
        None
    };

    if !at_element(cursor, CONCLUSION) {
        return Err(unexpected(cursor, CONCLUSION));
    }
    let conclusion = take_element(cursor, CONCLUSION);

    if !at_element(cursor, CLOSE) {
        return Err(unexpected(cursor, CLOSE));
    }
    cursor.consume_prefix(CLOSE.len());
    if cursor.front().is_some_and(|line| line.text.is_empty()) {
        cursor.pop_line();
    }

    Ok(Block::ProofTree(ProofTree {
        premises,
        label,
        conclusion,
    }))
}

/// Whether the front line, ignoring indentation, starts with `marker`.
fn at_element(cursor: &mut LineCursor, marker: &str) -> bool {
    cursor.consume_prefix(0);
    cursor.peek_matches(&[marker])
}

/// Strip `marker` from the front line and return the rest of the line.
fn take_element(cursor: &mut LineCursor, marker: &str) -> String {
    cursor.consume_prefix(marker.len());
    cursor.pop_line().map(|line| line.text).unwrap_or_default()
}

fn unexpected(cursor: &LineCursor, expected: &str) -> ParseError {
    let err = cursor.error(
        ParseErrorKind::MalformedProofTree,
        format!("expected `{}` in proof tree, found {}", expected, cursor.describe_front()),
    );
    if cursor.peek_matches(&[PREMISE, LABEL, CONCLUSION]) {
        err.with_note(ORDER_NOTE)
    } else {
        err
    }
}
