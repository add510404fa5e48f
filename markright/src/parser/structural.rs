use tracing::{debug, trace};

use crate::Document;
use crate::block::Block;
use crate::parser::cursor::{Delimiter, LineCursor, METADATA_MARKER};
use crate::parser::error::{ParseError, ParseErrorKind};
use crate::parser::{blocks, code, metadata, proof};
use crate::section::Section;

// ---------------------------------------------------------------------------
// Document and sections
// ---------------------------------------------------------------------------

/// Which heading closes the block sequence currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Only `#` (or end of input) ends the sequence.
    Section,
    /// `##` ends it as well: sub-sections are siblings, never nested.
    SubSection,
}

/// Parse metadata directives followed by every section.
pub fn parse_document(cursor: &mut LineCursor, file_id: usize) -> Result<Document, ParseError> {
    let mut document = Document::empty(file_id);
    metadata::parse_metadata(cursor, &mut document)?;

    while cursor.peek_delimiter() == Some(Delimiter::Section) {
        let section = parse_section(cursor)?;
        document.sections.push(section);
    }

    if !cursor.is_empty() {
        let mut err = cursor.error(
            ParseErrorKind::TrailingInput,
            format!("unparsed trailing input: {}", cursor.describe_front()),
        );
        err = if document.sections.is_empty() {
            err.with_note("content must start with a `#` section heading")
        } else {
            err.with_note("expected a `#` section heading")
        };
        return Err(err);
    }

    debug!(sections = document.sections.len(), "document parsed");
    Ok(document)
}

fn parse_section(cursor: &mut LineCursor) -> Result<Section, ParseError> {
    let start = cursor.front_span().start;
    cursor.consume_prefix(Delimiter::Section.token().len());
    let Some(heading) = cursor.pop_line() else {
        return Err(cursor.error(
            ParseErrorKind::InvalidBlockStart,
            "expected a section heading, found end of input",
        ));
    };
    debug!(title = %heading.text, "section");

    let mut blocks = Vec::new();
    while let Some(block) = parse_block(cursor, Scope::Section)? {
        blocks.push(block);
    }

    Ok(Section {
        span: start..heading.span().end,
        title: heading.text,
        blocks,
    })
}

fn parse_subsection(cursor: &mut LineCursor) -> Result<Block, ParseError> {
    cursor.consume_prefix(Delimiter::SubSection.token().len());
    let Some(heading) = cursor.pop_line() else {
        return Err(cursor.error(
            ParseErrorKind::InvalidBlockStart,
            "expected a sub-section heading, found end of input",
        ));
    };
    debug!(title = %heading.text, "subsection");

    let mut blocks = Vec::new();
    while let Some(block) = parse_block(cursor, Scope::SubSection)? {
        blocks.push(block);
    }

    Ok(Block::SubSection {
        title: heading.text,
        blocks,
    })
}

// ---------------------------------------------------------------------------
// Block dispatch
// ---------------------------------------------------------------------------

/// Parse the block headed by the front line.
///
/// `Ok(None)` means the current sequence is over: input is exhausted or the
/// front line opens a heading that belongs to an enclosing scope.
fn parse_block(cursor: &mut LineCursor, scope: Scope) -> Result<Option<Block>, ParseError> {
    let Some(delimiter) = cursor.peek_delimiter() else {
        if cursor.is_empty() {
            return Ok(None);
        }
        return Err(invalid_block_start(cursor));
    };
    trace!(?delimiter, ?scope, "dispatch");

    match delimiter {
        Delimiter::Section => Ok(None),
        Delimiter::SubSection => match scope {
            Scope::SubSection => Ok(None),
            Scope::Section => parse_subsection(cursor).map(Some),
        },
        Delimiter::Paragraph => Ok(Some(blocks::parse_paragraph(cursor))),
        Delimiter::IndexedList => Ok(blocks::parse_indexed_list(cursor)),
        Delimiter::List => Ok(blocks::parse_list(cursor)),
        Delimiter::Quote => Ok(blocks::parse_quote(cursor)),
        Delimiter::Code => code::parse_code_block(cursor).map(Some),
        Delimiter::Proof => proof::parse_proof_tree(cursor).map(Some),
    }
}

fn invalid_block_start(cursor: &LineCursor) -> ParseError {
    let err = cursor.error(
        ParseErrorKind::InvalidBlockStart,
        format!("invalid input: {}", cursor.describe_front()),
    );
    if cursor.peek_matches(&[METADATA_MARKER]) {
        return err.with_note("metadata directives must appear before the first section");
    }

    let expected: Vec<String> = Delimiter::ORDERED
        .iter()
        .map(|d| match d {
            Delimiter::Paragraph => "a leading space".to_string(),
            other => format!("`{}`", other.token()),
        })
        .collect();
    err.with_note(format!("expected a line starting with {}", expected.join(", ")))
}
