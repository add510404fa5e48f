pub mod cursor;
pub mod error;
mod blocks;
mod code;
mod inline;
mod metadata;
mod proof;
mod structural;

pub use cursor::{Delimiter, LineCursor};
pub use error::{ParseError, ParseErrorKind};

use crate::Document;
use crate::source::{self, Line};

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Filter comment and blank lines out of the source, then parse it.
    pub fn parse(&self) -> Result<Document, ParseError> {
        let lines = source::filter_lines(&self.source);
        parse_with_id(lines, self.file_id)
    }
}

/// Parse an already-filtered sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> Result<Document, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parse_with_id(source::from_filtered(lines), 0)
}

fn parse_with_id(lines: Vec<Line>, file_id: usize) -> Result<Document, ParseError> {
    let mut cursor = LineCursor::new(lines, file_id);
    structural::parse_document(&mut cursor, file_id)
}
