use std::collections::VecDeque;
use std::ops::Range;

use crate::parser::error::{ParseError, ParseErrorKind};
use crate::source::Line;

// ---------------------------------------------------------------------------
// Delimiters
// ---------------------------------------------------------------------------

/// Leading tokens that introduce a block (or end one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    SubSection,
    Section,
    Code,
    Proof,
    Paragraph,
    IndexedList,
    List,
    Quote,
}

impl Delimiter {
    /// Dispatch order. A delimiter that is a prefix of another comes after it.
    pub const ORDERED: [Delimiter; 8] = [
        Delimiter::SubSection,
        Delimiter::Section,
        Delimiter::Code,
        Delimiter::Proof,
        Delimiter::Paragraph,
        Delimiter::IndexedList,
        Delimiter::List,
        Delimiter::Quote,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Delimiter::SubSection => "##",
            Delimiter::Section => "#",
            Delimiter::Code => "[code]",
            Delimiter::Proof => "[proof]",
            Delimiter::Paragraph => " ",
            Delimiter::IndexedList => "1.",
            Delimiter::List => "*",
            Delimiter::Quote => ">",
        }
    }
}

/// Marker of metadata directives.
pub const METADATA_MARKER: &str = "%";

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// The queue of unconsumed lines for one parse.
pub struct LineCursor {
    lines: VecDeque<Line>,
    file_id: usize,
    /// Byte offset just past the last line, for errors at end of input.
    end: usize,
}

impl LineCursor {
    pub fn new(lines: Vec<Line>, file_id: usize) -> Self {
        let end = lines.last().map(|l| l.span().end).unwrap_or(0);
        LineCursor {
            lines: lines.into(),
            file_id,
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn front(&self) -> Option<&Line> {
        self.lines.front()
    }

    /// True iff the front line starts with one of `candidates`.
    pub fn peek_matches(&self, candidates: &[&str]) -> bool {
        match self.lines.front() {
            Some(line) => candidates.iter().any(|c| line.text.starts_with(c)),
            None => false,
        }
    }

    /// The first delimiter, in dispatch order, that heads the front line.
    pub fn peek_delimiter(&self) -> Option<Delimiter> {
        let line = self.lines.front()?;
        Delimiter::ORDERED
            .into_iter()
            .find(|d| line.text.starts_with(d.token()))
    }

    /// Remove the first `n` bytes of the front line, then any leading whitespace.
    pub fn consume_prefix(&mut self, n: usize) {
        if let Some(line) = self.lines.front_mut() {
            let n = n.min(line.text.len());
            line.text.drain(..n);
            let whitespace = line.text.len() - line.text.trim_start().len();
            line.text.drain(..whitespace);
            line.offset += n + whitespace;
        }
    }

    pub fn pop_line(&mut self) -> Option<Line> {
        self.lines.pop_front()
    }

    /// Put a partially consumed line back at the front.
    pub fn push_front(&mut self, line: Line) {
        self.lines.push_front(line);
    }

    /// Span of the front line, or an empty span at end of input.
    pub fn front_span(&self) -> Range<usize> {
        match self.lines.front() {
            Some(line) => line.span(),
            None => self.end..self.end,
        }
    }

    /// Quoted front line for error messages.
    pub fn describe_front(&self) -> String {
        match self.lines.front() {
            Some(line) => format!("`{}`", line.text),
            None => "end of input".to_string(),
        }
    }

    pub fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::error(kind, message, self.front_span(), self.file_id)
    }

    pub fn error_at(
        &self,
        kind: ParseErrorKind,
        message: impl Into<String>,
        span: Range<usize>,
    ) -> ParseError {
        ParseError::error(kind, message, span, self.file_id)
    }
}
