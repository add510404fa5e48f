use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// The class of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unknown `%` directive, or a directive with a missing or extra value.
    MalformedMetadata,
    /// A line at block position that starts with no known delimiter.
    InvalidBlockStart,
    /// `[code]` without an opening brace on its line.
    MalformedCodeBlock,
    /// Brace depth never returns to zero.
    UnterminatedCodeBlock,
    /// Proof tree elements out of order, missing, or unexpected.
    MalformedProofTree,
    /// Lines left over that no section can absorb.
    TrailingInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::MalformedMetadata => "malformed metadata",
            ParseErrorKind::InvalidBlockStart => "invalid block start",
            ParseErrorKind::MalformedCodeBlock => "malformed code block",
            ParseErrorKind::UnterminatedCodeBlock => "unterminated code block",
            ParseErrorKind::MalformedProofTree => "malformed proof tree",
            ParseErrorKind::TrailingInput => "trailing input",
        };
        f.write_str(name)
    }
}

/// Parse errors with source location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn error(
        kind: ParseErrorKind,
        message: impl Into<String>,
        span: Range<usize>,
        file_id: usize,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(&self.message)
            .with_labels(vec![
                Label::primary(self.file_id, self.span.clone()).with_message(self.kind.to_string()),
            ])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}
