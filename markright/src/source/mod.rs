use std::ops::Range;

/// Lines starting with this character are comments and never reach the parser.
pub const COMMENT_MARKER: char = ';';

/// One input line together with the byte offset of its text in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub offset: usize,
}

impl Line {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Line {
            text: text.into(),
            offset,
        }
    }

    /// Byte span of the remaining text in source.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Split source text into the lines the parser sees.
///
/// Empty lines and comment lines are dropped; everything else is kept verbatim
/// (a trailing `\r` is removed). Whitespace-only lines are kept, since a leading
/// space is meaningful.
pub fn filter_lines(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();

        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text.is_empty() || text.starts_with(COMMENT_MARKER) {
            continue;
        }
        lines.push(Line::new(text, start));
    }

    lines
}

/// Wrap already-filtered lines, assigning offsets as if they were joined by `\n`.
pub fn from_filtered<I, S>(lines: I) -> Vec<Line>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut offset = 0;
    lines
        .into_iter()
        .map(|text| {
            let line = Line::new(text, offset);
            offset += line.text.len() + 1;
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_and_comment_lines() {
        let lines = filter_lines("%title T\n\n; note\n# S\r\n text\n");
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["%title T", "# S", " text"]);
    }

    #[test]
    fn keeps_byte_offsets() {
        let source = "; c\n# S\n para";
        let lines = filter_lines(source);
        assert_eq!(lines[0].offset, 4);
        assert_eq!(&source[lines[1].span()], " para");
    }

    #[test]
    fn comment_marker_only_counts_in_first_column() {
        let lines = filter_lines(" ; not a comment");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn filtered_offsets_follow_joined_text() {
        let lines = from_filtered(["# A", " b"]);
        assert_eq!(lines[1].offset, 4);
    }
}
