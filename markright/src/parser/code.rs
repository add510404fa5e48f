use crate::block::Block;
use crate::parser::cursor::{Delimiter, LineCursor};
use crate::parser::error::{ParseError, ParseErrorKind};
use crate::source::Line;

/// Parse `[code] [lang] { ... }`, which may span several lines.
///
/// The content is the text strictly between the first `{` on the marker line
/// and the brace that brings the nesting depth back to zero. Whatever follows
/// that brace on its line is queued again as the next line.
pub fn parse_code_block(cursor: &mut LineCursor) -> Result<Block, ParseError> {
    let marker_start = cursor.front_span().start;
    cursor.consume_prefix(Delimiter::Code.token().len());
    let Some(mut line) = cursor.pop_line() else {
        return Err(cursor.error(
            ParseErrorKind::MalformedCodeBlock,
            "expected `{` after [code], found end of input",
        ));
    };

    let Some(open) = line.text.find('{') else {
        return Err(cursor.error_at(
            ParseErrorKind::MalformedCodeBlock,
            format!("expected `{{` after [code], found `{}`", line.text),
            marker_start..line.span().end,
        ));
    };
    let language = Some(line.text[..open].trim())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);
    let open_at = line.offset + open;
    line.text.drain(..=open);
    line.offset = open_at + 1;

    let mut content = String::new();
    let mut depth = 1usize;
    loop {
        if let Some(close) = find_closing(&line.text, &mut depth) {
            content.push_str(&line.text[..close]);
            let rest = &line.text[close + 1..];
            if !rest.trim().is_empty() {
                cursor.push_front(Line::new(rest, line.offset + close + 1));
            }
            break;
        }

        content.push_str(&line.text);
        content.push('\n');
        line = match cursor.pop_line() {
            Some(next) => next,
            None => {
                return Err(cursor
                    .error_at(
                        ParseErrorKind::UnterminatedCodeBlock,
                        "code block is not closed",
                        open_at..cursor.front_span().end,
                    )
                    .with_note("the opening `{` has no matching `}`"));
            }
        };
    }

    Ok(Block::CodeBlock { language, content })
}

/// Byte index of the brace that returns `depth` to zero, if it is on this line.
fn find_closing(text: &str, depth: &mut usize) -> Option<usize> {
    for (i, c) in text.char_indices() {
        match c {
            '{' => *depth += 1,
            '}' => {
                *depth -= 1;
                if *depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
