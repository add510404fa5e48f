use tracing::debug;

use crate::Document;
use crate::parser::cursor::{LineCursor, METADATA_MARKER};
use crate::parser::error::{ParseError, ParseErrorKind};

const KNOWN_KEYS: &str = "title, author, date, slide-mode";

/// Consume the leading run of `%` directives into `document`.
pub fn parse_metadata(cursor: &mut LineCursor, document: &mut Document) -> Result<(), ParseError> {
    while cursor.peek_matches(&[METADATA_MARKER]) {
        let Some(line) = cursor.front() else {
            break;
        };
        let directive = &line.text[METADATA_MARKER.len()..];
        let (key, value) = match directive.split_once(' ') {
            Some((key, value)) => (key, Some(value.trim_start()).filter(|v| !v.is_empty())),
            None => (directive, None),
        };

        let slot = match key {
            "title" => Some(&mut document.title),
            "author" => Some(&mut document.author),
            "date" => Some(&mut document.date),
            "slide-mode" => None,
            _ => {
                return Err(cursor
                    .error(
                        ParseErrorKind::MalformedMetadata,
                        format!("unknown metadata directive `%{}`", key),
                    )
                    .with_note(format!("known directives: {}", KNOWN_KEYS)));
            }
        };

        match (slot, value) {
            (Some(slot), Some(value)) => {
                debug!(key, value, "metadata");
                *slot = value.to_string();
            }
            (Some(_), None) => {
                return Err(cursor.error(
                    ParseErrorKind::MalformedMetadata,
                    format!("metadata directive `%{}` needs a value", key),
                ));
            }
            (None, None) => {
                debug!("slide mode enabled");
                document.slide_mode = true;
            }
            (None, Some(_)) => {
                return Err(cursor.error(
                    ParseErrorKind::MalformedMetadata,
                    "metadata directive `%slide-mode` takes no value",
                ));
            }
        }

        cursor.pop_line();
    }

    Ok(())
}
