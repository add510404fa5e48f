use std::fmt;

use serde::Serialize;

/// Inline content of a block. Lines are kept verbatim; there is no inline markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    Statement(String),
}

impl fmt::Display for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inline::Statement(s) => write!(f, "{}", s),
        }
    }
}
