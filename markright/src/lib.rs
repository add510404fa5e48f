pub mod block;
pub mod inline;
pub mod parser;
pub mod section;
pub mod source;

use serde::Serialize;

use crate::section::Section;

/// A parsed markright document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Value of the `%title` directive (empty if absent).
    pub title: String,
    /// Value of the `%author` directive (empty if absent).
    pub author: String,
    /// Value of the `%date` directive (empty if absent).
    pub date: String,
    /// Set by the `%slide-mode` directive.
    pub slide_mode: bool,
    /// Top-level sections, in source order.
    pub sections: Vec<Section>,
    /// The source file ID (for error reporting with codespan-reporting).
    #[serde(skip)]
    pub source_id: usize,
}

impl Document {
    pub fn empty(source_id: usize) -> Self {
        Document {
            title: String::new(),
            author: String::new(),
            date: String::new(),
            slide_mode: false,
            sections: Vec::new(),
            source_id,
        }
    }
}
