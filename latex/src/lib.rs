//! LaTeX code generation for markright documents.
//!
//! Rendering is a pure walk over a parsed [`markright::Document`]. Text is
//! copied verbatim: LaTeX special characters are not escaped.

pub mod options;
mod preamble;
mod render;

use std::io::{self, Write};

use markright::Document;

pub use options::{Mode, Options};
pub use render::Latex;

/// Render with default options.
pub fn render(document: &Document) -> String {
    render_with(document, &Options::default())
}

pub fn render_with(document: &Document, options: &Options) -> String {
    Latex::new(document, options).to_string()
}

/// Stream the rendered document into `out`.
pub fn render_to(document: &Document, options: &Options, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "{}", Latex::new(document, options))?;
    out.flush()
}
