use std::fmt;

use markright::Document;
use markright::block::Block;
use markright::block::proof::ProofTree;
use markright::inline::Inline;
use markright::section::Section;

use crate::options::{Mode, Options};
use crate::preamble::write_preamble;

/// A document paired with its rendering options. `Display` yields the LaTeX source.
pub struct Latex<'a> {
    document: &'a Document,
    options: &'a Options,
}

impl<'a> Latex<'a> {
    pub fn new(document: &'a Document, options: &'a Options) -> Self {
        Latex { document, options }
    }

    pub fn mode(&self) -> Mode {
        Mode::of(self.document, self.options)
    }
}

impl fmt::Display for Latex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = self.mode();
        write_preamble(f, self.document, self.options, mode)?;

        writeln!(f, "\\begin{{document}}")?;
        if self.options.title_block {
            match mode {
                Mode::Article => writeln!(f, "\\maketitle")?,
                Mode::Slides => {
                    writeln!(f, "\\begin{{frame}}")?;
                    writeln!(f, "\\titlepage")?;
                    writeln!(f, "\\end{{frame}}")?;
                }
            }
        }
        for section in &self.document.sections {
            write_section(f, section, mode)?;
        }
        writeln!(f, "\\end{{document}}")
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

fn write_section(f: &mut fmt::Formatter<'_>, section: &Section, mode: Mode) -> fmt::Result {
    match mode {
        Mode::Article => {
            writeln!(f, "\\section{{{}}}", section.title)?;
            write_blocks(f, &section.blocks, mode)
        }
        Mode::Slides => {
            // fragile: frames may hold lstlisting
            writeln!(f, "\\begin{{frame}}[fragile]{{{}}}", section.title)?;
            write_blocks(f, &section.blocks, mode)?;
            writeln!(f, "\\end{{frame}}")
        }
    }
}

fn write_blocks(f: &mut fmt::Formatter<'_>, blocks: &[Block], mode: Mode) -> fmt::Result {
    for block in blocks {
        write_block(f, block, mode)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, mode: Mode) -> fmt::Result {
    match block {
        Block::SubSection { title, blocks } => match mode {
            Mode::Article => {
                writeln!(f, "\\subsection{{{}}}", title)?;
                write_blocks(f, blocks, mode)
            }
            Mode::Slides => {
                writeln!(f, "\\begin{{block}}{{{}}}", title)?;
                write_blocks(f, blocks, mode)?;
                writeln!(f, "\\end{{block}}")
            }
        },
        Block::Paragraph(contents) => {
            write!(f, "\\par ")?;
            write_lines(f, contents)
        }
        Block::List(items) => write_items(f, "itemize", items),
        Block::IndexedList(items) => write_items(f, "enumerate", items),
        Block::Quote(contents) => {
            writeln!(f, "\\begin{{quote}}")?;
            write_lines(f, contents)?;
            writeln!(f, "\\end{{quote}}")
        }
        Block::CodeBlock { language, content } => {
            write!(f, "\\begin{{lstlisting}}")?;
            if let Some(language) = language {
                write!(f, "[language={}]", language)?;
            }
            writeln!(f)?;
            writeln!(f, "{}", content)?;
            writeln!(f, "\\end{{lstlisting}}")
        }
        Block::ProofTree(proof) => write_proof(f, proof),
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, contents: &[Inline]) -> fmt::Result {
    for inline in contents {
        writeln!(f, "{}", inline)?;
    }
    Ok(())
}

fn write_items(f: &mut fmt::Formatter<'_>, environment: &str, items: &[Inline]) -> fmt::Result {
    writeln!(f, "\\begin{{{}}}", environment)?;
    for item in items {
        writeln!(f, "\\item {}", item)?;
    }
    writeln!(f, "\\end{{{}}}", environment)
}

/// Widest inference bussproofs provides (`\QuinaryInfC`).
const WIDEST_INFERENCE: usize = 5;

/// bussproofs: push each premise, then one inference of matching width.
///
/// The fifth and later premises share one axiom, separated by `\quad`, so
/// the inference never exceeds quinary.
fn write_proof(f: &mut fmt::Formatter<'_>, proof: &ProofTree) -> fmt::Result {
    writeln!(f, "\\begin{{prooftree}}")?;
    if proof.premises.is_empty() {
        writeln!(f, "\\AxiomC{{}}")?;
    }
    let split = proof.premises.len().min(WIDEST_INFERENCE - 1);
    let (single, rest) = proof.premises.split_at(split);
    for premise in single {
        writeln!(f, "\\AxiomC{{{}}}", premise)?;
    }
    if !rest.is_empty() {
        writeln!(f, "\\AxiomC{{{}}}", rest.join(" \\quad "))?;
    }
    if let Some(label) = &proof.label {
        writeln!(f, "\\RightLabel{{{}}}", label)?;
    }
    let width = proof.arity().min(WIDEST_INFERENCE);
    writeln!(f, "\\{}{{{}}}", inference_macro(width), proof.conclusion)?;
    writeln!(f, "\\end{{prooftree}}")
}

fn inference_macro(width: usize) -> &'static str {
    match width {
        0 | 1 => "UnaryInfC",
        2 => "BinaryInfC",
        3 => "TrinaryInfC",
        4 => "QuaternaryInfC",
        _ => "QuinaryInfC",
    }
}
