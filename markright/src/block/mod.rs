pub mod proof;

use serde::Serialize;

use crate::block::proof::ProofTree;
use crate::inline::Inline;

/// Block-level content of a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// `##` heading and its content. Sub-sections never nest.
    SubSection { title: String, blocks: Vec<Block> },
    Paragraph(Vec<Inline>),
    /// `*` items.
    List(Vec<Inline>),
    /// `1.`, `2.`, ... items.
    IndexedList(Vec<Inline>),
    /// `>` items.
    Quote(Vec<Inline>),
    /// Text strictly between the balanced braces of a `[code]` block.
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    ProofTree(ProofTree),
}

impl Block {
    /// Short lowercase name of the variant, used in outlines and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::SubSection { .. } => "subsection",
            Block::Paragraph(_) => "paragraph",
            Block::List(_) => "list",
            Block::IndexedList(_) => "indexed list",
            Block::Quote(_) => "quote",
            Block::CodeBlock { .. } => "code block",
            Block::ProofTree(_) => "proof tree",
        }
    }
}
