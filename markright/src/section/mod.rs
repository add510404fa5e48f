use std::ops::Range;

use serde::Serialize;

use crate::block::Block;

/// A top-level section introduced by a `#` line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Heading text after the `#` marker, leading whitespace removed.
    pub title: String,
    /// Block content, in source order.
    pub blocks: Vec<Block>,
    /// Byte span of the heading line in source.
    #[serde(skip)]
    pub span: Range<usize>,
}
