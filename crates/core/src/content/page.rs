use crate::geometry::Size;

use super::element::Block;

/// Text content of a single page as produced by a document parser.
#[derive(Clone, Debug, PartialEq)]
pub struct PageContent {
    /// 1-based page number.
    pub number: usize,
    /// Physical page size.
    pub size: Size,
    pub blocks: Vec<Block>,
}

impl PageContent {
    pub fn new(number: usize, size: Size, blocks: Vec<Block>) -> Self {
        Self {
            number,
            size,
            blocks,
        }
    }
}
