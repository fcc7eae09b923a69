//! A parsed page with a spatial index over its text elements.

use std::ops::ControlFlow;

use rstar::{AABB, RTree, RTreeObject};

use crate::content::{Block, ElementKind, Line, PageContent, TextElement};
use crate::error::Result;
use crate::geometry::{HorizontalDirection, Rect, Size, VerticalDirection, sort_reading_order};

/// A block or one of its lines.
#[derive(Clone, Copy, Debug)]
pub enum PageElement<'a> {
    Block(&'a Block),
    Line(&'a Line),
}

impl PageElement<'_> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Block(_) => ElementKind::Block,
            Self::Line(_) => ElementKind::Line,
        }
    }
}

impl TextElement for PageElement<'_> {
    fn bounds(&self) -> Rect {
        match self {
            Self::Block(b) => b.bounds(),
            Self::Line(l) => l.bounds(),
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Block(b) => b.text(),
            Self::Line(l) => l.text(),
        }
    }

    fn range_bounds(&self, start: usize, end: usize) -> Option<Rect> {
        match self {
            Self::Block(b) => b.range_bounds(start, end),
            Self::Line(l) => l.range_bounds(start, end),
        }
    }
}

/// Index entry referring to a block or a line within a block.
#[derive(Clone, Debug)]
struct IndexedElement {
    block: usize,
    line: Option<usize>,
    bounds: Rect,
}

fn envelope_of(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [rect.left.pt(), rect.top.pt()],
        [rect.right.pt(), rect.bottom.pt()],
    )
}

impl RTreeObject for IndexedElement {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bounds)
    }
}

pub struct Page {
    number: usize,
    size: Size,
    blocks: Vec<Block>,
    index: RTree<IndexedElement>,
}

impl Page {
    /// Builds the spatial index over all blocks and their lines.
    pub fn new(content: PageContent) -> Self {
        let PageContent {
            number,
            size,
            blocks,
        } = content;

        let mut entries = Vec::new();
        for (block_idx, block) in blocks.iter().enumerate() {
            entries.push(IndexedElement {
                block: block_idx,
                line: None,
                bounds: block.bounds(),
            });
            entries.extend(block.lines().iter().enumerate().map(|(line_idx, line)| {
                IndexedElement {
                    block: block_idx,
                    line: Some(line_idx),
                    bounds: line.bounds(),
                }
            }));
        }

        Self {
            number,
            size,
            blocks,
            index: RTree::bulk_load(entries),
        }
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn element(&self, entry: &IndexedElement) -> PageElement<'_> {
        let block = &self.blocks[entry.block];
        match entry.line {
            Some(line) => PageElement::Line(&block.lines()[line]),
            None => PageElement::Block(block),
        }
    }

    /// Calls `visitor` for every element intersecting `rect`, in no
    /// particular order. Returning `ControlFlow::Break` ends the visitation
    /// successfully; errors end it and are returned. Either way `visitor`
    /// is not called again.
    pub fn visit_elements_intersecting<'a, F>(&'a self, rect: &Rect, mut visitor: F) -> Result<()>
    where
        F: FnMut(PageElement<'a>) -> Result<ControlFlow<()>>,
    {
        for entry in self.index.locate_in_envelope_intersecting(&envelope_of(rect)) {
            if visitor(self.element(entry))?.is_break() {
                break;
            }
        }

        Ok(())
    }

    /// Like [`Page::visit_elements_intersecting`] over the whole plane.
    pub fn visit_elements<'a, F>(&'a self, visitor: F) -> Result<()>
    where
        F: FnMut(PageElement<'a>) -> Result<ControlFlow<()>>,
    {
        self.visit_elements_intersecting(&Rect::from_points(f64::MIN, f64::MIN, f64::MAX, f64::MAX), visitor)
    }

    /// All blocks and lines in document order.
    pub fn elements(&self) -> impl Iterator<Item = PageElement<'_>> {
        self.blocks.iter().flat_map(|block| {
            std::iter::once(PageElement::Block(block))
                .chain(block.lines().iter().map(PageElement::Line))
        })
    }

    /// All blocks and lines ordered top to bottom, left to right.
    pub fn elements_in_reading_order(&self) -> Vec<PageElement<'_>> {
        let mut elements: Vec<_> = self.elements().collect();

        sort_reading_order(
            &mut elements,
            |e| e.bounds(),
            VerticalDirection::TopToBottom,
            HorizontalDirection::LeftToRight,
        );

        elements
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("number", &self.number)
            .field("size", &self.size)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}
