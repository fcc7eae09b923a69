//! Positioned text elements: characters, lines and blocks.

use std::fmt;

use crate::geometry::{Length, Rect};

/// An element with text and a boundary relative to the page.
pub trait TextElement {
    fn bounds(&self) -> Rect;

    /// Complete, unmodified text of the element. Multi-line elements
    /// separate lines with `\n`.
    fn text(&self) -> &str;

    /// Boundary of the characters within the byte range `start..end` of
    /// [`TextElement::text`]. Returns `None` if the range covers no
    /// positioned character, e.g. when it is empty or only spans line
    /// separators.
    fn range_bounds(&self, start: usize, end: usize) -> Option<Rect>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Block,
    Line,
}

impl ElementKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Char {
    pub ch: char,
    pub bounds: Rect,
}

impl Char {
    pub const fn new(ch: char, bounds: Rect) -> Self {
        Self { ch, bounds }
    }
}

fn union_all(mut rects: impl Iterator<Item = Rect>) -> Option<Rect> {
    let first = rects.next()?;
    Some(rects.fold(first, |acc, r| acc.union(&r)))
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    bounds: Rect,
    text: String,
    chars: Vec<Char>,
}

impl Line {
    /// Builds a line whose bounds enclose all of its characters.
    pub fn new(chars: Vec<Char>) -> Self {
        let bounds = union_all(chars.iter().map(|c| c.bounds)).unwrap_or_default();
        Self::with_bounds(bounds, chars)
    }

    pub fn with_bounds(bounds: Rect, chars: Vec<Char>) -> Self {
        Self {
            bounds,
            text: chars.iter().map(|c| c.ch).collect(),
            chars,
        }
    }

    /// Builds a line from plain text, spreading the characters evenly over
    /// the width of `bounds`.
    pub fn from_text(bounds: Rect, text: &str) -> Self {
        let count = text.chars().count();
        let step = if count == 0 {
            Length::ZERO
        } else {
            bounds.width() / count as f64
        };

        let chars = text
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                let left = bounds.left + step.scale(idx as f64);
                Char::new(ch, Rect::new(left, bounds.top, left + step, bounds.bottom))
            })
            .collect();

        Self::with_bounds(bounds, chars)
    }

    pub fn chars(&self) -> &[Char] {
        &self.chars
    }
}

impl TextElement for Line {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn range_bounds(&self, start: usize, end: usize) -> Option<Rect> {
        union_all(
            self.text
                .char_indices()
                .zip(&self.chars)
                .filter(|((offset, _), _)| (start..end).contains(offset))
                .map(|(_, c)| c.bounds),
        )
    }
}

/// A group of lines, e.g. a paragraph or table cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    bounds: Rect,
    text: String,
    lines: Vec<Line>,
}

impl Block {
    /// Builds a block whose bounds enclose all of its lines.
    pub fn new(lines: Vec<Line>) -> Self {
        let bounds = union_all(lines.iter().map(|l| l.bounds)).unwrap_or_default();
        Self::with_bounds(bounds, lines)
    }

    pub fn with_bounds(bounds: Rect, lines: Vec<Line>) -> Self {
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            bounds,
            text,
            lines,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl TextElement for Block {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn range_bounds(&self, start: usize, end: usize) -> Option<Rect> {
        let mut offset = 0;
        let mut parts = Vec::new();

        for line in &self.lines {
            let line_end = offset + line.text.len();
            let (lo, hi) = (start.max(offset), end.min(line_end));

            if lo < hi {
                parts.extend(line.range_bounds(lo - offset, hi - offset));
            }

            // Skip the separator.
            offset = line_end + 1;
        }

        union_all(parts.into_iter())
    }
}
