//! JSON page content.
//!
//! ```json
//! {"pages": [{
//!   "number": 1, "width": 595.3, "height": 841.9,
//!   "blocks": [{"lines": [
//!     {"bbox": [56.7, 56.7, 90.2, 68.1], "text": "Total"},
//!     {"chars": [{"char": "4", "bbox": [56.7, 70.0, 62.3, 81.4]}]}
//!   ]}]
//! }]}
//! ```
//!
//! Coordinates are in points. A `bbox` is `[left, top, right, bottom]` and
//! may be omitted for blocks and lines built from characters, in which case
//! it encloses the contents.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};
use crate::geometry::{Length, Rect, Size};

use super::element::{Block, Char, Line};
use super::page::PageContent;

type BBox = [f64; 4];

fn to_rect(bbox: &BBox) -> Rect {
    Rect::from_points(bbox[0], bbox[1], bbox[2], bbox[3])
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentFile {
    #[serde(default)]
    pub pages: Vec<PageJson>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageJson {
    pub number: usize,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub blocks: Vec<BlockJson>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    #[serde(default)]
    pub lines: Vec<LineJson>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chars: Vec<CharJson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharJson {
    pub char: char,
    pub bbox: BBox,
}

impl LineJson {
    fn to_line(&self) -> Result<Line> {
        match (&self.text, self.chars.is_empty()) {
            (Some(_), false) => Err(DossierError::Document(
                "line must not have both text and chars".to_string(),
            )),
            (Some(text), true) => {
                let Some(bbox) = &self.bbox else {
                    return Err(DossierError::Document(format!(
                        "line {text:?} without chars requires a bbox"
                    )));
                };
                Ok(Line::from_text(to_rect(bbox), text))
            }
            (None, _) => {
                let chars = self
                    .chars
                    .iter()
                    .map(|c| Char::new(c.char, to_rect(&c.bbox)))
                    .collect();
                Ok(match &self.bbox {
                    Some(bbox) => Line::with_bounds(to_rect(bbox), chars),
                    None => Line::new(chars),
                })
            }
        }
    }
}

impl BlockJson {
    fn to_block(&self) -> Result<Block> {
        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(idx, l)| l.to_line().map_err(|e| e.context(format!("line {idx}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(match &self.bbox {
            Some(bbox) => Block::with_bounds(to_rect(bbox), lines),
            None => Block::new(lines),
        })
    }
}

impl PageJson {
    pub fn to_content(&self) -> Result<PageContent> {
        if self.number == 0 {
            return Err(DossierError::Document(
                "page numbers are 1-based".to_string(),
            ));
        }

        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .map(|(idx, b)| b.to_block().map_err(|e| e.context(format!("block {idx}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(PageContent::new(
            self.number,
            Size::new(Length::from_pt(self.width), Length::from_pt(self.height)),
            blocks,
        ))
    }
}

impl ContentFile {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts all pages, sorted by page number. Pages must be numbered
    /// consecutively from 1, each number used once.
    pub fn to_pages(&self) -> Result<Vec<PageContent>> {
        let mut pages = self
            .pages
            .iter()
            .map(|p| {
                p.to_content()
                    .map_err(|e| e.context(format!("page {}", p.number)))
            })
            .collect::<Result<Vec<_>>>()?;

        pages.sort_by_key(|p| p.number);

        for (idx, page) in pages.iter().enumerate() {
            let want = idx + 1;
            if page.number == want {
                continue;
            }
            let problem = if page.number < want {
                "duplicate page number".to_string()
            } else {
                format!("page {want} is missing")
            };
            return Err(DossierError::Document(problem).context(format!("page {}", page.number)));
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TextElement;
    use crate::error::ErrorKind;

    #[test]
    fn test_load() {
        let file = ContentFile::from_json_str(
            r#"{"pages": [
                {"number": 2, "width": 100, "height": 200},
                {"number": 1, "width": 100, "height": 200, "blocks": [{"lines": [
                    {"bbox": [10, 10, 40, 20], "text": "abc"},
                    {"chars": [{"char": "x", "bbox": [10, 30, 15, 40]},
                               {"char": "y", "bbox": [15, 30, 20, 40]}]}
                ]}]}
            ]}"#,
        )
        .unwrap();

        let pages = file.to_pages().unwrap();
        assert_eq!(pages.iter().map(|p| p.number).collect::<Vec<_>>(), [1, 2]);

        let block = &pages[0].blocks[0];
        assert_eq!(block.text(), "abc\nxy");
        assert_eq!(block.bounds(), Rect::from_points(10.0, 10.0, 40.0, 40.0));
        assert_eq!(block.lines()[1].bounds(), Rect::from_points(10.0, 30.0, 20.0, 40.0));
        assert_eq!(pages[1].size.height, Length::from_pt(200.0));
    }

    #[test]
    fn test_text_line_requires_bbox() {
        let file = ContentFile::from_json_str(
            r#"{"pages": [{"number": 1, "width": 1, "height": 1,
                "blocks": [{"lines": [{"text": "abc"}]}]}]}"#,
        )
        .unwrap();

        let err = file.to_pages().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Document);
        assert!(err.to_string().starts_with("page 1: block 0: line 0: "), "{err}");
    }

    #[test]
    fn test_page_numbering() {
        let load = |numbers: &[usize]| {
            let pages = numbers
                .iter()
                .map(|&number| PageJson {
                    number,
                    ..PageJson::default()
                })
                .collect();
            ContentFile { pages }.to_pages()
        };

        assert!(load(&[3, 1, 2]).is_ok());
        assert!(load(&[]).unwrap().is_empty());

        let err = load(&[1, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Document);
        insta::assert_snapshot!(err, @"page 3: document: page 2 is missing");

        let err = load(&[1, 2, 2]).unwrap_err();
        insta::assert_snapshot!(err, @"page 2: document: duplicate page number");
    }

    #[test]
    fn test_zero_page_number() {
        let file = ContentFile::from_json_str(r#"{"pages": [{"number": 0, "width": 1, "height": 1}]}"#)
            .unwrap();
        assert_eq!(file.to_pages().unwrap_err().kind(), ErrorKind::Document);
    }
}
