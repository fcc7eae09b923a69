//! Documents and their pages.
//!
//! - `parser` - sources of page content (`Parser`, `SimpleParser`, `JsonParser`)
//! - `page` - a parsed page with a spatial index over its elements
//! - `pagerange` - one-based page ranges
//! - `cancel` - cooperative cancellation and deadlines

pub mod cancel;
pub mod page;
pub mod pagerange;
pub mod parser;

pub use cancel::CancelToken;
pub use page::{Page, PageElement};
pub use pagerange::PageRange;
pub use parser::{JsonParser, Parser, SimpleParser, load_pages};

use std::fmt;
use std::path::Path;

use tracing::trace;

use crate::error::Result;

/// A document backed by a [`Parser`].
pub struct Document {
    parser: Box<dyn Parser>,
}

impl Document {
    pub fn new(parser: impl Parser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }

    /// Opens a JSON page content file.
    pub fn open_json(path: impl AsRef<Path>) -> Self {
        Self::new(JsonParser::new(path.as_ref()))
    }

    /// Checks whether the document can be read and parsed.
    pub fn validate(&self, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        self.parser.validate(cancel)
    }

    /// Parses the pages within `range` and indexes their contents. The
    /// result may contain fewer pages than requested.
    pub fn parse_pages(&self, cancel: &CancelToken, range: PageRange) -> Result<Vec<Page>> {
        cancel.check()?;

        let contents = self
            .parser
            .parse_pages(cancel, range)
            .map_err(|e| e.context(format!("pages {range}")))?;

        trace!(range = %range, pages = contents.len(), "parsed pages");

        contents
            .into_iter()
            .map(|content| {
                cancel
                    .check()
                    .map_err(|e| e.context(format!("page {}", content.number)))?;
                Ok(Page::new(content))
            })
            .collect()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
