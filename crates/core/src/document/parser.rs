//! Sources of page content.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::debug;

use crate::content::{ContentFile, PageContent};
use crate::error::{DossierError, Result};

use super::cancel::CancelToken;
use super::pagerange::PageRange;

/// Reads and parses document pages.
pub trait Parser: Send + Sync {
    /// Checks whether the data can be parsed at all.
    fn validate(&self, cancel: &CancelToken) -> Result<()>;

    /// Returns the pages within `range`. The result may contain fewer pages
    /// than requested when the document is shorter.
    fn parse_pages(&self, cancel: &CancelToken, range: PageRange) -> Result<Vec<PageContent>>;
}

/// Selects the pages whose number lies within `range`. A range starting at
/// [`PageRange::LAST`] selects the highest-numbered page.
fn select_pages(pages: &[PageContent], range: PageRange) -> Vec<PageContent> {
    if range.lower() == PageRange::LAST {
        return pages.iter().max_by_key(|p| p.number).cloned().into_iter().collect();
    }

    pages
        .iter()
        .filter(|p| range.contains(p.number))
        .cloned()
        .collect()
}

/// Parser over pages held in memory, with optional injected failures.
#[derive(Clone, Debug, Default)]
pub struct SimpleParser {
    pages: Vec<PageContent>,
    validate_error: Option<String>,
    parse_error: Option<String>,
}

impl SimpleParser {
    pub fn new(mut pages: Vec<PageContent>) -> Self {
        pages.sort_by_key(|p| p.number);
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn with_validate_error(mut self, message: impl Into<String>) -> Self {
        self.validate_error = Some(message.into());
        self
    }

    pub fn with_parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = Some(message.into());
        self
    }
}

impl Parser for SimpleParser {
    fn validate(&self, _cancel: &CancelToken) -> Result<()> {
        match &self.validate_error {
            Some(message) => Err(DossierError::Document(message.clone())),
            None => Ok(()),
        }
    }

    fn parse_pages(&self, _cancel: &CancelToken, range: PageRange) -> Result<Vec<PageContent>> {
        if let Some(message) = &self.parse_error {
            return Err(DossierError::Document(message.clone()));
        }
        Ok(select_pages(&self.pages, range))
    }
}

/// Parser for JSON page content files. The file is read once, on first
/// use; failed reads are retried on the next call.
#[derive(Clone, Debug)]
pub struct JsonParser {
    path: PathBuf,
    pages: OnceLock<Vec<PageContent>>,
}

impl JsonParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pages: OnceLock::new(),
        }
    }

    fn load(&self) -> Result<&[PageContent]> {
        if let Some(pages) = self.pages.get() {
            return Ok(pages.as_slice());
        }

        let file = File::open(&self.path)
            .map_err(|e| DossierError::from(e).context(self.path.display().to_string()))?;
        let pages = load_pages(BufReader::new(file))
            .map_err(|e| e.context(self.path.display().to_string()))?;

        debug!(path = %self.path.display(), pages = pages.len(), "loaded page content");

        Ok(self.pages.get_or_init(|| pages).as_slice())
    }
}

/// Reads JSON page content from `reader`, sorted by page number. Pages
/// must be numbered 1..=n without gaps or duplicates.
pub fn load_pages(reader: impl Read) -> Result<Vec<PageContent>> {
    ContentFile::from_reader(reader)?.to_pages()
}

impl Parser for JsonParser {
    fn validate(&self, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        self.load().map(|_| ())
    }

    fn parse_pages(&self, cancel: &CancelToken, range: PageRange) -> Result<Vec<PageContent>> {
        cancel.check()?;
        Ok(select_pages(self.load()?, range))
    }
}
