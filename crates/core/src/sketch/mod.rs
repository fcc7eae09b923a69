//! Sketches: named nodes located on pages through relative geometry and
//! text patterns.
//!
//! A [`Sketch`] is compiled once from a [`SketchConfig`] and is immutable
//! afterwards; it can be shared between threads and used to analyze any
//! number of pages. Nodes on a page are evaluated sequentially in
//! dependency order, pages are independent of each other.

mod locator;
mod node;
mod order;
mod parallel;
mod report;
mod tags;
mod textmatch;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::SketchConfig;
use crate::document::{CancelToken, Document, Page, PageRange};
use crate::error::{DossierError, Result};

pub use node::{Node, SketchNode};
pub use report::{
    DocumentOutput, DocumentReport, NodeOutput, PageOutput, PageReport, RectOutput, SizeOutput,
    TextMatchGroupOutput,
};
pub use textmatch::{TextMatch, TextMatchGroup};

use order::determine_node_order;
use parallel::{default_thread_count, map_or_first_error};
use tags::validate_tags;

/// Options for analyzing multiple pages.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeOptions {
    threads: Option<usize>,
    cancel: CancelToken,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages analyzed concurrently. Defaults to the available
    /// parallelism; 1 analyzes pages sequentially.
    pub fn threads(mut self, count: usize) -> Self {
        self.threads = Some(count.max(1));
        self
    }

    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(default_thread_count)
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

#[derive(Debug)]
pub struct Sketch {
    tags: Vec<String>,
    nodes: Vec<Arc<SketchNode>>,
    order: Vec<usize>,
}

impl Sketch {
    /// Validates the configuration and determines the node evaluation
    /// order. Problems with individual nodes are reported together.
    pub fn compile(config: &SketchConfig) -> Result<Self> {
        let mut errors = Vec::new();

        let tags = validate_tags(&config.tags).unwrap_or_else(|err| {
            errors.push(err);
            Vec::new()
        });

        let mut nodes = Vec::with_capacity(config.nodes.len());
        for node in &config.nodes {
            match SketchNode::compile(node) {
                Ok(compiled) => nodes.push(Arc::new(compiled)),
                Err(err) => errors.push(err.context(format!("node {}", node.name))),
            }
        }

        DossierError::check_all(errors)?;

        let order = determine_node_order(&nodes)?;

        debug!(nodes = nodes.len(), order = ?order, "compiled sketch");

        Ok(Self { tags, nodes, order })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::compile(&SketchConfig::from_json_str(text)?)
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        Self::compile(&SketchConfig::from_json_slice(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| DossierError::from(e).context(path.display().to_string()))?;
        Self::from_json_slice(&data).map_err(|e| e.context(path.display().to_string()))
    }

    /// Sorted sketch tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &SketchNode> {
        self.nodes.iter().map(AsRef::as_ref)
    }

    /// Indices into [`Sketch::nodes`] in evaluation order.
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Evaluates all nodes on one page. Nodes which can't be found are
    /// reported as invalid; only configuration or content problems are
    /// errors.
    pub fn analyze_page(&self, page: &Page) -> Result<PageReport> {
        let mut report = PageReport::new(page.number(), page.size());

        for &idx in &self.order {
            let node = &self.nodes[idx];

            let result = node.search(page, &report).map_err(|e| {
                e.context(format!(
                    "search for node {:?} on page {}",
                    node.name(),
                    page.number()
                ))
            })?;

            debug!(
                page = page.number(),
                node = node.name(),
                valid = result.is_valid(),
                areas = result.search_areas().len(),
                "evaluated node"
            );

            report.append_node(result);
        }

        Ok(report)
    }

    /// Analyzes pages concurrently. Reports are returned in page order; if
    /// any page fails the error of the first failing page is returned.
    pub fn analyze_pages(&self, pages: &[Page], options: &AnalyzeOptions) -> Result<Vec<PageReport>> {
        map_or_first_error(pages, options.threads, |page| {
            options
                .cancel
                .check()
                .map_err(|e| e.context(format!("page {}", page.number())))?;
            self.analyze_page(page)
        })
    }

    /// Parses the pages within `range` and analyzes them.
    pub fn analyze_document(
        &self,
        document: &Document,
        range: PageRange,
        options: &AnalyzeOptions,
    ) -> Result<DocumentReport> {
        let pages = document.parse_pages(&options.cancel, range)?;

        info!(
            range = %range,
            pages = pages.len(),
            threads = options.thread_count(),
            "analyzing document"
        );

        let reports = self.analyze_pages(&pages, options)?;

        Ok(DocumentReport::new(self.tags.clone(), reports))
    }

    /// Lazily analyzes one page after another, starting with page 1, until
    /// the document has no more pages.
    pub fn page_reports<'a>(&'a self, document: &'a Document, cancel: CancelToken) -> PageReports<'a> {
        PageReports {
            sketch: self,
            document,
            cancel,
            next: 1,
            done: false,
        }
    }
}

/// Iterator returned by [`Sketch::page_reports`]. Ends after the last page
/// or the first error.
pub struct PageReports<'a> {
    sketch: &'a Sketch,
    document: &'a Document,
    cancel: CancelToken,
    next: usize,
    done: bool,
}

impl PageReports<'_> {
    fn advance(&mut self) -> Result<Option<PageReport>> {
        let range = PageRange::single(self.next)?;
        let pages = self.document.parse_pages(&self.cancel, range)?;

        let Some(page) = pages.first() else {
            return Ok(None);
        };

        let report = self.sketch.analyze_page(page)?;
        self.next += 1;

        Ok(Some(report))
    }
}

impl Iterator for PageReports<'_> {
    type Item = Result<PageReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(report)) => Some(Ok(report)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for PageReports<'_> {}
