use std::sync::Arc;

use tracing::trace;

use crate::config::NodeConfig;
use crate::content::ElementKind;
use crate::document::Page;
use crate::error::{DossierError, ErrorKind, Result};
use crate::flexrect::{FeatureKind, FeatureLookup, FlexRect};
use crate::geometry::{Point, Rect};

use super::locator::TextLocator;
use super::tags::validate_tags;
use super::textmatch::TextMatch;

/// A compiled node of a sketch.
#[derive(Debug)]
pub struct SketchNode {
    name: String,
    search_areas: Vec<FlexRect>,
    locator: TextLocator,
    tags: Vec<String>,
}

impl SketchNode {
    /// Validates and compiles a node configuration. Independent problems
    /// are reported together.
    pub fn compile(config: &NodeConfig) -> Result<Self> {
        let mut errors = Vec::new();

        let tags = validate_tags(&config.tags).unwrap_or_else(|err| {
            errors.push(err);
            Vec::new()
        });

        let locator = match (&config.block_text, &config.line_text) {
            (Some(m), None) => TextLocator::compile(ElementKind::Block, m).map(Some),
            (None, Some(m)) => TextLocator::compile(ElementKind::Line, m).map(Some),
            (None, None) => Err(DossierError::BadConfig(format!(
                "node {:?} has unsupported match type (neither block_text nor line_text)",
                config.name
            ))),
            (Some(_), Some(_)) => Err(DossierError::BadConfig(format!(
                "node {:?} has unsupported match type (both block_text and line_text)",
                config.name
            ))),
        }
        .unwrap_or_else(|err| {
            errors.push(err);
            None
        });

        let mut search_areas = Vec::with_capacity(config.search_areas.len());
        for (idx, area) in config.search_areas.iter().enumerate() {
            match FlexRect::compile(area) {
                Ok(area) => search_areas.push(area),
                Err(err) => errors.push(err.context(format!("search area {idx}"))),
            }
        }

        if config.search_areas.is_empty() {
            errors.push(DossierError::IncompleteConfig(format!(
                "node {:?} requires at least one search area",
                config.name
            )));
        }

        DossierError::check_all(errors)?;

        let Some(locator) = locator else {
            return Err(DossierError::IncompleteConfig(format!(
                "node {:?} lacks a matcher",
                config.name
            )));
        };

        Ok(Self {
            name: config.name.clone(),
            search_areas,
            locator,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn search_areas(&self) -> &[FlexRect] {
        &self.search_areas
    }

    /// Kind of element searched for.
    pub fn element_kind(&self) -> ElementKind {
        self.locator.kind()
    }

    /// Position of `kind` on `bounds`. Only the four corners are available.
    pub(crate) fn feature_position(&self, bounds: &Rect, kind: FeatureKind) -> Result<Point> {
        kind.locate(bounds).ok_or_else(|| {
            DossierError::NodeFeatureUnavailable(format!(
                "node {:?} lacks feature {kind}",
                self.name
            ))
        })
    }

    /// Resolves the search areas against `lookup` and searches them in
    /// order until one yields a match. Areas depending on nodes without a
    /// known position are skipped.
    pub(crate) fn search(self: &Arc<Self>, page: &Page, lookup: &dyn FeatureLookup) -> Result<Node> {
        let mut node = Node::new(Arc::clone(self));

        for (idx, area) in self.search_areas.iter().enumerate() {
            match area.resolve(lookup) {
                Ok(bounds) => node.search_areas.push(bounds),
                Err(err) if err.is(ErrorKind::NodePositionUnknown) => {
                    trace!(node = %self.name, area = idx, error = %err, "skipping search area");
                }
                Err(err) => return Err(err.context(format!("search area {idx}"))),
            }
        }

        for area in &node.search_areas {
            if let Some(located) = self.locator.locate(page, area)? {
                node.valid = true;
                node.bounds = located.bounds;
                node.text = Some(located.text);
                node.text_match = Some(located.text_match);
                break;
            }
        }

        Ok(node)
    }
}

/// Result of evaluating a [`SketchNode`] on one page.
#[derive(Clone, Debug)]
pub struct Node {
    source: Arc<SketchNode>,
    valid: bool,
    bounds: Rect,
    search_areas: Vec<Rect>,
    text: Option<String>,
    text_match: Option<TextMatch>,
}

impl Node {
    fn new(source: Arc<SketchNode>) -> Self {
        Self {
            source,
            valid: false,
            bounds: Rect::default(),
            search_areas: Vec::new(),
            text: None,
            text_match: None,
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn tags(&self) -> &[String] {
        self.source.tags()
    }

    /// Whether a search area produced a match. Bounds and text are only
    /// meaningful for valid nodes.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// All search areas which could be resolved, in declaration order.
    pub fn search_areas(&self) -> &[Rect] {
        &self.search_areas
    }

    /// Full text of the matched element; empty if there was no match.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn text_match(&self) -> Option<&TextMatch> {
        self.text_match.as_ref()
    }

    pub fn feature_position(&self, kind: FeatureKind) -> Result<Point> {
        if !self.valid {
            return Err(DossierError::NodePositionUnknown(format!(
                "node {:?} has no position",
                self.name()
            )));
        }

        self.source.feature_position(&self.bounds, kind)
    }
}
