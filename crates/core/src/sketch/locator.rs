use std::ops::ControlFlow;

use regex::Regex;

use crate::config::TextMatchConfig;
use crate::content::{ElementKind, TextElement};
use crate::document::Page;
use crate::error::{DossierError, Result};
use crate::geometry::Rect;

use super::textmatch::TextMatch;

/// Outcome of a successful search within one area.
#[derive(Clone, Debug)]
pub(crate) struct Located {
    pub(crate) bounds: Rect,
    pub(crate) text: String,
    pub(crate) text_match: TextMatch,
}

/// Finds a block or line whose text matches a pattern.
#[derive(Clone, Debug)]
pub(crate) struct TextLocator {
    kind: ElementKind,
    pattern: Regex,
    bounds_from_match: bool,
}

impl TextLocator {
    pub(crate) fn compile(kind: ElementKind, config: &TextMatchConfig) -> Result<Self> {
        let pattern = Regex::new(&config.regex).map_err(|source| DossierError::Pattern {
            pattern: config.regex.clone(),
            source,
        })?;

        Ok(Self {
            kind,
            pattern,
            bounds_from_match: config.bounds_from_match,
        })
    }

    pub(crate) fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Searches for the first element of the configured kind lying fully
    /// within `area` and matching the pattern. Which element is first among
    /// several candidates is up to the spatial index.
    pub(crate) fn locate(&self, page: &Page, area: &Rect) -> Result<Option<Located>> {
        let mut found = None;

        page.visit_elements_intersecting(area, |element| {
            if element.kind() != self.kind || !area.contains(&element.bounds()) {
                return Ok(ControlFlow::Continue(()));
            }

            let Some(text_match) = TextMatch::evaluate(&self.pattern, element.text()) else {
                return Ok(ControlFlow::Continue(()));
            };

            let mut bounds = element.bounds();
            if self.bounds_from_match
                && let Some(span) = text_match.span(0)
                && let Some(matched) = element.range_bounds(span.start, span.end)
            {
                bounds = matched;
            }

            found = Some(Located {
                bounds,
                text: element.text().to_string(),
                text_match,
            });

            Ok(ControlFlow::Break(()))
        })?;

        Ok(found)
    }
}
