use smallvec::SmallVec;

use crate::error::{DossierError, Result};
use crate::geometry::Length;

use super::edge::{Axis, EdgeSource, VertexSource};

/// Collects every configured way of determining one edge. Exactly one
/// candidate must exist.
pub(super) struct EdgePicker {
    name: &'static str,
    candidates: SmallVec<[EdgeSource; 4]>,
}

impl EdgePicker {
    pub(super) fn new(name: &'static str) -> Self {
        Self {
            name,
            candidates: SmallVec::new(),
        }
    }

    pub(super) fn add_edge(&mut self, source: Option<&EdgeSource>, offset: Length) {
        if let Some(source) = source {
            self.candidates.push(source.clone().shifted(offset));
        }
    }

    pub(super) fn add_vertex(&mut self, source: Option<&VertexSource>, axis: Axis, offset: Length) {
        if let Some(source) = source {
            self.candidates
                .push(EdgeSource::from_vertex(source.clone(), axis).shifted(offset));
        }
    }

    pub(super) fn pick(mut self) -> Result<EdgeSource> {
        match self.candidates.len() {
            0 => Err(DossierError::IncompleteConfig(format!(
                "no position specified for {:?}",
                self.name
            ))),
            1 => Ok(self.candidates.remove(0)),
            _ => {
                let descriptions: Vec<String> =
                    self.candidates.iter().map(ToString::to_string).collect();
                Err(DossierError::BadConfig(format!(
                    "conflicting position sources for {:?}: {:?}",
                    self.name, descriptions
                )))
            }
        }
    }
}
