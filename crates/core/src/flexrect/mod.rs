//! Flexible rectangles.
//!
//! A [`FlexRect`] describes a rectangle through any consistent combination
//! of edges, corners and dimensions, each either absolute or relative to a
//! feature of another node. Compilation checks that every edge is
//! determined by exactly one source; resolution then evaluates the sources
//! against a [`FeatureLookup`].

mod edge;
mod feature;
mod picker;

use std::fmt;

use tracing::trace;

use crate::config::RectConfig;
use crate::error::{DossierError, Result};
use crate::geometry::{Length, Rect};

use edge::{Axis, EdgeSource, VertexSource};
pub use feature::{DependencyDiscovery, FeatureKind, FeatureLookup, NodeFeature};
use picker::EdgePicker;

const EDGES: [(&str, Axis); 4] = [
    ("top", Axis::Vertical),
    ("right", Axis::Horizontal),
    ("bottom", Axis::Vertical),
    ("left", Axis::Horizontal),
];

/// Corners in clockwise order, starting top-left. Edge `i` runs from
/// corner `i` to corner `i + 1`.
const VERTICES: [&str; 4] = ["top_left", "top_right", "bottom_right", "bottom_left"];

/// A compiled rectangle whose edges may depend on other nodes.
#[derive(Clone, Debug)]
pub struct FlexRect {
    top: EdgeSource,
    right: EdgeSource,
    bottom: EdgeSource,
    left: EdgeSource,
    dependencies: Vec<NodeFeature>,
}

impl FlexRect {
    pub fn compile(config: &RectConfig) -> Result<Self> {
        let mut errors = Vec::new();

        let edge_configs = [&config.top, &config.right, &config.bottom, &config.left];
        let mut edges: [Option<EdgeSource>; 4] = Default::default();
        for (slot, ((name, axis), config)) in edges.iter_mut().zip(EDGES.into_iter().zip(edge_configs)) {
            if let Some(config) = config {
                match EdgeSource::from_config(name, axis, config) {
                    Ok(source) => *slot = Some(source),
                    Err(err) => errors.push(err),
                }
            }
        }

        let vertex_configs = [
            &config.top_left,
            &config.top_right,
            &config.bottom_right,
            &config.bottom_left,
        ];
        let mut vertices: [Option<VertexSource>; 4] = Default::default();
        for (slot, (name, config)) in vertices.iter_mut().zip(VERTICES.into_iter().zip(vertex_configs)) {
            if let Some(config) = config {
                match VertexSource::from_config(name, config) {
                    Ok(source) => *slot = Some(source),
                    Err(err) => errors.push(err),
                }
            }
        }

        // Indexed by edge parity: vertical edges are spaced by the height,
        // horizontal ones by the width.
        let mut distances = [None, None];
        for (slot, (name, config)) in distances
            .iter_mut()
            .zip([("height", &config.height), ("width", &config.width)])
        {
            if let Some(config) = config {
                match config.to_length() {
                    Ok(length) => *slot = Some(length),
                    Err(err) => errors.push(err.context(name)),
                }
            }
        }

        DossierError::check_all(errors)?;

        let mut errors = Vec::new();
        let mut picked: [Option<EdgeSource>; 4] = Default::default();

        for (idx, (name, axis)) in EDGES.into_iter().enumerate() {
            let mut picker = EdgePicker::new(name);

            picker.add_edge(edges[idx].as_ref(), Length::ZERO);
            for vertex in [idx, (idx + 1) % 4] {
                picker.add_vertex(vertices[vertex].as_ref(), axis, Length::ZERO);
            }

            if let Some(distance) = distances[idx % 2] {
                // Top and left lie before their opposite edge.
                let offset = if idx == 0 || idx == 3 { -distance } else { distance };
                let opposite = (idx + 2) % 4;

                picker.add_edge(edges[opposite].as_ref(), offset);
                for vertex in [opposite, (idx + 3) % 4] {
                    picker.add_vertex(vertices[vertex].as_ref(), axis, offset);
                }
            }

            match picker.pick() {
                Ok(source) => picked[idx] = Some(source),
                Err(err) => errors.push(err),
            }
        }

        DossierError::check_all(errors)?;

        let [Some(top), Some(right), Some(bottom), Some(left)] = picked else {
            return Err(DossierError::IncompleteConfig(
                "rectangle edges missing".to_string(),
            ));
        };

        let mut rect = Self {
            top,
            right,
            bottom,
            left,
            dependencies: Vec::new(),
        };

        let discovery = DependencyDiscovery::new();
        rect.evaluate(&discovery)?;
        rect.dependencies = discovery.into_features();

        trace!(rect = %rect, dependencies = rect.dependencies.len(), "compiled flexrect");

        Ok(rect)
    }

    /// Node features required to resolve the rectangle, sorted and without
    /// duplicates.
    pub fn required_node_features(&self) -> &[NodeFeature] {
        &self.dependencies
    }

    /// Computes the rectangle using feature positions from `lookup`. The
    /// result is normalized; a rectangle which is invalid even after
    /// normalization is an error.
    pub fn resolve(&self, lookup: &dyn FeatureLookup) -> Result<Rect> {
        let rect = self.evaluate(lookup)?.normalize();

        rect.validate().map_err(|e| e.context("flexrect"))?;

        Ok(rect)
    }

    fn evaluate(&self, lookup: &dyn FeatureLookup) -> Result<Rect> {
        let mut errors = Vec::new();
        let mut values = [Length::ZERO; 4];

        for ((value, source), (name, _)) in values
            .iter_mut()
            .zip([&self.top, &self.right, &self.bottom, &self.left])
            .zip(EDGES)
        {
            match source.position(lookup) {
                Ok(position) => *value = position,
                Err(err) => errors.push(err.context(name)),
            }
        }

        DossierError::check_all(errors)?;

        let [top, right, bottom, left] = values;

        Ok(Rect::new(left, top, right, bottom))
    }
}

impl fmt::Display for FlexRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[top={}, right={}, bottom={}, left={}]",
            self.top, self.right, self.bottom, self.left
        )
    }
}
