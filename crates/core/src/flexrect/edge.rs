//! Sources for the position of a single rectangle edge.

use std::fmt;

use crate::config::{EdgeConfig, VertexConfig};
use crate::error::{DossierError, Result};
use crate::geometry::{Length, Point, Size};

use super::feature::{FeatureLookup, NodeFeature};

/// Axis an edge lies on. Horizontal edges take the `left` coordinate of a
/// point, vertical edges the `top` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn extract(self, point: Point) -> Length {
        match self {
            Self::Horizontal => point.left,
            Self::Vertical => point.top,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum VertexSource {
    Absolute {
        name: &'static str,
        position: Point,
    },
    Relative {
        name: &'static str,
        feature: NodeFeature,
        offset: Size,
    },
}

impl VertexSource {
    pub(crate) fn from_config(name: &'static str, config: &VertexConfig) -> Result<Self> {
        let source = match (&config.abs, &config.rel) {
            (Some(_), Some(_)) => Err(DossierError::BadConfig(
                "absolute and relative positions are mutually exclusive".to_string(),
            )),
            (None, None) => Err(DossierError::IncompleteConfig(
                "absolute or relative position required".to_string(),
            )),
            (Some(abs), None) => abs
                .to_point()
                .map(|position| Self::Absolute { name, position }),
            (None, Some(rel)) => {
                let offset = rel
                    .offset
                    .as_ref()
                    .map_or(Ok(Size::default()), |o| o.to_size())
                    .map_err(|e| e.context("offset"));
                NodeFeature::new(&rel.node, rel.feature).and_then(|feature| {
                    Ok(Self::Relative {
                        name,
                        feature,
                        offset: offset?,
                    })
                })
            }
        };
        source.map_err(|e| e.context(name))
    }

    pub(crate) fn position(&self, lookup: &dyn FeatureLookup) -> Result<Point> {
        match self {
            Self::Absolute { position, .. } => Ok(*position),
            Self::Relative {
                feature, offset, ..
            } => Ok(feature.get(lookup)?.shift(*offset)),
        }
    }
}

impl fmt::Display for VertexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute { name, position } => write!(f, "{name} (position {position})"),
            Self::Relative {
                name,
                feature,
                offset,
            } => write!(f, "{name} (feature \"{feature}\", offset {offset})"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum EdgeSource {
    Absolute {
        name: &'static str,
        distance: Length,
    },
    Relative {
        name: &'static str,
        feature: NodeFeature,
        offset: Length,
        axis: Axis,
    },
    /// One coordinate of a corner.
    Vertex { source: VertexSource, axis: Axis },
    /// Another source moved by a fixed distance.
    Shifted {
        source: Box<EdgeSource>,
        offset: Length,
    },
}

impl EdgeSource {
    pub(crate) fn from_config(name: &'static str, axis: Axis, config: &EdgeConfig) -> Result<Self> {
        let source = match (&config.abs, &config.rel) {
            (Some(_), Some(_)) => Err(DossierError::BadConfig(
                "absolute and relative positions are mutually exclusive".to_string(),
            )),
            (None, None) => Err(DossierError::IncompleteConfig(
                "absolute or relative position required".to_string(),
            )),
            (Some(abs), None) => abs
                .to_length()
                .map(|distance| Self::Absolute { name, distance }),
            (None, Some(rel)) => {
                let offset = rel
                    .offset
                    .as_ref()
                    .map_or(Ok(Length::ZERO), |o| o.to_length())
                    .map_err(|e| e.context("offset"));
                NodeFeature::new(&rel.node, rel.feature).and_then(|feature| {
                    Ok(Self::Relative {
                        name,
                        feature,
                        offset: offset?,
                        axis,
                    })
                })
            }
        };
        source.map_err(|e| e.context(name))
    }

    pub(crate) fn from_vertex(source: VertexSource, axis: Axis) -> Self {
        Self::Vertex { source, axis }
    }

    /// Moves the source by `offset`. A zero offset returns the source as-is.
    pub(crate) fn shifted(self, offset: Length) -> Self {
        if offset.is_zero() {
            return self;
        }
        Self::Shifted {
            source: Box::new(self),
            offset,
        }
    }

    pub(crate) fn position(&self, lookup: &dyn FeatureLookup) -> Result<Length> {
        match self {
            Self::Absolute { distance, .. } => Ok(*distance),
            Self::Relative {
                feature,
                offset,
                axis,
                ..
            } => Ok(axis.extract(feature.get(lookup)?) + *offset),
            Self::Vertex { source, axis } => Ok(axis.extract(source.position(lookup)?)),
            Self::Shifted { source, offset } => Ok(source.position(lookup)? + *offset),
        }
    }
}

impl fmt::Display for EdgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute { name, distance } if distance.is_zero() => f.write_str(name),
            Self::Absolute { name, distance } => write!(f, "{name} (distance {distance})"),
            Self::Relative {
                name,
                feature,
                offset,
                ..
            } => write!(f, "{name} (feature \"{feature}\", offset {offset})"),
            Self::Vertex { source, .. } => source.fmt(f),
            Self::Shifted { source, offset } => write!(f, "{offset} from {source}"),
        }
    }
}
