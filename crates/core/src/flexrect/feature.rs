//! Node features: named reference points other rectangles can be anchored to.

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};
use crate::geometry::{Point, Rect};

/// A reference point on a node's bounds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    #[default]
    Unspecified,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FeatureKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
        }
    }

    /// Returns the position of the feature on `bounds`, or `None` for kinds
    /// which don't designate a point.
    pub fn locate(self, bounds: &Rect) -> Option<Point> {
        match self {
            Self::TopLeft => Some(bounds.top_left()),
            Self::TopRight => Some(bounds.top_right()),
            Self::BottomLeft => Some(bounds.bottom_left()),
            Self::BottomRight => Some(bounds.bottom_right()),
            Self::Unspecified => None,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A feature of a named node. Ordered by name, then kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeFeature {
    name: String,
    kind: FeatureKind,
}

impl NodeFeature {
    /// Fails with an incomplete configuration error if `name` is empty.
    pub fn new(name: &str, kind: FeatureKind) -> Result<Self> {
        if name.is_empty() {
            return Err(DossierError::IncompleteConfig(
                "missing node name".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
        })
    }

    pub fn node_name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub(crate) fn get(&self, lookup: &dyn FeatureLookup) -> Result<Point> {
        lookup.node_feature_position(&self.name, self.kind)
    }
}

impl fmt::Display for NodeFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}

/// Source of node feature positions while resolving rectangles.
pub trait FeatureLookup {
    fn node_feature_position(&self, name: &str, kind: FeatureKind) -> Result<Point>;
}

impl<F> FeatureLookup for F
where
    F: Fn(&str, FeatureKind) -> Result<Point>,
{
    fn node_feature_position(&self, name: &str, kind: FeatureKind) -> Result<Point> {
        self(name, kind)
    }
}

/// Lookup which records every requested feature and answers with the
/// origin. Evaluating edge sources against it enumerates their
/// dependencies without needing real positions.
#[derive(Debug, Default)]
pub struct DependencyDiscovery {
    requested: RefCell<Vec<NodeFeature>>,
}

impl DependencyDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the distinct requested features in sorted order.
    pub fn into_features(self) -> Vec<NodeFeature> {
        let mut features = self.requested.into_inner();
        features.sort();
        features.dedup();
        features
    }
}

impl FeatureLookup for DependencyDiscovery {
    fn node_feature_position(&self, name: &str, kind: FeatureKind) -> Result<Point> {
        self.requested.borrow_mut().push(NodeFeature {
            name: name.to_string(),
            kind,
        });
        Ok(Point::default())
    }
}
