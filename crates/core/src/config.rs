//! Declarative sketch configuration.
//!
//! Sketches are written as JSON and deserialized into the types below. They
//! carry no validation beyond the shape of the data; [`crate::sketch::Sketch::compile`]
//! turns them into an immutable, validated representation.
//!
//! Lengths are written either as a string with a unit (`"2.5cm"`) or as a
//! single-entry map (`{"cm": 2.5}`). An empty map is a length of zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};
use crate::flexrect::FeatureKind;
use crate::geometry::{Length, LengthUnit, Point, Size};

/// A length as written in a configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthConfig {
    Text(String),
    Units(BTreeMap<String, f64>),
}

impl LengthConfig {
    pub fn new(unit: LengthUnit, value: f64) -> Self {
        Self::Units(BTreeMap::from([(unit.name().to_string(), value)]))
    }

    pub fn pt(value: f64) -> Self {
        Self::new(LengthUnit::Pt, value)
    }

    pub fn mm(value: f64) -> Self {
        Self::new(LengthUnit::Mm, value)
    }

    pub fn cm(value: f64) -> Self {
        Self::new(LengthUnit::Cm, value)
    }

    pub fn to_length(&self) -> Result<Length> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Units(units) => {
                let mut iter = units.iter();
                let Some((unit, value)) = iter.next() else {
                    return Ok(Length::ZERO);
                };
                if iter.next().is_some() {
                    return Err(DossierError::BadConfig(format!(
                        "length must use exactly one unit, got {:?}",
                        units.keys().collect::<Vec<_>>()
                    )));
                }
                let unit: LengthUnit = unit.parse()?;
                Ok(unit.size() * *value)
            }
        }
    }
}

impl From<Length> for LengthConfig {
    fn from(value: Length) -> Self {
        Self::pt(value.pt())
    }
}

fn optional_length(value: &Option<LengthConfig>) -> Result<Length> {
    value
        .as_ref()
        .map_or(Ok(Length::ZERO), LengthConfig::to_length)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<LengthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<LengthConfig>,
}

impl PointConfig {
    pub fn new(left: LengthConfig, top: LengthConfig) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
        }
    }

    /// Missing coordinates are zero.
    pub fn to_point(&self) -> Result<Point> {
        Ok(Point::new(
            optional_length(&self.left).map_err(|e| e.context("left"))?,
            optional_length(&self.top).map_err(|e| e.context("top"))?,
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<LengthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<LengthConfig>,
}

impl SizeConfig {
    pub fn new(width: LengthConfig, height: LengthConfig) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Missing dimensions are zero.
    pub fn to_size(&self) -> Result<Size> {
        Ok(Size::new(
            optional_length(&self.width).map_err(|e| e.context("width"))?,
            optional_length(&self.height).map_err(|e| e.context("height"))?,
        ))
    }
}

/// Position along one axis relative to a feature of another node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativePosition1D {
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub feature: FeatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<LengthConfig>,
}

/// Position relative to a feature of another node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativePosition2D {
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub feature: FeatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<SizeConfig>,
}

/// A single rectangle edge, either absolute or relative.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs: Option<LengthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<RelativePosition1D>,
}

impl EdgeConfig {
    pub fn abs(distance: LengthConfig) -> Self {
        Self {
            abs: Some(distance),
            rel: None,
        }
    }

    pub fn rel(node: &str, feature: FeatureKind, offset: Option<LengthConfig>) -> Self {
        Self {
            abs: None,
            rel: Some(RelativePosition1D {
                node: node.to_string(),
                feature,
                offset,
            }),
        }
    }
}

/// A single rectangle corner, either absolute or relative.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs: Option<PointConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<RelativePosition2D>,
}

impl VertexConfig {
    pub fn abs(left: LengthConfig, top: LengthConfig) -> Self {
        Self {
            abs: Some(PointConfig::new(left, top)),
            rel: None,
        }
    }

    pub fn rel(node: &str, feature: FeatureKind, offset: Option<SizeConfig>) -> Self {
        Self {
            abs: None,
            rel: Some(RelativePosition2D {
                node: node.to_string(),
                feature,
                offset,
            }),
        }
    }
}

/// A rectangle built from any combination of edges, corners and
/// dimensions which determines each edge exactly once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<EdgeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<EdgeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<EdgeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<EdgeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<VertexConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right: Option<VertexConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<VertexConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<VertexConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<LengthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<LengthConfig>,
}

impl RectConfig {
    /// A rectangle from four absolute edges.
    pub fn absolute(left: LengthConfig, top: LengthConfig, right: LengthConfig, bottom: LengthConfig) -> Self {
        Self {
            top: Some(EdgeConfig::abs(top)),
            right: Some(EdgeConfig::abs(right)),
            bottom: Some(EdgeConfig::abs(bottom)),
            left: Some(EdgeConfig::abs(left)),
            ..Self::default()
        }
    }
}

/// Regular expression matched against the full text of a block or line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextMatchConfig {
    #[serde(default)]
    pub regex: String,
    /// Narrow the node bounds to the matched characters.
    #[serde(default)]
    pub bounds_from_match: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_areas: Vec<RectConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_text: Option<TextMatchConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_text: Option<TextMatchConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SketchConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeConfig>,
}

impl SketchConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_length_forms() {
        let text: LengthConfig = serde_json::from_str(r#""3cm""#).unwrap();
        let map: LengthConfig = serde_json::from_str(r#"{"cm": 3}"#).unwrap();
        let empty: LengthConfig = serde_json::from_str("{}").unwrap();

        assert!(text
            .to_length()
            .unwrap()
            .approx_eq(map.to_length().unwrap(), Length::from_pt(1e-9)));
        assert_eq!(empty.to_length().unwrap(), Length::ZERO);
    }

    #[test]
    fn test_length_errors() {
        let unknown: LengthConfig = serde_json::from_str(r#"{"furlong": 1}"#).unwrap();
        assert_eq!(unknown.to_length().unwrap_err().kind(), ErrorKind::InvalidUnit);

        let two: LengthConfig = serde_json::from_str(r#"{"cm": 1, "mm": 2}"#).unwrap();
        assert_eq!(two.to_length().unwrap_err().kind(), ErrorKind::BadConfig);
    }

    #[test]
    fn test_parse_sketch() {
        let sketch = SketchConfig::from_json_str(
            r#"{
                "tags": ["invoice"],
                "nodes": [{
                    "name": "title",
                    "search_areas": [{
                        "top_left": {"abs": {"left": "1cm", "top": {"mm": 5}}},
                        "bottom_right": {"rel": {"node": "logo", "feature": "bottom_right",
                                                 "offset": {"width": "2mm"}}},
                        "right": {"rel": {"node": "logo", "feature": "top_left", "offset": "1mm"}}
                    }],
                    "line_text": {"regex": "(?i)invoice", "bounds_from_match": true},
                    "tags": ["header"]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(sketch.tags, ["invoice"]);
        let node = &sketch.nodes[0];
        assert_eq!(node.name, "title");
        assert!(node.block_text.is_none());
        assert!(node.line_text.as_ref().unwrap().bounds_from_match);

        let area = &node.search_areas[0];
        let rel = area.bottom_right.as_ref().unwrap().rel.as_ref().unwrap();
        assert_eq!(rel.node, "logo");
        assert_eq!(rel.feature, FeatureKind::BottomRight);
        assert!(area.right.as_ref().unwrap().rel.is_some());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = SketchConfig::from_json_str(r#"{"nodes": [{"nmae": "x"}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Json);
    }
}
