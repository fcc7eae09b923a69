//! Analysis results and their serializable form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};
use crate::flexrect::{FeatureKind, FeatureLookup};
use crate::geometry::{LengthFormat, Point, Rect, Size};

use super::node::Node;
use super::textmatch::TextMatchGroup;

/// Results of all nodes on one page, in evaluation order.
#[derive(Clone, Debug)]
pub struct PageReport {
    number: usize,
    size: Size,
    nodes: IndexMap<String, Node>,
}

impl PageReport {
    pub(crate) fn new(number: usize, size: Size) -> Self {
        Self {
            number,
            size,
            nodes: IndexMap::new(),
        }
    }

    pub(crate) fn append_node(&mut self, node: Node) {
        self.nodes.insert(node.name().to_string(), node);
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn to_output(&self, format: &LengthFormat) -> PageOutput {
        PageOutput {
            number: self.number,
            size: SizeOutput {
                width: format.value(self.size.width),
                height: format.value(self.size.height),
            },
            nodes: self.nodes().map(|n| NodeOutput::new(n, format)).collect(),
        }
    }
}

impl FeatureLookup for PageReport {
    fn node_feature_position(&self, name: &str, kind: FeatureKind) -> Result<Point> {
        match self.node_by_name(name) {
            Some(node) => node.feature_position(kind),
            None => Err(DossierError::NodePositionUnknown(format!(
                "node {name:?} not found"
            ))),
        }
    }
}

/// Result of analyzing a document.
#[derive(Clone, Debug, Default)]
pub struct DocumentReport {
    tags: Vec<String>,
    pages: Vec<PageReport>,
}

impl DocumentReport {
    pub(crate) fn new(tags: Vec<String>, pages: Vec<PageReport>) -> Self {
        Self { tags, pages }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn pages(&self) -> &[PageReport] {
        &self.pages
    }

    pub fn to_output(&self, format: &LengthFormat) -> DocumentOutput {
        DocumentOutput {
            unit: format.unit.name().to_string(),
            tags: self.tags.clone(),
            pages: self.pages.iter().map(|p| p.to_output(format)).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutput {
    /// Unit of all lengths in the output.
    pub unit: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub pages: Vec<PageOutput>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageOutput {
    pub number: usize,
    pub size: SizeOutput,
    pub nodes: Vec<NodeOutput>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeOutput {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectOutput {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RectOutput {
    pub fn new(rect: &Rect, format: &LengthFormat) -> Self {
        Self {
            left: format.value(rect.left),
            top: format.value(rect.top),
            right: format.value(rect.right),
            bottom: format.value(rect.bottom),
        }
    }
}

/// Per-node result. Bounds, text and groups are only present for valid
/// nodes, so an unmatched node is distinguishable from one which matched
/// an empty text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeOutput {
    pub name: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub search_areas: Vec<RectOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RectOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<TextMatchGroupOutput>,
}

impl NodeOutput {
    pub fn new(node: &Node, format: &LengthFormat) -> Self {
        let mut output = Self {
            name: node.name().to_string(),
            valid: node.is_valid(),
            tags: node.tags().to_vec(),
            search_areas: node
                .search_areas()
                .iter()
                .map(|r| RectOutput::new(r, format))
                .collect(),
            bounds: None,
            text: None,
            groups: Vec::new(),
        };

        if node.is_valid() {
            output.bounds = Some(RectOutput::new(&node.bounds(), format));
            output.text = Some(node.text().to_string());
            if let Some(m) = node.text_match() {
                output.groups = m.groups().iter().map(TextMatchGroupOutput::from).collect();
            }
        }

        output
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMatchGroupOutput {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Byte offsets within the text; -1 if the group was not captured.
    pub start: isize,
    pub end: isize,
    pub text: String,
}

impl From<&TextMatchGroup> for TextMatchGroupOutput {
    fn from(group: &TextMatchGroup) -> Self {
        Self {
            name: group.name.clone(),
            start: group.start(),
            end: group.end(),
            text: group.text.clone(),
        }
    }
}
