//! Evaluation order of sketch nodes.
//!
//! Search areas may be defined relative to other nodes, so those nodes need
//! to be located first. The walk below is a depth-first traversal with an
//! explicit stack of frames; a node is emitted once all nodes it references
//! have been.

use std::sync::Arc;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{DossierError, ErrorKind, Result};
use crate::flexrect::NodeFeature;
use crate::geometry::Rect;

use super::node::SketchNode;

struct Frame<'a> {
    index: usize,
    dependencies: Vec<&'a NodeFeature>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(index: usize, node: &'a SketchNode) -> Self {
        Self {
            index,
            dependencies: node
                .search_areas()
                .iter()
                .flat_map(|area| area.required_node_features())
                .collect(),
            next: 0,
        }
    }
}

/// Returns node indices such that every node comes after all nodes it
/// references.
pub(crate) fn determine_node_order(nodes: &[Arc<SketchNode>]) -> Result<Vec<usize>> {
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();

    for (idx, node) in nodes.iter().enumerate() {
        if let Some(first) = by_name.insert(node.name(), idx) {
            return Err(DossierError::BadConfig(format!(
                "multiple nodes with name {:?}, first occurrence at index {first}",
                node.name()
            )));
        }
    }

    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());

    for root in 0..nodes.len() {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        let mut stack = vec![Frame::new(root, &nodes[root])];

        while let Some(frame) = stack.last_mut() {
            let Some(feature) = frame.dependencies.get(frame.next).copied() else {
                order.push(frame.index);
                stack.pop();
                continue;
            };

            frame.next += 1;
            let current = &nodes[frame.index];

            let Some(&other) = by_name.get(feature.node_name()) else {
                return Err(DossierError::BadConfig(format!(
                    "node {:?}: referenced node {:?} not found",
                    current.name(),
                    feature.node_name()
                )));
            };

            if let Err(err) = nodes[other].feature_position(&Rect::default(), feature.kind()) {
                return Err(err.classify(ErrorKind::BadConfig, format!("node {:?}", current.name())));
            }

            if stack.iter().any(|f| f.index == other) {
                let path = stack
                    .iter()
                    .map(|f| nodes[f.index].name())
                    .chain([nodes[other].name()])
                    .join(" \u{2192} ");
                return Err(DossierError::BadConfig(format!(
                    "recursive node reference: {path}"
                )));
            }

            if !visited[other] {
                visited[other] = true;
                stack.push(Frame::new(other, &nodes[other]));
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EdgeConfig, LengthConfig, NodeConfig, RectConfig, TextMatchConfig};
    use crate::flexrect::FeatureKind;

    fn node(name: &str, refs: &[(&str, FeatureKind)]) -> Arc<SketchNode> {
        let mut area = RectConfig::absolute(
            LengthConfig::cm(0.0),
            LengthConfig::cm(0.0),
            LengthConfig::cm(1.0),
            LengthConfig::cm(1.0),
        );
        if let Some((other, kind)) = refs.first() {
            area.top = Some(EdgeConfig::rel(other, *kind, None));
        }

        let mut search_areas = vec![area];
        for (other, kind) in refs.iter().skip(1) {
            search_areas.push(RectConfig {
                left: Some(EdgeConfig::rel(other, *kind, None)),
                ..RectConfig::absolute(
                    LengthConfig::cm(0.0),
                    LengthConfig::cm(0.0),
                    LengthConfig::cm(1.0),
                    LengthConfig::cm(1.0),
                )
            });
        }

        Arc::new(
            SketchNode::compile(&NodeConfig {
                name: name.to_string(),
                search_areas,
                block_text: Some(TextMatchConfig::default()),
                ..NodeConfig::default()
            })
            .unwrap(),
        )
    }

    const TL: FeatureKind = FeatureKind::TopLeft;

    #[test]
    fn test_empty() {
        assert!(determine_node_order(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_dependency_first() {
        let nodes = [node("first", &[("second", TL)]), node("second", &[])];
        assert_eq!(determine_node_order(&nodes).unwrap(), [1, 0]);
    }

    #[test]
    fn test_three_nodes() {
        let nodes = [
            node("text", &[("subtitle", TL), ("title", FeatureKind::BottomLeft)]),
            node("title", &[]),
            node("subtitle", &[("title", FeatureKind::BottomRight)]),
            node("isolated", &[]),
        ];
        assert_eq!(determine_node_order(&nodes).unwrap(), [1, 2, 0, 3]);
    }

    #[test]
    fn test_self_reference() {
        let nodes = [node("foo", &[("foo", TL)])];
        let err = determine_node_order(&nodes).unwrap_err();
        insta::assert_snapshot!(err, @"bad configuration: recursive node reference: foo → foo");
    }

    #[test]
    fn test_two_node_cycle() {
        let nodes = [node("a", &[("b", TL)]), node("b", &[("a", FeatureKind::BottomLeft)])];
        let err = determine_node_order(&nodes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadConfig);
        insta::assert_snapshot!(err, @"bad configuration: recursive node reference: a → b → a");
    }

    #[test]
    fn test_cycle() {
        let nodes = [
            node("first", &[("second", TL)]),
            node("second", &[("third", TL)]),
            node("third", &[("first", TL)]),
        ];
        let err = determine_node_order(&nodes).unwrap_err();
        insta::assert_snapshot!(err, @"bad configuration: recursive node reference: first → second → third → first");
    }

    #[test]
    fn test_duplicate_name() {
        let nodes = [node("aaa", &[]), node("bbb", &[]), node("aaa", &[])];
        let err = determine_node_order(&nodes).unwrap_err();
        insta::assert_snapshot!(err, @r#"bad configuration: multiple nodes with name "aaa", first occurrence at index 0"#);
    }

    #[test]
    fn test_missing_reference() {
        let nodes = [node("first", &[("nothere", TL)])];
        let err = determine_node_order(&nodes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadConfig);
        assert!(err.to_string().contains(r#"referenced node "nothere" not found"#), "{err}");
    }

    #[test]
    fn test_unsupported_feature() {
        let nodes = [
            node("first", &[("second", FeatureKind::Unspecified)]),
            node("second", &[]),
        ];
        let err = determine_node_order(&nodes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadConfig);
        assert!(err.is(ErrorKind::NodeFeatureUnavailable));
    }
}
