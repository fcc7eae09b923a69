//! Flexible rectangle compilation and resolution through the public API.

use dossier_core::config::RectConfig;
use dossier_core::flexrect::{FeatureKind, FeatureLookup, FlexRect};
use dossier_core::geometry::{Length, Point, Rect};
use dossier_core::{DossierError, ErrorKind, Result};

fn title_lookup(name: &str, kind: FeatureKind) -> Result<Point> {
    match (name, kind) {
        ("title", FeatureKind::BottomLeft) => Ok(Point::new(Length::from_cm(3.0), Length::from_cm(8.0))),
        _ => Err(DossierError::NodePositionUnknown(format!("{name}:{kind}"))),
    }
}

fn compile(json: &str) -> Result<FlexRect> {
    let config: RectConfig = serde_json::from_str(json).expect("valid rect json");
    FlexRect::compile(&config)
}

#[test]
fn test_incomplete() {
    for json in [r#"{}"#, r#"{"top": {}}"#, r#"{"top_left": {}}"#] {
        let err = compile(json).unwrap_err();
        assert!(err.is(ErrorKind::IncompleteConfig), "{json}: {err}");
    }
}

#[test]
fn test_resolve() {
    for (name, json, want) in [
        (
            "absolute edges",
            r#"{"top": {"abs": {"cm": 3}}, "right": {"abs": {"cm": 4}},
                "bottom": {"abs": {"cm": 5}}, "left": {"abs": {"cm": 1}}}"#,
            Rect::from_centimeters(1.0, 3.0, 4.0, 5.0),
        ),
        (
            "absolute vertices",
            r#"{"top_left": {"abs": {"left": "1cm", "top": "3cm"}},
                "bottom_right": {"abs": {"left": "4cm", "top": "5cm"}}}"#,
            Rect::from_centimeters(1.0, 3.0, 4.0, 5.0),
        ),
        (
            "top left with size",
            r#"{"top_left": {"abs": {"left": "1cm", "top": "3cm"}}, "width": "3cm", "height": "2cm"}"#,
            Rect::from_centimeters(1.0, 3.0, 4.0, 5.0),
        ),
        (
            "top right with size",
            r#"{"top_right": {"abs": {"left": "4cm", "top": "5cm"}}, "width": "3cm", "height": "2cm"}"#,
            Rect::from_centimeters(1.0, 5.0, 4.0, 7.0),
        ),
        (
            "bottom right with size",
            r#"{"bottom_right": {"abs": {"left": "4cm", "top": "5cm"}}, "width": "3cm", "height": "2cm"}"#,
            Rect::from_centimeters(1.0, 3.0, 4.0, 5.0),
        ),
        (
            "bottom left with size",
            r#"{"bottom_left": {"abs": {"left": "4cm", "top": "5cm"}}, "width": "3cm", "height": "2cm"}"#,
            Rect::from_centimeters(4.0, 3.0, 7.0, 5.0),
        ),
        (
            "top left relative to title",
            r#"{"top_left": {"rel": {"node": "title", "feature": "bottom_left",
                                     "offset": {"width": "5mm", "height": "1mm"}}},
                "width": "10cm", "height": "3cm"}"#,
            Rect::from_centimeters(3.5, 8.1, 13.5, 11.1),
        ),
        (
            "bottom left relative to title",
            r#"{"bottom_left": {"rel": {"node": "title", "feature": "bottom_left"}},
                "width": "9cm", "height": "7cm"}"#,
            Rect::from_centimeters(3.0, 1.0, 12.0, 8.0),
        ),
        (
            "edges and corners",
            r#"{"left": {"rel": {"node": "title", "feature": "bottom_left", "offset": "-1cm"}},
                "top": {"rel": {"node": "title", "feature": "bottom_left"}},
                "bottom_right": {"abs": {"left": "20cm", "top": "10cm"}}}"#,
            Rect::from_centimeters(2.0, 8.0, 20.0, 10.0),
        ),
    ] {
        let rect = compile(json).unwrap_or_else(|e| panic!("{name}: {e}"));
        let got = rect.resolve(&title_lookup).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(
            got.approx_eq(&want, Length::APPROX_MARGIN),
            "{name}: got {got}, want {want}"
        );
    }
}

#[test]
fn test_conflict_lists_all_sources() {
    let err = compile(
        r#"{"top": {"abs": "1cm"}, "bottom": {"abs": "3cm"}, "height": "2cm",
            "left": {"abs": "0"}, "right": {"abs": "1cm"}}"#,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Multiple);
    insta::assert_snapshot!(err, @r#"bad configuration: conflicting position sources for "top": ["top (distance 28.346pt)", "-56.693pt from bottom (distance 85.039pt)"]; bad configuration: conflicting position sources for "bottom": ["bottom (distance 85.039pt)", "56.693pt from top (distance 28.346pt)"]"#);
}

#[test]
fn test_required_node_features() {
    let rect = compile(
        r#"{"top": {"rel": {"node": "b", "feature": "top_left"}},
            "left": {"rel": {"node": "b", "feature": "top_left", "offset": "1cm"}},
            "bottom_right": {"rel": {"node": "a", "feature": "top_right"}}}"#,
    )
    .unwrap();

    let features: Vec<String> = rect
        .required_node_features()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(features, ["a:top_right", "b:top_left"]);
}

#[test]
fn test_missing_node_is_position_unknown() {
    let rect = compile(
        r#"{"top_left": {"rel": {"node": "other", "feature": "top_left"}},
            "width": "1cm", "height": "1cm"}"#,
    )
    .unwrap();

    let err = rect.resolve(&title_lookup).unwrap_err();
    assert!(err.is(ErrorKind::NodePositionUnknown), "{err}");
}

struct Fixed(Point);

impl FeatureLookup for Fixed {
    fn node_feature_position(&self, _name: &str, _kind: FeatureKind) -> Result<Point> {
        Ok(self.0)
    }
}

#[test]
fn test_resolve_many_times() {
    let rect = compile(
        r#"{"top_left": {"rel": {"node": "anchor", "feature": "bottom_right"}},
            "width": "10pt", "height": "5pt"}"#,
    )
    .unwrap();

    for offset in [0.0, 12.5, 100.0] {
        let anchor = Point::new(Length::from_pt(offset), Length::from_pt(offset * 2.0));
        let got = rect.resolve(&Fixed(anchor)).unwrap();
        assert_eq!(
            got,
            Rect::from_points(offset, offset * 2.0, offset + 10.0, offset * 2.0 + 5.0)
        );
    }
}
