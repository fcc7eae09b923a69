//! Shared builders for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use dossier_core::content::{Block, Line, PageContent};
use dossier_core::geometry::{Length, Rect, Size};
use dossier_core::Page;

/// A4 in points.
pub const A4: Size = Size::new(Length::from_pt(595.276), Length::from_pt(841.89));

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_string(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture readable")
}

/// A line with evenly spaced characters; coordinates in points.
pub fn line(left: f64, top: f64, right: f64, bottom: f64, text: &str) -> Line {
    Line::from_text(Rect::from_points(left, top, right, bottom), text)
}

/// A single-line block.
pub fn text_block(left: f64, top: f64, right: f64, bottom: f64, text: &str) -> Block {
    Block::new(vec![line(left, top, right, bottom, text)])
}

pub fn page_content(number: usize, blocks: Vec<Block>) -> PageContent {
    PageContent::new(number, A4, blocks)
}

pub fn page(number: usize, blocks: Vec<Block>) -> Page {
    Page::new(page_content(number, blocks))
}

#[track_caller]
pub fn assert_rect_approx(got: Rect, want: Rect) {
    assert!(
        got.approx_eq(&want, Length::from_pt(1e-6)),
        "got {got}, want {want}"
    );
}
